//! Integration tests for leaderboard queries.

mod common;

use common::{create_ranked_user, position_by_count, rank_key, RankKey};
use questlearn_db::repositories::{RankingRepo, StatsRepo};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_time_spent_breaks_score_ties(pool: PgPool) {
    let a = create_ranked_user(&pool, "a", 150, 200).await;
    let b = create_ranked_user(&pool, "b", 150, 100).await;

    let ranking = RankingRepo::list(&pool).await.unwrap();
    let ids: Vec<i64> = ranking.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![b.id, a.id]);

    assert_eq!(RankingRepo::position(&pool, b.id).await.unwrap(), Some(1));
    assert_eq!(RankingRepo::position(&pool, a.id).await.unwrap(), Some(2));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_is_ordered(pool: PgPool) {
    for (i, (score, time)) in [(10, 5), (300, 90), (300, 30), (0, 0), (75, 75)]
        .into_iter()
        .enumerate()
    {
        create_ranked_user(&pool, &format!("user{i}"), score, time).await;
    }

    let ranking = RankingRepo::list(&pool).await.unwrap();
    assert_eq!(ranking.len(), 5);
    for pair in ranking.windows(2) {
        let (i, j) = (&pair[0], &pair[1]);
        assert!(
            i.score > j.score || (i.score == j.score && i.time_spent <= j.time_spent),
            "{} must not rank after {}",
            i.username,
            j.username
        );
    }
}

/// The counted position, the list index and the in-memory order agree for
/// every user, including users with identical score and time.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_position_matches_list_index(pool: PgPool) {
    for i in 0..12_i64 {
        create_ranked_user(&pool, &format!("p{i}"), (i % 3) * 100, (i % 2) * 60).await;
    }

    let ranking = RankingRepo::list(&pool).await.unwrap();
    let mut keys: Vec<RankKey> = ranking.iter().map(rank_key).collect();
    keys.sort();

    for (idx, row) in ranking.iter().enumerate() {
        let expected = idx as i64 + 1;
        assert_eq!(keys[idx].2, row.id, "SQL and in-memory order disagree");
        assert_eq!(
            RankingRepo::position(&pool, row.id).await.unwrap(),
            Some(expected)
        );
        assert_eq!(position_by_count(&keys, &rank_key(row)), expected);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_top_is_prefix_of_list(pool: PgPool) {
    for i in 0..8_i64 {
        create_ranked_user(&pool, &format!("t{i}"), i * 10, 0).await;
    }

    let full = RankingRepo::list(&pool).await.unwrap();
    let top = RankingRepo::top(&pool, 3).await.unwrap();
    assert_eq!(top.len(), 3);
    for (t, f) in top.iter().zip(&full) {
        assert_eq!(t.id, f.id);
    }

    let all = RankingRepo::top(&pool, 100).await.unwrap();
    assert_eq!(all.len(), full.len());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_user_has_no_position(pool: PgPool) {
    assert_eq!(RankingRepo::position(&pool, 12345).await.unwrap(), None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_stats_top_users_limited_to_five(pool: PgPool) {
    for i in 0..7_i64 {
        create_ranked_user(&pool, &format!("s{i}"), i, 0).await;
    }

    let top = StatsRepo::top_users(&pool).await.unwrap();
    assert_eq!(top.len(), 5);
    assert_eq!(top[0].score, 6);
}
