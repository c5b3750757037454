//! Shared fixtures for repository integration tests.

#![allow(dead_code)]

use std::cmp::Reverse;

use questlearn_db::models::module::{CreateModule, Module};
use questlearn_db::models::progress::UserProgress;
use questlearn_db::models::ranking::RankingRow;
use questlearn_db::models::user::{CreateUser, User};
use questlearn_db::models::world::{CreateWorld, World};
use questlearn_db::repositories::{ModuleRepo, UserRepo, WorldRepo};
use sqlx::PgPool;

pub async fn create_user(pool: &PgPool, username: &str) -> User {
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@test.com"),
        is_admin: false,
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Create a user and overwrite its ranking fields directly.
pub async fn create_ranked_user(pool: &PgPool, username: &str, score: i64, time_spent: i64) -> User {
    let user = create_user(pool, username).await;
    sqlx::query("UPDATE users SET score = $2, time_spent = $3 WHERE id = $1")
        .bind(user.id)
        .bind(score)
        .bind(time_spent)
        .execute(pool)
        .await
        .expect("ranking fields update should succeed");
    UserRepo::find_by_id(pool, user.id).await.unwrap().unwrap()
}

pub async fn create_world(pool: &PgPool, name: &str, sort_order: i32) -> World {
    let input = CreateWorld {
        name: name.to_string(),
        description: String::new(),
        image_url: String::new(),
        sort_order,
    };
    WorldRepo::create(pool, &input)
        .await
        .expect("world creation should succeed")
}

pub async fn create_module(pool: &PgPool, world_id: i64, title: &str, sort_order: i32) -> Module {
    let input = CreateModule {
        world_id,
        title: title.to_string(),
        content: format!("Content of {title}"),
        sort_order,
    };
    ModuleRepo::create(pool, &input)
        .await
        .expect("module creation should succeed")
}

pub fn assert_progress(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "progress {actual} should equal {expected}"
    );
}

pub async fn ledger_row(pool: &PgPool, user_id: i64, module_id: i64) -> Option<UserProgress> {
    sqlx::query_as::<_, UserProgress>(
        "SELECT id, user_id, module_id, completed, score, completed_at, created_at, updated_at
         FROM user_progress
         WHERE user_id = $1 AND module_id = $2",
    )
    .bind(user_id)
    .bind(module_id)
    .fetch_optional(pool)
    .await
    .expect("ledger lookup should succeed")
}

pub async fn ledger_count_for_user(pool: &PgPool, user_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM user_progress WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .expect("ledger count should succeed")
}

pub async fn activity_count(pool: &PgPool, module_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM activities WHERE module_id = $1")
        .bind(module_id)
        .fetch_one(pool)
        .await
        .expect("activity count should succeed")
}

// ---------------------------------------------------------------------------
// In-memory leaderboard order
// ---------------------------------------------------------------------------

/// Sort key for the leaderboard: score desc, time spent asc, id asc.
pub type RankKey = (Reverse<i64>, i64, i64);

pub fn rank_key(row: &RankingRow) -> RankKey {
    (Reverse(row.score), row.time_spent, row.id)
}

/// 1-based position of `target` computed by counting keys strictly ahead.
pub fn position_by_count(keys: &[RankKey], target: &RankKey) -> i64 {
    keys.iter().filter(|k| *k < target).count() as i64 + 1
}
