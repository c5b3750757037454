//! Demo content for a fresh installation.
//!
//! Seeds four avatars and a starter world with two modules, each carrying a
//! quiz. Does nothing when any avatar already exists, so it is safe to run
//! on every startup.

use sqlx::PgPool;

use crate::repositories::progress_repo::{lock_all_users, recompute_all_progress};

/// Avatars offered out of the box: (name, image URL).
const DEMO_AVATARS: &[(&str, &str)] = &[
    ("Mario", "/assets/avatar_mario.png"),
    ("Luigi", "/assets/avatar_luigi.png"),
    ("Princess Peach", "/assets/avatar_peach.png"),
    ("Yoshi", "/assets/avatar_yoshi.png"),
];

struct DemoModule {
    title: &'static str,
    content: &'static str,
    question: &'static str,
    correct_answer: &'static str,
    incorrect_answer: &'static str,
    score_value: i32,
}

const DEMO_MODULES: &[DemoModule] = &[
    DemoModule {
        title: "Introduction to the Concepts",
        content: "Welcome to the first module of the platform!\n\n\
                  Here you will learn the fundamentals everything else builds on:\n\
                  - Key definitions\n\
                  - Fundamental principles\n\
                  - Practical applications\n\n\
                  Finish the activity at the end to test what you learned.",
        question: "Which idea is the most important one in this module?",
        correct_answer: "Fundamental principles",
        incorrect_answer: "Advanced applications",
        score_value: 10,
    },
    DemoModule {
        title: "Putting It into Practice",
        content: "Now that you know the basics, let's apply them.\n\n\
                  This module covers:\n\
                  - Real-world examples\n\
                  - Hands-on exercises\n\
                  - Common use cases\n\n\
                  Get ready for the final challenge!",
        question: "How do we apply the concepts in practice?",
        correct_answer: "Through hands-on exercises",
        incorrect_answer: "Only by studying theory",
        score_value: 15,
    },
];

/// Insert the demo catalog unless content already exists.
///
/// Returns `true` if data was inserted.
pub async fn seed_demo_content(pool: &PgPool) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let already_seeded: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM avatars)")
        .fetch_one(&mut *tx)
        .await?;
    if already_seeded {
        tracing::debug!("Demo content already present, skipping seed");
        return Ok(false);
    }

    lock_all_users(&mut tx).await?;

    for (name, image_url) in DEMO_AVATARS {
        sqlx::query("INSERT INTO avatars (name, image_url) VALUES ($1, $2)")
            .bind(*name)
            .bind(*image_url)
            .execute(&mut *tx)
            .await?;
    }

    let world_id: i64 = sqlx::query_scalar(
        "INSERT INTO worlds (name, description, image_url, sort_order)
         VALUES ($1, $2, $3, 1)
         RETURNING id",
    )
    .bind("World 1: Fundamentals")
    .bind("Learn the basic concepts")
    .bind("/assets/world_background.png")
    .fetch_one(&mut *tx)
    .await?;

    for (idx, demo) in DEMO_MODULES.iter().enumerate() {
        let module_id: i64 = sqlx::query_scalar(
            "INSERT INTO modules (world_id, title, content, sort_order)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(world_id)
        .bind(demo.title)
        .bind(demo.content)
        .bind(idx as i32 + 1)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO activities (module_id, question, correct_answer, incorrect_answer, score_value)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(module_id)
        .bind(demo.question)
        .bind(demo.correct_answer)
        .bind(demo.incorrect_answer)
        .bind(demo.score_value)
        .execute(&mut *tx)
        .await?;
    }

    // Users created before the seed must see the new catalog size.
    recompute_all_progress(&mut tx).await?;
    tx.commit().await?;

    tracing::info!(
        avatars = DEMO_AVATARS.len(),
        modules = DEMO_MODULES.len(),
        "Demo content seeded"
    );
    Ok(true)
}
