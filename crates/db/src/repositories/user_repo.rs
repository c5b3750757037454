//! Repository for the `users` table.

use questlearn_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str = "id, username, email, avatar_id, score, progress, \
                                  time_spent, is_admin, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, is_admin)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(input.is_admin)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Return the user with `username`, creating it on first login.
    ///
    /// A concurrent first login for the same name resolves to the row that
    /// won the insert.
    pub async fn find_or_create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        if let Some(user) = Self::find_by_username(pool, &input.username).await? {
            return Ok(user);
        }

        let query = format!(
            "INSERT INTO users (username, email, is_admin)
             VALUES ($1, $2, $3)
             ON CONFLICT (username) DO NOTHING
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(input.is_admin)
            .fetch_optional(pool)
            .await?;

        match inserted {
            Some(user) => {
                tracing::info!(user_id = user.id, username = %user.username, "User created on first login");
                Ok(user)
            }
            None => Self::find_by_username(pool, &input.username)
                .await?
                .ok_or(sqlx::Error::RowNotFound),
        }
    }

    /// Make sure `username` exists and is an administrator.
    pub async fn ensure_admin(
        pool: &PgPool,
        username: &str,
        email: &str,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, is_admin)
             VALUES ($1, $2, true)
             ON CONFLICT (username) DO UPDATE SET is_admin = true
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .bind(email)
            .fetch_one(pool)
            .await
    }

    /// Point a user at an avatar. Returns `None` if the user does not exist.
    pub async fn set_avatar(
        pool: &PgPool,
        id: DbId,
        avatar_id: DbId,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET avatar_id = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(avatar_id)
            .fetch_optional(pool)
            .await
    }

    /// Flip the `is_admin` flag. Returns `None` if the user does not exist.
    pub async fn toggle_admin(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET is_admin = NOT is_admin
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a user together with its progress ledger rows.
    ///
    /// The user row is locked before the ledger is touched, the same order
    /// [`ProgressRepo::complete_module`](super::ProgressRepo::complete_module)
    /// takes its locks in.
    /// Returns `true` if the user existed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM users WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            return Ok(false);
        }

        let ledger = sqlx::query("DELETE FROM user_progress WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!(
            user_id = id,
            ledger_rows = ledger.rows_affected(),
            "User deleted with progress ledger"
        );
        Ok(true)
    }

    /// Number of registered users.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await
    }
}
