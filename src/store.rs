//!
//! # User store
//!
//! Thin persistence layer for user records. The auth orchestrator depends on
//! exactly two operations: lookup by email and insert. Queries are
//! runtime-checked so the crate builds without a live database.
//!
//! The `users` table carries a unique constraint on `email`; that constraint,
//! not application logic, is what resolves concurrent registrations of the
//! same address (one insert succeeds, the other surfaces here as a conflict).

use sqlx::PgPool;

use crate::error::AppError;
use crate::models::User;

#[derive(Clone)]
pub struct UserStore {
    pool: PgPool,
}

impl UserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Looks up a user by exact, case-sensitive email match.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, created_at, updated_at \
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Persists a new user record. A unique-constraint violation on email is
    /// reported as `Conflict` so registration races map to the same outcome
    /// as an up-front duplicate check.
    pub async fn insert(&self, user: &User) -> Result<User, AppError> {
        let inserted = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, name, email, password_hash, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id, name, email, password_hash, created_at, updated_at",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("user with this email already exists".into())
            }
            _ => AppError::from(e),
        })?;

        Ok(inserted)
    }
}
