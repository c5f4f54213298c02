/**
 * Account Model and Database Operations
 *
 * Accounts are the auth provider's records (email + bcrypt hash). Profiles
 * live separately in the `users` document collection.
 */

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::shared::api::AccountResponse;

/// Account row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    pub id: String,
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Public view of the account (no secrets)
    pub fn to_response(&self) -> AccountResponse {
        AccountResponse {
            id: self.id.clone(),
            email: self.email.clone(),
        }
    }
}

/// Create a new account
///
/// # Errors
/// Fails with a unique violation if the email is taken.
pub async fn create_account(
    pool: &SqlitePool,
    email: &str,
    password_hash: &str,
) -> Result<Account, sqlx::Error> {
    let id = Uuid::new_v4().simple().to_string();
    let now = Utc::now();

    sqlx::query_as::<_, Account>(
        r#"
        INSERT INTO accounts (id, email, password_hash, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?4)
        RETURNING id, email, password_hash, created_at, updated_at
        "#,
    )
    .bind(&id)
    .bind(email)
    .bind(password_hash)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Get account by email (case-insensitive)
pub async fn get_account_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as::<_, Account>(
        r#"
        SELECT id, email, password_hash, created_at, updated_at
        FROM accounts
        WHERE email = ?1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

pub async fn get_account_by_id(pool: &SqlitePool, id: &str) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as::<_, Account>(
        r#"
        SELECT id, email, password_hash, created_at, updated_at
        FROM accounts
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn update_email(pool: &SqlitePool, id: &str, email: &str) -> Result<Account, sqlx::Error> {
    sqlx::query_as::<_, Account>(
        r#"
        UPDATE accounts
        SET email = ?1, updated_at = ?2
        WHERE id = ?3
        RETURNING id, email, password_hash, created_at, updated_at
        "#,
    )
    .bind(email)
    .bind(Utc::now())
    .bind(id)
    .fetch_one(pool)
    .await
}

pub async fn update_password_hash(
    pool: &SqlitePool,
    id: &str,
    password_hash: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE accounts SET password_hash = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(password_hash)
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Delete an account; returns whether a row was removed
pub async fn delete_account(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM accounts WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Whether a database error is a unique-constraint violation
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db_err| db_err.is_unique_violation())
        .unwrap_or(false)
}
