//! Admin user accounts

use shared::models::User;
use sqlx::PgPool;

#[derive(sqlx::FromRow)]
pub struct UserCredentials {
    pub id: String,
    pub username: String,
    pub hashed_password: String,
}

pub async fn find_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<UserCredentials>, sqlx::Error> {
    sqlx::query_as("SELECT id, username, hashed_password FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await
}

pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as("SELECT id, username FROM users ORDER BY username")
        .fetch_all(pool)
        .await
}

pub async fn create(
    pool: &PgPool,
    username: &str,
    hashed_password: &str,
) -> Result<User, sqlx::Error> {
    let id = uuid::Uuid::new_v4().to_string();
    sqlx::query_as(
        "INSERT INTO users (id, username, hashed_password) VALUES ($1, $2, $3)
         RETURNING id, username",
    )
    .bind(&id)
    .bind(username)
    .bind(hashed_password)
    .fetch_one(pool)
    .await
}
