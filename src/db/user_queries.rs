use sqlx::PgPool;

use crate::models::{CreateUser, User};

pub async fn fetch_one(pool: &PgPool, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, name, email, created_at
         FROM users
         WHERE id = $1"
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn create(pool: &PgPool, input: CreateUser) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (name, email)
         VALUES ($1, $2)
         RETURNING id, name, email, created_at"
    )
    .bind(input.name)
    .bind(input.email)
    .fetch_one(pool)
    .await
}
