use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Note record in the database. Every accessor below filters by
/// `(id, user_id)`, so a foreign note is indistinguishable from a missing
/// one.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Note {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: OffsetDateTime,
}

impl Note {
    /// Insert a new note for `user_id`; `created_at` is stamped by the
    /// database.
    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<Note, sqlx::Error> {
        sqlx::query_as::<_, Note>(
            r#"
            INSERT INTO notes (user_id, title, content)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, title, content, created_at
            "#,
        )
        .bind(user_id)
        .bind(title)
        .bind(content)
        .fetch_one(db)
        .await
    }

    pub async fn list_by_owner(db: &PgPool, user_id: Uuid) -> Result<Vec<Note>, sqlx::Error> {
        sqlx::query_as::<_, Note>(
            r#"
            SELECT id, user_id, title, content, created_at
            FROM notes
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await
    }

    pub async fn get_owned(
        db: &PgPool,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Note>, sqlx::Error> {
        sqlx::query_as::<_, Note>(
            r#"
            SELECT id, user_id, title, content, created_at
            FROM notes
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await
    }

    /// Replace title and content wholesale. `created_at` is untouched.
    /// Returns false when the `(id, owner)` pair matched nothing.
    pub async fn update_owned(
        db: &PgPool,
        user_id: Uuid,
        id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE notes
            SET title = $3, content = $4
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(title)
        .bind(content)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Returns false when the `(id, owner)` pair matched nothing.
    pub async fn delete_owned(db: &PgPool, user_id: Uuid, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM notes
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
