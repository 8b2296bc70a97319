//! Database queries for approval categories.

use crate::models::{ApprovalCategory, ApprovalCategoryId};
use sqlx::SqliteConnection;

/// Insert a category, or update name and position if the id exists.
pub async fn upsert(
    conn: &mut SqliteConnection,
    category: &ApprovalCategory,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO approval_categories (category_id, name, position)
        VALUES (?, ?, ?)
        ON CONFLICT(category_id) DO UPDATE SET
            name = excluded.name,
            position = excluded.position
        "#,
    )
    .bind(category.id().get())
    .bind(category.name())
    .bind(category.position())
    .execute(conn)
    .await?;

    Ok(())
}

pub async fn get(
    conn: &mut SqliteConnection,
    id: &ApprovalCategoryId,
) -> Result<Option<ApprovalCategory>, sqlx::Error> {
    sqlx::query_as::<_, ApprovalCategory>(
        "SELECT category_id, name, position FROM approval_categories WHERE category_id = ?",
    )
    .bind(id.get())
    .fetch_optional(conn)
    .await
}

/// All categories sorted by `(position, name)`. Actions sort first.
pub async fn list(conn: &mut SqliteConnection) -> Result<Vec<ApprovalCategory>, sqlx::Error> {
    sqlx::query_as::<_, ApprovalCategory>(
        "SELECT category_id, name, position FROM approval_categories ORDER BY position, name",
    )
    .fetch_all(conn)
    .await
}
