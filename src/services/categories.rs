//! Approval category lookups for display.

use crate::db::categories;
use crate::error::AppError;
use crate::models::{ApprovalCategory, ApprovalCategoryId};
use sqlx::SqliteConnection;

/// Categories split by how they are presented.
#[derive(Debug, Clone, Default)]
pub struct CategoryLayout {
    /// Score columns in the approvals table, sorted by `(position, name)`.
    pub columns: Vec<ApprovalCategory>,
    /// Actions such as Submit.
    pub actions: Vec<ApprovalCategory>,
}

/// Fetch a category that must exist.
pub async fn get_category(
    conn: &mut SqliteConnection,
    id: &ApprovalCategoryId,
) -> Result<ApprovalCategory, AppError> {
    categories::get(conn, id)
        .await?
        .ok_or_else(|| AppError::not_found_with_id("ApprovalCategory", id.get()))
}

pub async fn category_layout(conn: &mut SqliteConnection) -> Result<CategoryLayout, AppError> {
    let (actions, columns): (Vec<_>, Vec<_>) = categories::list(conn)
        .await?
        .into_iter()
        .partition(ApprovalCategory::is_action);

    Ok(CategoryLayout { columns, actions })
}
