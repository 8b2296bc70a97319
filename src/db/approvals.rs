//! Database queries for patch set approvals.

use crate::models::{ChangeId, PatchSetApproval, PatchSetId};
use sqlx::SqliteConnection;

/// All approvals on every patch set of a change, oldest patch set first.
pub async fn by_change(
    conn: &mut SqliteConnection,
    change_id: ChangeId,
) -> Result<Vec<PatchSetApproval>, sqlx::Error> {
    sqlx::query_as::<_, PatchSetApproval>(
        r#"
        SELECT change_id, patch_set_id, account_id, category_id, value, granted
        FROM patch_set_approvals
        WHERE change_id = ?
        ORDER BY patch_set_id, rowid
        "#,
    )
    .bind(change_id.0)
    .fetch_all(conn)
    .await
}

/// All approvals on a single patch set, in insertion order.
pub async fn by_patch_set(
    conn: &mut SqliteConnection,
    patch_set_id: PatchSetId,
) -> Result<Vec<PatchSetApproval>, sqlx::Error> {
    sqlx::query_as::<_, PatchSetApproval>(
        r#"
        SELECT change_id, patch_set_id, account_id, category_id, value, granted
        FROM patch_set_approvals
        WHERE change_id = ? AND patch_set_id = ?
        ORDER BY rowid
        "#,
    )
    .bind(patch_set_id.change_id.0)
    .bind(patch_set_id.number)
    .fetch_all(conn)
    .await
}

/// Insert approvals.
///
/// A record whose key already exists fails with a unique constraint
/// violation. Rows written before the failure stay unless the caller rolls
/// back its transaction.
pub async fn insert(
    conn: &mut SqliteConnection,
    approvals: &[PatchSetApproval],
) -> Result<(), sqlx::Error> {
    for approval in approvals {
        sqlx::query(
            r#"
            INSERT INTO patch_set_approvals (change_id, patch_set_id, account_id, category_id, value, granted)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(approval.change_id().0)
        .bind(approval.patch_set_id().number)
        .bind(approval.account_id().0)
        .bind(approval.label_id().as_str())
        .bind(approval.value)
        .bind(approval.granted)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}
