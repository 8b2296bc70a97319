//! Patch set approval model.
//!
//! An approval doubles as a reviewer marker: a zero score is a placeholder
//! that keeps an account attached to the change without voting.

use super::change::{AccountId, ChangeId, PatchSetId};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};
use std::fmt;

/// Name of a label (scoring dimension), e.g. `Code-Review`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelId(pub String);

impl LabelId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LabelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique key of an approval: at most one record per key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchSetApprovalKey {
    pub patch_set_id: PatchSetId,
    pub account_id: AccountId,
    pub label_id: LabelId,
}

impl fmt::Display for PatchSetApprovalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.patch_set_id, self.account_id, self.label_id)
    }
}

/// A score given by one account on one label of one patch set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchSetApproval {
    pub key: PatchSetApprovalKey,

    /// Signed score. Zero marks a reviewer placeholder.
    pub value: i16,

    /// When the score was granted (Unix seconds).
    pub granted: i64,
}

impl PatchSetApproval {
    pub fn new(key: PatchSetApprovalKey, value: i16, granted: i64) -> Self {
        Self {
            key,
            value,
            granted,
        }
    }

    /// Copy of `src` attached to another patch set. Account, label, score and
    /// grant time are kept.
    pub fn copy_to(dest: PatchSetId, src: &PatchSetApproval) -> Self {
        Self {
            key: PatchSetApprovalKey {
                patch_set_id: dest,
                account_id: src.key.account_id,
                label_id: src.key.label_id.clone(),
            },
            value: src.value,
            granted: src.granted,
        }
    }

    pub fn patch_set_id(&self) -> PatchSetId {
        self.key.patch_set_id
    }

    pub fn change_id(&self) -> ChangeId {
        self.key.patch_set_id.change_id
    }

    pub fn account_id(&self) -> AccountId {
        self.key.account_id
    }

    pub fn label_id(&self) -> &LabelId {
        &self.key.label_id
    }

    /// Check if this is a zero-score reviewer placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.value == 0
    }
}

impl<'r> FromRow<'r, SqliteRow> for PatchSetApproval {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let patch_set_id = PatchSetId::new(
            ChangeId(row.try_get("change_id")?),
            row.try_get("patch_set_id")?,
        );
        Ok(Self {
            key: PatchSetApprovalKey {
                patch_set_id,
                account_id: AccountId(row.try_get("account_id")?),
                label_id: LabelId(row.try_get("category_id")?),
            },
            value: row.try_get("value")?,
            granted: row.try_get("granted")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approval(change: i64, ps: i32, account: i64, value: i16) -> PatchSetApproval {
        PatchSetApproval::new(
            PatchSetApprovalKey {
                patch_set_id: PatchSetId::new(ChangeId(change), ps),
                account_id: AccountId(account),
                label_id: LabelId::new("Code-Review"),
            },
            value,
            1_700_000_000,
        )
    }

    #[test]
    fn test_copy_to_replaces_only_patch_set() {
        let src = approval(5, 1, 100, -2);
        let dest = PatchSetId::new(ChangeId(5), 2);
        let copy = PatchSetApproval::copy_to(dest, &src);

        assert_eq!(copy.patch_set_id(), dest);
        assert_eq!(copy.account_id(), src.account_id());
        assert_eq!(copy.label_id(), src.label_id());
        assert_eq!(copy.value, -2);
        assert_eq!(copy.granted, src.granted);
    }

    #[test]
    fn test_key_display() {
        let a = approval(5, 1, 100, 1);
        assert_eq!(a.key.to_string(), "5,1,100,Code-Review");
    }

    #[test]
    fn test_placeholder() {
        assert!(approval(1, 1, 1, 0).is_placeholder());
        assert!(!approval(1, 1, 1, -1).is_placeholder());
    }
}
