//! Change, patch set and account identity models.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric identity of a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeId(pub i64);

impl fmt::Display for ChangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Numeric identity of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub i64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of one patch set: the owning change plus its revision number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchSetId {
    pub change_id: ChangeId,
    pub number: i32,
}

impl PatchSetId {
    pub fn new(change_id: ChangeId, number: i32) -> Self {
        Self { change_id, number }
    }
}

impl fmt::Display for PatchSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.change_id, self.number)
    }
}

/// A proposed change under review.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    pub id: ChangeId,

    /// Account that uploaded the change.
    pub owner: AccountId,

    /// Revision number of the current patch set.
    pub current_patch_set: i32,
}

impl Change {
    pub fn current_patch_set_id(&self) -> PatchSetId {
        PatchSetId::new(self.id, self.current_patch_set)
    }
}

/// One revision of a change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchSet {
    pub id: PatchSetId,

    /// Drafts are only visible to the owner and explicitly added reviewers.
    #[serde(default)]
    pub draft: bool,
}

/// Commit metadata resolved for a patch set.
///
/// Author and committer are `None` when their identity does not map onto a
/// known account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchSetInfo {
    pub author: Option<AccountId>,
    pub committer: Option<AccountId>,
}
