//! Data models for changes, patch sets and approvals.
//!
//! Records that live in the SQLite store implement `FromRow` by hand because
//! their keys are composite.

pub mod approval;
pub mod approval_category;
pub mod change;
pub mod change_kind;
pub mod label_type;

// Re-exports for convenient access
pub use approval::{LabelId, PatchSetApproval, PatchSetApprovalKey};
pub use approval_category::{ApprovalCategory, ApprovalCategoryId};
pub use change::{AccountId, Change, ChangeId, PatchSet, PatchSetId, PatchSetInfo};
pub use change_kind::ChangeKind;
pub use label_type::{LabelType, LabelTypes, LabelValue};
