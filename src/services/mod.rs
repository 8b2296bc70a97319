//! Business logic over the approval store.
//!
//! Nothing here begins or commits a transaction; callers decide the
//! transaction boundary and pass the connection in.

pub mod categories;
pub mod label_copy;
pub mod reviewers;

pub use label_copy::{copy_labels, copy_labels_from, CopyPolicy};
pub use reviewers::{
    add_reviewers, add_reviewers_for_patch_set, get_reviewers, get_reviewers_for_change,
    ReviewerSet, ReviewerState,
};
