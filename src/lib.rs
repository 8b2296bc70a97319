//! Patchset Approvals - reviewer and approval bookkeeping for code review.
//!
//! Decides who is a reviewer and who is only CCed on a change, carries label
//! scores forward to new patch sets, and keeps a placeholder approval for
//! every reviewer so they stay attached to the change.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use config::{load_config, ReviewConfig};
pub use error::AppError;
