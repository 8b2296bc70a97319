//! Configuration for label types and the local store.
//!
//! Settings are read from a JSON file. Every field has a default, so a missing
//! file or a partial file is fine.

use crate::error::AppError;
use crate::models::{LabelType, LabelTypes, LabelValue};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default maximum pooled connections.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default SQLite busy timeout in seconds.
pub const DEFAULT_BUSY_TIMEOUT_SECS: u64 = 30;

/// Connection pool settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DatabaseConfig {
    /// Maximum number of pooled connections.
    pub max_connections: u32,

    /// How long a writer waits on a locked database.
    pub busy_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            busy_timeout_secs: DEFAULT_BUSY_TIMEOUT_SECS,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Labels in priority order; the last one receives reviewer placeholders.
    pub labels: LabelTypes,

    pub database: DatabaseConfig,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            labels: default_label_types(),
            database: DatabaseConfig::default(),
        }
    }
}

/// `Verified` followed by `Code-Review`.
pub fn default_label_types() -> LabelTypes {
    let verified = LabelType::new(
        "Verified",
        vec![
            LabelValue::new(-1, "Fails"),
            LabelValue::new(0, "No score"),
            LabelValue::new(1, "Verified"),
        ],
    );

    let mut code_review = LabelType::new(
        "Code-Review",
        vec![
            LabelValue::new(-2, "This shall not be merged"),
            LabelValue::new(-1, "I would prefer this is not merged as is"),
            LabelValue::new(0, "No score"),
            LabelValue::new(1, "Looks good to me, but someone else must approve"),
            LabelValue::new(2, "Looks good to me, approved"),
        ],
    );
    code_review.copy_min_score = true;
    code_review.copy_all_scores_on_trivial_rebase = true;

    LabelTypes::new(vec![verified, code_review])
}

/// Load configuration from a JSON file.
///
/// A missing file yields the defaults. An unreadable or malformed file is an
/// error.
pub fn load_config(path: &Path) -> Result<ReviewConfig, AppError> {
    if !path.exists() {
        log::debug!("No config at {}, using defaults", path.display());
        return Ok(ReviewConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| AppError::config(format!("Failed to read {}: {}", path.display(), e)))?;

    let config: ReviewConfig = serde_json::from_str(&raw)?;
    Ok(config)
}
