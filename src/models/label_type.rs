//! Label type registry.
//!
//! A label type describes one scoring dimension (e.g. `Code-Review`), its
//! allowed values, and whether scores carry forward to new patch sets.

use super::approval::{LabelId, PatchSetApproval};
use serde::{Deserialize, Serialize};

/// One permitted score on a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelValue {
    pub value: i16,
    pub text: String,
}

impl LabelValue {
    pub fn new(value: i16, text: impl Into<String>) -> Self {
        Self {
            value,
            text: text.into(),
        }
    }
}

/// Configuration of a single label.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelType {
    pub name: LabelId,

    #[serde(default)]
    pub values: Vec<LabelValue>,

    /// Carry the most negative score forward.
    #[serde(default)]
    pub copy_min_score: bool,

    /// Carry the most positive score forward.
    #[serde(default)]
    pub copy_max_score: bool,

    #[serde(default)]
    pub copy_all_scores_on_trivial_rebase: bool,

    #[serde(default)]
    pub copy_all_scores_if_no_code_change: bool,
}

impl LabelType {
    pub fn new(name: impl Into<String>, values: Vec<LabelValue>) -> Self {
        Self {
            name: LabelId::new(name),
            values,
            copy_min_score: false,
            copy_max_score: false,
            copy_all_scores_on_trivial_rebase: false,
            copy_all_scores_if_no_code_change: false,
        }
    }

    pub fn label_id(&self) -> &LabelId {
        &self.name
    }

    /// Lowest permitted value, if any values are configured.
    pub fn min(&self) -> Option<&LabelValue> {
        self.values.iter().min_by_key(|v| v.value)
    }

    /// Highest permitted value, if any values are configured.
    pub fn max(&self) -> Option<&LabelValue> {
        self.values.iter().max_by_key(|v| v.value)
    }

    pub fn is_max_negative(&self, approval: &PatchSetApproval) -> bool {
        self.min().is_some_and(|v| v.value == approval.value)
    }

    pub fn is_max_positive(&self, approval: &PatchSetApproval) -> bool {
        self.max().is_some_and(|v| v.value == approval.value)
    }
}

/// Ordered set of configured labels.
///
/// Order is significant: the last label has the lowest priority and is used
/// for reviewer placeholders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelTypes {
    types: Vec<LabelType>,
}

impl LabelTypes {
    pub fn new(types: Vec<LabelType>) -> Self {
        Self { types }
    }

    pub fn label_types(&self) -> &[LabelType] {
        &self.types
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn by_label(&self, id: &LabelId) -> Option<&LabelType> {
        self.types.iter().find(|t| &t.name == id)
    }

    /// Label used when a reviewer needs a zero-score placeholder.
    pub fn lowest_priority(&self) -> Option<&LabelType> {
        self.types.last()
    }
}
