//! Approval category model.

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};
use std::fmt;

/// Short unique identifier of a category (at most 4 characters in storage).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApprovalCategoryId(String);

impl ApprovalCategoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id of the special "Submit" action.
    pub fn submit() -> Self {
        Self::new(ApprovalCategory::SUBMIT)
    }

    pub fn get(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApprovalCategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A kind of approval that can be associated with a change.
///
/// The id is fixed at construction. A negative `position` hides the category
/// from the approvals table and turns it into an action the user may perform
/// (e.g. Submit). Non-negative positions are shown, sorted by
/// `(position, name)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalCategory {
    id: ApprovalCategoryId,
    name: String,
    position: i16,
}

impl ApprovalCategory {
    pub const SUBMIT: &'static str = "SUBM";

    pub fn new(id: ApprovalCategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            position: 0,
        }
    }

    pub fn id(&self) -> &ApprovalCategoryId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn position(&self) -> i16 {
        self.position
    }

    pub fn set_position(&mut self, position: i16) {
        self.position = position;
    }

    pub fn is_action(&self) -> bool {
        self.position < 0
    }
}

impl<'r> FromRow<'r, SqliteRow> for ApprovalCategory {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let mut category = Self::new(
            ApprovalCategoryId::new(row.try_get::<String, _>("category_id")?),
            row.try_get::<String, _>("name")?,
        );
        category.set_position(row.try_get("position")?);
        Ok(category)
    }
}
