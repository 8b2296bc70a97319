//! Classification of how a new patch set relates to its predecessor.

use serde::{Deserialize, Serialize};

/// Kind of difference between two consecutive patch sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeKind {
    /// Anything that is not one of the cheaper cases below.
    Rework,
    /// Same tree diff, rebased onto a new parent without conflicts.
    TrivialRebase,
    /// Same tree and parent; only the commit message changed.
    NoCodeChange,
}

impl From<&str> for ChangeKind {
    fn from(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "TRIVIAL_REBASE" => Self::TrivialRebase,
            "NO_CODE_CHANGE" => Self::NoCodeChange,
            _ => Self::Rework,
        }
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rework => write!(f, "REWORK"),
            Self::TrivialRebase => write!(f, "TRIVIAL_REBASE"),
            Self::NoCodeChange => write!(f, "NO_CODE_CHANGE"),
        }
    }
}
