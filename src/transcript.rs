//! Structured run records
//!
//! The cleanup driver returns these values; turning them into text is the
//! job of [`crate::ui`].

use serde::Serialize;
use crate::framework::FrameworkSummary;

/// What happened to a single policy name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Removed along with `clause_count` clauses (counted before deletion)
    Deleted { name: String, clause_count: usize },
    NotFound { name: String },
    /// Deletion failed for this name only
    Failed { name: String, reason: String },
    /// Dry-run counterpart of `Deleted`
    WouldDelete { name: String, clause_count: usize },
}

impl Outcome {
    pub fn name(&self) -> &str {
        match self {
            Outcome::Deleted { name, .. }
            | Outcome::NotFound { name }
            | Outcome::Failed { name, .. }
            | Outcome::WouldDelete { name, .. } => name.as_str(),
        }
    }

    /// Leading marker of the transcript line
    pub fn marker(&self) -> &'static str {
        match self {
            Outcome::Deleted { .. } => "Deleted",
            Outcome::NotFound { .. } => "Not found",
            Outcome::Failed { .. } => "Failed",
            Outcome::WouldDelete { .. } => "Would delete",
        }
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, Outcome::Deleted { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Outcome::NotFound { .. })
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Deleted { name, clause_count } | Outcome::WouldDelete { name, clause_count } => {
                write!(f, "{} {} ({})", self.marker(), name, clause_count)
            }
            Outcome::NotFound { name } => write!(f, "{} {}", self.marker(), name),
            Outcome::Failed { name, reason } => write!(f, "{} {}: {}", self.marker(), name, reason),
        }
    }
}

/// Registry contents at a point in time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Listing {
    pub total: usize,
    /// Sorted lexicographically by name
    pub frameworks: Vec<FrameworkSummary>,
}

impl Listing {
    pub fn names(&self) -> Vec<&str> {
        self.frameworks.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.frameworks.is_empty()
    }
}

/// Result of a completed cleanup run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transcript {
    /// One entry per policy name, in policy order
    pub outcomes: Vec<Outcome>,
    /// Post-state of the registry
    pub remaining: Listing,
}

impl Transcript {
    pub fn deleted_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_deleted()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, Outcome::Failed { .. }))
            .count()
    }

    /// True when nothing in the policy was present
    pub fn is_noop(&self) -> bool {
        self.outcomes.iter().all(Outcome::is_not_found)
    }
}
