//! Registry record types
//!
//! Frameworks own clauses, clauses own sub-clauses. The core never mutates
//! these rows; it only reads them and deletes whole frameworks.

use serde::{Deserialize, Serialize};

/// A named body of compliance requirements (an ISO family, NIST CSF, GDPR, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Framework {
    /// Store row id
    pub id: i64,
    /// Human-readable name, unique across the registry
    pub name: String,
    pub description: Option<String>,
}

impl Framework {
    pub fn new(id: i64, name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description,
        }
    }
}

/// A numbered requirement within a framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    pub id: i64,
    pub framework_id: i64,
    /// Unique within the owning framework
    pub clause_number: String,
    pub title: String,
}

/// A finer-grained requirement nested under a clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubClause {
    pub id: i64,
    pub clause_id: i64,
    pub sub_clause_number: String,
    pub title: String,
}

/// A framework together with its dependent clause count, as shown in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameworkSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub clause_count: usize,
}

impl FrameworkSummary {
    pub fn new(framework: &Framework, clause_count: usize) -> Self {
        Self {
            name: framework.name.clone(),
            description: framework.description.clone(),
            clause_count,
        }
    }
}

impl std::fmt::Display for FrameworkSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.clause_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_from_framework() {
        let fw = Framework::new(7, "NIST_CSF", Some("Cybersecurity Framework".to_string()));
        let summary = FrameworkSummary::new(&fw, 23);

        assert_eq!(summary.name, "NIST_CSF");
        assert_eq!(summary.clause_count, 23);
        assert_eq!(summary.to_string(), "NIST_CSF (23)");
    }

    #[test]
    fn test_summary_json_omits_missing_description() {
        let fw = Framework::new(1, "GDPR", None);
        let json = serde_json::to_value(FrameworkSummary::new(&fw, 99)).unwrap();

        assert_eq!(json["name"], "GDPR");
        assert_eq!(json["clause_count"], 99);
        assert!(json.get("description").is_none());
    }
}
