//! Canonical name policy - which frameworks must not persist

use serde::{Deserialize, Serialize};

/// Framework names removed by default: ISO duplicates plus the test fixture.
pub const DEFAULT_POLICY_NAMES: &[&str] = &[
    "ISO27001_2022",
    "ISO27002_2022",
    "ISO27017_2015",
    "ISO27018_2019",
    "Test Framework",
];

/// Name of the framework left behind by loader smoke tests.
pub const TEST_FRAMEWORK: &str = "Test Framework";

/// Ordered sequence of framework names to remove, matched byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct CleanupPolicy {
    names: Vec<String>,
}

impl CleanupPolicy {
    /// Build a policy from caller-supplied names.
    ///
    /// Names are kept verbatim and in order, repeats included. Only empty
    /// strings are dropped.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .map(|name| name.as_ref().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        Self { names }
    }

    /// Pick the policy for a run: explicit names win, then the ISO-only
    /// alternate, then the configured policy.
    pub fn select(names: &[String], keep_test_framework: bool, configured: &CleanupPolicy) -> Self {
        if !names.is_empty() {
            Self::new(names)
        } else if keep_test_framework {
            Self::iso_duplicates()
        } else {
            configured.clone()
        }
    }

    /// The ISO duplicates only, leaving `Test Framework` in place.
    pub fn iso_duplicates() -> Self {
        Self::new(DEFAULT_POLICY_NAMES.iter().filter(|n| **n != TEST_FRAMEWORK))
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for CleanupPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_POLICY_NAMES)
    }
}

impl From<Vec<String>> for CleanupPolicy {
    fn from(names: Vec<String>) -> Self {
        Self::new(names)
    }
}

impl From<CleanupPolicy> for Vec<String> {
    fn from(policy: CleanupPolicy) -> Self {
        policy.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_order() {
        let policy = CleanupPolicy::default();
        assert_eq!(
            policy.names(),
            &["ISO27001_2022", "ISO27002_2022", "ISO27017_2015", "ISO27018_2019", "Test Framework"]
        );
    }

    #[test]
    fn test_iso_duplicates_excludes_test_framework() {
        let policy = CleanupPolicy::iso_duplicates();
        assert_eq!(policy.len(), 4);
        assert!(!policy.contains(TEST_FRAMEWORK));
        assert!(policy.contains("ISO27018_2019"));
    }

    #[test]
    fn test_new_keeps_names_verbatim() {
        let policy = CleanupPolicy::new(["  GDPR ", "", "NIST_CSF", "GDPR", "NIST_CSF"]);
        assert_eq!(policy.names(), &["  GDPR ", "NIST_CSF", "GDPR", "NIST_CSF"]);
    }

    #[test]
    fn test_select_prefers_explicit_names() {
        let configured = CleanupPolicy::new(["GDPR"]);
        let names = vec!["ISO27001_2022".to_string()];

        let policy = CleanupPolicy::select(&names, true, &configured);
        assert_eq!(policy.names(), &["ISO27001_2022"]);
    }

    #[test]
    fn test_select_keep_test_framework() {
        let configured = CleanupPolicy::new(["GDPR"]);

        let policy = CleanupPolicy::select(&[], true, &configured);
        assert_eq!(policy, CleanupPolicy::iso_duplicates());
    }

    #[test]
    fn test_select_falls_back_to_configured() {
        let configured = CleanupPolicy::new(["GDPR", "Test Framework"]);

        assert_eq!(CleanupPolicy::select(&[], false, &configured), configured);
    }

    #[test]
    fn test_policy_deserializes_from_list() {
        #[derive(Deserialize)]
        struct Holder {
            policy: CleanupPolicy,
        }
        let holder: Holder = toml::from_str(r#"policy = ["B", "A", "B"]"#).unwrap();
        assert_eq!(holder.policy.names(), &["B", "A", "B"]);
    }
}
