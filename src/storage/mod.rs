//! Storage Layer - the framework registry
//!
//! The registry is an external relational store with tables:
//! - frameworks(id, name, description)
//! - clauses(id, framework_id, clause_number, title)
//! - sub_clauses(id, clause_id, sub_clause_number, title)
//!
//! The core only talks to it through [`RegistryStore`].

pub mod schema;
pub mod sqlite;

pub use sqlite::SqliteRegistry;

use crate::Result;
use crate::framework::Framework;

/// The operations the cleanup driver and the inspection reporter consume.
pub trait RegistryStore {
    /// Exact-match lookup. Absence is `Ok(None)`; more than one match is
    /// [`crate::Error::DataIntegrity`].
    fn lookup_by_name(&self, name: &str) -> Result<Option<Framework>>;

    /// Remove a framework with its clauses and sub-clauses as one transaction.
    /// A deletion that cannot complete is [`crate::Error::Store`].
    fn delete(&mut self, framework: &Framework) -> Result<()>;

    fn count_frameworks(&self) -> Result<usize>;

    /// All frameworks ordered lexicographically by name.
    fn list_frameworks_sorted(&self) -> Result<Vec<Framework>>;

    fn count_clauses(&self, framework: &Framework) -> Result<usize>;
}
