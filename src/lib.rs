//! # grcadmin - Compliance Framework Registry Maintenance
//!
//! Administrative tooling for the framework registry of a GRC store.
//!
//! grcadmin provides:
//! - A canonical name policy of frameworks that must not persist
//! - An idempotent cleanup driver with cascade-safe deletion
//! - A read-only inspection report of the remaining frameworks
//! - A SQLite-backed registry adapter behind the `RegistryStore` trait

pub mod framework;
pub mod policy;
pub mod storage;
pub mod transcript;
pub mod cleanup;
pub mod inspect;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use framework::{Framework, FrameworkSummary};
pub use policy::CleanupPolicy;
pub use storage::{RegistryStore, SqliteRegistry};
pub use transcript::{Listing, Outcome, Transcript};
pub use cleanup::{reconcile, preview, Aborted};
pub use inspect::report;

/// Result type alias for grcadmin operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for grcadmin operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Deletion of a single framework could not complete; the run continues.
    #[error("Store error for '{name}': {reason}")]
    Store { name: String, reason: String },

    #[error("Data integrity error: {count} frameworks share the name '{name}'")]
    DataIntegrity { name: String, count: usize },

    #[error("Connectivity error: {0}")]
    Connectivity(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the cleanup driver may record this error and move on to the next name.
    pub fn is_per_name(&self) -> bool {
        matches!(self, Error::Store { .. })
    }
}
