//! SQLite registry implementation

use std::path::Path;
use std::time::Duration;
use rusqlite::{Connection, ErrorCode, OpenFlags, params};
use tracing::{debug, info};
use crate::{Error, Result};
use crate::framework::{Clause, Framework, SubClause};
use super::{RegistryStore, schema};

const FRAMEWORK_SELECT_SQL: &str = "SELECT id, name, description FROM frameworks";

/// SQLite-backed framework registry
pub struct SqliteRegistry {
    conn: Connection,
}

impl SqliteRegistry {
    /// Bind an existing registry database.
    ///
    /// Never creates the file or the schema: a missing file, a file that
    /// cannot be opened or one without the registry tables is a
    /// [`Error::Connectivity`].
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Connectivity(format!(
                "registry database {} does not exist",
                path.display()
            )));
        }

        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path, flags).map_err(|e| {
            Error::Connectivity(format!("cannot open {}: {}", path.display(), e))
        })?;

        let store = Self { conn };
        store.configure()?;
        store.verify_schema()?;
        info!(path = %path.display(), "bound registry store");
        Ok(store)
    }

    /// Create (or reuse) a registry database file with the full schema
    pub fn create(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.configure()?;
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory registry (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.configure()?;
        store.initialize_schema()?;
        Ok(store)
    }

    fn configure(&self) -> Result<()> {
        self.conn
            .execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(classify_open_error)?;
        self.conn.busy_timeout(Duration::from_secs(5))?;
        Ok(())
    }

    fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    fn verify_schema(&self) -> Result<()> {
        for table in schema::REQUIRED_TABLES {
            let exists: bool = self
                .conn
                .query_row(
                    "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
                    [table],
                    |row| row.get(0),
                )
                .map_err(classify_open_error)?;
            if !exists {
                return Err(Error::Connectivity(format!(
                    "registry table '{}' is missing",
                    table
                )));
            }
        }
        Ok(())
    }

    // ========== Fixture Operations ==========

    /// Insert a framework row. Uniqueness of the name is not checked here.
    pub fn insert_framework(&self, name: &str, description: Option<&str>) -> Result<Framework> {
        self.conn.execute(
            "INSERT INTO frameworks (name, description) VALUES (?1, ?2)",
            params![name, description],
        )?;
        Ok(Framework::new(
            self.conn.last_insert_rowid(),
            name,
            description.map(str::to_string),
        ))
    }

    pub fn insert_clause(&self, framework: &Framework, clause_number: &str, title: &str) -> Result<Clause> {
        self.conn.execute(
            "INSERT INTO clauses (framework_id, clause_number, title) VALUES (?1, ?2, ?3)",
            params![framework.id, clause_number, title],
        )?;
        Ok(Clause {
            id: self.conn.last_insert_rowid(),
            framework_id: framework.id,
            clause_number: clause_number.to_string(),
            title: title.to_string(),
        })
    }

    pub fn insert_sub_clause(&self, clause: &Clause, sub_clause_number: &str, title: &str) -> Result<SubClause> {
        self.conn.execute(
            "INSERT INTO sub_clauses (clause_id, sub_clause_number, title) VALUES (?1, ?2, ?3)",
            params![clause.id, sub_clause_number, title],
        )?;
        Ok(SubClause {
            id: self.conn.last_insert_rowid(),
            clause_id: clause.id,
            sub_clause_number: sub_clause_number.to_string(),
            title: title.to_string(),
        })
    }

    // ========== Integrity Queries ==========

    /// Count clauses across all frameworks
    pub fn count_all_clauses(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM clauses", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Count sub-clauses across all clauses
    pub fn count_sub_clauses(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM sub_clauses", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Clauses without a framework plus sub-clauses without a clause
    pub fn count_orphans(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            r#"
            SELECT
                (SELECT COUNT(*) FROM clauses c
                    WHERE NOT EXISTS (SELECT 1 FROM frameworks f WHERE f.id = c.framework_id))
              + (SELECT COUNT(*) FROM sub_clauses s
                    WHERE NOT EXISTS (SELECT 1 FROM clauses c WHERE c.id = s.clause_id))
            "#,
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Helper to convert a row to a Framework
    fn row_to_framework(row: &rusqlite::Row) -> rusqlite::Result<Framework> {
        Ok(Framework {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
        })
    }

    fn delete_in_transaction(&mut self, framework: &Framework) -> rusqlite::Result<usize> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "DELETE FROM sub_clauses WHERE clause_id IN (SELECT id FROM clauses WHERE framework_id = ?1)",
            [framework.id],
        )?;
        tx.execute("DELETE FROM clauses WHERE framework_id = ?1", [framework.id])?;
        let removed = tx.execute("DELETE FROM frameworks WHERE id = ?1", [framework.id])?;
        if removed == 1 {
            tx.commit()?;
        }
        // Dropping an uncommitted transaction rolls it back.
        Ok(removed)
    }
}

impl RegistryStore for SqliteRegistry {
    fn lookup_by_name(&self, name: &str) -> Result<Option<Framework>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{FRAMEWORK_SELECT_SQL} WHERE name = ?1 ORDER BY id"))?;
        let mut matches = stmt
            .query_map([name], Self::row_to_framework)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        debug!(name, matches = matches.len(), "framework lookup");
        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.pop()),
            count => Err(Error::DataIntegrity {
                name: name.to_string(),
                count,
            }),
        }
    }

    fn delete(&mut self, framework: &Framework) -> Result<()> {
        match self.delete_in_transaction(framework) {
            Ok(1) => Ok(()),
            Ok(_) => Err(Error::Store {
                name: framework.name.clone(),
                reason: "framework row vanished before deletion".to_string(),
            }),
            Err(e) if is_connectivity_failure(&e) => Err(Error::Connectivity(e.to_string())),
            Err(e) => Err(Error::Store {
                name: framework.name.clone(),
                reason: e.to_string(),
            }),
        }
    }

    fn count_frameworks(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM frameworks", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn list_frameworks_sorted(&self) -> Result<Vec<Framework>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{FRAMEWORK_SELECT_SQL} ORDER BY name COLLATE BINARY, id"))?;
        let frameworks = stmt
            .query_map([], Self::row_to_framework)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(frameworks)
    }

    fn count_clauses(&self, framework: &Framework) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM clauses WHERE framework_id = ?1",
            [framework.id],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}

fn is_connectivity_failure(err: &rusqlite::Error) -> bool {
    matches!(
        err.sqlite_error_code(),
        Some(ErrorCode::CannotOpen)
            | Some(ErrorCode::SystemIoFailure)
            | Some(ErrorCode::NotADatabase)
            | Some(ErrorCode::DatabaseCorrupt)
    )
}

fn classify_open_error(err: rusqlite::Error) -> Error {
    if is_connectivity_failure(&err) {
        Error::Connectivity(err.to_string())
    } else {
        Error::Storage(err)
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::seed;
    use super::*;

    #[test]
    fn test_lookup_exact_match() {
        let store = SqliteRegistry::open_in_memory().unwrap();
        seed(&store, "ISO27001_2022", 3);

        let found = store.lookup_by_name("ISO27001_2022").unwrap().unwrap();
        assert_eq!(found.name, "ISO27001_2022");
        assert_eq!(store.count_clauses(&found).unwrap(), 3);

        assert!(store.lookup_by_name("iso27001_2022").unwrap().is_none());
        assert!(store.lookup_by_name("ISO27001").unwrap().is_none());
    }

    #[test]
    fn test_lookup_duplicate_name_is_integrity_error() {
        let store = SqliteRegistry::open_in_memory().unwrap();
        seed(&store, "ISO27001_2022", 1);
        seed(&store, "ISO27001_2022", 2);

        match store.lookup_by_name("ISO27001_2022") {
            Err(Error::DataIntegrity { name, count }) => {
                assert_eq!(name, "ISO27001_2022");
                assert_eq!(count, 2);
            }
            other => panic!("unexpected lookup result: {other:?}"),
        }
    }

    #[test]
    fn test_delete_cascades_to_clauses_and_sub_clauses() {
        let mut store = SqliteRegistry::open_in_memory().unwrap();
        let doomed = seed(&store, "ISO27002_2022", 4);
        let kept = seed(&store, "NIST_CSF", 2);

        store.delete(&doomed).unwrap();

        assert_eq!(store.count_frameworks().unwrap(), 1);
        assert_eq!(store.count_clauses(&doomed).unwrap(), 0);
        assert_eq!(store.count_clauses(&kept).unwrap(), 2);
        assert_eq!(store.count_sub_clauses().unwrap(), 2);
        assert_eq!(store.count_orphans().unwrap(), 0);
    }

    #[test]
    fn test_delete_cascades_without_foreign_key_actions() {
        let mut store = SqliteRegistry::open_in_memory().unwrap();
        store.conn.execute_batch("PRAGMA foreign_keys = OFF;").unwrap();
        let doomed = seed(&store, "Test Framework", 5);

        store.delete(&doomed).unwrap();

        assert_eq!(store.count_all_clauses().unwrap(), 0);
        assert_eq!(store.count_sub_clauses().unwrap(), 0);
        assert_eq!(store.count_orphans().unwrap(), 0);
    }

    #[test]
    fn test_delete_vanished_framework_is_store_error() {
        let mut store = SqliteRegistry::open_in_memory().unwrap();
        let fw = seed(&store, "GDPR", 1);
        store.delete(&fw).unwrap();

        let err = store.delete(&fw).unwrap_err();
        assert!(err.is_per_name());
        assert!(matches!(err, Error::Store { ref name, .. } if name == "GDPR"));
    }

    #[test]
    fn test_list_sorted_by_name() {
        let store = SqliteRegistry::open_in_memory().unwrap();
        seed(&store, "NIST_CSF", 0);
        seed(&store, "GDPR", 0);
        seed(&store, "ISO27001_2022", 0);
        seed(&store, "Test Framework", 0);

        let names: Vec<String> = store
            .list_frameworks_sorted()
            .unwrap()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec!["GDPR", "ISO27001_2022", "NIST_CSF", "Test Framework"]);
    }

    #[test]
    fn test_open_missing_file_is_connectivity_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.db");

        let err = SqliteRegistry::open(&path).err().unwrap();
        assert!(matches!(err, Error::Connectivity(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_open_without_schema_is_connectivity_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.db");
        Connection::open(&path)
            .unwrap()
            .execute_batch("CREATE TABLE unrelated (id INTEGER);")
            .unwrap();

        let err = SqliteRegistry::open(&path).err().unwrap();
        assert!(matches!(err, Error::Connectivity(ref msg) if msg.contains("frameworks")));
    }

    #[test]
    fn test_open_existing_registry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grc.db");
        {
            let store = SqliteRegistry::create(&path).unwrap();
            seed(&store, "GDPR", 3);
        }

        let store = SqliteRegistry::open(&path).unwrap();
        assert_eq!(store.count_frameworks().unwrap(), 1);
        assert_eq!(store.count_all_clauses().unwrap(), 3);
    }
}
