//! Registry schema definitions
//!
//! The production schema belongs to the external loader. These statements
//! reproduce it for fixtures and local stores.

/// SQL to create the frameworks table.
/// Name uniqueness is a loader contract, not a constraint, so it is checked on lookup.
pub const CREATE_FRAMEWORKS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS frameworks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT
)
"#;

/// SQL to create the clauses table
pub const CREATE_CLAUSES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS clauses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    framework_id INTEGER NOT NULL REFERENCES frameworks(id) ON DELETE CASCADE,
    clause_number TEXT NOT NULL,
    title TEXT NOT NULL,
    UNIQUE(framework_id, clause_number)
)
"#;

/// SQL to create the sub_clauses table
pub const CREATE_SUB_CLAUSES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS sub_clauses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    clause_id INTEGER NOT NULL REFERENCES clauses(id) ON DELETE CASCADE,
    sub_clause_number TEXT NOT NULL,
    title TEXT NOT NULL,
    UNIQUE(clause_id, sub_clause_number)
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_frameworks_name ON frameworks(name)",
    "CREATE INDEX IF NOT EXISTS idx_clauses_framework ON clauses(framework_id)",
    "CREATE INDEX IF NOT EXISTS idx_sub_clauses_clause ON sub_clauses(clause_id)",
];

/// Tables that must exist before a store is considered bound
pub const REQUIRED_TABLES: &[&str] = &["frameworks", "clauses", "sub_clauses"];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![
        CREATE_FRAMEWORKS_TABLE,
        CREATE_CLAUSES_TABLE,
        CREATE_SUB_CLAUSES_TABLE,
    ];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
