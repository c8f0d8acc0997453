use tabled::{settings::Style, Table, Tabled};
use crate::transcript::Listing;

#[derive(Tabled)]
pub struct FrameworkRow {
    #[tabled(rename = "Framework")]
    pub name: String,
    #[tabled(rename = "Clauses")]
    pub clauses: usize,
    #[tabled(rename = "Description")]
    pub description: String,
}

/// Rounded table of a listing; empty string when there is nothing to show.
pub fn frameworks_table(listing: &Listing) -> String {
    if listing.is_empty() {
        return String::new();
    }

    let rows: Vec<FrameworkRow> = listing
        .frameworks
        .iter()
        .map(|fw| FrameworkRow {
            name: fw.name.clone(),
            clauses: fw.clause_count,
            description: fw.description.clone().unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    Table::new(&rows).with(Style::rounded()).to_string()
}
