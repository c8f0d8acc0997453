//! Inspection reporter - read-only listing of the registry

use tracing::debug;
use crate::Result;
use crate::framework::FrameworkSummary;
use crate::storage::RegistryStore;
use crate::transcript::Listing;

/// Total framework count plus every framework, sorted by name, with its clause count.
pub fn report<S: RegistryStore + ?Sized>(store: &S) -> Result<Listing> {
    let total = store.count_frameworks()?;
    let frameworks = store
        .list_frameworks_sorted()?
        .iter()
        .map(|fw| -> Result<FrameworkSummary> {
            Ok(FrameworkSummary::new(fw, store.count_clauses(fw)?))
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(total, listed = frameworks.len(), "registry report");
    Ok(Listing { total, frameworks })
}
