//! Cleanup driver - reconciles the registry against a policy
//!
//! For each policy name, in order: look the framework up, count its clauses,
//! delete it with its dependents and record the outcome. Absent names are
//! recorded, not escalated, which makes a second run with the same policy a
//! no-op. Duplicate names abort the run before anything is deleted.

use tracing::{debug, error, info, warn};
use crate::{Error, Result};
use crate::inspect::report;
use crate::policy::CleanupPolicy;
use crate::storage::RegistryStore;
use crate::transcript::{Outcome, Transcript};

/// A run that stopped early. `outcomes` holds what was recorded before `cause`.
#[derive(Debug, thiserror::Error)]
#[error("cleanup aborted: {cause}")]
pub struct Aborted {
    pub outcomes: Vec<Outcome>,
    #[source]
    pub cause: Error,
}

impl Aborted {
    fn new(outcomes: Vec<Outcome>, cause: Error) -> Self {
        error!(recorded = outcomes.len(), %cause, "cleanup aborted");
        Self { outcomes, cause }
    }
}

/// Remove every framework named by `policy`, then record the remaining registry.
pub fn reconcile<S: RegistryStore + ?Sized>(
    store: &mut S,
    policy: &CleanupPolicy,
) -> std::result::Result<Transcript, Aborted> {
    let mut outcomes = Vec::with_capacity(policy.len());

    if let Err(cause) = verify_unique(&*store, policy) {
        return Err(Aborted::new(outcomes, cause));
    }

    for name in policy.iter() {
        match reconcile_name(store, name) {
            Ok(outcome) => outcomes.push(outcome),
            Err(cause) => return Err(Aborted::new(outcomes, cause)),
        }
    }

    let remaining = match report(&*store) {
        Ok(listing) => listing,
        Err(cause) => return Err(Aborted::new(outcomes, cause)),
    };

    let transcript = Transcript { outcomes, remaining };
    info!(
        deleted = transcript.deleted_count(),
        failed = transcript.failed_count(),
        remaining = transcript.remaining.total,
        "cleanup complete"
    );
    Ok(transcript)
}

/// Dry run: what `reconcile` would do, without deleting anything.
pub fn preview<S: RegistryStore + ?Sized>(store: &S, policy: &CleanupPolicy) -> Result<Vec<Outcome>> {
    verify_unique(store, policy)?;

    policy
        .iter()
        .map(|name| -> Result<Outcome> {
            match store.lookup_by_name(name)? {
                Some(framework) => Ok(Outcome::WouldDelete {
                    name: name.to_string(),
                    clause_count: store.count_clauses(&framework)?,
                }),
                None => Ok(Outcome::NotFound { name: name.to_string() }),
            }
        })
        .collect()
}

/// Fail on the first policy name that matches more than one framework.
fn verify_unique<S: RegistryStore + ?Sized>(store: &S, policy: &CleanupPolicy) -> Result<()> {
    for name in policy.iter() {
        store.lookup_by_name(name)?;
    }
    Ok(())
}

fn reconcile_name<S: RegistryStore + ?Sized>(store: &mut S, name: &str) -> Result<Outcome> {
    let Some(framework) = store.lookup_by_name(name)? else {
        debug!(framework = name, "not present");
        return Ok(Outcome::NotFound { name: name.to_string() });
    };

    let clause_count = store.count_clauses(&framework)?;
    match store.delete(&framework) {
        Ok(()) => {
            info!(framework = name, clause_count, "deleted framework");
            Ok(Outcome::Deleted { name: name.to_string(), clause_count })
        }
        Err(err) if err.is_per_name() => {
            warn!(framework = name, %err, "deletion failed");
            let reason = match err {
                Error::Store { reason, .. } => reason,
                other => other.to_string(),
            };
            Ok(Outcome::Failed { name: name.to_string(), reason })
        }
        Err(err) => Err(err),
    }
}
