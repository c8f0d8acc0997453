//! Plain line rendering
//!
//! Every per-name line starts with the outcome marker; styling is applied
//! on top of these strings by [`super::output`].

use std::fmt::Display;
use crate::transcript::{Listing, Outcome, Transcript};

pub fn outcome_lines(outcomes: &[Outcome]) -> Vec<String> {
    outcomes.iter().map(ToString::to_string).collect()
}

/// `label: total` followed by one indented `name (clauses)` line per framework
pub fn listing_lines(label: &str, listing: &Listing) -> Vec<String> {
    let mut lines = Vec::with_capacity(listing.frameworks.len() + 1);
    lines.push(format!("{}: {}", label, listing.total));
    lines.extend(listing.frameworks.iter().map(|fw| format!("  {}", fw)));
    lines
}

/// One line per outcome, then the `Remaining frameworks` summary
pub fn transcript_lines(transcript: &Transcript) -> Vec<String> {
    let mut lines = outcome_lines(&transcript.outcomes);
    lines.extend(listing_lines("Remaining frameworks", &transcript.remaining));
    lines
}

pub fn abort_line(cause: &dyn Display) -> String {
    format!("Aborted: {}", cause)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_listing_has_only_total() {
        assert_eq!(listing_lines("Frameworks", &Listing::default()), vec!["Frameworks: 0"]);
    }

    #[test]
    fn test_transcript_lines_count() {
        let transcript = Transcript {
            outcomes: vec![Outcome::NotFound { name: "GDPR".into() }],
            remaining: Listing::default(),
        };
        assert_eq!(transcript_lines(&transcript), vec!["Not found GDPR", "Remaining frameworks: 0"]);
    }
}
