//! Styled printing of transcripts and listings
//!
//! Line content comes from [`super::render`]; this module only adds styles
//! and chooses the stream. The `write_*` functions take any writer so the
//! exact stdout layout can be checked against a buffer.

use std::fmt::Display;
use std::io::{self, Write};
use crate::cleanup::Aborted;
use crate::transcript::{Listing, Outcome, Transcript};
use crate::ui::render::{abort_line, listing_lines, outcome_lines, transcript_lines};
use crate::ui::{theme, Icons, Theme};
use owo_colors::OwoColorize;

pub fn write_outcomes<W: Write>(out: &mut W, theme: &Theme, outcomes: &[Outcome]) -> io::Result<()> {
    for (o, line) in outcomes.iter().zip(outcome_lines(outcomes)) {
        writeln!(out, "{}", line.style(theme.for_outcome(o)))?;
    }
    Ok(())
}

pub fn write_listing<W: Write>(out: &mut W, theme: &Theme, label: &str, listing: &Listing) -> io::Result<()> {
    for line in listing_lines(label, listing) {
        writeln!(out, "{}", line.style(theme.summary.clone()))?;
    }
    Ok(())
}

/// Outcome lines in policy order, then the post-state summary.
pub fn write_transcript<W: Write>(out: &mut W, theme: &Theme, transcript: &Transcript) -> io::Result<()> {
    let lines = transcript_lines(transcript);
    let (outcome_part, summary_part) = lines.split_at(transcript.outcomes.len());

    for (o, line) in transcript.outcomes.iter().zip(outcome_part) {
        writeln!(out, "{}", line.style(theme.for_outcome(o)))?;
    }
    for line in summary_part {
        writeln!(out, "{}", line.style(theme.summary.clone()))?;
    }
    Ok(())
}

/// Whatever was recorded before the failure, then the final `Aborted:` line.
pub fn write_abort<W: Write>(
    out: &mut W,
    theme: &Theme,
    outcomes: &[Outcome],
    cause: &dyn Display,
) -> io::Result<()> {
    write_outcomes(out, theme, outcomes)?;
    writeln!(out, "{}", abort_line(cause).style(theme.aborted.clone()))
}

pub fn header(icon: &str, text: &str) {
    println!("{} {}", icon, text.style(theme().header.clone()));
}

pub fn listing(label: &str, listing: &Listing) -> io::Result<()> {
    write_listing(&mut io::stdout().lock(), theme(), label, listing)
}

pub fn transcript(transcript: &Transcript) -> io::Result<()> {
    write_transcript(&mut io::stdout().lock(), theme(), transcript)
}

pub fn dry_run(planned: &[Outcome]) -> io::Result<()> {
    write_outcomes(&mut io::stdout().lock(), theme(), planned)
}

pub fn aborted(aborted: &Aborted) -> io::Result<()> {
    write_abort(&mut io::stdout().lock(), theme(), &aborted.outcomes, &aborted.cause)
}

/// A failure with nothing recorded yet (binding, dry run, inspection).
pub fn abort(cause: &dyn Display) -> io::Result<()> {
    write_abort(&mut io::stdout().lock(), theme(), &[], cause)
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, label.style(theme().aborted.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::framework::FrameworkSummary;

    fn rendered(write: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        write(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_transcript_layout() {
        let transcript = Transcript {
            outcomes: vec![
                Outcome::Deleted { name: "ISO27001_2022".into(), clause_count: 93 },
                Outcome::Deleted { name: "ISO27002_2022".into(), clause_count: 114 },
                Outcome::NotFound { name: "Test Framework".into() },
            ],
            remaining: Listing {
                total: 1,
                frameworks: vec![FrameworkSummary {
                    name: "NIST_CSF".into(),
                    description: None,
                    clause_count: 23,
                }],
            },
        };

        let text = rendered(|buf| write_transcript(buf, &Theme::plain(), &transcript));
        assert_eq!(
            text,
            "Deleted ISO27001_2022 (93)\n\
             Deleted ISO27002_2022 (114)\n\
             Not found Test Framework\n\
             Remaining frameworks: 1\n  \
             NIST_CSF (23)\n"
        );
    }

    #[test]
    fn test_dry_run_layout() {
        let planned = vec![
            Outcome::WouldDelete { name: "GDPR".into(), clause_count: 99 },
            Outcome::NotFound { name: "ISO27017_2015".into() },
        ];

        let text = rendered(|buf| write_outcomes(buf, &Theme::plain(), &planned));
        assert_eq!(text, "Would delete GDPR (99)\nNot found ISO27017_2015\n");
    }

    #[test]
    fn test_abort_ends_with_aborted_line() {
        let recorded = vec![Outcome::Deleted { name: "ISO27001_2022".into(), clause_count: 4 }];
        let cause = Error::Connectivity("registry went away".into());

        let text = rendered(|buf| write_abort(buf, &Theme::plain(), &recorded, &cause));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Deleted ISO27001_2022 (4)");
        assert_eq!(lines.last().copied(), Some("Aborted: Connectivity error: registry went away"));
    }

    #[test]
    fn test_abort_without_outcomes_is_single_line() {
        let cause = Error::DataIntegrity { name: "ISO27001_2022".into(), count: 2 };

        let text = rendered(|buf| write_abort(buf, &Theme::plain(), &[], &cause));
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("Aborted: "));
        assert!(text.contains("ISO27001_2022"));
    }
}
