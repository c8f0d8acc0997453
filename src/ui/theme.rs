//! Transcript colours
//!
//! One style per outcome kind so a long run can be scanned for the names
//! that were actually removed or that failed. Colour never changes the
//! text: every line still starts with its marker.

use owo_colors::Style;
use std::sync::OnceLock;
use crate::transcript::Outcome;

static THEME: OnceLock<Theme> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct Theme {
    pub header: Style,
    /// Removed frameworks
    pub deleted: Style,
    /// Absent names, the common case on re-runs
    pub not_found: Style,
    pub failed: Style,
    /// Dry-run lines
    pub planned: Style,
    /// Post-state and inspection listings
    pub summary: Style,
    pub aborted: Style,
}

impl Theme {
    /// Colours only when stdout is a terminal and `NO_COLOR`/`CLICOLOR` allow it.
    pub fn detect() -> Self {
        if console::Term::stdout().is_term() && console::colors_enabled() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    pub fn colored() -> Self {
        Self {
            header: Style::new().cyan().bold(),
            deleted: Style::new().red(),
            not_found: Style::new().bright_black(),
            failed: Style::new().yellow().bold(),
            planned: Style::new().magenta().italic(),
            summary: Style::new().green(),
            aborted: Style::new().red().bold().underline(),
        }
    }

    pub fn plain() -> Self {
        let none = Style::new();
        Self {
            header: none.clone(),
            deleted: none.clone(),
            not_found: none.clone(),
            failed: none.clone(),
            planned: none.clone(),
            summary: none.clone(),
            aborted: none,
        }
    }

    pub fn for_outcome(&self, outcome: &Outcome) -> Style {
        match outcome {
            Outcome::Deleted { .. } => self.deleted.clone(),
            Outcome::NotFound { .. } => self.not_found.clone(),
            Outcome::Failed { .. } => self.failed.clone(),
            Outcome::WouldDelete { .. } => self.planned.clone(),
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use owo_colors::OwoColorize;

    #[test]
    fn test_colored_outcomes_are_distinct_and_keep_marker() {
        let theme = Theme::colored();
        let deleted = Outcome::Deleted { name: "GDPR".into(), clause_count: 2 };
        let missing = Outcome::NotFound { name: "GDPR".into() };

        let a = deleted.to_string().style(theme.for_outcome(&deleted)).to_string();
        let b = missing.to_string().style(theme.for_outcome(&missing)).to_string();
        assert!(a.contains("Deleted GDPR (2)"));
        assert!(b.contains("Not found GDPR"));
        assert_ne!(a.replace("Deleted GDPR (2)", ""), b.replace("Not found GDPR", ""));
    }

    #[test]
    fn test_plain_theme_adds_no_escapes() {
        let theme = Theme::plain();
        let failed = Outcome::Failed { name: "GDPR".into(), reason: "locked".into() };
        let line = failed.to_string().style(theme.for_outcome(&failed)).to_string();
        assert_eq!(line, "Failed GDPR: locked");
    }
}
