//! Terminal presentation of transcripts and listings

pub mod icons;
pub mod output;
pub mod render;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{abort, aborted, dry_run, error, header, listing, transcript};
pub use table::frameworks_table;
pub use theme::{theme, Theme};
