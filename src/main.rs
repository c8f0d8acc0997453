//! grcadmin CLI - framework registry cleanup and inspection

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use grcadmin::config::{self, Settings};
use grcadmin::ui::{self, Icons};
use grcadmin::{CleanupPolicy, SqliteRegistry};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "grcadmin")]
#[command(version)]
#[command(about = "Compliance framework registry maintenance")]
#[command(long_about = r#"
grcadmin removes duplicate and test-only compliance frameworks from a GRC
registry, cascading to their clauses, and reports what remains.

Without a subcommand it runs `cleanup` with the configured policy.

The settings profile is taken from GRCADMIN_PROFILE (default: "default").

Example usage:
  grcadmin
  grcadmin cleanup --name ISO27001_2022 --dry-run
  grcadmin inspect --table
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Registry database, overriding the profile
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Delete the frameworks named by the policy, then report what remains
    Cleanup {
        /// Framework name to remove (repeatable); replaces the configured policy
        #[arg(long = "name", value_name = "FRAMEWORK")]
        names: Vec<String>,

        /// Remove only the ISO duplicates, leaving "Test Framework" in place
        #[arg(long, conflicts_with = "names")]
        keep_test_framework: bool,

        /// Show what would be deleted without deleting anything
        #[arg(long)]
        dry_run: bool,
    },

    /// List frameworks with their clause counts
    Inspect {
        /// Render the listing as a table
        #[arg(long)]
        table: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the transcript
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("GRCADMIN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            ui::error(&format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let profile = config::resolve_profile_name(std::env::var(config::PROFILE_ENV).ok());
    let mut settings = config::load_settings(cli.config.as_deref(), &profile)?;
    if let Some(database) = cli.database {
        settings.database = database;
    }
    tracing::debug!(profile = %settings.profile, database = ?settings.database, "resolved settings");

    match cli.command {
        None => run_cleanup(&settings, settings.policy.clone(), false, cli.format),
        Some(Commands::Cleanup { names, keep_test_framework, dry_run }) => {
            let policy = CleanupPolicy::select(&names, keep_test_framework, &settings.policy);
            run_cleanup(&settings, policy, dry_run, cli.format)
        }
        Some(Commands::Inspect { table }) => run_inspect(&settings, table, cli.format),
    }
}

fn run_cleanup(
    settings: &Settings,
    policy: CleanupPolicy,
    dry_run: bool,
    format: OutputFormat,
) -> anyhow::Result<ExitCode> {
    let human = format == OutputFormat::Text;
    let mut store = match SqliteRegistry::open(&settings.database) {
        Ok(store) => store,
        Err(err) => return abort(err, human),
    };

    if dry_run {
        let planned = match grcadmin::preview(&store, &policy) {
            Ok(planned) => planned,
            Err(err) => return abort(err, human),
        };
        if human {
            ui::header(Icons::EYE, &format!("Dry run against {}", settings.database.display()));
            ui::dry_run(&planned)?;
        } else {
            println!("{}", serde_json::to_string_pretty(&planned)?);
        }
        return Ok(ExitCode::SUCCESS);
    }

    if human {
        ui::header(
            Icons::BROOM,
            &format!(
                "Cleaning {} framework name(s) from {} (profile: {})",
                policy.len(),
                settings.database.display(),
                settings.profile
            ),
        );
    }

    match grcadmin::reconcile(&mut store, &policy) {
        Ok(transcript) => {
            if human {
                ui::transcript(&transcript)?;
            } else {
                println!("{}", serde_json::to_string_pretty(&transcript)?);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(aborted) => {
            if human {
                ui::aborted(&aborted)?;
            } else {
                let data = serde_json::json!({
                    "outcomes": aborted.outcomes,
                    "aborted": aborted.cause.to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&data)?);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run_inspect(settings: &Settings, table: bool, format: OutputFormat) -> anyhow::Result<ExitCode> {
    let human = format == OutputFormat::Text;
    let store = match SqliteRegistry::open(&settings.database) {
        Ok(store) => store,
        Err(err) => return abort(err, human),
    };

    let listing = match grcadmin::report(&store) {
        Ok(listing) => listing,
        Err(err) => return abort(err, human),
    };
    if !human {
        println!("{}", serde_json::to_string_pretty(&listing)?);
    } else if table {
        ui::header(Icons::STATS, &format!("Frameworks: {}", listing.total));
        let rendered = ui::frameworks_table(&listing);
        if !rendered.is_empty() {
            println!("{}", rendered);
        }
    } else {
        ui::header(Icons::DATABASE, &format!("Registry {}", settings.database.display()));
        ui::listing("Frameworks", &listing)?;
    }
    Ok(ExitCode::SUCCESS)
}

/// A failure before any outcome was recorded: emit the final `Aborted:` line and fail.
fn abort(err: grcadmin::Error, human: bool) -> anyhow::Result<ExitCode> {
    tracing::error!(%err, "aborting");
    if human {
        ui::abort(&err)?;
    } else {
        println!("{}", serde_json::json!({ "outcomes": [], "aborted": err.to_string() }));
    }
    Ok(ExitCode::FAILURE)
}
