//! Settings profiles
//!
//! A profile binds the registry store and, optionally, overrides the cleanup
//! policy. Profiles live in `grcadmin.toml`:
//!
//! ```toml
//! [profiles.staging]
//! database = "/srv/grc/staging.db"
//! policy = ["ISO27001_2022", "ISO27002_2022"]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use crate::{Error, Result};
use crate::policy::CleanupPolicy;

/// Environment variable naming the settings profile
pub const PROFILE_ENV: &str = "GRCADMIN_PROFILE";

pub const DEFAULT_PROFILE: &str = "default";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SettingsFile {
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Profile {
    pub database: Option<String>,
    pub policy: Option<CleanupPolicy>,
}

/// A fully resolved profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub profile: String,
    pub database: PathBuf,
    pub policy: CleanupPolicy,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("grcadmin.toml")
}

pub fn default_database_path() -> PathBuf {
    PathBuf::from("grc.db")
}

/// Profile name from the environment value, falling back to `default`.
pub fn resolve_profile_name(env_value: Option<String>) -> String {
    env_value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_PROFILE.to_string())
}

pub fn load_settings_file(path: Option<&Path>) -> Result<Option<SettingsFile>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let file: SettingsFile = toml::from_str(&contents)?;
    Ok(Some(file))
}

/// Resolve `profile` against the settings file at `path`.
///
/// The `default` profile may be absent (built-in defaults apply); any other
/// profile must be declared.
pub fn load_settings(path: Option<&Path>, profile: &str) -> Result<Settings> {
    let file = load_settings_file(path)?.unwrap_or_default();
    let declared = file.profiles.get(profile).cloned();

    let resolved = match declared {
        Some(p) => p,
        None if profile == DEFAULT_PROFILE => Profile::default(),
        None => {
            return Err(Error::Config(format!(
                "settings profile '{}' is not defined",
                profile
            )));
        }
    };

    Ok(Settings {
        profile: profile.to_string(),
        database: resolved
            .database
            .map(PathBuf::from)
            .unwrap_or_else(default_database_path),
        policy: resolved.policy.unwrap_or_default(),
    })
}
