use anyhow::Result;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    // Translation resources
    pub resources_dir: PathBuf,
    pub baseline_language: String,

    // Persisted selection
    pub data_dir: PathBuf,
    pub snapshot_file: String,

    // Trust anchor
    pub prefs_file: PathBuf,
    pub anchor_key: String,

    // Device locale override
    pub device_language: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resources_dir: PathBuf::from("l10n"),
            baseline_language: "english".to_string(),
            data_dir: PathBuf::from("data/L10n"),
            snapshot_file: "l10n.json".to_string(),
            prefs_file: PathBuf::from("data/prefs.json"),
            anchor_key: "locale_catalog.l10n.sha256".to_string(),
            device_language: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            // Translation resources
            resources_dir: env_var("L10N_RESOURCES_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.resources_dir),
            baseline_language: env_var("L10N_BASELINE_LANGUAGE")
                .unwrap_or(defaults.baseline_language),

            // Persisted selection
            data_dir: env_var("L10N_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            snapshot_file: env_var("L10N_SNAPSHOT_FILE").unwrap_or(defaults.snapshot_file),

            // Trust anchor
            prefs_file: env_var("L10N_PREFS_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.prefs_file),
            anchor_key: env_var("L10N_ANCHOR_KEY").unwrap_or(defaults.anchor_key),

            // Device locale override
            device_language: env_var("L10N_DEVICE_LANGUAGE"),
        })
    }

    /// Full path of the persisted snapshot file
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(&self.snapshot_file)
    }
}

/// Read a variable, treating unset and blank values the same
fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
