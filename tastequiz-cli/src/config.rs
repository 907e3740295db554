/// Config file loading and creation for the tastequiz CLI.
///
/// Config lives at ~/.config/tastequiz/config.toml.
/// All fields are optional — CLI args override config values.
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::bail;

#[derive(Deserialize, Default, Debug, PartialEq)]
pub struct TastequizConfig {
    pub manifest: Option<String>,
    pub level: Option<String>,
    pub export_dir: Option<String>,
    pub taste_service_url: Option<String>,
    pub user_id: Option<String>,
}

const DEFAULT_CONFIG_TEMPLATE: &str = "\
# tastequiz configuration
# All values here can be overridden by CLI flags.

# Scored quiz manifest (JSON with styles and images)
# manifest = \"/path/to/quiz_manifest_scored.json\"

# Default quiz level: l1 (quick), l2 (planned) or l3 (advanced)
# level = \"l1\"

# Directory where finished results are exported as JSON.
# If not set, results are only exported when --export is given.
# export_dir = \"/path/to/results\"

# Taste vector service used by `tastequiz submit`
# taste_service_url = \"https://example.com/taste-vector\"

# User ID sent along with submitted results
# user_id = \"me\"
";

/// Returns the default config path: ~/.config/tastequiz/config.toml
pub fn config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| bail("HOME environment variable not set"));
    PathBuf::from(home).join(".config").join("tastequiz").join("config.toml")
}

pub fn parse_config(content: &str) -> Result<TastequizConfig, toml::de::Error> {
    toml::from_str(content)
}

/// Load config from a file path. Returns default (all None) if file doesn't exist.
pub fn load_config(path: &Path) -> TastequizConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content)
            .unwrap_or_else(|e| bail(format!("Failed to parse config at {}: {e}", path.display()))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => TastequizConfig::default(),
        Err(e) => bail(format!("Failed to read config at {}: {e}", path.display())),
    }
}

/// Create the default config file. Errors if it already exists.
pub fn create_default_config() -> PathBuf {
    let path = config_path();

    if path.exists() {
        bail(format!("Config file already exists at {}", path.display()));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| bail(format!("Failed to create directory {}: {e}", parent.display())));
    }

    std::fs::write(&path, DEFAULT_CONFIG_TEMPLATE)
        .unwrap_or_else(|e| bail(format!("Failed to write config to {}: {e}", path.display())));

    path
}
