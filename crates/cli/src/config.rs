//! Optional on-disk defaults for comparison policy flags.
//!
//! A config file only ever *lowers* how much typing a repeat invocation
//! needs; every value it sets can still be overridden on the command line,
//! since `clap` flags are applied after the config defaults are loaded.

use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FileConfig {
    #[serde(default)]
    pub include_private_members: Option<bool>,
    #[serde(default)]
    pub include_package_private_classes: Option<bool>,
    #[serde(default)]
    pub analyze_field_changes: Option<bool>,
    #[serde(default)]
    pub analyze_annotations: Option<bool>,
    #[serde(default)]
    pub detect_binary_compatibility: Option<bool>,
}

/// Loads `path` if given, else the platform config directory's
/// `jarlint/config.toml` if it exists. Missing files are not an error —
/// callers get the engine's own defaults.
pub fn load(path: Option<&Path>) -> anyhow::Result<FileConfig> {
    let resolved = match path {
        Some(p) => Some(p.to_path_buf()),
        None => default_config_path(),
    };

    let Some(path) = resolved else {
        return Ok(FileConfig::default());
    };

    if !path.exists() {
        return Ok(FileConfig::default());
    }

    let contents = std::fs::read_to_string(&path)
        .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;
    toml::from_str(&contents).map_err(|e| anyhow::anyhow!("failed to parse config file {}: {e}", path.display()))
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("jarlint").join("config.toml"))
}

impl FileConfig {
    pub fn apply_to(&self, policy: &mut jarlint_diff_engine::ComparisonPolicy) {
        if let Some(v) = self.include_private_members {
            policy.include_private_members = v;
        }
        if let Some(v) = self.include_package_private_classes {
            policy.include_package_private_classes = v;
        }
        if let Some(v) = self.analyze_field_changes {
            policy.analyze_field_changes = v;
        }
        if let Some(v) = self.analyze_annotations {
            policy.analyze_annotations = v;
        }
        if let Some(v) = self.detect_binary_compatibility {
            policy.detect_binary_compatibility = v;
        }
    }
}
