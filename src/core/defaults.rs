use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::paths;

/// Root configuration structure for batwrap.json
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BatwrapConfig {
    #[serde(default)]
    pub defaults: Defaults,
}

/// All configurable defaults that can be overridden via batwrap.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Defaults {
    #[serde(default = "default_launcher")]
    pub launcher: LauncherProfile,

    #[serde(default = "default_columns")]
    pub columns: ColumnsConfig,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            launcher: default_launcher(),
            columns: default_columns(),
        }
    }
}

/// Interpreter and shell constants baked into every emitted launcher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LauncherProfile {
    /// Interpreter executable invoked on the reconstructed script
    #[serde(default = "default_interpreter")]
    pub interpreter: String,

    /// Flag lifting the interpreter's execution policy
    #[serde(default = "default_unrestricted_flag")]
    pub unrestricted_flag: String,

    /// Flag hiding the interpreter window (only with --hide-terminal)
    #[serde(default = "default_hidden_flag")]
    pub hidden_flag: String,

    /// Flag preceding the reconstructed script path
    #[serde(default = "default_file_flag")]
    pub file_flag: String,

    /// Extension of the reconstructed temp script
    #[serde(default = "default_temp_extension")]
    pub temp_extension: String,

    /// Suffix appended to the input path when no output path is given
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,

    /// Console attribute passed to `color`
    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for LauncherProfile {
    fn default() -> Self {
        default_launcher()
    }
}

/// Configuration for the column copy utility
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnsConfig {
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_launcher() -> LauncherProfile {
    LauncherProfile {
        interpreter: default_interpreter(),
        unrestricted_flag: default_unrestricted_flag(),
        hidden_flag: default_hidden_flag(),
        file_flag: default_file_flag(),
        temp_extension: default_temp_extension(),
        output_suffix: default_output_suffix(),
        color: default_color(),
    }
}

fn default_interpreter() -> String {
    "powershell.exe".to_string()
}

fn default_unrestricted_flag() -> String {
    "-ExecutionPolicy Bypass".to_string()
}

fn default_hidden_flag() -> String {
    "-WindowStyle Hidden".to_string()
}

fn default_file_flag() -> String {
    "-File".to_string()
}

fn default_temp_extension() -> String {
    ".ps1".to_string()
}

fn default_output_suffix() -> String {
    ".bat".to_string()
}

fn default_color() -> String {
    "0A".to_string()
}

fn default_columns() -> ColumnsConfig {
    ColumnsConfig {
        delimiter: default_delimiter(),
    }
}

fn default_delimiter() -> String {
    ",".to_string()
}

// =============================================================================
// Loading functions
// =============================================================================

/// Load defaults, merging file config with built-in defaults.
/// If batwrap.json is missing or invalid, silently returns built-in defaults.
pub fn load_defaults() -> Defaults {
    load_config().defaults
}

/// Load the full batwrap.json config, falling back to defaults on any error.
pub fn load_config() -> BatwrapConfig {
    paths::batwrap_json()
        .and_then(|path| load_config_from_path(&path))
        .unwrap_or_default()
}

/// Load a config file from an explicit path.
pub fn load_config_from_path(path: &Path) -> crate::Result<BatwrapConfig> {
    if !path.exists() {
        return Err(crate::Error::other(format!(
            "{} not found",
            path.display()
        )));
    }

    let content = fs::read_to_string(path).map_err(|e| {
        crate::Error::internal_io(e.to_string(), Some(format!("read {}", path.display())))
    })?;

    serde_json::from_str(&content)
        .map_err(|e| crate::Error::config_invalid_json(path.display().to_string(), e))
}

/// Save config to batwrap.json (creates if missing).
pub fn save_config(config: &BatwrapConfig) -> crate::Result<()> {
    save_config_to_path(config, &paths::batwrap_json()?)
}

pub fn save_config_to_path(config: &BatwrapConfig, path: &Path) -> crate::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            crate::Error::internal_io(e.to_string(), Some(format!("create {}", parent.display())))
        })?;
    }

    let content = serde_json::to_string_pretty(config).map_err(|e| {
        crate::Error::internal_json(e.to_string(), Some("serialize batwrap.json".to_string()))
    })?;

    crate::utils::io::write_file_atomic(path, &content, &format!("write {}", path.display()))
}

/// Check if batwrap.json file exists
pub fn config_exists() -> bool {
    paths::batwrap_json()
        .map(|p| p.exists())
        .unwrap_or(false)
}

/// Delete batwrap.json file (reset to defaults)
pub fn reset_config() -> crate::Result<bool> {
    let path = paths::batwrap_json()?;

    if path.exists() {
        fs::remove_file(&path).map_err(|e| {
            crate::Error::internal_io(e.to_string(), Some(format!("delete {}", path.display())))
        })?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Get the path to batwrap.json (for display purposes)
pub fn config_path() -> crate::Result<String> {
    Ok(paths::batwrap_json()?.display().to_string())
}

/// Get built-in defaults (ignoring any file config)
pub fn builtin_defaults() -> Defaults {
    Defaults::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn partial_file_keeps_builtin_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("batwrap.json");
        fs::write(
            &path,
            r#"{"defaults":{"launcher":{"interpreter":"pwsh.exe"}}}"#,
        )
        .unwrap();

        let config = load_config_from_path(&path).unwrap();
        assert_eq!(config.defaults.launcher.interpreter, "pwsh.exe");
        assert_eq!(config.defaults.launcher.output_suffix, ".bat");
        assert_eq!(config.defaults.columns.delimiter, ",");
    }

    #[test]
    fn invalid_json_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("batwrap.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_config_from_path(&path).unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_json");
    }

    #[test]
    fn save_then_load_preserves_overrides() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("batwrap.json");
        let mut config = BatwrapConfig::default();
        config.defaults.launcher.color = "1F".to_string();

        save_config_to_path(&config, &path).unwrap();

        assert_eq!(load_config_from_path(&path).unwrap(), config);
    }
}
