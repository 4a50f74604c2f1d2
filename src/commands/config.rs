use clap::{Args, Subcommand};
use serde::Serialize;
use serde_json::Value;

use batwrap::defaults::{self, BatwrapConfig, Defaults};

use super::CmdResult;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Display configuration (merged defaults + file)
    Show {
        /// Show only built-in defaults (ignore batwrap.json)
        #[arg(long)]
        builtin: bool,
    },
    /// Set an existing configuration value at a JSON pointer path
    Set {
        /// JSON pointer path (e.g., /defaults/launcher/interpreter)
        pointer: String,
        /// Value to set (JSON; bare words are taken as strings)
        value: String,
    },
    /// Reset configuration to built-in defaults (deletes batwrap.json)
    Reset,
    /// Show the path to batwrap.json
    Path,
}

#[derive(Debug, Serialize, Default)]
pub struct ConfigOutput {
    command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    config: Option<BatwrapConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    defaults: Option<Defaults>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exists: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pointer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    deleted: Option<bool>,
}

pub fn run(args: ConfigArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<ConfigOutput> {
    match args.command {
        ConfigCommand::Show { builtin } => show(builtin),
        ConfigCommand::Set { pointer, value } => set(&pointer, &value),
        ConfigCommand::Reset => reset(),
        ConfigCommand::Path => path(),
    }
}

fn show(builtin: bool) -> CmdResult<ConfigOutput> {
    let output = if builtin {
        ConfigOutput {
            command: "config.show".to_string(),
            defaults: Some(defaults::builtin_defaults()),
            ..ConfigOutput::default()
        }
    } else {
        ConfigOutput {
            command: "config.show".to_string(),
            config: Some(defaults::load_config()),
            ..ConfigOutput::default()
        }
    };

    Ok((output, 0))
}

/// Parse a value as JSON, falling back to a plain string.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn apply_pointer(config: &BatwrapConfig, pointer: &str, value: Value) -> batwrap::Result<BatwrapConfig> {
    if !pointer.starts_with('/') {
        return Err(batwrap::Error::validation_invalid_argument(
            "pointer",
            "JSON pointer must start with '/'",
            Some(pointer.to_string()),
            None,
        ));
    }

    let mut config_json = serde_json::to_value(config).map_err(|e| {
        batwrap::Error::internal_json(e.to_string(), Some("serialize config".to_string()))
    })?;

    let slot = config_json.pointer_mut(pointer).ok_or_else(|| {
        batwrap::Error::validation_invalid_argument(
            "pointer",
            format!("No configuration key at '{}'", pointer),
            Some(pointer.to_string()),
            Some(vec!["Run 'batwrap config show --builtin' to list keys".to_string()]),
        )
    })?;
    *slot = value;

    serde_json::from_value(config_json).map_err(|e| {
        batwrap::Error::config_invalid_value(pointer, None, e.to_string())
    })
}

fn set(pointer: &str, raw_value: &str) -> CmdResult<ConfigOutput> {
    let value = parse_value(raw_value);
    let config = apply_pointer(&defaults::load_config(), pointer, value.clone())?;

    defaults::save_config(&config)?;

    Ok((
        ConfigOutput {
            command: "config.set".to_string(),
            config: Some(config),
            pointer: Some(pointer.to_string()),
            value: Some(value),
            ..ConfigOutput::default()
        },
        0,
    ))
}

fn reset() -> CmdResult<ConfigOutput> {
    let deleted = defaults::reset_config()?;

    Ok((
        ConfigOutput {
            command: "config.reset".to_string(),
            defaults: Some(defaults::builtin_defaults()),
            deleted: Some(deleted),
            ..ConfigOutput::default()
        },
        0,
    ))
}

fn path() -> CmdResult<ConfigOutput> {
    Ok((
        ConfigOutput {
            command: "config.path".to_string(),
            path: Some(defaults::config_path()?),
            exists: Some(defaults::config_exists()),
            ..ConfigOutput::default()
        },
        0,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_value_falls_back_to_string() {
        assert_eq!(parse_value("pwsh.exe"), Value::String("pwsh.exe".into()));
        assert_eq!(parse_value("\"1F\""), Value::String("1F".into()));
    }

    #[test]
    fn apply_pointer_updates_known_key() {
        let config = apply_pointer(
            &BatwrapConfig::default(),
            "/defaults/launcher/interpreter",
            Value::String("pwsh.exe".into()),
        )
        .unwrap();
        assert_eq!(config.defaults.launcher.interpreter, "pwsh.exe");
    }

    #[test]
    fn apply_pointer_rejects_unknown_key() {
        let err = apply_pointer(
            &BatwrapConfig::default(),
            "/defaults/launcher/nope",
            Value::Bool(true),
        )
        .unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
    }

    #[test]
    fn apply_pointer_rejects_wrong_type() {
        let err = apply_pointer(
            &BatwrapConfig::default(),
            "/defaults/columns/delimiter",
            Value::Bool(true),
        )
        .unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_value");
    }
}
