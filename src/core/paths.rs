use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;

/// Base batwrap config directory (`~/.config/batwrap/`, `%APPDATA%\batwrap` on Windows)
pub fn batwrap() -> Result<PathBuf> {
    #[cfg(windows)]
    {
        let appdata = env::var("APPDATA").map_err(|_| {
            Error::internal_unexpected(
                "APPDATA environment variable not set on Windows".to_string(),
            )
        })?;
        Ok(PathBuf::from(appdata).join("batwrap"))
    }

    #[cfg(not(windows))]
    {
        let home = env::var("HOME").map_err(|_| {
            Error::internal_unexpected(
                "HOME environment variable not set on Unix-like system".to_string(),
            )
        })?;
        Ok(PathBuf::from(home).join(".config").join("batwrap"))
    }
}

/// Global batwrap.json config file path
pub fn batwrap_json() -> Result<PathBuf> {
    Ok(batwrap()?.join("batwrap.json"))
}
