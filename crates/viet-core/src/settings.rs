//! Session settings parsed from TOML.
//!
//! Plain values handed to the session at construction; there is no global
//! singleton and no dynamic reconfiguration mid-keystroke.

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
}

/// The two ASCII keystroke conventions for Vietnamese diacritics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMethod {
    #[default]
    Telex,
    Vni,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub input_method: InputMethod,
    /// Modern vs old tone placement for ambiguous open clusters (uy).
    pub modern_orthography: bool,
    pub macros_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input_method: InputMethod::Telex,
            modern_orthography: true,
            macros_enabled: true,
        }
    }
}

impl Settings {
    pub fn from_toml(toml_str: &str) -> Result<Self, SettingsError> {
        toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))
    }
}
