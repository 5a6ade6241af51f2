use std::collections::HashMap;

use super::MacroTable;

#[derive(Debug, thiserror::Error)]
pub enum MacroConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("trigger '{trigger}' has no ASCII keystrokes")]
    EmptyTrigger { trigger: String },
}

/// Parse a macros.toml file (flat `trigger = "expansion"` format) into a
/// [`MacroTable`]. Triggers must contain at least one ASCII keystroke; the
/// expansion side is free-form text.
pub fn parse_macros_toml(toml_str: &str) -> Result<MacroTable, MacroConfigError> {
    let raw: HashMap<String, String> =
        toml::from_str(toml_str).map_err(|e| MacroConfigError::Parse(e.to_string()))?;

    let mut table = MacroTable::new();
    for (trigger, expansion) in &raw {
        if super::pack_trigger(trigger).is_empty() {
            return Err(MacroConfigError::EmptyTrigger {
                trigger: trigger.clone(),
            });
        }
        table.insert(trigger, expansion);
    }
    Ok(table)
}
