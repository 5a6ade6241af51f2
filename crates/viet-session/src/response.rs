//! Per-keystroke result handed back to the host's injection layer.

/// What the host should do with the keystroke it just reported.
///
/// `consumed == false` means the physical key acts natively and the engine
/// only updated its model. `consumed == true` means the host suppresses the
/// key, deletes `backspace_count` characters from the field, then types
/// `output`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyOutcome {
    pub consumed: bool,
    pub backspace_count: usize,
    pub output: String,
}

impl KeyOutcome {
    /// Let the key through unchanged.
    pub(crate) fn passthrough() -> Self {
        Self {
            consumed: false,
            backspace_count: 0,
            output: String::new(),
        }
    }

    /// Swallow the key with no visible effect.
    pub(crate) fn consumed() -> Self {
        Self {
            consumed: true,
            backspace_count: 0,
            output: String::new(),
        }
    }

    /// Delete `backspace_count` characters, then type `output`.
    pub(crate) fn replace(backspace_count: usize, output: String) -> Self {
        Self {
            consumed: true,
            backspace_count,
            output,
        }
    }
}
