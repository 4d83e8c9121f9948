//! Parsed script representation
//!
//! A script always produces exactly one [`Command`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Text substitution (s/pattern/replacement/flags)
    Substitute {
        pattern: String,
        replacement: String,
        flags: SubstitutionFlags,
    },

    /// Delete every line (d)
    Delete,

    /// Emit every line twice, on top of auto-print (p)
    Print,

    /// Leave every line unchanged (empty script)
    #[default]
    Passthrough,
}

/// Substitution flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubstitutionFlags {
    /// g - all occurrences
    pub global: bool,

    /// i - case-insensitive matching
    pub case_insensitive: bool,
}

impl Command {
    /// Short name used in log output.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Substitute { .. } => "substitute",
            Command::Delete => "delete",
            Command::Print => "print",
            Command::Passthrough => "passthrough",
        }
    }
}
