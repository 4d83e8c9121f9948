//! Substitution Engine
//!
//! The pattern is compiled once per invocation. Applying a compiled
//! substitution to a line cannot fail. Lines are matched as bytes, so input
//! that isn't valid UTF-8 is still transformed and otherwise kept verbatim.

use crate::command::SubstitutionFlags;
use crate::config::RegexSyntax;
use crate::ere_converter::{convert_ere_pattern, convert_ere_replacement};
use crate::error::Result;
use crate::regex_error::RegexDiagnostic;
use regex::bytes::{Regex, RegexBuilder};
use std::borrow::Cow;

/// Compiled `s` command
#[derive(Debug, Clone)]
pub struct Substitution {
    pattern: Regex,
    replacement: Vec<u8>,
    global: bool,
}

impl Substitution {
    /// Compile pattern and replacement for the given syntax
    pub fn compile(
        pattern: &str,
        replacement: &str,
        flags: SubstitutionFlags,
        syntax: RegexSyntax,
    ) -> Result<Self> {
        let (pattern_src, replacement) = match syntax {
            RegexSyntax::Native => (pattern.to_string(), replacement.to_string()),
            RegexSyntax::Extended => (
                convert_ere_pattern(pattern),
                convert_ere_replacement(replacement),
            ),
        };

        let regex = RegexBuilder::new(&pattern_src)
            .case_insensitive(flags.case_insensitive)
            .build()
            .map_err(|err| RegexDiagnostic::from_regex_error(&err, pattern, syntax).into_error(err))?;

        tracing::debug!(pattern = %pattern_src, replacement = %replacement, global = flags.global, "compiled substitution");

        Ok(Substitution {
            pattern: regex,
            replacement: replacement.into_bytes(),
            global: flags.global,
        })
    }

    /// Substitute within one line: every non-overlapping match when global,
    /// otherwise only the leftmost one
    pub fn apply<'a>(&self, line: &'a [u8]) -> Cow<'a, [u8]> {
        if self.global {
            self.pattern.replace_all(line, self.replacement.as_slice())
        } else {
            self.pattern.replacen(line, 1, self.replacement.as_slice())
        }
    }
}
