//! Script Parser
//!
//! Turns a one-command script (`s/pat/repl/flags`, `d`, `p`) into a
//! [`Command`]. How unrecognized input is treated is controlled by
//! [`ParsePolicy`].

use crate::command::{Command, SubstitutionFlags};
use crate::error::{Result, SedError};

/// Characters accepted as the delimiter right after `s`.
pub const SUBSTITUTE_DELIMITERS: [char; 3] = ['/', '|', ','];

/// How the parser treats scripts it doesn't fully understand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParsePolicy {
    /// Reject unknown commands, trailing characters and unknown flags
    #[default]
    Strict,
    /// Prefix dispatch: anything unrecognized passes lines through unchanged
    Lenient,
}

/// Script parser bound to a policy
pub struct Parser {
    policy: ParsePolicy,
}

impl Parser {
    /// Create a new parser with the specified policy
    pub fn new(policy: ParsePolicy) -> Self {
        Self { policy }
    }

    /// Parse a script into exactly one Command
    pub fn parse(&self, script: &str) -> Result<Command> {
        let mut chars = script.chars();

        match chars.next() {
            None => Ok(Command::Passthrough),
            Some('s') => self.parse_substitute(script, chars.as_str()),
            Some('d') => self.finish_simple(script, chars.as_str(), Command::Delete),
            Some('p') => self.finish_simple(script, chars.as_str(), Command::Print),
            Some(_) => self.unrecognized(script, SedError::UnknownCommand {
                script: script.to_string(),
            }),
        }
    }

    /// `d` and `p` take no arguments; under Strict only whitespace may follow.
    fn finish_simple(&self, script: &str, rest: &str, command: Command) -> Result<Command> {
        if self.policy == ParsePolicy::Strict && !rest.trim().is_empty() {
            return Err(SedError::TrailingCharacters {
                script: script.to_string(),
            });
        }
        Ok(command)
    }

    fn parse_substitute(&self, script: &str, rest: &str) -> Result<Command> {
        let mut chars = rest.chars();
        let delimiter = match chars.next() {
            Some(c) if SUBSTITUTE_DELIMITERS.contains(&c) => c,
            Some(c) => {
                return self.unrecognized(script, SedError::UnsupportedDelimiter {
                    script: script.to_string(),
                    delimiter: c,
                });
            }
            None => {
                return self.unrecognized(script, SedError::InvalidSubstitute {
                    script: script.to_string(),
                });
            }
        };

        // Literal split: the delimiter can't appear inside pattern or replacement
        let fields: Vec<&str> = chars.as_str().split(delimiter).collect();
        if fields.len() < 2 {
            return Err(SedError::InvalidSubstitute {
                script: script.to_string(),
            });
        }

        if fields.len() > 3 && self.policy == ParsePolicy::Strict {
            return Err(SedError::ExtraFields {
                script: script.to_string(),
            });
        }

        let flags = self.parse_flags(script, fields.get(2).copied().unwrap_or(""))?;

        Ok(Command::Substitute {
            pattern: fields[0].to_string(),
            replacement: fields[1].to_string(),
            flags,
        })
    }

    fn parse_flags(&self, script: &str, raw: &str) -> Result<SubstitutionFlags> {
        let mut flags = SubstitutionFlags::default();

        for flag in raw.chars() {
            match flag {
                'g' => flags.global = true,
                'i' | 'I' => flags.case_insensitive = true,
                c if c.is_whitespace() => {}
                c => {
                    if self.policy == ParsePolicy::Strict {
                        return Err(SedError::UnknownFlag {
                            script: script.to_string(),
                            flag: c,
                        });
                    }
                }
            }
        }

        Ok(flags)
    }

    fn unrecognized(&self, script: &str, strict_error: SedError) -> Result<Command> {
        match self.policy {
            ParsePolicy::Strict => Err(strict_error),
            ParsePolicy::Lenient => {
                tracing::debug!(script, "unrecognized script, passing lines through");
                Ok(Command::Passthrough)
            }
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(ParsePolicy::default())
    }
}
