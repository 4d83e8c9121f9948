//! sedline: a minimal single-command stream editor
//!
//! A script (`s/pat/repl/flags`, `d` or `p`) is parsed once into a
//! [`Command`], compiled, and applied to every input line in order.
//! The binary is at src/main.rs.

pub mod command;
pub mod config;
pub mod driver;
pub mod ere_converter;
pub mod error;
pub mod error_helpers;
pub mod invocation;
pub mod logger;
pub mod parser;
pub mod processor;
pub mod regex_error;
pub mod substitution;

// Re-export commonly used types for convenience
pub use command::{Command, SubstitutionFlags};
pub use config::{InvocationConfig, InvocationConfigBuilder, RegexSyntax, ScriptSource, Settings};
pub use driver::{CancellationToken, RunSummary, SourceFailure, StreamDriver};
pub use error::{ErrorKind, Result, SedError};
pub use invocation::Invocation;
pub use parser::{ParsePolicy, Parser};
pub use processor::{LineOutput, LineProcessor};
pub use substitution::Substitution;
