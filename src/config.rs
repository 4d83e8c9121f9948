//! Configuration for sedline
//!
//! Two layers live here:
//! - [`InvocationConfig`], the immutable per-run configuration built and
//!   validated by [`InvocationConfigBuilder`]
//! - [`Settings`], user defaults stored in ~/.sedline/config.toml

use crate::error::{Result, SedError};
use crate::parser::ParsePolicy;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the settings file location
pub const CONFIG_ENV: &str = "SEDLINE_CONFIG";

/// Pattern and replacement syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegexSyntax {
    /// The regex engine's own syntax; replacements use $1, ${name}
    #[default]
    Native,
    /// POSIX ERE patterns with sed-style \1 and & replacements (-E)
    Extended,
}

/// Where the script text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptSource {
    Inline(String),
    File(PathBuf),
}

/// Immutable configuration for one invocation
#[derive(Debug, Clone)]
pub struct InvocationConfig {
    script: ScriptSource,
    files: Vec<PathBuf>,
    quiet: bool,
    in_place: bool,
    regex_syntax: RegexSyntax,
    parse_policy: ParsePolicy,
}

impl InvocationConfig {
    pub fn builder() -> InvocationConfigBuilder {
        InvocationConfigBuilder::default()
    }

    pub fn script(&self) -> &ScriptSource {
        &self.script
    }

    /// Input files; empty means read the provided reader (stdin)
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn quiet(&self) -> bool {
        self.quiet
    }

    pub fn in_place(&self) -> bool {
        self.in_place
    }

    pub fn regex_syntax(&self) -> RegexSyntax {
        self.regex_syntax
    }

    pub fn parse_policy(&self) -> ParsePolicy {
        self.parse_policy
    }
}

/// Builder resolving script precedence at construction time
///
/// Precedence: a non-empty expression, then a script file, then the first
/// positional argument. Once the script comes from an option, every
/// positional argument is an input file.
#[derive(Debug, Clone, Default)]
pub struct InvocationConfigBuilder {
    expression: Option<String>,
    script_file: Option<PathBuf>,
    positional: Vec<String>,
    quiet: bool,
    in_place: bool,
    regex_syntax: RegexSyntax,
    parse_policy: ParsePolicy,
}

impl InvocationConfigBuilder {
    pub fn expression(mut self, expression: impl Into<String>) -> Self {
        self.expression = Some(expression.into());
        self
    }

    pub fn script_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.script_file = Some(path.into());
        self
    }

    pub fn positional<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.positional.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn in_place(mut self, in_place: bool) -> Self {
        self.in_place = in_place;
        self
    }

    pub fn regex_syntax(mut self, syntax: RegexSyntax) -> Self {
        self.regex_syntax = syntax;
        self
    }

    pub fn parse_policy(mut self, policy: ParsePolicy) -> Self {
        self.parse_policy = policy;
        self
    }

    /// Apply user defaults from the settings file; explicit calls made
    /// afterwards still win.
    pub fn settings(mut self, settings: &Settings) -> Self {
        if settings.regex.extended == Some(true) {
            self.regex_syntax = RegexSyntax::Extended;
        }
        if settings.parsing.strict == Some(false) {
            self.parse_policy = ParsePolicy::Lenient;
        }
        self
    }

    pub fn build(self) -> Result<InvocationConfig> {
        let expression = self.expression.filter(|e| !e.is_empty());
        let mut positional = self.positional.into_iter();

        let script = match (expression, self.script_file) {
            (Some(expression), script_file) => {
                if let Some(path) = script_file {
                    tracing::warn!(
                        path = %path.display(),
                        "both expression and script file given, ignoring script file"
                    );
                }
                ScriptSource::Inline(expression)
            }
            (None, Some(path)) => ScriptSource::File(path),
            (None, None) => match positional.next() {
                Some(first) if !first.is_empty() => ScriptSource::Inline(first),
                _ => return Err(SedError::MissingExpression),
            },
        };

        let files: Vec<PathBuf> = positional.map(PathBuf::from).collect();

        if self.in_place && files.is_empty() {
            return Err(SedError::InPlaceWithoutFiles);
        }

        Ok(InvocationConfig {
            script,
            files,
            quiet: self.quiet,
            in_place: self.in_place,
            regex_syntax: self.regex_syntax,
            parse_policy: self.parse_policy,
        })
    }
}

/// User defaults loaded from ~/.sedline/config.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub parsing: ParsingSettings,

    #[serde(default)]
    pub regex: RegexSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsingSettings {
    /// Reject unrecognized scripts instead of passing lines through
    #[serde(default = "default_strict")]
    pub strict: Option<bool>,
}

impl Default for ParsingSettings {
    fn default() -> Self {
        Self { strict: Some(true) }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegexSettings {
    /// Use extended (ERE) syntax by default
    #[serde(default = "default_extended")]
    pub extended: Option<bool>,
}

impl Default for RegexSettings {
    fn default() -> Self {
        Self {
            extended: Some(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Write a debug log to ~/.sedline/sedline.log
    #[serde(default = "default_debug")]
    pub debug: Option<bool>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self { debug: Some(false) }
    }
}

// Default functions for serde
fn default_strict() -> Option<bool> { Some(true) }
fn default_extended() -> Option<bool> { Some(false) }
fn default_debug() -> Option<bool> { Some(false) }

/// Directory holding settings and logs
pub fn sedline_dir() -> anyhow::Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home_dir.join(".sedline"))
}

/// Get the settings file path, honoring SEDLINE_CONFIG
pub fn settings_file_path() -> anyhow::Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }
    Ok(sedline_dir()?.join("config.toml"))
}

/// Load settings from the default location
///
/// A missing file yields defaults.
pub fn load_settings() -> anyhow::Result<Settings> {
    let path = settings_file_path()?;
    load_settings_from(&path)
}

pub fn load_settings_from(path: &Path) -> anyhow::Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let settings: Settings = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(settings)
}
