//! Regex Error Handling
//!
//! Turns `regex::Error` values into one-line diagnostics with a hint,
//! so a bad pattern is reported clearly before any input is read.

use crate::config::RegexSyntax;
use crate::error::SedError;
use regex::Error as RegexError;

/// Types of regex errors we give specific advice for
#[derive(Debug, Clone, PartialEq)]
pub enum RegexErrorType {
    UnclosedGroup,
    UnclosedClass,
    RepetitionMissing,
    InvalidRepetition,
    Lookaround,
    Backreference,
    TooBig,
    Syntax,
}

/// Compile failure with the engine's own message and a suggestion
#[derive(Debug, Clone, PartialEq)]
pub struct RegexDiagnostic {
    pub pattern: String,
    pub syntax: RegexSyntax,
    pub error_type: RegexErrorType,
    /// Last line of the engine's message, without the `error:` prefix
    pub summary: String,
    pub suggestion: Option<String>,
}

impl RegexDiagnostic {
    pub fn from_regex_error(err: &RegexError, pattern: &str, syntax: RegexSyntax) -> Self {
        let summary = summarize(err);
        let error_type = classify(err, &summary);
        let suggestion = suggest(&error_type, syntax);

        RegexDiagnostic {
            pattern: pattern.to_string(),
            syntax,
            error_type,
            summary,
            suggestion,
        }
    }

    /// Single-line message: summary plus hint when we have one
    pub fn message(&self) -> String {
        match &self.suggestion {
            Some(hint) => format!("{} ({})", self.summary, hint),
            None => self.summary.clone(),
        }
    }

    pub fn into_error(self, source: RegexError) -> SedError {
        let message = self.message();
        SedError::InvalidRegex {
            pattern: self.pattern,
            message,
            source,
        }
    }
}

fn summarize(err: &RegexError) -> String {
    match err {
        RegexError::Syntax(text) => text
            .lines()
            .rev()
            .find(|line| !line.trim().is_empty())
            .map(|line| line.trim().trim_start_matches("error:").trim().to_string())
            .unwrap_or_else(|| text.clone()),
        RegexError::CompiledTooBig(limit) => {
            format!("compiled regex exceeds size limit of {} bytes", limit)
        }
        other => other.to_string(),
    }
}

fn classify(err: &RegexError, summary: &str) -> RegexErrorType {
    if matches!(err, RegexError::CompiledTooBig(_)) {
        return RegexErrorType::TooBig;
    }

    let lower = summary.to_lowercase();
    if lower.contains("look-around") || lower.contains("lookaround") {
        RegexErrorType::Lookaround
    } else if lower.contains("backreference") {
        RegexErrorType::Backreference
    } else if lower.contains("unclosed group") || lower.contains("unopened group") {
        RegexErrorType::UnclosedGroup
    } else if lower.contains("unclosed character class") {
        RegexErrorType::UnclosedClass
    } else if lower.contains("repetition operator missing expression") {
        RegexErrorType::RepetitionMissing
    } else if lower.contains("repetition") || lower.contains("quantifier") {
        RegexErrorType::InvalidRepetition
    } else {
        RegexErrorType::Syntax
    }
}

fn suggest(error_type: &RegexErrorType, syntax: RegexSyntax) -> Option<String> {
    let hint = match error_type {
        RegexErrorType::UnclosedGroup => {
            "every '(' needs a matching ')'; use '\\(' for a literal parenthesis"
        }
        RegexErrorType::UnclosedClass => "add a closing ']' to the character class",
        RegexErrorType::RepetitionMissing => {
            "a quantifier (*, +, ?, {n}) must follow a character or group"
        }
        RegexErrorType::InvalidRepetition => "counted repetition must look like {n}, {n,} or {n,m} with n <= m",
        RegexErrorType::Lookaround => "look-ahead and look-behind are not supported",
        RegexErrorType::Backreference => match syntax {
            RegexSyntax::Native => {
                "backreferences are not supported in patterns; use $1 in the replacement"
            }
            RegexSyntax::Extended => {
                "backreferences are not supported in patterns; use \\1 in the replacement"
            }
        },
        RegexErrorType::TooBig => "simplify the pattern or reduce large counted repetitions",
        RegexErrorType::Syntax => return None,
    };
    Some(hint.to_string())
}
