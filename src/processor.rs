//! Line Processor
//!
//! Applies one compiled command to one line and says what to emit.

use crate::command::Command;
use crate::config::RegexSyntax;
use crate::error::Result;
use crate::substitution::Substitution;

/// What a single input line turns into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutput {
    /// One output line (subject to auto-print)
    Emit(Vec<u8>),
    /// Two explicit output lines, then auto-print as usual
    EmitTwice(Vec<u8>),
    /// Nothing for this line
    Suppress,
}

#[derive(Debug, Clone)]
enum Action {
    Substitute(Substitution),
    Delete,
    Print,
    Passthrough,
}

/// A command ready to run against lines
#[derive(Debug, Clone)]
pub struct LineProcessor {
    action: Action,
}

impl LineProcessor {
    /// Compile the command; a bad pattern fails here, before any input is read
    pub fn new(command: &Command, syntax: RegexSyntax) -> Result<Self> {
        let action = match command {
            Command::Substitute {
                pattern,
                replacement,
                flags,
            } => Action::Substitute(Substitution::compile(pattern, replacement, *flags, syntax)?),
            Command::Delete => Action::Delete,
            Command::Print => Action::Print,
            Command::Passthrough => Action::Passthrough,
        };

        Ok(Self { action })
    }

    /// `line` is the raw line content without its terminator
    pub fn process(&self, line: &[u8]) -> LineOutput {
        match &self.action {
            Action::Substitute(sub) => LineOutput::Emit(sub.apply(line).into_owned()),
            Action::Delete => LineOutput::Suppress,
            Action::Print => LineOutput::EmitTwice(line.to_vec()),
            Action::Passthrough => LineOutput::Emit(line.to_vec()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    fn processor(script: &str) -> LineProcessor {
        let command = Parser::default().parse(script).unwrap();
        LineProcessor::new(&command, RegexSyntax::Native).unwrap()
    }

    fn emit(text: &str) -> LineOutput {
        LineOutput::Emit(text.as_bytes().to_vec())
    }

    #[test]
    fn test_substitute_emits_transformed_line() {
        assert_eq!(processor("s/a/x/").process(b"abc"), emit("xbc"));
        assert_eq!(processor("s/a/x/g").process(b"aaa"), emit("xxx"));
    }

    #[test]
    fn test_delete_suppresses() {
        let p = processor("d");
        assert_eq!(p.process(b"anything"), LineOutput::Suppress);
        assert_eq!(p.process(b""), LineOutput::Suppress);
    }

    #[test]
    fn test_print_emits_twice() {
        assert_eq!(processor("p").process(b"a"), LineOutput::EmitTwice(b"a".to_vec()));
    }

    #[test]
    fn test_passthrough() {
        assert_eq!(processor("").process(b"same"), emit("same"));
        assert_eq!(processor("").process(b"caf\xe9"), LineOutput::Emit(b"caf\xe9".to_vec()));
    }

    #[test]
    fn test_bad_pattern_fails_at_construction() {
        let command = Parser::default().parse("s/[a/x/").unwrap();
        assert!(LineProcessor::new(&command, RegexSyntax::Native).is_err());
    }
}
