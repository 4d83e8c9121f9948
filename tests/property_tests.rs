//! Property-based tests for sedline
//!
//! Uses proptest to check the line-transform invariants over random input.

use std::io::Cursor;

use sedline::{
    CancellationToken, Command, Invocation, InvocationConfig, LineProcessor, Parser, RegexSyntax,
    StreamDriver, Substitution, SubstitutionFlags,
};

use proptest::prelude::*;

fn run_script(script: &str, quiet: bool, lines: &[String]) -> Vec<String> {
    let input: String = lines.iter().map(|l| format!("{}\n", l)).collect();
    let config = InvocationConfig::builder()
        .positional([script])
        .quiet(quiet)
        .build()
        .unwrap();

    let (mut out, mut err) = (Vec::new(), Vec::new());
    Invocation::run(config, CancellationToken::new(), Cursor::new(input), &mut out, &mut err).unwrap();

    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

fn substitution(pattern: &str, replacement: &str, global: bool) -> Substitution {
    let flags = SubstitutionFlags {
        global,
        ..Default::default()
    };
    Substitution::compile(pattern, replacement, flags, RegexSyntax::Native).unwrap()
}

fn apply(sub: &Substitution, line: &str) -> String {
    String::from_utf8(sub.apply(line.as_bytes()).into_owned()).unwrap()
}

// ============================================================================
// Line-count invariants
// ============================================================================

proptest! {
    /// Delete never emits anything
    #[test]
    fn prop_delete_output_is_empty(lines in prop::collection::vec("[a-z ]{0,20}", 0..50)) {
        prop_assert!(run_script("d", false, &lines).is_empty());
    }

    /// Passthrough keeps every line, in order
    #[test]
    fn prop_passthrough_is_identity(lines in prop::collection::vec("[a-z ]{0,20}", 0..50)) {
        let command = Parser::default().parse("").unwrap();
        prop_assert_eq!(&command, &Command::Passthrough);

        let input: String = lines.iter().map(|l| format!("{}\n", l)).collect();
        let processor = LineProcessor::new(&command, RegexSyntax::Native).unwrap();
        let driver = StreamDriver::new(processor, false, CancellationToken::new());
        let mut out = Vec::new();
        driver.process_reader(Cursor::new(input), &mut out).unwrap();

        let output: Vec<String> = String::from_utf8(out).unwrap().lines().map(str::to_string).collect();
        prop_assert_eq!(output, lines);
    }

    /// Print emits each line three times without -n and twice with it
    #[test]
    fn prop_print_multiplies_lines(lines in prop::collection::vec("[a-z]{1,10}", 0..30)) {
        prop_assert_eq!(run_script("p", false, &lines).len(), lines.len() * 3);
        prop_assert_eq!(run_script("p", true, &lines).len(), lines.len() * 2);
    }

    /// Substitute keeps one output line per input line
    #[test]
    fn prop_substitute_preserves_line_count(lines in prop::collection::vec("[a-c]{0,15}", 0..40)) {
        prop_assert_eq!(run_script("s/a/x/g", false, &lines).len(), lines.len());
    }
}

// ============================================================================
// Substitution invariants
// ============================================================================

proptest! {
    /// Without g, exactly one match per line is replaced
    #[test]
    fn prop_first_match_only(prefix in "[b-z]{0,10}", count in 1usize..10, suffix in "[a-z]{0,10}") {
        let line = format!("{}{}{}", prefix, "a".repeat(count), suffix);
        let before = line.matches('a').count();

        let output = apply(&substitution("a", "X", false), &line);

        prop_assert_eq!(output.matches('X').count(), 1);
        prop_assert_eq!(output.matches('a').count(), before - 1);
    }

    /// With g, every non-overlapping match is replaced
    #[test]
    fn prop_global_replaces_all(text in "[a-z]{0,60}") {
        let expected = text.matches("ab").count();
        let output = apply(&substitution("ab", "QUUX", true), &text);

        prop_assert_eq!(output.matches("QUUX").count(), expected);
    }

    /// A second pass finds nothing left to replace
    #[test]
    fn prop_second_pass_is_noop(text in "[a-z]{0,60}") {
        let sub = substitution("a", "x", true);
        let once = apply(&sub, &text);
        let twice = apply(&sub, &once);
        prop_assert_eq!(once, twice);
    }

    /// A pattern that can't match leaves the line untouched
    #[test]
    fn prop_no_match_is_identity(text in "[a-m]{0,60}", pattern in "[n-z]{1,5}") {
        let output = apply(&substitution(&pattern, "REPLACED", true), &text);
        prop_assert_eq!(output, text);
    }

    /// Arbitrary bytes (not necessarily UTF-8) come back verbatim when nothing matches
    #[test]
    fn prop_raw_bytes_pass_through(
        lines in prop::collection::vec(prop::collection::vec(any::<u8>().prop_filter("no a, no newline", |b| *b != b'a' && *b != b'\n' && *b != b'\r'), 0..20), 0..20)
    ) {
        let mut input = Vec::new();
        for line in &lines {
            input.extend_from_slice(line);
            input.push(b'\n');
        }

        let command = Parser::default().parse("s/a/x/g").unwrap();
        let processor = LineProcessor::new(&command, RegexSyntax::Native).unwrap();
        let driver = StreamDriver::new(processor, false, CancellationToken::new());
        let mut out = Vec::new();
        driver.process_reader(Cursor::new(input.clone()), &mut out).unwrap();

        prop_assert_eq!(out, input);
    }

    /// The parser recovers pattern and replacement for any delimiter
    #[test]
    fn prop_parse_recovers_fields(
        pattern in "[a-z0-9]{1,10}",
        replacement in "[a-z0-9]{0,10}",
        delim in prop::sample::select(vec!['/', '|', ',']),
        global in any::<bool>(),
    ) {
        let script = format!("s{d}{p}{d}{r}{d}{f}", d = delim, p = pattern, r = replacement, f = if global { "g" } else { "" });
        let command = Parser::default().parse(&script).unwrap();

        match command {
            Command::Substitute { pattern: p, replacement: r, flags } => {
                prop_assert_eq!(p, pattern);
                prop_assert_eq!(r, replacement);
                prop_assert_eq!(flags.global, global);
            }
            other => prop_assert!(false, "expected Substitute, got {:?}", other),
        }
    }
}
