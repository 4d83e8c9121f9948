//! ERE replacement conversion
//!
//! With extended regex syntax selected, patterns go to the regex engine
//! unchanged (ERE is already accepted by it). Replacement templates use sed
//! conventions and are rewritten into the engine's `$`-expansion syntax:
//!
//! - `\1`..`\9` → `${1}`..`${9}`
//! - `&` → `${0}` (whole match), `\&` → literal `&`
//! - `\\` → literal backslash, `\n` → newline, `\t` → tab
//! - literal `$` → `$$`

/// Convert an ERE pattern for the regex engine
///
/// ERE patterns are already accepted as-is.
pub fn convert_ere_pattern(pattern: &str) -> String {
    pattern.to_string()
}

/// Convert a sed-style replacement template to Rust regex expansion syntax
///
/// # Examples
///
/// ```
/// use sedline::ere_converter::convert_ere_replacement;
///
/// assert_eq!(convert_ere_replacement(r"\2-\1"), "${2}-${1}");
/// assert_eq!(convert_ere_replacement("[&]"), "[${0}]");
/// assert_eq!(convert_ere_replacement("$5"), "$$5");
/// ```
pub fn convert_ere_replacement(replacement: &str) -> String {
    let mut result = String::with_capacity(replacement.len());
    let mut chars = replacement.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(d @ '1'..='9') => {
                    result.push_str("${");
                    result.push(d);
                    result.push('}');
                }
                Some('&') => result.push('&'),
                Some('\\') => result.push('\\'),
                Some('n') => result.push('\n'),
                Some('t') => result.push('\t'),
                Some('$') => result.push_str("$$"),
                Some(other) => {
                    // Unknown escape, keep literal
                    result.push('\\');
                    result.push(other);
                }
                None => result.push('\\'),
            },
            '&' => result.push_str("${0}"),
            '$' => result.push_str("$$"),
            _ => result.push(c),
        }
    }

    result
}
