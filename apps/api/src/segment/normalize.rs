/// Splits raw document text into trimmed, non-empty lines.
///
/// CRLF is folded to LF first; runs of blank lines collapse because empty
/// lines are dropped after trimming. Order is preserved since line position
/// is the only signal section detection has.
pub fn normalize_lines(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Truncates to at most `max` characters (not bytes).
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
