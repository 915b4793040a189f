//! Snapshot normalizer: raw display rows to clean, comparable lines.

/// Character that marks an input-prompt line in game output
pub const PROMPT_SENTINEL: char = '>';

/// Clean a raw sequence of display lines.
///
/// - lines that are blank after left-trimming are dropped;
/// - retained lines are left-trimmed (trailing text is kept);
/// - a line starting with the sentinel is rewritten to carry exactly one
///   leading `>`, with any further leading `>` and whitespace removed, so
///   `"> >  look"` and `">>look"` both become `">look"`, and a padded bare
///   prompt becomes `">"`.
///
/// Pure and infallible; empty input yields empty output.
pub fn normalize_lines<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    raw.iter()
        .filter_map(|line| normalize_line(line.as_ref()))
        .collect()
}

fn normalize_line(line: &str) -> Option<String> {
    let line = line.trim_start();
    if line.is_empty() {
        return None;
    }
    match line.strip_prefix(PROMPT_SENTINEL) {
        Some(rest) => {
            let rest = rest.trim_start_matches(|c: char| c == PROMPT_SENTINEL || c.is_whitespace());
            let mut canonical = String::with_capacity(rest.len() + 1);
            canonical.push(PROMPT_SENTINEL);
            canonical.push_str(rest);
            Some(canonical)
        }
        None => Some(line.to_string()),
    }
}
