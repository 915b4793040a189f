//! Help-item folding for Inform-style menus.
//!
//! Inform help menus redraw a highlighted `>item` line and the item text
//! when the selection moves. When the pair just swaps roles with what was
//! already on screen, only the newly selected item is worth saying.

use crate::snapshot::PROMPT_SENTINEL;
use std::collections::VecDeque;

/// Fold a two-fragment prompt/response pair into the selected item.
///
/// Fragments are scanned in order, stopping at a bare `>`. A `>`-fragment is
/// put in front unless a `>`-fragment already leads; any other fragment is
/// appended unless a plain fragment already trails. When this yields exactly
/// `[">item", "other"]` and the previous screen held both `item` and
/// `">other"`, the result is `["item"]`. Otherwise `fragments` is returned
/// unchanged.
pub fn fold_help_item(fragments: Vec<String>, previous_lines: &[String]) -> Vec<String> {
    let mut pair: VecDeque<&str> = VecDeque::with_capacity(2);
    for fragment in &fragments {
        let is_prompt = fragment.starts_with(PROMPT_SENTINEL);
        if fragment.trim() == ">" {
            break;
        } else if is_prompt && !pair.front().is_some_and(|f| f.starts_with(PROMPT_SENTINEL)) {
            pair.push_front(fragment.as_str());
        } else if !is_prompt && pair.back().map_or(true, |b| b.starts_with(PROMPT_SENTINEL)) {
            pair.push_back(fragment.as_str());
        }
    }

    if let (2, Some(&selected), Some(&other)) = (pair.len(), pair.front(), pair.back()) {
        let item = selected.strip_prefix(PROMPT_SENTINEL).unwrap_or(selected);
        let other_as_prompt = format!("{}{}", PROMPT_SENTINEL, other);
        let seen = |line: &str| previous_lines.iter().any(|p| p == line);
        if seen(item) && seen(other_as_prompt.as_str()) {
            return vec![item.to_string()];
        }
    }
    fragments
}
