//! Speech composition: from per-region fragments to one announcement.
//!
//! The delta engine finds what is new; this module decides what of it is
//! worth saying and how to word it.

pub mod composer;
pub mod help_item;

pub use composer::{SpeechComposer, SpeechProfile};
pub use help_item::fold_help_item;

use crate::snapshot::PROMPT_SENTINEL;

/// Spoken stand-in for a leading prompt sentinel
pub const PROMPT_WORD: &str = "Grater ";

/// Replace a leading `>` with the spoken prompt word
pub fn speakable(fragment: &str) -> String {
    match fragment.strip_prefix(PROMPT_SENTINEL) {
        Some(rest) => format!("{}{}", PROMPT_WORD, rest),
        None => fragment.to_string(),
    }
}

/// Word and join fragments into one announcement; `None` when there is
/// nothing to say.
pub fn join_fragments<I, S>(fragments: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let spoken: Vec<String> = fragments
        .into_iter()
        .map(|f| speakable(f.as_ref()))
        .collect();
    if spoken.is_empty() {
        None
    } else {
        Some(spoken.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speakable_replaces_sentinel() {
        assert_eq!(speakable(">look"), "Grater look");
        assert_eq!(speakable(">"), "Grater ");
        assert_eq!(speakable("a > b"), "a > b");
    }

    #[test]
    fn test_join_fragments() {
        assert_eq!(
            join_fragments([">take lamp", "Taken."]),
            Some("Grater take lamp Taken.".to_string())
        );
        assert_eq!(join_fragments(Vec::<String>::new()), None);
    }
}
