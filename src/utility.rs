//! This module contains small utility functions that are useful throughout
//! the rest of the codebase.

use itertools::Itertools;

/// Produces a single-line rendering of `text` by removing newline characters
/// and collapsing every run of consecutive whitespace to a single space.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().join(" ")
}

#[cfg(test)]
mod test {
    use crate::utility::collapse_whitespace;

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(collapse_whitespace("a   b\t\tc"), "a b c");
    }

    #[test]
    fn strips_newlines() {
        assert_eq!(collapse_whitespace("(eq\n  x\n  5)"), "(eq x 5)");
    }

    #[test]
    fn leaves_single_spaced_text_unchanged() {
        assert_eq!(collapse_whitespace("already clean"), "already clean");
    }
}
