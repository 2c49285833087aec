//! Multi-value selector parsing.
//!
//! Category and label selectors arrive as one delimited string. Splitting is
//! literal: tokens are neither trimmed nor deduplicated, and an empty input
//! yields a single empty token (`""` -> `[""]`), which matches no stored
//! category or label.

/// Separator between tokens in a selector string.
pub const SELECTOR_SEPARATOR: char = ',';

/// Split a selector string into its tokens.
pub fn split_selector(selector: &str) -> Vec<String> {
    selector
        .split(SELECTOR_SEPARATOR)
        .map(str::to_string)
        .collect()
}
