//! Text helper functions

/// Count whitespace-delimited words
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Short label for prev/next navigation links
///
/// Takes the first three words of a title, truncates to at most 20
/// characters, and always appends an ellipsis.
pub fn pagination_label(title: &str) -> String {
    let prefix: String = title
        .split_whitespace()
        .take(3)
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(20)
        .collect();
    format!("{}...", prefix)
}
