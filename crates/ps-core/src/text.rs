//! Display-text helpers for photo metadata.
//!
//! The catalog delivers author names as raw strings and no title or
//! description at all, so the presentable forms are generated here.

/// Normalize an author name to title case. Empty input maps to "Unknown".
pub fn format_author_name(author: &str) -> String {
    if author.trim().is_empty() {
        return "Unknown".to_string();
    }

    author
        .split_whitespace()
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Title for a photo: formatted author plus the catalog id.
pub fn photo_title(author: &str, id: &str) -> String {
    format!("{} #{}", format_author_name(author), id)
}

/// Templated one-sentence description embedding author and dimensions.
pub fn photo_description(author: &str, width: u32, height: u32) -> String {
    format!(
        "A beautiful photograph by {}. This image has dimensions of {} × {} pixels.",
        format_author_name(author),
        width,
        height
    )
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
