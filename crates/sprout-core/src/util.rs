//! Text helpers shared by the catalog client and the CLI.

/// First 180 characters of `value`, trimmed; used for error bodies and previews.
pub fn compact_text(value: &str) -> String {
    value.trim().chars().take(180).collect()
}
