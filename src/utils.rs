use chrono::{Datelike, NaiveDate};
use rand::{Rng, distr::Alphanumeric};

/// Literal prefix every generated playlist name starts with.
pub const GENERATED_PLAYLIST_PREFIX: &str = "Release Radar Albums (";

pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Normalizes a name for search queries and exact-match comparison.
///
/// Colons confuse the search query syntax, so they become spaces; runs of
/// whitespace collapse to a single space and the result is trimmed.
pub fn clean_query_name(name: &str) -> String {
    name.replace(':', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Date suffix used in generated playlist names, e.g. `2024-3-15`.
///
/// Month and day are 1-based and not zero-padded.
pub fn date_suffix(date: NaiveDate) -> String {
    format!("{}-{}-{}", date.year(), date.month(), date.day())
}

pub fn generated_playlist_name(date: NaiveDate) -> String {
    format!("{}{})", GENERATED_PLAYLIST_PREFIX, date_suffix(date))
}

/// Detects playlists produced by earlier runs.
///
/// Matches the literal prefix followed by any parenthesized suffix. Kept as
/// the single place this pattern is encoded; retirement of old playlists
/// depends on it matching every name `generated_playlist_name` can produce.
pub fn is_generated_playlist_name(name: &str) -> bool {
    name.starts_with(GENERATED_PLAYLIST_PREFIX) && name.ends_with(')')
}
