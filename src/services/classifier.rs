use crate::models::MediaKind;

/// Maps a free-text kind label onto a catalog partition
///
/// Anything mentioning "movie" (any case) is a movie; everything else,
/// including "Documentary", is searched as a series.
pub fn classify(label: &str) -> MediaKind {
    if label.to_lowercase().contains("movie") {
        MediaKind::Movie
    } else {
        MediaKind::Series
    }
}
