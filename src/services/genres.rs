//! Genre taxonomy for the catalog's numeric genre codes
//!
//! The table is a compile-time constant, so there is nothing to load and
//! nothing to race on. Names are the ones the language model is prompted
//! with ("Sci-Fi", not "Science Fiction"), since matching is exact.

use crate::models::MediaKind;

/// Name for a single genre code, if the taxonomy knows it
pub fn genre_name(kind: MediaKind, id: u32) -> Option<&'static str> {
    match (kind, id) {
        (MediaKind::Movie, 28) => Some("Action"),
        (MediaKind::Series, 10759) => Some("Action"),
        (_, 35) => Some("Comedy"),
        (_, 18) => Some("Drama"),
        (_, 53) => Some("Thriller"),
        (_, 10749) => Some("Romance"),
        (_, 878) => Some("Sci-Fi"),
        (_, 27) => Some("Horror"),
        (_, 99) => Some("Documentary"),
        _ => None,
    }
}

/// Resolves genre codes to names, keeping order and dropping unknown codes
pub fn resolve_names(kind: MediaKind, ids: &[u32]) -> Vec<&'static str> {
    ids.iter().filter_map(|&id| genre_name(kind, id)).collect()
}
