use crate::{
    models::{CatalogRecord, MediaKind, Recommendation, ResolutionResult},
    services::{classifier::classify, genres::resolve_names},
};

/// Picks the catalog record a recommendation refers to
///
/// `candidates` is the catalog's answer to a title search, in the catalog's
/// relevance order. The first result wins by default. When there is more than
/// one result and the recommendation carries a year or genre hint, the first
/// candidate satisfying every given hint wins instead; if none does, the
/// default stands.
///
/// Never fails: an empty title or an empty candidate list is `Unmatched`,
/// everything else is `Matched`.
pub fn resolve(rec: &Recommendation, mut candidates: Vec<CatalogRecord>) -> ResolutionResult {
    if !rec.has_title() || candidates.is_empty() {
        return ResolutionResult::Unmatched;
    }

    let mut chosen = 0;

    if candidates.len() > 1 && rec.has_hints() {
        let kind = classify(&rec.kind);
        if let Some(index) = candidates
            .iter()
            .position(|candidate| qualifies(rec, kind, candidate))
        {
            chosen = index;
        }
    }

    ResolutionResult::Matched(candidates.swap_remove(chosen))
}

fn qualifies(rec: &Recommendation, kind: MediaKind, candidate: &CatalogRecord) -> bool {
    year_matches(rec, candidate) && genres_match(rec, kind, candidate)
}

/// Exact text comparison against the first four characters of the date
fn year_matches(rec: &Recommendation, candidate: &CatalogRecord) -> bool {
    match rec.release_year.as_deref() {
        None => true,
        Some(year) => candidate.release_year() == Some(year),
    }
}

/// Any overlap is enough; names are compared case-sensitively
fn genres_match(rec: &Recommendation, kind: MediaKind, candidate: &CatalogRecord) -> bool {
    let Some(wanted) = rec.genres.as_ref() else {
        return true;
    };

    let names = resolve_names(kind, &candidate.genre_ids);
    wanted
        .iter()
        .any(|genre| names.iter().any(|name| *name == genre.as_str()))
}
