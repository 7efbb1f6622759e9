//! Search/favorites projection of the library.

use crate::library::{Library, Track};

/// What the library panel is currently narrowed to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
    pub query: String,
    pub favorites_only: bool,
}

impl FilterState {
    /// True if `track` passes this filter.
    pub fn matches(&self, track: &Track) -> bool {
        matches_lower(track, &self.query.to_lowercase(), self.favorites_only)
    }
}

fn matches_lower(track: &Track, query_lower: &str, favorites_only: bool) -> bool {
    if favorites_only && !track.favorite {
        return false;
    }
    query_lower.is_empty()
        || track.title.to_lowercase().contains(query_lower)
        || track.artist.to_lowercase().contains(query_lower)
}

/// Tracks that pass `filter`, in library order.
///
/// Recomputed on every call; nothing is cached.
pub fn visible<'a>(library: &'a Library, filter: &FilterState) -> Vec<&'a Track> {
    let query_lower = filter.query.to_lowercase();
    library
        .tracks()
        .iter()
        .filter(|t| matches_lower(t, &query_lower, filter.favorites_only))
        .collect()
}
