use std::fmt;
use std::path::PathBuf;

use uuid::Uuid;

use super::display::display_name;

/// Stable identity of a library entry.
///
/// Ids are time-ordered UUIDs, so two tracks added in the same millisecond
/// still get distinct ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackId(Uuid);

impl TrackId {
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Where the audio for a track comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrackSource {
    /// A remote URL as typed by the user.
    Url(String),
    /// A local file. Only valid for the current session; nothing is persisted.
    Local(PathBuf),
}

impl TrackSource {
    pub fn is_empty(&self) -> bool {
        match self {
            TrackSource::Url(url) => url.trim().is_empty(),
            TrackSource::Local(path) => path.as_os_str().is_empty(),
        }
    }

    /// URI form of the source (`file://` for local files).
    pub fn as_uri(&self) -> String {
        match self {
            TrackSource::Url(url) => url.clone(),
            TrackSource::Local(path) => format!("file://{}", path.display()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub artist: String,
    pub cover: String,
    pub source: TrackSource,
    pub favorite: bool,
}

impl Track {
    /// Create a non-favorite track with a freshly generated id.
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        cover: impl Into<String>,
        source: TrackSource,
    ) -> Self {
        Self {
            id: TrackId::generate(),
            title: title.into(),
            artist: artist.into(),
            cover: cover.into(),
            source,
            favorite: false,
        }
    }

    /// "Artist - Title" line used in lists and for sorting.
    pub fn display(&self) -> String {
        display_name(&self.title, &self.artist)
    }
}
