use super::model::{Track, TrackId};

/// Ordered, append-only collection of tracks.
///
/// Insertion order is the playback order used by next/previous. Entries are
/// never removed or reordered; the only in-place mutation is the favorite flag.
#[derive(Clone, Debug, Default)]
pub struct Library {
    tracks: Vec<Track>,
}

impl Library {
    /// Build a library from `tracks`, dropping records that `add_track` would reject.
    pub fn new(tracks: Vec<Track>) -> Self {
        let mut library = Self::default();
        for track in tracks {
            library.add_track(track);
        }
        library
    }

    /// Append `track` to the end of the library.
    ///
    /// Records without a title or without a playable source are ignored.
    /// There is no de-duplication by title or source. Returns whether the
    /// track was appended.
    pub fn add_track(&mut self, track: Track) -> bool {
        if track.title.trim().is_empty() || track.source.is_empty() {
            tracing::debug!(id = %track.id, "ignoring incomplete track record");
            return false;
        }
        tracing::debug!(id = %track.id, title = %track.title, "track added");
        self.tracks.push(track);
        true
    }

    /// Flip the favorite flag of the track with `id`.
    ///
    /// Returns the new flag, or `None` when no track has that id.
    pub fn toggle_favorite(&mut self, id: TrackId) -> Option<bool> {
        let track = self.tracks.iter_mut().find(|t| t.id == id)?;
        track.favorite = !track.favorite;
        Some(track.favorite)
    }

    pub fn get(&self, id: TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// Index of the track with `id` in library order.
    pub fn position(&self, id: TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn first(&self) -> Option<&Track> {
        self.tracks.first()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
