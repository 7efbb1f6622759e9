//! Application model: `App` and the read-only `Snapshot` handed to the UI.
//!
//! `App` owns the library, the filter, the playback controller and the
//! add-track wizard. Every user intent goes through a method here; media events
//! are applied by `pump_events`.

use std::path::PathBuf;

use crate::config::IngestSettings;
use crate::filter::{self, FilterState};
use crate::ingest::{self, AddTrackWizard, IngestError, LocalFile, WizardStep};
use crate::library::{Library, Track, TrackId};
use crate::player::{MediaHandle, PlaybackController, PlaybackState};

/// Everything the UI needs to draw one frame.
pub struct Snapshot<'a> {
    pub library: &'a Library,
    pub filter: &'a FilterState,
    pub playback: &'a PlaybackState,
    /// The filtered library, in library order.
    pub visible: Vec<&'a Track>,
    /// Read through the library, so favorite changes show up immediately.
    pub current: Option<&'a Track>,
    /// Position of the cursor within `visible`.
    pub cursor: Option<usize>,
}

/// The main application model.
pub struct App<H: MediaHandle> {
    library: Library,
    filter: FilterState,
    player: PlaybackController<H>,
    wizard: AddTrackWizard,
    ingest: IngestSettings,

    /// Library index of the highlighted row.
    cursor: usize,

    pub show_sidebar: bool,
    pub search_mode: bool,
}

impl<H: MediaHandle> App<H> {
    /// Create an `App` over `library`, cueing its first track (not playing).
    pub fn new(library: Library, handle: H, ingest: IngestSettings) -> Self {
        let mut app = Self {
            library,
            filter: FilterState::default(),
            player: PlaybackController::new(handle),
            wizard: AddTrackWizard::default(),
            ingest,
            cursor: 0,
            show_sidebar: true,
            search_mode: false,
        };
        if let Some(first) = app.library.first().map(|t| t.id) {
            app.player.cue(&app.library, first);
        }
        app
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn playback(&self) -> &PlaybackState {
        self.player.state()
    }

    pub fn wizard(&self) -> &AddTrackWizard {
        &self.wizard
    }

    pub fn wizard_mut(&mut self) -> &mut AddTrackWizard {
        &mut self.wizard
    }

    /// The current track, looked up in the library on every call.
    pub fn current_track(&self) -> Option<&Track> {
        self.player
            .current_track_id()
            .and_then(|id| self.library.get(id))
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let visible = filter::visible(&self.library, &self.filter);
        let cursor_id = self.library.tracks().get(self.cursor).map(|t| t.id);
        let cursor = cursor_id.and_then(|id| visible.iter().position(|t| t.id == id));
        Snapshot {
            library: &self.library,
            filter: &self.filter,
            playback: self.player.state(),
            visible,
            current: self.current_track(),
            cursor,
        }
    }

    /// Apply queued media events. Returns how many were processed.
    pub fn pump_events(&mut self) -> usize {
        self.player.pump(&self.library)
    }

    // ---- playback intents ----

    /// Play the track with `id` from the start. Unknown ids are ignored.
    pub fn select_track(&mut self, id: TrackId) -> bool {
        if !self.player.select(&self.library, id) {
            return false;
        }
        if let Some(idx) = self.library.position(id) {
            self.cursor = idx;
        }
        true
    }

    pub fn toggle_play(&mut self) {
        self.player.toggle_play();
    }

    pub fn next(&mut self) -> bool {
        self.player.next(&self.library)
    }

    pub fn previous(&mut self) -> bool {
        self.player.previous(&self.library)
    }

    pub fn seek(&mut self, seconds: f64) {
        self.player.seek(seconds);
    }

    /// Seek relative to the current time, clamped to the known track length.
    pub fn seek_by(&mut self, delta: f64) {
        let state = self.player.state();
        if state.current_track_id.is_none() {
            return;
        }
        let mut target = (state.current_time + delta).max(0.0);
        if state.duration > 0.0 {
            target = target.min(state.duration);
        }
        self.player.seek(target);
    }

    // ---- library intents ----

    /// Flip the favorite flag of `id`. Returns the new flag.
    pub fn toggle_favorite(&mut self, id: TrackId) -> Option<bool> {
        let flag = self.library.toggle_favorite(id);
        if flag.is_some() {
            self.ensure_cursor_visible();
        }
        flag
    }

    /// Add a remote track. The artist falls back to the configured default.
    pub fn add_track_from_url(
        &mut self,
        url: &str,
        title: &str,
        artist: Option<&str>,
    ) -> Result<TrackId, IngestError> {
        let track = ingest::track_from_url(url, title, artist, &self.ingest).inspect_err(|e| {
            tracing::debug!(error = %e, "url track rejected");
        })?;
        Ok(self.append(track))
    }

    /// Add a local audio file. Title and artist fall back to the file name and
    /// the configured default.
    pub fn add_track_from_file(
        &mut self,
        file: &LocalFile,
        title: Option<&str>,
        artist: Option<&str>,
    ) -> Result<TrackId, IngestError> {
        let track = ingest::track_from_file(file, title, artist, &self.ingest).inspect_err(|e| {
            tracing::debug!(error = %e, "file track rejected");
        })?;
        Ok(self.append(track))
    }

    fn append(&mut self, track: Track) -> TrackId {
        let id = track.id;
        tracing::info!(%id, title = %track.title, "track added to library");
        self.library.add_track(track);
        if self.player.current_track_id().is_none() {
            self.player.cue(&self.library, id);
        }
        self.ensure_cursor_visible();
        id
    }

    // ---- filter intents ----

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
        self.ensure_cursor_visible();
    }

    pub fn push_query_char(&mut self, c: char) {
        self.filter.query.push(c);
        self.ensure_cursor_visible();
    }

    pub fn pop_query_char(&mut self) {
        self.filter.query.pop();
        self.ensure_cursor_visible();
    }

    pub fn set_favorites_only(&mut self, favorites_only: bool) {
        self.filter.favorites_only = favorites_only;
        self.ensure_cursor_visible();
    }

    pub fn enter_search_mode(&mut self) {
        self.search_mode = true;
    }

    pub fn exit_search_mode(&mut self) {
        self.search_mode = false;
    }

    /// Clear the query and leave search mode.
    pub fn clear_search(&mut self) {
        self.search_mode = false;
        self.set_query(String::new());
    }

    pub fn toggle_sidebar(&mut self) {
        self.show_sidebar = !self.show_sidebar;
    }

    // ---- wizard ----

    /// Submit the wizard's current step. Returns the new track's id when one
    /// was added; otherwise the wizard is left as it was.
    pub fn submit_wizard(&mut self) -> Option<TrackId> {
        let track = match self.wizard.step() {
            WizardStep::EnteringUrl => self.wizard.submit_url(&self.ingest)?,
            WizardStep::EnteringFile => {
                let path = PathBuf::from(self.wizard.draft().path.trim());
                if path.as_os_str().is_empty() {
                    tracing::debug!("file submission ignored: no path");
                    return None;
                }
                let file = match LocalFile::probe(&path) {
                    Ok(file) => file,
                    Err(error) => {
                        tracing::debug!(%error, "file submission ignored");
                        return None;
                    }
                };
                self.wizard.submit_file(&file, &self.ingest)?
            }
            WizardStep::Closed | WizardStep::ChoosingMethod => return None,
        };
        Some(self.append(track))
    }

    // ---- cursor ----

    /// Library id under the cursor, if it is visible.
    pub fn cursor_track_id(&self) -> Option<TrackId> {
        let track = self.library.tracks().get(self.cursor)?;
        self.filter.matches(track).then_some(track.id)
    }

    fn visible_indices(&self) -> Vec<usize> {
        self.library
            .tracks()
            .iter()
            .enumerate()
            .filter(|(_, t)| self.filter.matches(t))
            .map(|(i, _)| i)
            .collect()
    }

    /// Move the cursor to the next visible row, wrapping.
    pub fn cursor_down(&mut self) {
        let view = self.visible_indices();
        if view.is_empty() {
            return;
        }
        self.cursor = match view.iter().position(|&i| i == self.cursor) {
            Some(p) => view[(p + 1) % view.len()],
            None => view[0],
        };
    }

    /// Move the cursor to the previous visible row, wrapping.
    pub fn cursor_up(&mut self) {
        let view = self.visible_indices();
        if view.is_empty() {
            return;
        }
        self.cursor = match view.iter().position(|&i| i == self.cursor) {
            Some(0) | None => view[view.len() - 1],
            Some(p) => view[p - 1],
        };
    }

    pub fn play_cursor(&mut self) -> bool {
        match self.cursor_track_id() {
            Some(id) => self.select_track(id),
            None => false,
        }
    }

    pub fn favorite_cursor(&mut self) -> Option<bool> {
        let id = self.cursor_track_id()?;
        self.toggle_favorite(id)
    }

    pub fn favorite_current(&mut self) -> Option<bool> {
        let id = self.player.current_track_id()?;
        self.toggle_favorite(id)
    }

    /// Keep the cursor on a visible row, moving it to the first one if needed.
    fn ensure_cursor_visible(&mut self) {
        if self.cursor_track_id().is_some() {
            return;
        }
        if let Some(&first) = self.visible_indices().first() {
            self.cursor = first;
        }
    }
}
