use std::sync::mpsc::{self, Receiver};

use crate::library::{Library, Track, TrackId};

use super::handle::{LoadId, MediaEvent, MediaEventKind, MediaHandle, PlayTicket, SubscriptionId};
use super::state::PlaybackState;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Step {
    Forward,
    Back,
}

/// Drives a `MediaHandle` and mirrors its state.
///
/// All methods run on the caller's thread and finish before returning. Handle
/// events are queued on a channel and applied by `pump`, strictly in order.
pub struct PlaybackController<H: MediaHandle> {
    handle: H,
    state: PlaybackState,
    events: Receiver<MediaEvent>,
    subscription: Option<SubscriptionId>,
    load: LoadId,
    pending_play: Option<PlayTicket>,
    next_ticket: u64,
}

impl<H: MediaHandle> PlaybackController<H> {
    /// Take ownership of `handle` and subscribe to its events.
    pub fn new(mut handle: H) -> Self {
        let (tx, events) = mpsc::channel();
        let subscription = handle.subscribe(tx);
        Self {
            handle,
            state: PlaybackState::default(),
            events,
            subscription: Some(subscription),
            load: LoadId::default(),
            pending_play: None,
            next_ticket: 0,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn current_track_id(&self) -> Option<TrackId> {
        self.state.current_track_id
    }

    /// Make `id` the current track without starting playback.
    ///
    /// Returns `false` (and changes nothing) when `id` is not in the library.
    pub fn cue(&mut self, library: &Library, id: TrackId) -> bool {
        let Some(track) = library.get(id) else {
            tracing::debug!(%id, "cue ignored: unknown track");
            return false;
        };
        self.switch_to(track);
        true
    }

    /// Make `id` the current track and start playing it.
    ///
    /// `is_playing` turns true immediately; a failed start reverts it.
    pub fn select(&mut self, library: &Library, id: TrackId) -> bool {
        if !self.cue(library, id) {
            return false;
        }
        self.state.is_playing = true;
        self.request_play();
        true
    }

    pub fn toggle_play(&mut self) {
        if self.state.current_track_id.is_none() {
            tracing::debug!("toggle_play ignored: nothing selected");
            return;
        }
        if self.state.is_playing {
            self.pending_play = None;
            self.handle.pause();
            self.state.is_playing = false;
        } else {
            // Only the settlement may flip is_playing to true.
            self.request_play();
        }
    }

    pub fn next(&mut self, library: &Library) -> bool {
        self.step(library, Step::Forward)
    }

    pub fn previous(&mut self, library: &Library) -> bool {
        self.step(library, Step::Back)
    }

    /// Jump to `seconds`. The displayed time updates before the handle confirms.
    pub fn seek(&mut self, seconds: f64) {
        self.state.current_time = seconds;
        self.handle.set_position(seconds);
    }

    /// Apply every queued handle event. Returns how many were processed.
    pub fn pump(&mut self, library: &Library) -> usize {
        let mut processed = 0;
        while let Ok(event) = self.events.try_recv() {
            self.apply(library, event);
            processed += 1;
        }
        processed
    }

    /// Apply a single handle event.
    pub fn apply(&mut self, library: &Library, event: MediaEvent) {
        if event.load != self.load {
            tracing::debug!(
                event_load = event.load.0,
                current_load = self.load.0,
                "dropping event for a previous load"
            );
            return;
        }

        match event.kind {
            MediaEventKind::PositionChanged(t) => self.state.current_time = t,
            MediaEventKind::DurationKnown(d) => self.state.duration = d,
            MediaEventKind::Ended => {
                tracing::debug!("track ended, advancing");
                self.next(library);
            }
            MediaEventKind::PlaySettled { ticket, result } => {
                if self.pending_play != Some(ticket) {
                    tracing::debug!(ticket = ticket.0, "dropping superseded play settlement");
                    return;
                }
                self.pending_play = None;
                match result {
                    Ok(()) => self.state.is_playing = true,
                    Err(error) => {
                        tracing::warn!(%error, "playback did not start");
                        self.state.is_playing = false;
                    }
                }
            }
        }
    }

    fn switch_to(&mut self, track: &Track) {
        self.pending_play = None;
        self.load = LoadId(self.load.0 + 1);

        self.state.current_track_id = Some(track.id);
        self.state.current_time = 0.0;
        self.state.duration = 0.0;

        tracing::debug!(id = %track.id, load = self.load.0, "loading track");
        self.handle.load(self.load, &track.source);
    }

    fn request_play(&mut self) {
        self.next_ticket += 1;
        let ticket = PlayTicket(self.next_ticket);
        self.pending_play = Some(ticket);
        self.handle.play(ticket);
    }

    fn step(&mut self, library: &Library, step: Step) -> bool {
        let len = library.len();
        if len == 0 {
            tracing::debug!(?step, "skip ignored: library is empty");
            return false;
        }
        let Some(current) = self.state.current_track_id else {
            tracing::debug!(?step, "skip ignored: nothing selected");
            return false;
        };
        let Some(idx) = library.position(current) else {
            tracing::warn!(%current, ?step, "current track is not in the library");
            return false;
        };

        let target = match step {
            Step::Forward => (idx + 1) % len,
            Step::Back => (idx + len - 1) % len,
        };
        let id = library.tracks()[target].id;
        self.select(library, id)
    }
}

impl<H: MediaHandle> Drop for PlaybackController<H> {
    fn drop(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.handle.unsubscribe(id);
        }
    }
}
