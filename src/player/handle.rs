//! The seam between the controller and whatever actually produces sound.

use std::sync::mpsc::Sender;

use thiserror::Error;

use crate::library::TrackSource;

/// Identifies one `load` issued by the controller. Every event carries the
/// load it belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LoadId(pub u64);

/// Identifies one `play` request; echoed back in its settlement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlayTicket(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Why the handle declined to start playback.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PlayError {
    #[error("nothing is loaded")]
    NothingLoaded,
    #[error("source cannot be played locally: {0}")]
    UnsupportedSource(String),
    #[error("failed to open {path}: {reason}")]
    Open { path: String, reason: String },
    #[error("failed to decode {path}: {reason}")]
    Decode { path: String, reason: String },
    #[error("no audio output: {0}")]
    NoOutput(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum MediaEventKind {
    /// Playback position in seconds.
    PositionChanged(f64),
    /// Total length in seconds, once known.
    DurationKnown(f64),
    /// The loaded track played to its end.
    Ended,
    /// A `play` request finished, successfully or not.
    PlaySettled {
        ticket: PlayTicket,
        result: Result<(), PlayError>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct MediaEvent {
    pub load: LoadId,
    pub kind: MediaEventKind,
}

impl MediaEvent {
    pub fn new(load: LoadId, kind: MediaEventKind) -> Self {
        Self { load, kind }
    }
}

/// A platform playback capability.
///
/// Commands never block. `play` completes asynchronously: the handle emits
/// `MediaEventKind::PlaySettled` with the same ticket once it knows whether
/// playback started. Events go to every subscribed sender, in the order the
/// handle produced them.
pub trait MediaHandle {
    /// Replace whatever is loaded with `source`, positioned at 0 and paused.
    fn load(&mut self, load: LoadId, source: &TrackSource);
    fn play(&mut self, ticket: PlayTicket);
    fn pause(&mut self);
    /// Move the playhead. Range checking is up to the handle.
    fn set_position(&mut self, seconds: f64);
    fn subscribe(&mut self, events: Sender<MediaEvent>) -> SubscriptionId;
    fn unsubscribe(&mut self, id: SubscriptionId);
}
