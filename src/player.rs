//! Playback controller: owns "what is playing" and drives the media handle.
//!
//! The controller is the only component that talks to the `MediaHandle`.
//! It keeps the current track as an id into the `Library`, applies optimistic
//! `is_playing` updates, and reconciles them when the handle reports back.
//! Handle events are tagged with the load they belong to, so events from a
//! previous selection can never overwrite a newer one.

mod controller;
mod handle;
mod state;

pub use controller::PlaybackController;
pub use handle::{
    LoadId, MediaEvent, MediaEventKind, MediaHandle, PlayError, PlayTicket, SubscriptionId,
};
pub use state::{PlaybackState, Transport};

#[cfg(test)]
pub(crate) mod testing;
