use std::sync::mpsc::Sender;

use crate::library::TrackSource;
use crate::player::{LoadId, MediaEvent, PlayTicket, SubscriptionId};

#[derive(Debug)]
pub(super) enum AudioCmd {
    /// Replace the current source. Nothing plays until `Play`.
    Load { load: LoadId, source: TrackSource },
    /// Start or resume playback; answered with `PlaySettled`.
    Play(PlayTicket),
    Pause,
    /// Jump to the given position in seconds.
    SetPosition(f64),
    Subscribe(SubscriptionId, Sender<MediaEvent>),
    Unsubscribe(SubscriptionId),
    /// Stop the thread, fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}
