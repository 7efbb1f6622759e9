use crate::library::TrackId;

/// Coarse transport status, as shown to the user and to MPRIS.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Transport {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Snapshot of what the controller believes the player is doing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlaybackState {
    /// Always resolves to a library entry while the library is non-empty.
    pub current_track_id: Option<TrackId>,
    pub is_playing: bool,
    /// Seconds.
    pub current_time: f64,
    /// Seconds; 0 until the handle reports it.
    pub duration: f64,
}

impl PlaybackState {
    pub fn transport(&self) -> Transport {
        match (self.current_track_id, self.is_playing) {
            (None, _) => Transport::Stopped,
            (Some(_), true) => Transport::Playing,
            (Some(_), false) => Transport::Paused,
        }
    }
}
