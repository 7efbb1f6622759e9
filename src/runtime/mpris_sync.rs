use crate::app::App;
use crate::library::TrackId;
use crate::mpris::MprisHandle;
use crate::player::{MediaHandle, Transport};

/// Pushes app state into the MPRIS snapshot, re-publishing metadata only when
/// the track, its known duration or the transport changed.
#[derive(Default)]
pub struct MprisSync {
    last: Option<(Option<TrackId>, u64, Transport)>,
}

impl MprisSync {
    pub fn sync<H: MediaHandle>(&mut self, mpris: &MprisHandle, app: &App<H>) {
        let playback = app.playback();
        let key = (
            playback.current_track_id,
            playback.duration.to_bits(),
            playback.transport(),
        );

        if self.last != Some(key) {
            mpris.set_track_metadata(app.current_track(), playback.duration);
            mpris.set_transport(playback.transport());
            self.last = Some(key);
        }
        mpris.set_position(playback.current_time);
    }
}
