use std::sync::mpsc::{self, Sender};
use std::thread::JoinHandle;

use crate::config::AudioSettings;
use crate::library::TrackSource;
use crate::player::{LoadId, MediaEvent, MediaHandle, PlayTicket, SubscriptionId};

use super::thread::spawn_audio_thread;
use super::types::AudioCmd;

/// `MediaHandle` that plays local files through `rodio` on a background thread.
///
/// URL sources load fine but refuse to play: their `PlaySettled` carries
/// `PlayError::UnsupportedSource`.
pub struct RodioHandle {
    tx: Sender<AudioCmd>,
    join: Option<JoinHandle<()>>,
    next_subscription: u64,
    fade_out_ms: u64,
}

impl RodioHandle {
    pub fn spawn(audio_settings: &AudioSettings) -> std::io::Result<Self> {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let join = spawn_audio_thread(rx, audio_settings.clone())?;
        Ok(Self {
            tx,
            join: Some(join),
            next_subscription: 0,
            fade_out_ms: audio_settings.fade_out_ms,
        })
    }

    fn send(&self, cmd: AudioCmd) {
        if let Err(mpsc::SendError(cmd)) = self.tx.send(cmd) {
            tracing::error!(?cmd, "audio thread is gone; command dropped");
        }
    }
}

impl MediaHandle for RodioHandle {
    fn load(&mut self, load: LoadId, source: &TrackSource) {
        self.send(AudioCmd::Load {
            load,
            source: source.clone(),
        });
    }

    fn play(&mut self, ticket: PlayTicket) {
        self.send(AudioCmd::Play(ticket));
    }

    fn pause(&mut self) {
        self.send(AudioCmd::Pause);
    }

    fn set_position(&mut self, seconds: f64) {
        self.send(AudioCmd::SetPosition(seconds));
    }

    fn subscribe(&mut self, events: Sender<MediaEvent>) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.send(AudioCmd::Subscribe(id, events));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.send(AudioCmd::Unsubscribe(id));
    }
}

impl Drop for RodioHandle {
    /// Stop the audio thread (fading out if something is playing) and wait for it.
    fn drop(&mut self) {
        let _ = self.tx.send(AudioCmd::Quit {
            fade_out_ms: self.fade_out_ms,
        });
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}
