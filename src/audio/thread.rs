use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::config::AudioSettings;
use crate::library::TrackSource;
use crate::player::{LoadId, MediaEvent, MediaEventKind, PlayError, PlayTicket};

use super::sink::{create_sink_at, playable_path, position_from_secs, probe_duration};
use super::subscribers::Subscribers;
use super::types::AudioCmd;

/// What the thread currently has loaded.
pub(super) struct Loaded {
    load: LoadId,
    source: TrackSource,
    /// Built lazily on the first `Play`.
    pub(super) sink: Option<Sink>,
    /// Position the current sink started at; `get_pos` is relative to it.
    pub(super) offset: Duration,
    ended: bool,
}

impl Loaded {
    fn position(&self) -> Duration {
        self.offset + self.sink.as_ref().map_or(Duration::ZERO, Sink::get_pos)
    }

    fn is_playing(&self) -> bool {
        self.sink.as_ref().is_some_and(|s| !s.is_paused())
    }
}

/// Playback state owned by the audio thread.
pub(super) struct Deck {
    stream: Result<OutputStream, String>,
    pub(super) loaded: Option<Loaded>,
    pub(super) subscribers: Subscribers,
}

impl Deck {
    /// `stream` is the opened output, or why it could not be opened.
    pub(super) fn new(stream: Result<OutputStream, String>) -> Self {
        Self {
            stream,
            loaded: None,
            subscribers: Subscribers::default(),
        }
    }

    fn emit(&mut self, load: LoadId, kind: MediaEventKind) {
        self.subscribers.broadcast(MediaEvent::new(load, kind));
    }

    pub(super) fn load(&mut self, load: LoadId, source: TrackSource) {
        if let Some(sink) = self.loaded.take().and_then(|old| old.sink) {
            sink.stop();
        }

        let duration = match &source {
            TrackSource::Local(path) => probe_duration(path),
            TrackSource::Url(_) => None,
        };

        tracing::debug!(load = load.0, source = %source.as_uri(), "audio: loaded");
        self.loaded = Some(Loaded {
            load,
            source,
            sink: None,
            offset: Duration::ZERO,
            ended: false,
        });

        if let Some(d) = duration {
            self.emit(load, MediaEventKind::DurationKnown(d.as_secs_f64()));
        }
    }

    pub(super) fn play(&mut self, ticket: PlayTicket) {
        let (load, result) = match self.loaded.as_ref().map(|l| l.load) {
            Some(load) => (load, self.start_playback()),
            None => (LoadId::default(), Err(PlayError::NothingLoaded)),
        };
        if let Err(error) = &result {
            tracing::warn!(%error, "audio: play failed");
        }
        self.emit(load, MediaEventKind::PlaySettled { ticket, result });
    }

    fn start_playback(&mut self) -> Result<(), PlayError> {
        let Some(loaded) = self.loaded.as_mut() else {
            return Err(PlayError::NothingLoaded);
        };
        let path: PathBuf = playable_path(&loaded.source)?.to_path_buf();
        let stream = self
            .stream
            .as_ref()
            .map_err(|reason| PlayError::NoOutput(reason.clone()))?;

        // A finished sink is rebuilt from the start.
        if loaded.ended || loaded.sink.as_ref().is_some_and(Sink::empty) {
            loaded.sink = None;
            loaded.offset = Duration::ZERO;
            loaded.ended = false;
        }
        if loaded.sink.is_none() {
            loaded.sink = Some(create_sink_at(stream, &path, loaded.offset)?);
        }
        if let Some(sink) = loaded.sink.as_ref() {
            sink.play();
        }
        Ok(())
    }

    pub(super) fn pause(&mut self) {
        if let Some(sink) = self.loaded.as_ref().and_then(|l| l.sink.as_ref()) {
            sink.pause();
        }
    }

    pub(super) fn set_position(&mut self, seconds: f64) {
        let Some(loaded) = self.loaded.as_mut() else {
            return;
        };
        let target = position_from_secs(seconds);
        let load = loaded.load;

        if !loaded.is_playing() {
            // The next `Play` builds a sink at the new offset.
            if let Some(old) = loaded.sink.take() {
                old.stop();
            }
            loaded.offset = target;
            loaded.ended = false;
            self.emit(load, MediaEventKind::PositionChanged(target.as_secs_f64()));
            return;
        }

        // Scrubbing while playing: the old sink keeps going until a new one
        // has been built at the target.
        let rebuilt = playable_path(&loaded.source).and_then(|path| {
            let stream = self
                .stream
                .as_ref()
                .map_err(|reason| PlayError::NoOutput(reason.clone()))?;
            create_sink_at(stream, path, target)
        });
        let position = match rebuilt {
            Ok(sink) => {
                sink.play();
                if let Some(old) = loaded.sink.replace(sink) {
                    old.stop();
                }
                loaded.offset = target;
                loaded.ended = false;
                target
            }
            Err(error) => {
                tracing::warn!(%error, "audio: seek failed, keeping current position");
                loaded.position()
            }
        };
        self.emit(load, MediaEventKind::PositionChanged(position.as_secs_f64()));
    }

    /// Periodic position report and end-of-track detection.
    pub(super) fn tick(&mut self) {
        let Some(loaded) = self.loaded.as_mut() else {
            return;
        };
        if loaded.ended || !loaded.is_playing() {
            return;
        }
        let load = loaded.load;
        if loaded.sink.as_ref().is_some_and(Sink::empty) {
            loaded.ended = true;
            tracing::debug!(load = load.0, "audio: track ended");
            self.emit(load, MediaEventKind::Ended);
        } else {
            let position = loaded.position().as_secs_f64();
            self.emit(load, MediaEventKind::PositionChanged(position));
        }
    }

    fn quit(&mut self, fade_out_ms: u64) {
        if let Some(sink) = self.loaded.as_ref().and_then(|l| l.sink.as_ref()) {
            if !sink.is_paused() {
                fade_out_sink(sink, fade_out_ms);
            }
            sink.stop();
        }
    }
}

fn fade_out_sink(sink: &Sink, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    sink.set_volume(1.0);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(1.0 - t);
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}

fn open_stream() -> Result<OutputStream, String> {
    let mut stream = OutputStreamBuilder::open_default_stream().map_err(|e| e.to_string())?;
    // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
    // but noisy for a TUI app.
    stream.log_on_drop(false);
    Ok(stream)
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    audio_settings: AudioSettings,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("cadence-audio".into())
        .spawn(move || {
            let stream = open_stream();
            if let Err(reason) = &stream {
                tracing::error!(%reason, "audio: no output device; playback will fail");
            }

            let mut deck = Deck::new(stream);
            let interval = Duration::from_millis(audio_settings.position_interval_ms.max(1));

            loop {
                match rx.recv_timeout(interval) {
                    Ok(cmd) => match cmd {
                        AudioCmd::Load { load, source } => deck.load(load, source),
                        AudioCmd::Play(ticket) => deck.play(ticket),
                        AudioCmd::Pause => deck.pause(),
                        AudioCmd::SetPosition(seconds) => deck.set_position(seconds),
                        AudioCmd::Subscribe(id, tx) => deck.subscribers.add(id, tx),
                        AudioCmd::Unsubscribe(id) => {
                            deck.subscribers.remove(id);
                            tracing::debug!(
                                subscription = id.0,
                                remaining = deck.subscribers.len(),
                                "audio: unsubscribed"
                            );
                        }
                        AudioCmd::Quit { fade_out_ms } => {
                            deck.quit(fade_out_ms);
                            break;
                        }
                    },
                    Err(RecvTimeoutError::Timeout) => deck.tick(),
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            tracing::debug!("audio: thread exiting");
        })
}
