//! Helpers for turning a track source into a `rodio` sink.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use lofty::prelude::AudioFile;
use rodio::{Decoder, OutputStream, Sink, Source};

use crate::library::TrackSource;
use crate::player::PlayError;

/// The local path behind `source`, or why it cannot be played here.
pub(super) fn playable_path(source: &TrackSource) -> Result<&Path, PlayError> {
    match source {
        TrackSource::Local(path) => Ok(path),
        TrackSource::Url(url) => Err(PlayError::UnsupportedSource(url.clone())),
    }
}

/// Create a paused `Sink` for `path` that starts playback at `start_at`.
pub(super) fn create_sink_at(
    stream: &OutputStream,
    path: &Path,
    start_at: Duration,
) -> Result<Sink, PlayError> {
    let file = File::open(path).map_err(|e| PlayError::Open {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let source = Decoder::new(BufReader::new(file))
        .map_err(|e| PlayError::Decode {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?
        // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
        .skip_duration(start_at);

    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.pause();
    Ok(sink)
}

/// Track length from the file's properties, when lofty can read it.
pub(super) fn probe_duration(path: &Path) -> Option<Duration> {
    let tagged = lofty::read_from_path(path).ok()?;
    let duration = tagged.properties().duration();
    (!duration.is_zero()).then_some(duration)
}

/// Convert a requested position to a `Duration`. Negative and non-finite
/// values land on zero.
pub(super) fn position_from_secs(seconds: f64) -> Duration {
    if seconds.is_nan() || seconds <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX)
}
