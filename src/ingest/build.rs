use crate::config::IngestSettings;
use crate::library::{Track, TrackSource};

use super::{IngestError, LocalFile};

fn artist_or_default(artist: Option<&str>, settings: &IngestSettings) -> String {
    match artist.map(str::trim) {
        Some(a) if !a.is_empty() => a.to_string(),
        _ => settings.default_artist.clone(),
    }
}

/// Build a track for a remote URL. Both `url` and `title` must be non-blank.
pub fn track_from_url(
    url: &str,
    title: &str,
    artist: Option<&str>,
    settings: &IngestSettings,
) -> Result<Track, IngestError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(IngestError::MissingUrl);
    }
    let title = title.trim();
    if title.is_empty() {
        return Err(IngestError::MissingTitle);
    }

    Ok(Track::new(
        title,
        artist_or_default(artist, settings),
        settings.placeholder_cover.clone(),
        TrackSource::Url(url.to_string()),
    ))
}

/// Build a track for a local audio file.
///
/// A blank `title` falls back to the file name without its extension.
pub fn track_from_file(
    file: &LocalFile,
    title: Option<&str>,
    artist: Option<&str>,
    settings: &IngestSettings,
) -> Result<Track, IngestError> {
    if !file.is_audio() {
        return Err(IngestError::NotAudio {
            path: file.path.clone(),
            media_type: file.media_type.clone(),
        });
    }

    let title = match title.map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => file.default_title(),
    };
    if title.trim().is_empty() {
        return Err(IngestError::MissingTitle);
    }

    Ok(Track::new(
        title,
        artist_or_default(artist, settings),
        settings.placeholder_cover.clone(),
        TrackSource::Local(file.path.clone()),
    ))
}
