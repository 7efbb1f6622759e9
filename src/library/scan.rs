use std::borrow::Cow;
use std::path::Path;

use lofty::prelude::{Accessor, TaggedFileExt};
use walkdir::WalkDir;

use crate::config::{IngestSettings, LibrarySettings};

use super::model::{Track, TrackSource};

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
        return false;
    };
    let ext = ext.to_ascii_lowercase();

    settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .any(|e| !e.is_empty() && e == ext)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Read title and artist tags, if the file has any.
fn read_tags(path: &Path) -> (Option<String>, Option<String>) {
    let Ok(tagged) = lofty::read_from_path(path) else {
        return (None, None);
    };
    let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) else {
        return (None, None);
    };

    (clean_tag(tag.title()), clean_tag(tag.artist()))
}

fn clean_tag(value: Option<Cow<'_, str>>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Walk `dir` and build a track for every audio file found.
///
/// Titles come from tags, falling back to the file stem; a missing artist
/// becomes `ingest.default_artist`. Every track gets a fresh id and the
/// placeholder cover. Results are sorted case-insensitively by display line.
pub fn scan(dir: &Path, settings: &LibrarySettings, ingest: &IngestSettings) -> Vec<Track> {
    let mut tracks: Vec<Track> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !path.is_file() || !is_audio_file(path, settings) {
            continue;
        }

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("UNKNOWN")
            .to_string();
        let (title, artist) = read_tags(path);

        tracks.push(Track::new(
            title.unwrap_or(stem),
            artist.unwrap_or_else(|| ingest.default_artist.clone()),
            ingest.placeholder_cover.clone(),
            TrackSource::Local(path.to_path_buf()),
        ));
    }

    tracks.sort_by_cached_key(|t| t.display().to_lowercase());
    tracing::debug!(dir = %dir.display(), count = tracks.len(), "library scan finished");
    tracks
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn titles(tracks: &[Track]) -> Vec<&str> {
        tracks.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn default_extensions_ignore_case() {
        let settings = LibrarySettings::default();
        for name in ["x.mp3", "x.Flac", "x.WAV", "x.ogg"] {
            assert!(is_audio_file(Path::new(name), &settings), "{name}");
        }
        for name in ["x.txt", "x", "mp3"] {
            assert!(!is_audio_file(Path::new(name), &settings), "{name}");
        }
    }

    #[test]
    fn configured_extensions_tolerate_leading_dots() {
        let settings = LibrarySettings {
            extensions: vec![".Opus".into(), " ".into()],
            ..LibrarySettings::default()
        };
        assert!(is_audio_file(Path::new("/tmp/a.opus"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a.mp3"), &settings));
    }

    #[test]
    fn scan_uses_stem_default_artist_and_placeholder_cover() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.MP3"), b"not a real mp3").unwrap();
        fs::write(dir.path().join("A.ogg"), b"not a real ogg").unwrap();
        fs::write(dir.path().join("c.txt"), b"ignore me").unwrap();

        let ingest = IngestSettings::default();
        let tracks = scan(dir.path(), &LibrarySettings::default(), &ingest);

        assert_eq!(titles(&tracks), vec!["A", "b"]);
        for t in &tracks {
            assert_eq!(t.artist, ingest.default_artist);
            assert_eq!(t.cover, ingest.placeholder_cover);
            assert!(!t.favorite);
            assert!(matches!(t.source, TrackSource::Local(_)));
        }
        assert_ne!(tracks[0].id, tracks[1].id);
    }

    /// root.mp3, .secret.mp3, one/inner.mp3, one/two/deep.mp3
    fn nested_tree() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        let deep = dir.path().join("one").join("two");
        fs::create_dir_all(&deep).unwrap();
        for path in [
            dir.path().join("root.mp3"),
            dir.path().join(".secret.mp3"),
            dir.path().join("one").join("inner.mp3"),
            deep.join("deep.mp3"),
        ] {
            fs::write(path, b"").unwrap();
        }
        dir
    }

    #[test]
    fn walker_options_limit_what_is_seeded() {
        let cases: [(LibrarySettings, &[&str]); 4] = [
            (
                LibrarySettings::default(),
                &[".secret", "deep", "inner", "root"],
            ),
            (
                LibrarySettings {
                    include_hidden: false,
                    ..LibrarySettings::default()
                },
                &["deep", "inner", "root"],
            ),
            (
                LibrarySettings {
                    recursive: false,
                    ..LibrarySettings::default()
                },
                &[".secret", "root"],
            ),
            // The root is depth 0; depth 2 stops at one/*.
            (
                LibrarySettings {
                    max_depth: Some(2),
                    include_hidden: false,
                    ..LibrarySettings::default()
                },
                &["inner", "root"],
            ),
        ];

        let dir = nested_tree();
        for (settings, expected) in cases {
            let tracks = scan(dir.path(), &settings, &IngestSettings::default());
            assert_eq!(titles(&tracks), expected, "{settings:?}");
        }
    }
}
