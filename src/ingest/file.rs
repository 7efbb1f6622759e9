use std::path::{Path, PathBuf};

use lofty::file::FileType;
use lofty::probe::Probe;

use super::IngestError;

/// Media type reported for content lofty does not recognise.
const UNKNOWN_MEDIA_TYPE: &str = "application/octet-stream";

/// A file picked by the user, with the media type it was detected as.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalFile {
    pub path: PathBuf,
    /// File name as shown to the user.
    pub name: String,
    pub media_type: String,
}

impl LocalFile {
    pub fn new(path: impl Into<PathBuf>, media_type: impl Into<String>) -> Self {
        let path = path.into();
        let name = file_name(&path);
        Self {
            path,
            name,
            media_type: media_type.into(),
        }
    }

    /// Open `path` and sniff its content to find the media type.
    ///
    /// Content that lofty cannot identify falls back to the extension; if that
    /// fails too the file is reported as `application/octet-stream`.
    pub fn probe(path: impl Into<PathBuf>) -> Result<Self, IngestError> {
        let path = path.into();
        let unreadable = |reason: String| IngestError::Unreadable {
            path: path.clone(),
            reason,
        };

        let probe = Probe::open(&path).map_err(|e| unreadable(e.to_string()))?;
        let probe = probe
            .guess_file_type()
            .map_err(|e| unreadable(e.to_string()))?;

        let media_type = probe
            .file_type()
            .map(media_type_of)
            .unwrap_or(UNKNOWN_MEDIA_TYPE);
        tracing::debug!(path = %path.display(), media_type, "probed file");

        Ok(Self::new(path, media_type))
    }

    pub fn is_audio(&self) -> bool {
        self.media_type.starts_with("audio/")
    }

    /// The file name without its last extension.
    pub fn default_title(&self) -> String {
        match self.name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem.to_string(),
            _ => self.name.clone(),
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn media_type_of(file_type: FileType) -> &'static str {
    match file_type {
        FileType::Aac => "audio/aac",
        FileType::Aiff => "audio/aiff",
        FileType::Ape => "audio/ape",
        FileType::Flac => "audio/flac",
        FileType::Mpeg => "audio/mpeg",
        FileType::Mp4 => "audio/mp4",
        FileType::Mpc => "audio/musepack",
        FileType::Opus => "audio/opus",
        FileType::Vorbis | FileType::Speex => "audio/ogg",
        FileType::Wav => "audio/wav",
        FileType::WavPack => "audio/wavpack",
        _ => "audio/x-unknown",
    }
}
