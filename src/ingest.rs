//! Adding tracks at runtime, from a URL or a local file.

mod build;
mod file;
mod wizard;

pub use build::{track_from_file, track_from_url};
pub use file::LocalFile;
pub use wizard::{AddMethod, AddTrackWizard, Draft, DraftField, WizardStep};

use std::path::PathBuf;

use thiserror::Error;

/// Why a track could not be created.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IngestError {
    #[error("a URL is required")]
    MissingUrl,
    #[error("a title is required")]
    MissingTitle,
    #[error("{} is not audio (detected {media_type})", path.display())]
    NotAudio { path: PathBuf, media_type: String },
    #[error("cannot read {}: {reason}", path.display())]
    Unreadable { path: PathBuf, reason: String },
}
