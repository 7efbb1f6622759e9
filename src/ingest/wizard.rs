use crate::config::IngestSettings;
use crate::library::Track;

use super::{LocalFile, track_from_file, track_from_url};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AddMethod {
    Url,
    File,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum WizardStep {
    #[default]
    Closed,
    ChoosingMethod,
    EnteringUrl,
    EnteringFile,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DraftField {
    #[default]
    Url,
    Path,
    Title,
    Artist,
}

/// Text entered so far. Shared by both methods, so switching method via
/// `back` keeps what was typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Draft {
    pub url: String,
    pub path: String,
    pub title: String,
    pub artist: String,
}

impl Draft {
    fn field_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::Url => &mut self.url,
            DraftField::Path => &mut self.path,
            DraftField::Title => &mut self.title,
            DraftField::Artist => &mut self.artist,
        }
    }
}

/// The modal add-track flow.
#[derive(Clone, Debug, Default)]
pub struct AddTrackWizard {
    step: WizardStep,
    draft: Draft,
    focus: DraftField,
}

impl AddTrackWizard {
    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn is_open(&self) -> bool {
        self.step != WizardStep::Closed
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn focus(&self) -> DraftField {
        self.focus
    }

    pub fn open(&mut self) {
        if self.step == WizardStep::Closed {
            self.step = WizardStep::ChoosingMethod;
        }
    }

    pub fn choose(&mut self, method: AddMethod) {
        if self.step != WizardStep::ChoosingMethod {
            return;
        }
        (self.step, self.focus) = match method {
            AddMethod::Url => (WizardStep::EnteringUrl, DraftField::Url),
            AddMethod::File => (WizardStep::EnteringFile, DraftField::Path),
        };
    }

    /// Step back to the method choice, keeping the draft. From the method
    /// choice itself this cancels.
    pub fn back(&mut self) {
        match self.step {
            WizardStep::EnteringUrl | WizardStep::EnteringFile => {
                self.step = WizardStep::ChoosingMethod;
            }
            WizardStep::ChoosingMethod => self.cancel(),
            WizardStep::Closed => {}
        }
    }

    /// Close and forget the draft.
    pub fn cancel(&mut self) {
        *self = Self::default();
    }

    /// Move focus to the next field of the current step, wrapping.
    pub fn focus_next(&mut self) {
        let fields = self.fields();
        if let Some(i) = fields.iter().position(|f| *f == self.focus) {
            self.focus = fields[(i + 1) % fields.len()];
        } else if let Some(first) = fields.first() {
            self.focus = *first;
        }
    }

    pub fn push_char(&mut self, c: char) {
        if self.fields().contains(&self.focus) {
            self.draft.field_mut(self.focus).push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if self.fields().contains(&self.focus) {
            self.draft.field_mut(self.focus).pop();
        }
    }

    /// Build a URL track from the draft and close.
    ///
    /// Returns `None` and leaves everything as is when the draft is incomplete.
    pub fn submit_url(&mut self, settings: &IngestSettings) -> Option<Track> {
        if self.step != WizardStep::EnteringUrl {
            return None;
        }
        match track_from_url(
            &self.draft.url,
            &self.draft.title,
            Some(&self.draft.artist),
            settings,
        ) {
            Ok(track) => {
                self.cancel();
                Some(track)
            }
            Err(error) => {
                tracing::debug!(%error, "url submission rejected");
                None
            }
        }
    }

    /// Build a track for `file` using the draft's title and artist, and close.
    ///
    /// Returns `None` and leaves everything as is when `file` is not audio.
    pub fn submit_file(&mut self, file: &LocalFile, settings: &IngestSettings) -> Option<Track> {
        if self.step != WizardStep::EnteringFile {
            return None;
        }
        match track_from_file(
            file,
            Some(&self.draft.title),
            Some(&self.draft.artist),
            settings,
        ) {
            Ok(track) => {
                self.cancel();
                Some(track)
            }
            Err(error) => {
                tracing::debug!(%error, "file submission rejected");
                None
            }
        }
    }

    fn fields(&self) -> &'static [DraftField] {
        match self.step {
            WizardStep::EnteringUrl => &[DraftField::Url, DraftField::Title, DraftField::Artist],
            WizardStep::EnteringFile => &[DraftField::Path, DraftField::Title, DraftField::Artist],
            WizardStep::Closed | WizardStep::ChoosingMethod => &[],
        }
    }
}
