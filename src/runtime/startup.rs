use std::path::{Path, PathBuf};

use crate::app::App;
use crate::config::{self, LibrarySettings};
use crate::library::{Library, scan};
use crate::player::MediaHandle;

/// Command line: `cadence [--print-config] [DIR]`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub library_dir: Option<PathBuf>,
    pub print_config: bool,
}

impl CliArgs {
    /// Parse arguments, not including the program name.
    pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Self {
        let mut cli = Self::default();
        for arg in args {
            match arg.as_str() {
                "--print-config" => cli.print_config = true,
                _ if cli.library_dir.is_none() => cli.library_dir = Some(PathBuf::from(&arg)),
                _ => {}
            }
        }
        cli
    }
}

/// Load and validate settings. Failures fall back to defaults; the returned
/// message says why.
pub fn load_settings() -> (config::Settings, Option<String>) {
    match config::Settings::load() {
        Ok(s) => match s.validate() {
            Ok(()) => (s, None),
            Err(msg) => (
                config::Settings::default(),
                Some(format!("invalid config, using defaults: {msg}")),
            ),
        },
        // Config is optional; failures should not prevent the app from starting.
        Err(e) => (
            config::Settings::default(),
            Some(format!("failed to load config, using defaults: {e}")),
        ),
    }
}

/// The directory to seed the library from: CLI, then config, then the
/// working directory.
pub fn resolve_library_dir(cli: Option<&Path>, settings: &LibrarySettings) -> PathBuf {
    if let Some(dir) = cli.or(settings.dir.as_deref()) {
        return dir.to_path_buf();
    }
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Scan `dir` and build the app around `handle`, applying UI defaults.
pub fn build_app<H: MediaHandle>(dir: &Path, settings: &config::Settings, handle: H) -> App<H> {
    let tracks = scan(dir, &settings.library, &settings.ingest);
    tracing::info!(dir = %dir.display(), tracks = tracks.len(), "library scanned");

    let mut app = App::new(Library::new(tracks), handle, settings.ingest.clone());
    app.show_sidebar = settings.ui.show_sidebar;
    app.set_favorites_only(settings.ui.favorites_only);
    app
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;
    use crate::player::testing::{Call, FakeHandle};

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn cli_parses_flag_and_first_dir() {
        assert_eq!(CliArgs::parse(args(&[])), CliArgs::default());

        let cli = CliArgs::parse(args(&["--print-config", "/music", "/other"]));
        assert!(cli.print_config);
        assert_eq!(cli.library_dir, Some(PathBuf::from("/music")));
    }

    #[test]
    fn library_dir_prefers_cli_then_config() {
        let mut lib = LibrarySettings::default();
        lib.dir = Some(PathBuf::from("/from/config"));

        assert_eq!(
            resolve_library_dir(Some(Path::new("/from/cli")), &lib),
            PathBuf::from("/from/cli")
        );
        assert_eq!(resolve_library_dir(None, &lib), PathBuf::from("/from/config"));

        lib.dir = None;
        assert!(!resolve_library_dir(None, &lib).as_os_str().is_empty());
    }

    #[test]
    fn build_app_seeds_library_and_cues_first_track() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.mp3"), b"").unwrap();
        fs::write(dir.path().join("a.mp3"), b"").unwrap();
        fs::write(dir.path().join("notes.txt"), b"").unwrap();

        let mut settings = config::Settings::default();
        settings.ui.show_sidebar = false;
        let fake = FakeHandle::default();
        let app = build_app(dir.path(), &settings, fake.clone());

        assert_eq!(app.library().len(), 2);
        assert_eq!(app.current_track().unwrap().title, "a");
        assert!(!app.playback().is_playing);
        assert!(!app.show_sidebar);
        assert!(matches!(fake.calls().as_slice(), [Call::Load(..)]));
    }

    #[test]
    fn build_app_applies_favorites_view_default() {
        let dir = tempdir().unwrap();
        let mut settings = config::Settings::default();
        settings.ui.favorites_only = true;

        let app = build_app(dir.path(), &settings, FakeHandle::default());
        assert!(app.filter().favorites_only);
        assert!(app.library().is_empty());
    }
}
