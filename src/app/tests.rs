use std::fs;

use tempfile::tempdir;

use super::*;
use crate::config::IngestSettings;
use crate::ingest::{AddMethod, IngestError, LocalFile, WizardStep};
use crate::library::{Library, Track, TrackId, TrackSource};
use crate::player::testing::{Call, FakeHandle};
use crate::player::{MediaEventKind, PlayError, Transport};

fn t(title: &str, artist: &str) -> Track {
    Track::new(
        title,
        artist,
        "cover.jpg",
        TrackSource::Url(format!("https://example.com/{title}.mp3")),
    )
}

fn app_with(titles: &[&str]) -> (App<FakeHandle>, FakeHandle) {
    let lib = Library::new(titles.iter().map(|s| t(s, "Artist")).collect());
    let fake = FakeHandle::default();
    (App::new(lib, fake.clone(), IngestSettings::default()), fake)
}

fn id(app: &App<FakeHandle>, idx: usize) -> TrackId {
    app.library().tracks()[idx].id
}

#[test]
fn new_cues_first_track_without_playing() {
    let (app, fake) = app_with(&["A", "B"]);
    assert_eq!(app.playback().current_track_id, Some(id(&app, 0)));
    assert!(!app.playback().is_playing);
    assert!(matches!(fake.calls().as_slice(), [Call::Load(..)]));
}

#[test]
fn empty_library_has_no_current_track() {
    let (app, fake) = app_with(&[]);
    assert!(app.current_track().is_none());
    assert_eq!(app.playback().transport(), Transport::Stopped);
    assert!(fake.calls().is_empty());
}

#[test]
fn next_walks_library_order_and_wraps() {
    let (mut app, _fake) = app_with(&["A", "B", "C"]);

    app.next();
    assert_eq!(app.current_track().unwrap().title, "B");
    assert!(app.playback().is_playing);
    app.next();
    assert_eq!(app.current_track().unwrap().title, "C");
    app.next();
    assert_eq!(app.current_track().unwrap().title, "A");
}

#[test]
fn next_ignores_active_filter() {
    let (mut app, _fake) = app_with(&["Alpha", "Beta", "Gamma"]);
    app.set_query("gamma");

    app.next();
    assert_eq!(app.current_track().unwrap().title, "Beta");
}

#[test]
fn select_resets_time_to_zero() {
    let (mut app, fake) = app_with(&["A", "B"]);
    fake.emit(MediaEventKind::PositionChanged(12.5));
    app.pump_events();
    assert_eq!(app.playback().current_time, 12.5);

    let b = id(&app, 1);
    assert!(app.select_track(b));
    assert_eq!(app.playback().current_time, 0.0);
    assert_eq!(app.snapshot().cursor, Some(1));
}

#[test]
fn favorite_flip_is_visible_through_current_track() {
    let (mut app, _fake) = app_with(&["A"]);
    let a = id(&app, 0);
    assert!(!app.current_track().unwrap().favorite);

    assert_eq!(app.toggle_favorite(a), Some(true));
    assert!(app.current_track().unwrap().favorite);
    assert!(app.snapshot().current.unwrap().favorite);

    assert_eq!(app.toggle_favorite(a), Some(false));
    assert!(!app.current_track().unwrap().favorite);
}

#[test]
fn play_failure_ends_paused() {
    let (mut app, fake) = app_with(&["A"]);
    app.toggle_play();
    fake.settle(Err(PlayError::UnsupportedSource("https://example.com/A.mp3".into())));
    app.pump_events();

    assert!(!app.playback().is_playing);
    assert_eq!(app.playback().transport(), Transport::Paused);
}

#[test]
fn url_ingestion_scenarios() {
    let (mut app, _fake) = app_with(&[]);

    let err = app.add_track_from_url("", "X", None).unwrap_err();
    assert_eq!(err, IngestError::MissingUrl);
    assert!(app.library().is_empty());

    let err = app
        .add_track_from_url("https://example.com/x.mp3", "", None)
        .unwrap_err();
    assert_eq!(err, IngestError::MissingTitle);
    assert!(app.library().is_empty());

    let new_id = app
        .add_track_from_url("https://example.com/x.mp3", "X", None)
        .unwrap();
    let track = app.library().get(new_id).unwrap();
    assert_eq!(track.artist, "Unknown Artist");
    assert!(!track.favorite);
    assert_eq!(app.library().len(), 1);
}

#[test]
fn first_added_track_becomes_current() {
    let (mut app, fake) = app_with(&[]);
    let new_id = app
        .add_track_from_url("https://example.com/x.mp3", "X", Some("Y"))
        .unwrap();

    assert_eq!(app.playback().current_track_id, Some(new_id));
    assert!(!app.playback().is_playing);
    assert!(matches!(fake.calls().as_slice(), [Call::Load(..)]));
}

#[test]
fn added_tracks_append_without_changing_current() {
    let (mut app, _fake) = app_with(&["A"]);
    let a = id(&app, 0);
    app.add_track_from_url("https://example.com/a.mp3", "A", None)
        .unwrap();

    assert_eq!(app.library().len(), 2);
    assert_eq!(app.playback().current_track_id, Some(a));
}

#[test]
fn add_track_from_file_rejects_non_audio() {
    let (mut app, _fake) = app_with(&["A"]);
    let text = LocalFile::new("/tmp/readme.txt", "text/plain");
    assert!(matches!(
        app.add_track_from_file(&text, None, None),
        Err(IngestError::NotAudio { .. })
    ));
    assert_eq!(app.library().len(), 1);

    let audio = LocalFile::new("/music/Song.mp3", "audio/mpeg");
    let new_id = app.add_track_from_file(&audio, None, None).unwrap();
    let track = app.library().get(new_id).unwrap();
    assert_eq!(track.title, "Song");
    assert_eq!(track.source, TrackSource::Local("/music/Song.mp3".into()));
}

#[test]
fn snapshot_reflects_filter() {
    let (mut app, _fake) = app_with(&["Alpha", "Beta", "Gamma"]);
    let b = id(&app, 1);
    app.toggle_favorite(b);

    app.set_favorites_only(true);
    let snap = app.snapshot();
    assert_eq!(snap.visible.len(), 1);
    assert_eq!(snap.visible[0].id, b);
    assert!(snap.filter.favorites_only);
}

#[test]
fn cursor_moves_within_view_and_wraps() {
    let (mut app, _fake) = app_with(&["Alpha", "Beta", "Gamma", "Delta"]);
    app.set_query("ta");
    // Beta(1) and Delta(3) are visible; the cursor jumps onto the first.
    assert_eq!(app.cursor_track_id(), Some(id(&app, 1)));

    app.cursor_down();
    assert_eq!(app.cursor_track_id(), Some(id(&app, 3)));
    app.cursor_down();
    assert_eq!(app.cursor_track_id(), Some(id(&app, 1)));
    app.cursor_up();
    assert_eq!(app.cursor_track_id(), Some(id(&app, 3)));
}

#[test]
fn cursor_on_empty_view_is_none() {
    let (mut app, _fake) = app_with(&["Alpha"]);
    app.set_query("zzz");
    assert!(app.cursor_track_id().is_none());
    app.cursor_down();
    assert!(!app.play_cursor());
    assert!(app.favorite_cursor().is_none());
}

#[test]
fn play_cursor_selects_highlighted_track() {
    let (mut app, fake) = app_with(&["A", "B"]);
    app.cursor_down();
    fake.clear_calls();

    assert!(app.play_cursor());
    assert_eq!(app.current_track().unwrap().title, "B");
    assert!(matches!(fake.calls().as_slice(), [Call::Load(..), Call::Play(_)]));
}

#[test]
fn favorite_cursor_and_current_target_different_tracks() {
    let (mut app, _fake) = app_with(&["A", "B"]);
    app.cursor_down();

    assert_eq!(app.favorite_cursor(), Some(true));
    assert!(app.library().tracks()[1].favorite);

    assert_eq!(app.favorite_current(), Some(true));
    assert!(app.library().tracks()[0].favorite);
}

#[test]
fn seek_by_clamps_to_known_duration() {
    let (mut app, fake) = app_with(&["A"]);
    fake.emit(MediaEventKind::DurationKnown(10.0));
    app.pump_events();

    app.seek_by(-5.0);
    assert_eq!(app.playback().current_time, 0.0);
    app.seek_by(25.0);
    assert_eq!(app.playback().current_time, 10.0);
}

#[test]
fn seek_is_passed_through_unchecked() {
    let (mut app, fake) = app_with(&["A"]);
    app.seek(500.0);
    assert_eq!(app.playback().current_time, 500.0);
    assert_eq!(fake.calls().last(), Some(&Call::SetPosition(500.0)));
}

#[test]
fn clear_search_resets_query_and_mode() {
    let (mut app, _fake) = app_with(&["A"]);
    app.enter_search_mode();
    app.push_query_char('x');
    app.pop_query_char();
    app.push_query_char('q');
    assert_eq!(app.filter().query, "q");

    app.clear_search();
    assert!(!app.search_mode);
    assert!(app.filter().query.is_empty());
}

#[test]
fn submit_wizard_url_adds_track() {
    let (mut app, _fake) = app_with(&[]);
    let w = app.wizard_mut();
    w.open();
    w.choose(AddMethod::Url);
    "https://example.com/y.mp3".chars().for_each(|c| w.push_char(c));
    w.focus_next();
    "Y".chars().for_each(|c| w.push_char(c));

    let new_id = app.submit_wizard().unwrap();
    assert_eq!(app.library().get(new_id).unwrap().title, "Y");
    assert_eq!(app.wizard().step(), WizardStep::Closed);
}

#[test]
fn submit_wizard_file_probes_the_draft_path() {
    let dir = tempdir().unwrap();
    let notes = dir.path().join("notes.txt");
    fs::write(&notes, "not audio").unwrap();

    let (mut app, _fake) = app_with(&[]);
    let w = app.wizard_mut();
    w.open();
    w.choose(AddMethod::File);
    notes
        .to_string_lossy()
        .chars()
        .for_each(|c| w.push_char(c));

    assert!(app.submit_wizard().is_none());
    assert_eq!(app.wizard().step(), WizardStep::EnteringFile);
    assert!(app.library().is_empty());
}

#[test]
fn submit_wizard_when_closed_does_nothing() {
    let (mut app, _fake) = app_with(&["A"]);
    assert!(app.submit_wizard().is_none());
    assert_eq!(app.library().len(), 1);
}
