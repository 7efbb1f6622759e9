use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::config;
use crate::ingest::{AddMethod, WizardStep};
use crate::mpris::{ControlCmd, MprisHandle};
use crate::player::MediaHandle;
use crate::runtime::mpris_sync::MprisSync;
use crate::ui;

const INPUT_POLL: Duration = Duration::from_millis(50);

/// Whether the loop should keep going after handling an input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(super) enum Flow {
    Continue,
    Quit,
}

/// Main terminal event loop: applies media events, handles input and MPRIS
/// commands, and redraws. Returns `Ok(())` when shutdown is requested.
pub fn run<H: MediaHandle>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App<H>,
    mpris: &MprisHandle,
    control_rx: &mpsc::Receiver<ControlCmd>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut sync = MprisSync::default();

    loop {
        app.pump_events();
        sync.sync(mpris, app);

        terminal.draw(|f| ui::draw(f, app, &settings.ui, &settings.controls))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, app) == Flow::Quit {
                return Ok(());
            }
        }

        if event::poll(INPUT_POLL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app) == Flow::Quit {
                    return Ok(());
                }
            }
        }
    }
}

pub(super) fn handle_control_cmd<H: MediaHandle>(cmd: ControlCmd, app: &mut App<H>) -> Flow {
    tracing::debug!(?cmd, "mpris command");
    match cmd {
        ControlCmd::Quit => return Flow::Quit,
        ControlCmd::PlayPause => app.toggle_play(),
        ControlCmd::Play => {
            if !app.playback().is_playing {
                app.toggle_play();
            }
        }
        ControlCmd::Pause => {
            if app.playback().is_playing {
                app.toggle_play();
            }
        }
        ControlCmd::Next => {
            app.next();
        }
        ControlCmd::Previous => {
            app.previous();
        }
        ControlCmd::Seek(offset_micros) => {
            app.seek_by(offset_micros as f64 / 1_000_000.0);
        }
    }
    Flow::Continue
}

pub(super) fn handle_key_event<H: MediaHandle>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App<H>,
) -> Flow {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Flow::Quit;
    }

    if app.wizard().is_open() {
        handle_wizard_key(key, app);
        return Flow::Continue;
    }

    if app.search_mode {
        match key.code {
            KeyCode::Esc => app.clear_search(),
            KeyCode::Enter => app.exit_search_mode(),
            KeyCode::Backspace => app.pop_query_char(),
            KeyCode::Down => app.cursor_down(),
            KeyCode::Up => app.cursor_up(),
            KeyCode::Char(c) if !c.is_control() => app.push_query_char(c),
            _ => {}
        }
        return Flow::Continue;
    }

    let seek = settings.controls.seek_seconds as f64;
    match key.code {
        KeyCode::Char('q') => return Flow::Quit,
        KeyCode::Char('j') | KeyCode::Down => app.cursor_down(),
        KeyCode::Char('k') | KeyCode::Up => app.cursor_up(),
        KeyCode::Enter => {
            app.play_cursor();
        }
        KeyCode::Char(' ') | KeyCode::Char('p') => app.toggle_play(),
        KeyCode::Char('h') => {
            app.previous();
        }
        KeyCode::Char('l') => {
            app.next();
        }
        KeyCode::Char('H') => app.seek_by(-seek),
        KeyCode::Char('L') => app.seek_by(seek),
        KeyCode::Char('f') => {
            app.favorite_cursor();
        }
        KeyCode::Char('F') => {
            app.favorite_current();
        }
        KeyCode::Char('v') => {
            let favorites_only = !app.filter().favorites_only;
            app.set_favorites_only(favorites_only);
        }
        KeyCode::Char('/') => app.enter_search_mode(),
        KeyCode::Char('a') => app.wizard_mut().open(),
        KeyCode::Char('b') => app.toggle_sidebar(),
        KeyCode::Esc => {
            if !app.filter().query.is_empty() {
                app.clear_search();
            }
        }
        _ => {}
    }
    Flow::Continue
}

fn handle_wizard_key<H: MediaHandle>(key: KeyEvent, app: &mut App<H>) {
    if key.code == KeyCode::Char('x') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.wizard_mut().cancel();
        return;
    }
    match app.wizard().step() {
        WizardStep::Closed => {}
        WizardStep::ChoosingMethod => match key.code {
            KeyCode::Char('u') => app.wizard_mut().choose(AddMethod::Url),
            KeyCode::Char('f') => app.wizard_mut().choose(AddMethod::File),
            KeyCode::Esc => app.wizard_mut().back(),
            _ => {}
        },
        WizardStep::EnteringUrl | WizardStep::EnteringFile => match key.code {
            KeyCode::Esc => app.wizard_mut().back(),
            KeyCode::Tab => app.wizard_mut().focus_next(),
            KeyCode::Enter => {
                app.submit_wizard();
            }
            KeyCode::Backspace => app.wizard_mut().pop_char(),
            KeyCode::Char(c) if !c.is_control() => app.wizard_mut().push_char(c),
            _ => {}
        },
    }
}
