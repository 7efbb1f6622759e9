use std::env;
use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::audio::RodioHandle;
use crate::logging::init_logging;
use crate::mpris::ControlCmd;

mod event_loop;
mod mpris_sync;
mod startup;

use startup::CliArgs;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliArgs::parse(env::args().skip(1));
    let (settings, warning) = startup::load_settings();

    if cli.print_config {
        print!("{}", settings.to_toml()?);
        return Ok(());
    }
    if let Some(msg) = &warning {
        eprintln!("cadence: {msg}");
    }

    // Held for the whole run; dropping it flushes the log file.
    let _log_guard = match init_logging(&settings.logging) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("cadence: logging disabled: {e}");
            None
        }
    };
    if let Some(msg) = warning {
        tracing::warn!("{msg}");
    }

    let dir = startup::resolve_library_dir(cli.library_dir.as_deref(), &settings.library);
    let handle = RodioHandle::spawn(&settings.audio)?;
    let mut app = startup::build_app(&dir, &settings, handle);

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &mpris, &control_rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &run_result {
        tracing::error!(error = %e, "event loop failed");
    }
    tracing::info!("shutting down");
    run_result
}
