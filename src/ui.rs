//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Tabs, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::{App, Snapshot};
use crate::config::{ControlsSettings, UiSettings};
use crate::ingest::{AddTrackWizard, DraftField, WizardStep};
use crate::player::{MediaHandle, Transport};

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("j/k", "up/down");
    map.insert("enter", "play selected");
    map.insert("space/p", "play/pause");
    map.insert("h/l", "prev/next");
    // H/L is filled dynamically from config.
    map.insert("f", "favorite selected");
    map.insert("F", "favorite playing");
    map.insert("v", "favorites view");
    map.insert("/", "search");
    map.insert("a", "add track");
    map.insert("b", "sidebar");
    map.insert("q", "quit");
    map
});

/// Render the controls help text, incorporating seek seconds.
fn controls_text(seek_seconds: u64) -> String {
    // Keep the rendered order stable and human-friendly.
    let order = [
        "j/k", "enter", "space/p", "h/l", "H/L", "f", "F", "v", "/", "a", "b", "q",
    ];
    order
        .iter()
        .filter_map(|k| {
            if *k == "H/L" {
                Some(format!("[H/L] seek -/+{seek_seconds}s"))
            } else {
                CONTROLS_MAP.get(*k).map(|v| format!("[{k}] {v}"))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format seconds as `m:ss`. Negative or non-finite input renders as `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }
    let secs = seconds.floor() as u64;
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Fraction of the track played, in `0.0..=1.0`. Unknown durations give 0.
pub fn progress_ratio(current: f64, duration: f64) -> f64 {
    if !duration.is_finite() || duration <= 0.0 || !current.is_finite() {
        return 0.0;
    }
    (current / duration).clamp(0.0, 1.0)
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    // Keep the popup smaller and avoid covering the entire UI.
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn left_pad() -> Padding {
    Padding {
        left: 1,
        right: 0,
        top: 0,
        bottom: 0,
    }
}

/// Render the entire UI into the provided `frame`.
pub fn draw<H: MediaHandle>(
    frame: &mut Frame,
    app: &App<H>,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let snap = app.snapshot();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" cadence ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let body = chunks[1];
    if app.show_sidebar {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(body);
        draw_library(frame, cols[0], &snap, app.search_mode);
        draw_now_playing(frame, cols[1], &snap);
    } else {
        draw_now_playing(frame, body, &snap);
    }

    let footer = Paragraph::new(controls_text(controls_settings.seek_seconds))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(left_pad()),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[2]);

    if app.wizard().is_open() {
        draw_wizard(frame, body, app.wizard());
    }
}

fn draw_library(frame: &mut Frame, area: Rect, snap: &Snapshot<'_>, search_mode: bool) {
    let block = Block::default().borders(Borders::ALL).title(" library ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(inner);

    let cursor = if search_mode { "_" } else { "" };
    let search = Line::from(vec![
        Span::raw(" / "),
        Span::raw(snap.filter.query.as_str()),
        Span::raw(cursor).slow_blink(),
    ]);
    let search_style = if search_mode {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };
    frame.render_widget(Paragraph::new(search).style(search_style), rows[0]);

    let tabs = Tabs::new(vec!["All", "Favorites"])
        .select(usize::from(snap.filter.favorites_only))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .divider("|");
    frame.render_widget(tabs, rows[1]);

    // Center the cursor when possible by creating a visible window.
    // Only build ListItems for the visible window.
    let total = snap.visible.len();
    let list_height = rows[2].height as usize;
    let sel_pos = snap.cursor.unwrap_or(0);
    let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
        (0, total, sel_pos)
    } else {
        let half = list_height / 2;
        let mut start = sel_pos.saturating_sub(half);
        if start + list_height > total {
            start = total - list_height;
        }
        (start, start + list_height, sel_pos - start)
    };

    let current_id = snap.playback.current_track_id;
    let items: Vec<ListItem> = snap.visible[start..end]
        .iter()
        .map(|track| {
            let marker = if Some(track.id) == current_id { "▶ " } else { "  " };
            let heart = if track.favorite { "♥ " } else { "  " };
            ListItem::new(format!("{marker}{heart}{}", track.display()))
        })
        .collect();

    let empty = total == 0;
    let list = List::new(items)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if !empty && snap.cursor.is_some() {
        state.select(Some(selected_pos_in_visible));
    }
    if empty {
        let hint = if snap.library.is_empty() {
            "No tracks yet. Press [a] to add one."
        } else {
            "No tracks match."
        };
        frame.render_widget(
            Paragraph::new(hint).dim(),
            rows[2],
        );
    } else {
        frame.render_stateful_widget(list, rows[2], &mut state);
    }
}

fn draw_now_playing(frame: &mut Frame, area: Rect, snap: &Snapshot<'_>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" now playing ")
        .padding(left_pad());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let Some(track) = snap.current else {
        frame.render_widget(
            Paragraph::new("Nothing selected").dim(),
            rows[0],
        );
        return;
    };

    let state = match snap.playback.transport() {
        Transport::Playing => "Playing",
        Transport::Paused => "Paused",
        Transport::Stopped => "Stopped",
    };
    let heart = if track.favorite { " ♥" } else { "" };
    let lines = vec![
        Line::from(vec![
            Span::raw(track.title.as_str()).bold(),
            Span::raw(heart),
        ]),
        Line::from(track.artist.as_str()),
        Line::from(""),
        Line::from(format!("Cover: {}", track.cover)).dim(),
        Line::from(format!("Source: {}", track.source.as_uri())).dim(),
        Line::from(""),
        Line::from(state).italic(),
    ];
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), rows[0]);

    let playback = snap.playback;
    let label = format!(
        "{} / {}",
        format_time(playback.current_time),
        format_time(playback.duration)
    );
    let gauge = Gauge::default()
        .ratio(progress_ratio(playback.current_time, playback.duration))
        .label(label)
        .use_unicode(true);
    frame.render_widget(gauge, rows[1]);
}

fn field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let marker = if focused { "> " } else { "  " };
    let text = format!("{marker}{label:<8}{value}{}", if focused { "_" } else { "" });
    if focused {
        Line::from(text).bold()
    } else {
        Line::from(text)
    }
}

fn draw_wizard(frame: &mut Frame, area: Rect, wizard: &AddTrackWizard) {
    let popup = centered_rect_sized(64, 10, area);
    frame.render_widget(Clear, popup);

    let draft = wizard.draft();
    let focus = wizard.focus();
    let (title, lines) = match wizard.step() {
        WizardStep::Closed => return,
        WizardStep::ChoosingMethod => (
            " add track ",
            vec![
                Line::from("How do you want to add a track?"),
                Line::from(""),
                Line::from("  [u] from a URL"),
                Line::from("  [f] from a local file"),
                Line::from(""),
                Line::from("[esc] cancel").dim(),
            ],
        ),
        WizardStep::EnteringUrl => (
            " add track: URL ",
            vec![
                field_line("URL", &draft.url, focus == DraftField::Url),
                field_line("Title", &draft.title, focus == DraftField::Title),
                field_line("Artist", &draft.artist, focus == DraftField::Artist),
                Line::from(""),
                Line::from("[tab] next field  [enter] add  [esc] back  [ctrl-x] close")
                    .dim(),
            ],
        ),
        WizardStep::EnteringFile => (
            " add track: file ",
            vec![
                field_line("Path", &draft.path, focus == DraftField::Path),
                field_line("Title", &draft.title, focus == DraftField::Title),
                field_line("Artist", &draft.artist, focus == DraftField::Artist),
                Line::from(""),
                Line::from("Title defaults to the file name.").dim(),
                Line::from("[tab] next field  [enter] add  [esc] back  [ctrl-x] close")
                    .dim(),
            ],
        ),
    };

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .padding(left_pad()),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, popup);
}
