//! Shared UI components (status bar, page messages, modal helpers).
//!
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::keymap::KeyAction;
use crate::app::{AppState, PageState};

/// Render the bottom status bar with counts, pending state and key hints.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mut parts = Vec::new();
    match &app.page {
        PageState::Loading => parts.push("loading".to_string()),
        PageState::Failed { .. } => parts.push("error".to_string()),
        PageState::Empty => parts.push("users:0".to_string()),
        PageState::Ready(view) => {
            parts.push(format!("users:{}", view.list.len()));
            if let Some(id) = view.table.pending_delete() {
                parts.push(format!("removing #{id}"));
            }
            if view.modal.is_some() {
                parts.push("Esc: close  m: map  w: website  e: email".to_string());
            } else {
                let hint = |action, label: &str| {
                    let keys = app.keymap.keys_for(action);
                    format!("{}: {}", keys.join("/"), label)
                };
                parts.push(hint(KeyAction::OpenDetails, "details"));
                parts.push(hint(KeyAction::DeleteUser, "remove"));
                parts.push(hint(KeyAction::OpenWebsite, "website"));
            }
        }
    }
    parts.push(hint_quit(app));
    if let Some(msg) = &app.status {
        parts.push(msg.clone());
    }

    let p = Paragraph::new(parts.join("  ")).style(
        Style::default()
            .fg(app.theme.status_fg)
            .bg(app.theme.status_bg),
    );
    f.render_widget(p, area);
}

fn hint_quit(app: &AppState) -> String {
    let keys = app.keymap.keys_for(KeyAction::Quit);
    format!("{}: quit", keys.join("/"))
}

/// Centered one-line placeholder while the initial fetch runs.
pub fn render_loading(f: &mut Frame, area: Rect, app: &AppState) {
    render_message(f, area, app, "Loading users…", app.theme.muted);
}

/// Boxed page message (error or empty state) in place of the table.
pub fn render_message(f: &mut Frame, area: Rect, app: &AppState, message: &str, color: Color) {
    let p = Paragraph::new(message.to_string())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(p, area);
}

pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
