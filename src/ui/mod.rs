pub mod components;
pub mod layout;
pub mod modal;
pub mod table;

use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, PageState};

pub fn render(f: &mut Frame, app: &mut AppState) {
    app.viewport = f.area();
    let areas = layout::page_areas(f.area());

    let count = match &app.page {
        PageState::Ready(view) => format!("  ·  {} loaded", view.list.len()),
        _ => String::new(),
    };
    let header = Paragraph::new(format!("Users{count}"))
        .block(
            Block::default()
                .title("userdeck")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .style(
            Style::default()
                .fg(app.theme.header_fg)
                .bg(app.theme.header_bg)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(header, areas.header);

    match &app.page {
        PageState::Loading => components::render_loading(f, areas.body, app),
        PageState::Failed { message } => {
            components::render_message(f, areas.body, app, message, app.theme.danger)
        }
        PageState::Empty => {
            components::render_message(f, areas.body, app, crate::app::EMPTY_MESSAGE, app.theme.muted)
        }
        PageState::Ready(_) => {}
    }
    let theme = app.theme;
    if let PageState::Ready(view) = &mut app.page {
        table::render_users_table(f, areas.body, view, &theme);
    }

    components::render_status_bar(f, areas.status, app);

    if let Some(open) = app.page.view().and_then(|v| v.modal.as_ref()) {
        modal::render_user_modal(f, f.area(), open, &app.theme);
    }
}
