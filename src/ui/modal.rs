//! Detail modal rendering.
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::api::User;
use crate::app::Theme;
use crate::app::modal::{DetailModal, ModalPhase};
use crate::ui::layout::{close_button_area, modal_area};

pub fn render_user_modal(f: &mut Frame, area: Rect, modal: &DetailModal, theme: &Theme) {
    let rect = modal_area(area);
    // Opening/Closing draw muted so the enter and exit transitions are visible.
    let border = match modal.phase() {
        ModalPhase::Open => theme.title,
        ModalPhase::Opening | ModalPhase::Closing => theme.muted,
    };

    let p = Paragraph::new(detail_lines(modal.user(), theme))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" User details ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);

    let close = Paragraph::new("[✕]").style(Style::default().fg(theme.danger).add_modifier(Modifier::BOLD));
    f.render_widget(close, close_button_area(rect));
}

/// Body text of the modal: header, then the personal/address/company sections.
pub fn detail_lines(user: &User, theme: &Theme) -> Vec<Line<'static>> {
    let section = |title: &str| {
        Line::from(Span::styled(
            title.to_string(),
            Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
        ))
    };
    let field = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("  {label:<12}"), Style::default().fg(theme.muted)),
            Span::styled(value, Style::default().fg(theme.text)),
        ])
    };
    let link = |label: &str, url: String| {
        Line::from(vec![
            Span::styled(format!("  {label:<12}"), Style::default().fg(theme.muted)),
            Span::styled(url, Style::default().fg(theme.link).add_modifier(Modifier::UNDERLINED)),
        ])
    };
    let [street_line, city_line] = user.address.lines();

    vec![
        Line::from(Span::styled(
            user.name.clone(),
            Style::default().fg(theme.header_fg).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(user.email.clone(), Style::default().fg(theme.link))),
        Line::raw(""),
        section("Personal Information"),
        field("Username:", user.username.clone()),
        field("Phone:", user.phone.clone()),
        link("Website:", user.website_url()),
        Line::raw(""),
        section("Address"),
        field("", street_line),
        field("", city_line),
        link("Map:", user.map_url()),
        Line::raw(""),
        section("Company"),
        field("Name:", user.company.name.clone()),
        field("Catchphrase:", user.company.catch_phrase.clone()),
        field("Business:", user.company.bs.clone()),
        Line::raw(""),
        Line::from(Span::styled(
            "Esc close · m map · w website · e email",
            Style::default().fg(theme.muted).add_modifier(Modifier::ITALIC),
        )),
    ]
}
