use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};

use crate::app::table::{TableColumn, UserTable};
use crate::app::{Theme, UsersView};
use crate::ui::layout::{COLUMN_SPACING, ROW_HEIGHT, rows_per_page, table_widths};

pub fn render_users_table(f: &mut Frame, area: Rect, view: &mut UsersView, theme: &Theme) {
    view.table.rows_per_page = rows_per_page(area);
    view.table.clamp(view.list.len());

    let table = build_table(view, theme);
    f.render_widget(table, area);
}

fn build_table<'a>(view: &'a UsersView, theme: &Theme) -> Table<'a> {
    let UserTable { selected, offset, rows_per_page, .. } = view.table;
    let users = view.list.users();
    let start = offset.min(users.len());
    let end = (start + rows_per_page).min(users.len());

    let rows = users[start..end].iter().enumerate().map(|(i, u)| {
        let pending = view.table.is_pending(u.id);
        let mut style = Style::default().fg(theme.text);
        if start + i == selected {
            style = style.fg(theme.highlight_fg).bg(theme.highlight_bg).add_modifier(Modifier::BOLD);
        }
        if pending {
            style = style.fg(theme.muted).add_modifier(Modifier::CROSSED_OUT);
        }

        let name = Text::from(vec![
            Line::from(u.name.clone()),
            Line::from(Span::styled(u.email.clone(), Style::default().fg(theme.muted))),
        ]);
        let website = Span::styled(
            u.website.clone(),
            Style::default().fg(theme.link).add_modifier(Modifier::UNDERLINED),
        );
        let action = if pending {
            Span::styled("...", Style::default().fg(theme.danger))
        } else if view.table.delete_enabled() {
            Span::styled(" ✕ ", Style::default().fg(theme.danger).add_modifier(Modifier::BOLD))
        } else {
            Span::styled(" ✕ ", Style::default().fg(theme.muted).add_modifier(Modifier::DIM))
        };

        Row::new(vec![
            Cell::from(name),
            Cell::from(u.address.short_line()),
            Cell::from(u.phone.clone()),
            Cell::from(website),
            Cell::from(u.company.name.clone()),
            Cell::from(action),
        ])
        .height(ROW_HEIGHT)
        .style(style)
    });

    let header = Row::new(TableColumn::ALL.map(TableColumn::header)).style(
        Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
    );

    Table::new(rows, table_widths())
        .header(header)
        .block(
            Block::default()
                .title(format!("Users ({})", users.len()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border)),
        )
        .column_spacing(COLUMN_SPACING)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen(view: &mut UsersView) -> String {
        let backend = TestBackend::new(120, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|f| render_users_table(f, f.area(), view, &theme))
            .unwrap();
        let buf = terminal.backend().buffer().clone();
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn empty_list_renders_headers_only() {
        let mut view = UsersView::new(Vec::new());
        let text = screen(&mut view);
        assert!(text.contains("NAME / EMAIL"));
        assert!(text.contains("ACTION"));
        assert!(text.contains("Users (0)"));
        assert!(!text.contains('✕'));
    }
}
