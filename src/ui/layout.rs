//! Screen geometry shared by rendering and mouse hit-testing.
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};

use crate::app::modal::PointerTarget;
use crate::app::table::TableColumn;
use crate::ui::components::centered_rect;

pub const ROW_HEIGHT: u16 = 2;
pub const COLUMN_SPACING: u16 = 1;

pub struct PageAreas {
    pub header: Rect,
    pub body: Rect,
    pub status: Rect,
}

pub fn page_areas(area: Rect) -> PageAreas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    PageAreas { header: chunks[0], body: chunks[1], status: chunks[2] }
}

pub fn table_widths() -> [Constraint; 6] {
    [
        Constraint::Fill(3),
        Constraint::Fill(3),
        Constraint::Length(22),
        Constraint::Fill(2),
        Constraint::Fill(2),
        Constraint::Length(6),
    ]
}

/// Inside of the bordered table block.
pub fn table_inner(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

/// Rows area below the header line.
pub fn table_body(area: Rect) -> Rect {
    let inner = table_inner(area);
    Rect {
        y: inner.y.saturating_add(1),
        height: inner.height.saturating_sub(1),
        ..inner
    }
}

pub fn rows_per_page(area: Rect) -> usize {
    (table_body(area).height / ROW_HEIGHT).max(1) as usize
}

/// Horizontal extent of each column, in `TableColumn::ALL` order.
pub fn table_columns(area: Rect) -> Vec<Rect> {
    Layout::horizontal(table_widths())
        .spacing(COLUMN_SPACING)
        .split(table_inner(area))
        .to_vec()
}

/// Map a pointer position over the table block to `(row index, column)`.
pub fn table_hit(area: Rect, offset: usize, len: usize, x: u16, y: u16) -> Option<(usize, TableColumn)> {
    let body = table_body(area);
    if !body.contains(Position::new(x, y)) {
        return None;
    }
    let index = offset + ((y - body.y) / ROW_HEIGHT) as usize;
    if index >= len {
        return None;
    }
    let column = table_columns(area)
        .iter()
        .zip(TableColumn::ALL)
        .find(|(rect, _)| x >= rect.x && x < rect.x + rect.width)
        .map(|(_, col)| col)?;
    Some((index, column))
}

pub fn modal_area(area: Rect) -> Rect {
    let width = area.width.saturating_sub(4).min(72);
    let height = area.height.saturating_sub(2).min(24);
    centered_rect(width, height, area)
}

/// The `[✕]` control drawn on the modal's top border.
pub fn close_button_area(modal: Rect) -> Rect {
    Rect {
        x: modal.x + modal.width.saturating_sub(5),
        y: modal.y,
        width: 3.min(modal.width),
        height: 1.min(modal.height),
    }
}

pub fn modal_target(area: Rect, x: u16, y: u16) -> PointerTarget {
    let modal = modal_area(area);
    let pos = Position::new(x, y);
    if close_button_area(modal).contains(pos) {
        PointerTarget::CloseButton
    } else if modal.contains(pos) {
        PointerTarget::Content
    } else {
        PointerTarget::Outside
    }
}
