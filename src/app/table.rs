//! Table view state: highlight, paging and the pending-removal pipeline.
use std::time::{Duration, Instant};

use tracing::debug;

use super::list::UserList;
use super::timer::{TimerEvent, Timers};

pub const DELETE_DELAY: Duration = Duration::from_millis(300);

/// Columns of the users table, left to right.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TableColumn {
    NameEmail,
    Address,
    Phone,
    Website,
    Company,
    Action,
}

impl TableColumn {
    pub const ALL: [TableColumn; 6] = [
        TableColumn::NameEmail,
        TableColumn::Address,
        TableColumn::Phone,
        TableColumn::Website,
        TableColumn::Company,
        TableColumn::Action,
    ];

    pub fn header(self) -> &'static str {
        match self {
            TableColumn::NameEmail => "NAME / EMAIL",
            TableColumn::Address => "ADDRESS",
            TableColumn::Phone => "PHONE",
            TableColumn::Website => "WEBSITE",
            TableColumn::Company => "COMPANY",
            TableColumn::Action => "ACTION",
        }
    }
}

/// Highlight, scroll position and the single pending removal of the users table.
#[derive(Clone, Debug)]
pub struct UserTable {
    pub selected: usize,
    pub offset: usize,
    pub rows_per_page: usize,
    pending_delete: Option<u32>,
}

impl Default for UserTable {
    fn default() -> Self {
        Self { selected: 0, offset: 0, rows_per_page: 10, pending_delete: None }
    }
}

impl UserTable {
    pub fn pending_delete(&self) -> Option<u32> {
        self.pending_delete
    }

    pub fn is_pending(&self, id: u32) -> bool {
        self.pending_delete == Some(id)
    }

    /// Delete actions are disabled for every row while one removal is pending.
    pub fn delete_enabled(&self) -> bool {
        self.pending_delete.is_none()
    }

    /// Mark `id` pending and schedule its removal.
    ///
    /// # Arguments
    ///
    /// * `id` - Record to remove.
    /// * `now` - Current instant; the commit fires [`DELETE_DELAY`] later.
    /// * `timers` - Queue that receives the `DeleteCommit` event.
    ///
    /// # Returns
    ///
    /// `true` when the removal was scheduled, `false` if another one is still
    /// pending.
    pub fn begin_delete(&mut self, id: u32, now: Instant, timers: &mut Timers) -> bool {
        if !self.delete_enabled() {
            debug!(id, pending = ?self.pending_delete, "delete ignored while another is pending");
            return false;
        }
        self.pending_delete = Some(id);
        timers.schedule_after(now, DELETE_DELAY, TimerEvent::DeleteCommit { id });
        debug!(id, "delete pending");
        true
    }

    /// Apply a fired `DeleteCommit`: remove from the list, clear pending and
    /// keep the highlight on the same neighbour.
    ///
    /// # Arguments
    ///
    /// * `id` - Record named by the fired event; unknown ids only clear pending.
    /// * `list` - Controller the record is removed from.
    pub fn commit_delete(&mut self, id: u32, list: &mut UserList) {
        if let Some(pos) = list.position(id) {
            list.remove(id);
            if pos < self.selected {
                self.selected -= 1;
            }
        }
        if self.pending_delete == Some(id) {
            self.pending_delete = None;
        }
        self.clamp(list.len());
        debug!(id, remaining = list.len(), "delete committed");
    }

    /// Highlight row `index`, clamped to `0..len`.
    pub fn select(&mut self, index: usize, len: usize) {
        self.selected = index;
        self.clamp(len);
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        self.ensure_visible();
    }

    pub fn move_down(&mut self, len: usize) {
        if self.selected + 1 < len {
            self.selected += 1;
        }
        self.ensure_visible();
    }

    pub fn page_up(&mut self) {
        self.selected = self.selected.saturating_sub(self.rows_per_page.max(1));
        self.ensure_visible();
    }

    pub fn page_down(&mut self, len: usize) {
        self.selected = self.selected.saturating_add(self.rows_per_page.max(1));
        self.clamp(len);
    }

    pub fn first(&mut self) {
        self.selected = 0;
        self.ensure_visible();
    }

    pub fn last(&mut self, len: usize) {
        self.selected = len.saturating_sub(1);
        self.ensure_visible();
    }

    /// Keep `selected` inside `0..len` and on screen.
    pub fn clamp(&mut self, len: usize) {
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
        self.offset = self.offset.min(len.saturating_sub(1));
        self.ensure_visible();
    }

    pub fn ensure_visible(&mut self) {
        let rpp = self.rows_per_page.max(1);
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + rpp {
            self.offset = self.selected + 1 - rpp;
        }
    }

    /// Scroll the viewport without moving the highlight off screen.
    ///
    /// # Arguments
    ///
    /// * `delta` - Rows to scroll; negative scrolls up.
    /// * `len` - Current number of rows.
    pub fn scroll_by(&mut self, delta: isize, len: usize) {
        let max_offset = len.saturating_sub(self.rows_per_page.max(1));
        let off = self.offset.saturating_add_signed(delta).min(max_offset);
        self.offset = off;
        let rpp = self.rows_per_page.max(1);
        if self.selected < off {
            self.selected = off;
        } else if self.selected >= off + rpp {
            self.selected = off + rpp - 1;
        }
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }
}
