use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use ratatui::Terminal;
use ratatui::backend::Backend;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::api::UserApi;
use crate::app::keymap::KeyAction;
use crate::app::modal::DetailModal;
use crate::app::table::TableColumn;
use crate::app::timer::TimerEvent;
use crate::app::{AppState, Effect, PageState};
use crate::sys;
use crate::ui;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Draw a loading frame, fetch once, then run the input/timer loop until quit.
pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    api: &dyn UserApi,
) -> Result<()> {
    terminal.draw(|f| ui::render(f, app))?;
    app.page = PageState::load(api);

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        let now = Instant::now();
        let timeout = app
            .timers
            .next_deadline()
            .map(|due| due.saturating_duration_since(now))
            .unwrap_or(POLL_INTERVAL)
            .min(POLL_INTERVAL);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key, Instant::now());
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse, Instant::now()),
                _ => {}
            }
        }

        app.tick(Instant::now());

        for effect in app.take_effects() {
            match effect {
                Effect::OpenLink(url) => match sys::open_link(&url) {
                    Ok(()) => app.status = Some(format!("opened {url}")),
                    Err(e) => {
                        warn!(%url, error = %e, "could not open link");
                        app.status = Some(format!("could not open {url}: {e}"));
                    }
                },
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

impl AppState {
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        let modal_user = self
            .page
            .view()
            .and_then(|v| v.modal.as_ref())
            .map(|m| m.user().clone());
        if let Some(user) = modal_user {
            match key.code {
                KeyCode::Esc => self.close_modal(now),
                KeyCode::Char('m') => self.push_effect(Effect::OpenLink(user.map_url())),
                KeyCode::Char('w') => self.push_effect(Effect::OpenLink(user.website_url())),
                KeyCode::Char('e') => self.push_effect(Effect::OpenLink(user.mailto_url())),
                _ => {}
            }
            return;
        }

        let Some(action) = self.keymap.resolve(&key) else {
            return;
        };
        if action == KeyAction::Quit {
            self.should_quit = true;
            return;
        }

        let scroll_locked = self.listeners.scroll_locked();
        let Some(view) = self.page.view_mut() else {
            return;
        };
        let len = view.list.len();
        let selected = view.table.selected;
        match action {
            KeyAction::MoveUp if !scroll_locked => view.table.move_up(),
            KeyAction::MoveDown if !scroll_locked => view.table.move_down(len),
            KeyAction::PageUp if !scroll_locked => view.table.page_up(),
            KeyAction::PageDown if !scroll_locked => view.table.page_down(len),
            KeyAction::First if !scroll_locked => view.table.first(),
            KeyAction::Last if !scroll_locked => view.table.last(len),
            KeyAction::OpenDetails => self.open_details(selected, now),
            KeyAction::DeleteUser => self.trigger_delete(selected, now),
            KeyAction::OpenWebsite => self.open_website(selected),
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        let viewport = self.viewport;
        let scroll_locked = self.listeners.scroll_locked();
        let Some(view) = self.page.view_mut() else {
            return;
        };

        match mouse.kind {
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                if scroll_locked {
                    return;
                }
                let delta = if mouse.kind == MouseEventKind::ScrollUp { -1 } else { 1 };
                let len = view.list.len();
                view.table.scroll_by(delta, len);
            }
            MouseEventKind::Down(_) => {
                if let Some(modal) = view.modal.as_mut() {
                    let target = ui::layout::modal_target(viewport, mouse.column, mouse.row);
                    modal.pointer_down(target, now, &mut self.timers);
                    return;
                }
                let body = ui::layout::page_areas(viewport).body;
                let hit = ui::layout::table_hit(
                    body,
                    view.table.offset,
                    view.list.len(),
                    mouse.column,
                    mouse.row,
                );
                match hit {
                    Some((index, TableColumn::Website)) => self.open_website(index),
                    Some((index, TableColumn::Action)) => self.trigger_delete(index, now),
                    Some((index, _)) => self.open_details(index, now),
                    None => {}
                }
            }
            _ => {}
        }
    }

    /// Show the detail modal for the row at `index`.
    pub fn open_details(&mut self, index: usize, now: Instant) {
        let generation = self.bump_generation();
        let Some(view) = self.page.view_mut() else {
            return;
        };
        if view.modal.is_some() {
            return;
        }
        let Some(user) = view.list.get(index).cloned() else {
            return;
        };
        view.table.select(index, view.list.len());
        view.modal = Some(DetailModal::open(user, generation, now, &self.listeners, &mut self.timers));
    }

    /// Begin the delayed removal of the row at `index`.
    pub fn trigger_delete(&mut self, index: usize, now: Instant) {
        let Some(view) = self.page.view_mut() else {
            return;
        };
        let Some(id) = view.list.get(index).map(|u| u.id) else {
            return;
        };
        view.table.begin_delete(id, now, &mut self.timers);
    }

    /// Emit the outbound website link for `index` without touching the modal.
    pub fn open_website(&mut self, index: usize) {
        let url = self
            .page
            .view()
            .and_then(|v| v.list.get(index))
            .map(|u| u.website_url());
        if let Some(url) = url {
            self.push_effect(Effect::OpenLink(url));
        }
    }

    pub fn close_modal(&mut self, now: Instant) {
        if let Some(modal) = self.page.view_mut().and_then(|v| v.modal.as_mut()) {
            modal.request_close(now, &mut self.timers);
        }
    }

    /// Fire every timer due at `now`. Returns the events that changed state,
    /// so a `ModalClosed` in the result is the single close notification.
    pub fn tick(&mut self, now: Instant) -> Vec<TimerEvent> {
        let mut applied = Vec::new();
        for event in self.timers.take_due(now) {
            let Some(view) = self.page.view_mut() else {
                continue;
            };
            let changed = match event {
                TimerEvent::ModalEntered { generation } => {
                    view.modal.as_mut().is_some_and(|m| m.entered(generation))
                }
                TimerEvent::ModalClosed { generation } => {
                    if view.modal.as_ref().is_some_and(|m| m.close_due(generation)) {
                        view.modal = None;
                        debug!(generation, "modal closed");
                        true
                    } else {
                        false
                    }
                }
                TimerEvent::DeleteCommit { id } => {
                    view.table.commit_delete(id, &mut view.list);
                    self.status = Some(format!("removed user #{id}"));
                    true
                }
            };
            if changed {
                applied.push(event);
            }
        }
        applied
    }
}
