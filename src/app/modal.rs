//! Detail modal lifecycle: Opening → Open → Closing, then dropped.
//!
//! The modal holds a [`DismissSubscription`] for as long as it exists. Dropping
//! the modal (timer close, or the whole view going away) releases it.
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::debug;

use super::timer::{TimerEvent, Timers};
use crate::api::User;

pub const MODAL_ENTER_DELAY: Duration = Duration::from_millis(10);
pub const MODAL_EXIT_DELAY: Duration = Duration::from_millis(300);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ModalPhase {
    Opening,
    Open,
    Closing,
}

/// Where a pointer-down landed relative to the modal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointerTarget {
    Content,
    CloseButton,
    Outside,
}

/// Registry of the global (Escape / pointer-down) dismissal listeners.
///
/// Background scrolling is suppressed while any subscription is alive.
#[derive(Clone, Debug, Default)]
pub struct DocumentListeners {
    active: Rc<Cell<usize>>,
}

impl DocumentListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> DismissSubscription {
        self.active.set(self.active.get() + 1);
        DismissSubscription { active: Rc::clone(&self.active) }
    }

    pub fn active(&self) -> usize {
        self.active.get()
    }

    pub fn scroll_locked(&self) -> bool {
        self.active.get() > 0
    }
}

#[derive(Debug)]
pub struct DismissSubscription {
    active: Rc<Cell<usize>>,
}

impl Drop for DismissSubscription {
    fn drop(&mut self) {
        self.active.set(self.active.get().saturating_sub(1));
    }
}

#[derive(Debug)]
pub struct DetailModal {
    user: User,
    phase: ModalPhase,
    generation: u64,
    _subscription: DismissSubscription,
}

impl DetailModal {
    /// Show `user`, subscribing to dismissal input and scheduling the enter transition.
    pub fn open(
        user: User,
        generation: u64,
        now: Instant,
        listeners: &DocumentListeners,
        timers: &mut Timers,
    ) -> Self {
        debug!(id = user.id, generation, "modal opening");
        timers.schedule_after(now, MODAL_ENTER_DELAY, TimerEvent::ModalEntered { generation });
        Self {
            user,
            phase: ModalPhase::Opening,
            generation,
            _subscription: listeners.subscribe(),
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_closing(&self) -> bool {
        self.phase == ModalPhase::Closing
    }

    /// Apply the enter timer. Stale generations and late arrivals after a
    /// close request are ignored.
    pub fn entered(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.phase != ModalPhase::Opening {
            return false;
        }
        self.phase = ModalPhase::Open;
        debug!(generation, "modal open");
        true
    }

    /// Start closing. Returns `false` when a close is already underway, so
    /// repeated triggers never schedule a second close.
    pub fn request_close(&mut self, now: Instant, timers: &mut Timers) -> bool {
        if self.phase == ModalPhase::Closing {
            return false;
        }
        self.phase = ModalPhase::Closing;
        timers.schedule_after(
            now,
            MODAL_EXIT_DELAY,
            TimerEvent::ModalClosed { generation: self.generation },
        );
        debug!(generation = self.generation, "modal closing");
        true
    }

    /// Whether a `ModalClosed` timer for `generation` should unmount this modal.
    pub fn close_due(&self, generation: u64) -> bool {
        self.phase == ModalPhase::Closing && self.generation == generation
    }

    /// Pointer-down handling: anything but the content body dismisses.
    pub fn pointer_down(&mut self, target: PointerTarget, now: Instant, timers: &mut Timers) -> bool {
        match target {
            PointerTarget::Content => false,
            PointerTarget::CloseButton | PointerTarget::Outside => self.request_close(now, timers),
        }
    }
}
