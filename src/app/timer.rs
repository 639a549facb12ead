//! Deterministic timer queue for the UI's delayed transitions.
//!
//! Nothing here reads the clock: callers pass `now` in, so the event loop uses
//! `Instant::now()` while tests step virtual time forward.
use std::time::{Duration, Instant};

/// Events the UI schedules for later.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerEvent {
    /// Opening → Open for the modal of the given generation.
    ModalEntered { generation: u64 },
    /// Closing → Closed for the modal of the given generation.
    ModalClosed { generation: u64 },
    /// Remove the pending row from the list.
    DeleteCommit { id: u32 },
}

#[derive(Debug)]
struct Scheduled {
    due: Instant,
    seq: u64,
    event: TimerEvent,
}

#[derive(Debug, Default)]
pub struct Timers {
    queue: Vec<Scheduled>,
    next_seq: u64,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule_after(&mut self, now: Instant, delay: Duration, event: TimerEvent) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Scheduled { due: now + delay, seq, event });
    }

    /// Remove and return every event due at `now`, ordered by deadline and
    /// then by scheduling order.
    pub fn take_due(&mut self, now: Instant) -> Vec<TimerEvent> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.queue.drain(..).partition(|s| s.due <= now);
        self.queue = pending;
        due.sort_by_key(|s| (s.due, s.seq));
        due.into_iter().map(|s| s.event).collect()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.queue.iter().map(|s| s.due).min()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_deadline_then_schedule_order() {
        let t0 = Instant::now();
        let mut timers = Timers::new();
        timers.schedule_after(t0, Duration::from_millis(300), TimerEvent::DeleteCommit { id: 1 });
        timers.schedule_after(t0, Duration::from_millis(10), TimerEvent::ModalEntered { generation: 1 });
        timers.schedule_after(t0, Duration::from_millis(300), TimerEvent::ModalClosed { generation: 1 });

        assert!(timers.take_due(t0).is_empty());
        assert_eq!(timers.next_deadline(), Some(t0 + Duration::from_millis(10)));
        assert_eq!(
            timers.take_due(t0 + Duration::from_millis(10)),
            vec![TimerEvent::ModalEntered { generation: 1 }]
        );
        assert_eq!(
            timers.take_due(t0 + Duration::from_secs(1)),
            vec![TimerEvent::DeleteCommit { id: 1 }, TimerEvent::ModalClosed { generation: 1 }]
        );
        assert!(timers.is_empty());
    }
}
