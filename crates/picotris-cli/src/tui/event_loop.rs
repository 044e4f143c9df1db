use std::time::{Duration, Instant};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Event loop state management.
///
/// Runs two independent fixed cadences, one for drop ticks and a faster one
/// for frames, and returns the next event via `next()`. If an interval is not
/// set, that event type will not be generated.
#[derive(Debug)]
pub(super) struct EventLoop {
    drop_interval: Option<Duration>,
    frame_interval: Option<Duration>,
    last_drop: Instant,
    last_frame: Instant,
    needs_first_frame: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}

impl EventLoop {
    /// Creates an `EventLoop` with both cadences unset, starting at `now`.
    pub(super) fn new(now: Instant) -> Self {
        Self {
            drop_interval: None,
            frame_interval: None,
            last_drop: now,
            last_frame: now,
            needs_first_frame: true,
        }
    }

    pub(super) fn set_drop_interval(&mut self, interval: Option<Duration>) {
        self.drop_interval = interval;
    }

    pub(super) fn set_frame_interval(&mut self, interval: Option<Duration>) {
        self.frame_interval = interval;
    }

    /// Returns the next event.
    ///
    /// Blocks until a drop or frame deadline is reached or a terminal event
    /// occurs. If both cadences are unset, only waits for terminal events.
    pub(super) fn next(&mut self) -> anyhow::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(event) = self.due_event(now) {
                return Ok(event);
            }

            if let Some(timeout) = self.compute_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            return Ok(event::read()?.into());
        }
    }

    /// Returns the timed event whose deadline has passed at `now`, if any.
    ///
    /// Drop ticks take precedence over frames so that a frame drawn at the
    /// same instant shows the moved piece.
    fn due_event(&mut self, now: Instant) -> Option<TuiEvent> {
        if let Some(interval) = self.drop_interval
            && now.duration_since(self.last_drop) >= interval
        {
            self.last_drop = now;
            return Some(TuiEvent::DropTick);
        }

        let frame_due = self.needs_first_frame
            || self
                .frame_interval
                .is_some_and(|interval| now.duration_since(self.last_frame) >= interval);
        if frame_due {
            self.needs_first_frame = false;
            self.last_frame = now;
            return Some(TuiEvent::Frame);
        }
        None
    }

    fn compute_timeout(&self, now: Instant) -> Option<Duration> {
        let next_drop_at = self.drop_interval.map(|interval| self.last_drop + interval);
        let next_frame_at = self.frame_interval.map(|interval| self.last_frame + interval);
        let next_timeout_at = [next_drop_at, next_frame_at].into_iter().flatten().min()?;
        Some(next_timeout_at.saturating_duration_since(now))
    }
}
