use std::time::Duration;

use crate::tui::{App, event::TuiEvent, event_loop::EventLoop};

/// TUI application runtime.
///
/// Manages the event loop and executes applications that implement the `App` trait.
#[derive(Default, Debug)]
pub struct Tui {
    events: EventLoop,
}

impl Tui {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the interval between drop ticks. `None` disables them.
    pub fn set_drop_interval(&mut self, interval: Option<Duration>) {
        self.events.set_drop_interval(interval);
    }

    /// Sets the interval between frames. `None` draws only the first frame.
    pub fn set_frame_interval(&mut self, interval: Option<Duration>) {
        self.events.set_frame_interval(interval);
    }

    /// Runs the application.
    ///
    /// 1. Calls `app.init()` for initialization
    /// 2. Runs the event loop until `app.should_exit()` returns true
    ///    - `TuiEvent::DropTick`: calls `app.drop_tick()`
    ///    - `TuiEvent::Frame`: calls `app.draw()`
    ///    - `TuiEvent::Terminal`: calls `app.handle_event()`
    pub fn run<A>(mut self, app: &mut A) -> anyhow::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    TuiEvent::DropTick => {
                        app.drop_tick(&mut self);
                    }
                    TuiEvent::Frame => {
                        terminal.draw(|f| app.draw(f))?;
                    }
                    TuiEvent::Terminal(event) => {
                        app.handle_event(&mut self, event);
                    }
                }
            }
            Ok(())
        })
    }
}
