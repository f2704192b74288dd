//! Main event loop
//!
//! Polls the terminal, feeds the engine and redraws when something changed. The poll
//! timeout never outlasts the nearest feedback deadline.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event;

use super::{App, AppEvent};
use crate::tui::Tui;

/// Longest single wait for terminal input
const MAX_POLL: Duration = Duration::from_millis(250);

/// Run until the engine asks to quit
pub fn run(app: &mut App, tui: &mut Tui) -> Result<()> {
    let mut needs_render = true;

    while !app.is_quitting() {
        if needs_render {
            tui.draw(|frame| app.render(frame))?;
            needs_render = false;
        }

        let timeout = app
            .next_timer_deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .map_or(MAX_POLL, |wait| wait.min(MAX_POLL));

        if event::poll(timeout)? {
            if let Some(event) = AppEvent::from_terminal(event::read()?) {
                app.handle_event(event);
                needs_render = true;
            }
        }

        if app.fire_due_timers(Instant::now()) {
            needs_render = true;
        }
    }

    Ok(())
}
