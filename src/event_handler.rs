use std::io;
use std::time::Duration;

use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};

use toastify::Severity;

use crate::app::App;

/// Handles at most one terminal event, then forwards toast transitions to
/// the event log. Returns `false` once the user asked to quit.
pub async fn handle_events(app: &mut App, poll_timeout: Duration) -> io::Result<bool> {
    if event::poll(poll_timeout)? {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if !handle_key(app, key.code) {
                    return Ok(false);
                }
            }
            Event::Mouse(mouse) => app.on_mouse(mouse),
            _ => {}
        }
    }

    app.drain_events();
    Ok(true)
}

fn handle_key(app: &mut App, code: KeyCode) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => return false,
        KeyCode::Char('i') => app.notify(Severity::Info),
        KeyCode::Char('s') => app.notify(Severity::Success),
        KeyCode::Char('w') => app.notify(Severity::Warn),
        KeyCode::Char('e') => app.notify(Severity::Error),
        KeyCode::Char(' ') => app.toggle_pause(),
        KeyCode::Char('x') => app.hide(),
        KeyCode::Char('p') => app.cycle_position(),
        KeyCode::Char('m') => app.remount(),
        _ => {}
    }
    true
}

#[cfg(test)]
mod tests {
    use toastify::ToastConfig;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn keys_drive_the_toast() {
        let mut app = App::new(ToastConfig::default());

        assert!(handle_key(&mut app, KeyCode::Char('e')));
        assert_eq!(app.toast.view().style, Severity::Error.style());

        handle_key(&mut app, KeyCode::Char(' '));
        assert!(app.toast.is_paused());
        handle_key(&mut app, KeyCode::Char(' '));
        assert!(!app.toast.is_paused());

        handle_key(&mut app, KeyCode::Char('x'));
        assert!(!app.toast.is_visible());

        assert!(!handle_key(&mut app, KeyCode::Char('q')));
    }
}
