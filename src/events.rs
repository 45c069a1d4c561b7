use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind,
};

use crate::app::{App, View};

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // If the readings overlay is shown, handle overlay-specific keys
    if app.show_data_overlay {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('q') => {
                app.close_overlay();
            }
            KeyCode::Up | KeyCode::Char('k') => app.scroll_up(1),
            KeyCode::Down | KeyCode::Char('j') => app.scroll_down(1),
            KeyCode::PageUp => app.scroll_up(10),
            KeyCode::PageDown => app.scroll_down(10),
            KeyCode::Home => app.data_scroll = 0,
            KeyCode::End => app.scroll_down(usize::MAX - 1),
            _ => {}
        }
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),

        // View switching
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),

        // Direct view access
        KeyCode::Char('1') => app.set_view(View::Gas),
        KeyCode::Char('2') => app.set_view(View::Temperature),
        KeyCode::Char('3') => app.set_view(View::Humidity),
        KeyCode::Char('4') => app.set_view(View::Averages),

        // Navigation (left/right for tabs)
        KeyCode::Left | KeyCode::Char('h') => app.prev_view(),
        KeyCode::Right | KeyCode::Char('l') => app.next_view(),

        // Open the cleaned-readings overlay
        KeyCode::Enter => app.enter_data(),

        // Go back (Esc and Backspace)
        KeyCode::Esc | KeyCode::Backspace => app.go_back(),

        // Reload
        KeyCode::Char('r') => {
            let _ = app.reload_data();
        }

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        // Export
        KeyCode::Char('e') => {
            let export_path = std::path::PathBuf::from("aqwatch_export.json");
            match app.export_state(&export_path) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        // Scroll wheel scrolls the readings overlay when open
        MouseEventKind::ScrollUp => {
            if app.show_data_overlay {
                app.scroll_up(1);
            }
        }
        MouseEventKind::ScrollDown => {
            if app.show_data_overlay {
                app.scroll_down(1);
            }
        }

        MouseEventKind::Down(_) => {
            // Check for tab clicks (row 1, after header)
            if mouse.row == 1 && !app.show_data_overlay {
                let col = mouse.column;
                // Approximate tab positions:
                // Gas (0-7), Temperature (8-23), Humidity (24-36), Averages (37-49)
                if col < 8 {
                    app.set_view(View::Gas);
                } else if col < 24 {
                    app.set_view(View::Temperature);
                } else if col < 37 {
                    app.set_view(View::Humidity);
                } else if col < 50 {
                    app.set_view(View::Averages);
                }
            }
        }

        _ => {}
    }
}
