use crate::App;
use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Position;

pub fn handle_key(key: KeyEvent, app: &mut App) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => {
                app.should_quit = true;
                return;
            }
            KeyCode::Char('t') => {
                app.toggle_panel();
                return;
            }
            KeyCode::Char('u') if app.panel_open => {
                app.scroll_up();
                return;
            }
            KeyCode::Char('d') if app.panel_open => {
                app.scroll_down();
                return;
            }
            _ => {}
        }
    }

    if app.panel_open {
        handle_panel_key(key, app);
    } else {
        handle_closed_key(key, app);
    }
}

fn handle_closed_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('c') | KeyCode::Enter => app.toggle_panel(),
        _ => {}
    }
}

fn handle_panel_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Esc => app.toggle_panel(),
        KeyCode::Enter => {
            app.submit_message();
        }
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::PageUp => app.scroll_up(),
        KeyCode::PageDown => app.scroll_down(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.input.push(c);
        }
        _ => {}
    }
}

/// Left clicks on the bubble toggle the panel; left clicks on the send
/// glyph submit, going through the same entry point as the Enter key.
pub fn handle_mouse(mouse: MouseEvent, app: &mut App) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    let position = Position::new(mouse.column, mouse.row);
    if app.bubble_area.is_some_and(|area| area.contains(position)) {
        app.toggle_panel();
        return;
    }
    if app.panel_open && app.send_area.is_some_and(|area| area.contains(position)) {
        app.submit_message();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::Sender;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn ctrl_t_toggles_panel_in_either_state() {
        let mut app = App::new();
        handle_key(ctrl('t'), &mut app);
        assert!(app.panel_open);
        handle_key(ctrl('t'), &mut app);
        assert!(!app.panel_open);
    }

    #[test]
    fn typing_edits_input_only_while_panel_open() {
        let mut app = App::new();
        handle_key(key(KeyCode::Char('h')), &mut app);
        assert!(app.input.is_empty());

        app.toggle_panel();
        handle_key(key(KeyCode::Char('h')), &mut app);
        handle_key(key(KeyCode::Char('i')), &mut app);
        assert_eq!(app.input, "hi");
        handle_key(key(KeyCode::Backspace), &mut app);
        assert_eq!(app.input, "h");
    }

    #[tokio::test(start_paused = true)]
    async fn enter_submits_and_clears_input() {
        let mut app = App::new();
        app.toggle_panel();
        for c in "hello".chars() {
            handle_key(key(KeyCode::Char(c)), &mut app);
        }
        handle_key(key(KeyCode::Enter), &mut app);

        assert!(app.input.is_empty());
        assert_eq!(app.log.len(), 1);
        assert_eq!(app.log.last().unwrap().sender(), Sender::User);
        assert_eq!(app.log.last().unwrap().text(), "hello");
    }

    #[test]
    fn q_quits_only_while_panel_closed() {
        let mut app = App::new();
        app.toggle_panel();
        handle_key(key(KeyCode::Char('q')), &mut app);
        assert!(!app.should_quit);
        assert_eq!(app.input, "q");

        app.input.clear();
        app.toggle_panel();
        handle_key(key(KeyCode::Char('q')), &mut app);
        assert!(app.should_quit);
    }
}
