// File: ./src/tui/handlers.rs
// Key handling for the TUI. Every handler that touches the filter state
// refreshes the view before returning.
use crate::model::{Category, CategoryFilter};
use crate::tui::state::{AppState, Focus, InputMode};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Applies one key press. Returns `true` when the user asked to quit.
pub fn handle_key_event(key: KeyEvent, state: &mut AppState<'_>) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    match state.mode {
        InputMode::Searching => match key.code {
            KeyCode::Enter => state.commit_search(),
            KeyCode::Esc => state.cancel_search(),
            KeyCode::Char(c) => {
                state.enter_char(c);
                state.refresh_filtered_view();
            }
            KeyCode::Backspace => {
                state.delete_char();
                state.refresh_filtered_view();
            }
            KeyCode::Left => state.move_cursor_left(),
            KeyCode::Right => state.move_cursor_right(),
            KeyCode::Down => state.next(),
            KeyCode::Up => state.previous(),
            KeyCode::PageDown => state.jump_forward(10),
            KeyCode::PageUp => state.jump_backward(10),
            _ => {}
        },
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Esc => {
                if state.active_focus == Focus::Heatmap {
                    state.active_focus = Focus::Main;
                } else if !state.filter.search_term.is_empty() {
                    state.cancel_search();
                }
            }
            KeyCode::Char('/') => state.start_search(),
            KeyCode::Char('c') => state.cycle_category(true),
            KeyCode::Char('C') => state.cycle_category(false),
            KeyCode::Char('0') => state.set_category(CategoryFilter::All),
            KeyCode::Char('1') => state.set_category(Category::A.into()),
            KeyCode::Char('2') => state.set_category(Category::B.into()),
            KeyCode::Char('3') => state.set_category(Category::C.into()),
            KeyCode::Char('r') => state.reset_filters(),
            KeyCode::Char('m') => state.toggle_heatmap(),
            KeyCode::Tab => state.toggle_focus(),
            KeyCode::Char('j') | KeyCode::Down => state.next(),
            KeyCode::Char('k') | KeyCode::Up => state.previous(),
            KeyCode::Char('l') | KeyCode::Right if state.active_focus == Focus::Heatmap => {
                state.next_province()
            }
            KeyCode::Char('h') | KeyCode::Left if state.active_focus == Focus::Heatmap => {
                state.previous_province()
            }
            KeyCode::Enter | KeyCode::Char(' ') if state.active_focus == Focus::Heatmap => {
                state.toggle_province()
            }
            KeyCode::PageDown => state.jump_forward(10),
            KeyCode::PageUp => state.jump_backward(10),
            _ => {}
        },
    }
    false
}
