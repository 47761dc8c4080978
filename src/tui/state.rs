// File: ./src/tui/state.rs
// Manages the application state for the TUI.
use crate::config::Config;
use crate::heatmap::{self, PROVINCE_POSITIONS};
use crate::model::{CategoryFilter, Event, Group};
use crate::pipeline;
use crate::store::{EventStore, FilterState};
use ratatui::widgets::ListState;
use std::collections::HashMap;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Focus {
    Main,
    Heatmap,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum InputMode {
    Normal,
    Searching,
}

pub struct AppState<'a> {
    // Data
    pub store: &'a EventStore,
    pub groups: Vec<Group<'a>>,
    /// Tally over the whole catalog; computed once, never filtered.
    pub province_counts: HashMap<String, usize>,

    // UI State
    /// Selection over the flattened events of `groups`.
    pub list_state: ListState,
    /// Selection over rendered rows (date headings included), kept by the view.
    pub row_state: ListState,
    pub active_focus: Focus,
    pub mode: InputMode,
    pub show_heatmap: bool,
    pub message: String,

    // Filter State
    pub filter: FilterState,
    /// Index into `PROVINCE_POSITIONS` while the heatmap has focus.
    pub heat_cursor: usize,
    /// Highlighted province. Display only: the event list ignores it.
    pub selected_province: Option<&'static str>,

    // Input Buffers
    pub input_buffer: String,
    pub cursor_position: usize,
}

impl<'a> AppState<'a> {
    pub fn new(store: &'a EventStore, config: &Config) -> Self {
        let mut state = Self {
            store,
            groups: Vec::new(),
            province_counts: heatmap::tally(store.events()),
            list_state: ListState::default(),
            row_state: ListState::default(),
            active_focus: Focus::Main,
            mode: InputMode::Normal,
            show_heatmap: config.show_heatmap,
            message: String::new(),
            filter: FilterState::new("", config.default_category),
            heat_cursor: 0,
            selected_province: None,
            input_buffer: String::new(),
            cursor_position: 0,
        };
        state.refresh_filtered_view();
        state
    }

    /// Recomputes the groups from the current filter inputs. While the search
    /// box is open the uncommitted buffer is used, so results follow each keystroke.
    pub fn refresh_filtered_view(&mut self) {
        let search_term = if self.mode == InputMode::Searching {
            &self.input_buffer
        } else {
            &self.filter.search_term
        };

        let store = self.store;
        self.groups = pipeline::compute_groups(store.events(), search_term, self.filter.category);

        let len = self.visible_len();
        self.message = if len == 0 {
            "未找到匹配的赛事信息".to_string()
        } else {
            format!("{} 场赛事 · {} 个日期", len, self.groups.len())
        };
        log::debug!(
            "Filter '{}' / {} -> {} events",
            search_term,
            self.filter.category,
            len
        );

        if len == 0 {
            self.list_state.select(None);
        } else {
            let current = self.list_state.selected().unwrap_or(0);
            if current >= len {
                self.list_state.select(Some(len - 1)); // Clamp
            } else {
                self.list_state.select(Some(current));
            }
        }
    }

    pub fn visible_len(&self) -> usize {
        self.groups.iter().map(|g| g.len()).sum()
    }

    pub fn get_selected_event(&self) -> Option<&'a Event> {
        let idx = self.list_state.selected()?;
        self.groups
            .iter()
            .flat_map(|g| g.events.iter().copied())
            .nth(idx)
    }

    // --- FILTER HELPERS ---
    pub fn set_category(&mut self, category: CategoryFilter) {
        self.filter.category = category;
        self.refresh_filtered_view();
    }

    pub fn cycle_category(&mut self, forward: bool) {
        let next = if forward {
            self.filter.category.next()
        } else {
            self.filter.category.previous()
        };
        self.set_category(next);
    }

    pub fn reset_filters(&mut self) {
        self.filter.reset();
        self.reset_input();
        self.mode = InputMode::Normal;
        self.list_state.select(Some(0));
        self.refresh_filtered_view();
    }

    pub fn start_search(&mut self) {
        self.mode = InputMode::Searching;
        self.input_buffer = self.filter.search_term.clone();
        self.cursor_position = self.input_buffer.chars().count();
    }

    pub fn commit_search(&mut self) {
        self.filter.search_term = self.input_buffer.clone();
        self.mode = InputMode::Normal;
        self.reset_input();
        self.refresh_filtered_view();
    }

    pub fn cancel_search(&mut self) {
        self.filter.search_term.clear();
        self.mode = InputMode::Normal;
        self.reset_input();
        self.refresh_filtered_view();
    }

    // --- HEATMAP HELPERS ---
    pub fn next_province(&mut self) {
        self.heat_cursor = (self.heat_cursor + 1) % PROVINCE_POSITIONS.len();
    }

    pub fn previous_province(&mut self) {
        self.heat_cursor = if self.heat_cursor == 0 {
            PROVINCE_POSITIONS.len() - 1
        } else {
            self.heat_cursor - 1
        };
    }

    pub fn cursor_province(&self) -> &'static str {
        PROVINCE_POSITIONS[self.heat_cursor].0
    }

    /// Selecting the highlighted province again clears the selection.
    pub fn toggle_province(&mut self) {
        let name = self.cursor_province();
        self.selected_province = if self.selected_province == Some(name) {
            None
        } else {
            Some(name)
        };
    }

    pub fn province_count(&self, province: &str) -> usize {
        self.province_counts.get(province).copied().unwrap_or(0)
    }

    /// Footer text while the heatmap has focus. Always describes the province
    /// under the cursor; a selection elsewhere is reported after it.
    pub fn heatmap_status(&self) -> String {
        let cursor = self.cursor_province();
        let mut s = format!("{}: {} 场赛事", cursor, self.province_count(cursor));
        match self.selected_province {
            Some(sel) if sel == cursor => s.push_str(" [已选]"),
            Some(sel) => s.push_str(&format!(
                "  已选 {}: {} 场赛事",
                sel,
                self.province_count(sel)
            )),
            None => {}
        }
        s
    }

    // --- INPUT HELPERS ---
    pub fn move_cursor_left(&mut self) {
        let cursor_moved_left = self.cursor_position.saturating_sub(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_left);
    }
    pub fn move_cursor_right(&mut self) {
        let cursor_moved_right = self.cursor_position.saturating_add(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_right);
    }
    pub fn enter_char(&mut self, new_char: char) {
        // Safe insertion for UTF-8 strings
        let byte_index = self
            .input_buffer
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.cursor_position)
            .unwrap_or(self.input_buffer.len());

        self.input_buffer.insert(byte_index, new_char);
        self.move_cursor_right();
    }
    pub fn delete_char(&mut self) {
        if self.cursor_position != 0 {
            let current_index = self.cursor_position;
            let before = self.input_buffer.chars().take(current_index - 1);
            let after = self.input_buffer.chars().skip(current_index);
            self.input_buffer = before.chain(after).collect();
            self.move_cursor_left();
        }
    }
    pub fn reset_input(&mut self) {
        self.input_buffer.clear();
        self.cursor_position = 0;
    }
    fn clamp_cursor(&self, new_cursor_pos: usize) -> usize {
        new_cursor_pos.clamp(0, self.input_buffer.chars().count())
    }

    // --- NAVIGATION ---
    pub fn next(&mut self) {
        match self.active_focus {
            Focus::Main => {
                let len = self.visible_len();
                if len == 0 {
                    return;
                }
                let i = match self.list_state.selected() {
                    Some(i) if i + 1 < len => i + 1,
                    _ => 0,
                };
                self.list_state.select(Some(i));
            }
            Focus::Heatmap => self.next_province(),
        }
    }
    pub fn previous(&mut self) {
        match self.active_focus {
            Focus::Main => {
                let len = self.visible_len();
                if len == 0 {
                    return;
                }
                let i = match self.list_state.selected() {
                    Some(0) | None => len - 1,
                    Some(i) => i - 1,
                };
                self.list_state.select(Some(i));
            }
            Focus::Heatmap => self.previous_province(),
        }
    }
    pub fn jump_forward(&mut self, step: usize) {
        let len = self.visible_len();
        if len > 0 {
            let current = self.list_state.selected().unwrap_or(0);
            self.list_state.select(Some((current + step).min(len - 1)));
        }
    }
    pub fn jump_backward(&mut self, step: usize) {
        if self.visible_len() > 0 {
            let current = self.list_state.selected().unwrap_or(0);
            self.list_state.select(Some(current.saturating_sub(step)));
        }
    }
    pub fn toggle_focus(&mut self) {
        self.active_focus = match self.active_focus {
            Focus::Main if self.show_heatmap => Focus::Heatmap,
            _ => Focus::Main,
        }
    }
    pub fn toggle_heatmap(&mut self) {
        self.show_heatmap = !self.show_heatmap;
        if !self.show_heatmap {
            self.active_focus = Focus::Main;
        }
    }
}
