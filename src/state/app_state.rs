//! Application state definitions

use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// List of available forms
    #[default]
    Picker,
    /// The selected form
    Form,
}

/// Navigation and cursor state shared by the views
#[derive(Debug, Default)]
pub struct AppState {
    pub current_view: View,

    /// Highlighted row in the picker
    pub selected_index: usize,

    /// Field with keyboard focus, relative to the current step
    pub active_form_field: usize,
    /// Highlighted option inside a select or checkbox group
    pub option_cursor: usize,

    /// Errors waiting to be acknowledged, oldest first
    error_queue: VecDeque<String>,
}

impl AppState {
    /// Move selection down
    pub fn move_selection_down(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Move to next form field, wrapping around
    pub fn next_form_field(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.active_form_field = (self.active_form_field + 1) % count;
        self.option_cursor = 0;
    }

    /// Move to previous form field, wrapping around
    pub fn prev_form_field(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        if self.active_form_field == 0 {
            self.active_form_field = count - 1;
        } else {
            self.active_form_field -= 1;
        }
        self.option_cursor = 0;
    }

    /// Put focus back on the first field of a step
    pub fn focus_field(&mut self, index: usize) {
        self.active_form_field = index;
        self.option_cursor = 0;
    }

    pub fn push_error(&mut self, message: String) {
        tracing::warn!("{message}");
        self.error_queue.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod selection {
        use super::*;

        #[test]
        fn test_move_down_stops_at_last() {
            let mut state = AppState::default();
            state.move_selection_down(2);
            state.move_selection_down(2);
            assert_eq!(state.selected_index, 1);
        }

        #[test]
        fn test_move_down_with_empty_list() {
            let mut state = AppState::default();
            state.move_selection_down(0);
            assert_eq!(state.selected_index, 0);
        }

        #[test]
        fn test_move_up_stops_at_first() {
            let mut state = AppState::default();
            state.move_selection_up();
            assert_eq!(state.selected_index, 0);
        }
    }

    mod form_fields {
        use super::*;

        #[test]
        fn test_next_wraps() {
            let mut state = AppState::default();
            state.next_form_field(3);
            state.next_form_field(3);
            state.next_form_field(3);
            assert_eq!(state.active_form_field, 0);
        }

        #[test]
        fn test_prev_wraps() {
            let mut state = AppState::default();
            state.prev_form_field(3);
            assert_eq!(state.active_form_field, 2);
        }

        #[test]
        fn test_moving_resets_option_cursor() {
            let mut state = AppState {
                option_cursor: 4,
                ..Default::default()
            };
            state.next_form_field(2);
            assert_eq!(state.option_cursor, 0);
        }

        #[test]
        fn test_zero_fields_is_a_no_op() {
            let mut state = AppState::default();
            state.next_form_field(0);
            state.prev_form_field(0);
            assert_eq!(state.active_form_field, 0);
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn test_errors_are_shown_oldest_first() {
            let mut state = AppState::default();
            assert!(!state.has_errors());

            state.push_error("first".to_string());
            state.push_error("second".to_string());
            assert_eq!(state.current_error(), Some("first"));

            state.dismiss_error();
            assert_eq!(state.current_error(), Some("second"));
            state.dismiss_error();
            assert!(!state.has_errors());
        }
    }
}
