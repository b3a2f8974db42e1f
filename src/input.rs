use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Check for escape key (Esc or Ctrl+[)
pub fn is_escape(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('[') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Actions bound to keys outside of text entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveDown,
    MoveUp,
    MoveLeft,
    MoveRight,
    MoveToTop,
    MoveToBottom,
    PageDown,
    PageUp,
    SortColumn,
    NextFilter,
    PrevFilter,
    FocusSearch,
    StartCommand,
    ShowDetails,
    CopyRow,
    Export,
    AddRecord,
    DismissNotification,
    Help,
    CloseModals,
    Quit,
}

/// Map a key to its action. Global shortcuts (Ctrl+K, Ctrl+N, Escape) are
/// recognized here as well as in text entry modes.
pub fn action_for(key: KeyEvent) -> Option<Action> {
    if let Some(action) = global_action(key) {
        return Some(action);
    }
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return match key.code {
            KeyCode::Char('d') => Some(Action::PageDown),
            KeyCode::Char('u') => Some(Action::PageUp),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveDown),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveUp),
        KeyCode::Char('h') | KeyCode::Left => Some(Action::MoveLeft),
        KeyCode::Char('l') | KeyCode::Right => Some(Action::MoveRight),
        KeyCode::Char('g') | KeyCode::Home => Some(Action::MoveToTop),
        KeyCode::Char('G') | KeyCode::End => Some(Action::MoveToBottom),
        KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::Char('s') => Some(Action::SortColumn),
        KeyCode::Char('f') => Some(Action::NextFilter),
        KeyCode::Char('F') => Some(Action::PrevFilter),
        KeyCode::Char('/') => Some(Action::FocusSearch),
        KeyCode::Char(':') => Some(Action::StartCommand),
        KeyCode::Enter => Some(Action::ShowDetails),
        KeyCode::Char('y') => Some(Action::CopyRow),
        KeyCode::Char('e') => Some(Action::Export),
        KeyCode::Char('a') => Some(Action::AddRecord),
        KeyCode::Char('x') => Some(Action::DismissNotification),
        KeyCode::Char('?') => Some(Action::Help),
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}

/// Shortcuts that apply in every mode
pub fn global_action(key: KeyEvent) -> Option<Action> {
    if is_escape(key) {
        return Some(Action::CloseModals);
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) || key.modifiers.contains(KeyModifiers::SUPER) {
        return match key.code {
            KeyCode::Char('k') => Some(Action::FocusSearch),
            KeyCode::Char('n') => Some(Action::AddRecord),
            _ => None,
        };
    }
    None
}

/// Result of handling a key in a single-line text input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyResult {
    /// Key consumed, text unchanged
    Continue,
    /// Text changed
    Changed,
    /// Enter pressed
    Submit,
    /// Escape pressed
    Cancel,
}

/// Single-line text buffer for the search box and the command line
#[derive(Debug, Clone, Default)]
pub struct LineInput {
    pub buffer: String,
}

impl LineInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        Self { buffer: text.to_string() }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        if is_escape(key) {
            return KeyResult::Cancel;
        }
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return match key.code {
                KeyCode::Char('u') => {
                    self.buffer.clear();
                    KeyResult::Changed
                }
                _ => KeyResult::Continue,
            };
        }

        match key.code {
            KeyCode::Enter => KeyResult::Submit,
            KeyCode::Backspace => {
                if self.buffer.pop().is_some() {
                    KeyResult::Changed
                } else {
                    KeyResult::Continue
                }
            }
            KeyCode::Char(c) => {
                self.buffer.push(c);
                KeyResult::Changed
            }
            _ => KeyResult::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_normal_bindings() {
        assert_eq!(action_for(key(KeyCode::Char('j'))), Some(Action::MoveDown));
        assert_eq!(action_for(key(KeyCode::Char('s'))), Some(Action::SortColumn));
        assert_eq!(action_for(key(KeyCode::Char('f'))), Some(Action::NextFilter));
        assert_eq!(action_for(key(KeyCode::Enter)), Some(Action::ShowDetails));
        assert_eq!(action_for(key(KeyCode::Char('z'))), None);
    }

    #[test]
    fn test_global_shortcuts() {
        assert_eq!(action_for(ctrl('k')), Some(Action::FocusSearch));
        assert_eq!(action_for(ctrl('n')), Some(Action::AddRecord));
        assert_eq!(action_for(key(KeyCode::Esc)), Some(Action::CloseModals));
        assert_eq!(global_action(ctrl('[')), Some(Action::CloseModals));
        assert_eq!(global_action(key(KeyCode::Char('k'))), None);
    }

    #[test]
    fn test_line_input() {
        let mut input = LineInput::new();
        assert_eq!(input.handle_key(key(KeyCode::Backspace)), KeyResult::Continue);
        assert_eq!(input.handle_key(key(KeyCode::Char('c'))), KeyResult::Changed);
        assert_eq!(input.handle_key(key(KeyCode::Char('o'))), KeyResult::Changed);
        assert_eq!(input.buffer, "co");
        assert_eq!(input.handle_key(key(KeyCode::Backspace)), KeyResult::Changed);
        assert_eq!(input.buffer, "c");
        assert_eq!(input.handle_key(ctrl('u')), KeyResult::Changed);
        assert_eq!(input.buffer, "");
        assert_eq!(input.handle_key(key(KeyCode::Enter)), KeyResult::Submit);
        assert_eq!(input.handle_key(key(KeyCode::Esc)), KeyResult::Cancel);
    }
}
