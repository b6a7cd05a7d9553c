use super::{InputEvent, KeyCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPattern {
    Char(char),
    Key(KeyCode),
    Ctrl(char),
    Alt(char),
    CtrlKey(KeyCode),
    ShiftKey(KeyCode),
}

impl KeyPattern {
    pub fn matches(&self, event: &InputEvent) -> bool {
        let m = event.modifiers;
        match *self {
            // Shift is part of the character itself.
            KeyPattern::Char(c) => event.key == KeyCode::Char(c) && !m.ctrl && !m.alt,
            KeyPattern::Key(k) => event.key == k && !m.ctrl && !m.alt && !m.shift,
            KeyPattern::Ctrl(c) => event.key == KeyCode::Char(c) && m.ctrl && !m.alt,
            KeyPattern::Alt(c) => event.key == KeyCode::Char(c) && m.alt && !m.ctrl,
            KeyPattern::CtrlKey(k) => event.key == k && m.ctrl,
            KeyPattern::ShiftKey(k) => event.key == k && m.shift && !m.ctrl,
        }
    }
}

#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub pattern: KeyPattern,
    pub action: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: Vec<KeyBinding>,
}

impl Keymap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bindings(bindings: Vec<KeyBinding>) -> Self {
        Self { bindings }
    }

    /// First binding wins when patterns overlap.
    pub fn lookup(&self, event: &InputEvent) -> Option<&'static str> {
        self.bindings
            .iter()
            .find(|b| b.pattern.matches(event))
            .map(|b| b.action)
    }

    pub fn bindings(&self) -> &[KeyBinding] {
        &self.bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::Modifiers;

    fn key(key: KeyCode, modifiers: Modifiers) -> InputEvent {
        InputEvent::new(key, modifiers)
    }

    #[test]
    fn char_ignores_shift_but_not_ctrl() {
        let pattern = KeyPattern::Char('M');
        let shift = Modifiers { shift: true, ..Modifiers::default() };
        let ctrl = Modifiers { ctrl: true, ..Modifiers::default() };
        assert!(pattern.matches(&key(KeyCode::Char('M'), shift)));
        assert!(!pattern.matches(&key(KeyCode::Char('M'), ctrl)));
    }

    #[test]
    fn shifted_named_key_is_distinct() {
        let shift = Modifiers { shift: true, ..Modifiers::default() };
        assert!(!KeyPattern::Key(KeyCode::Up).matches(&key(KeyCode::Up, shift)));
        assert!(KeyPattern::ShiftKey(KeyCode::Up).matches(&key(KeyCode::Up, shift)));
    }

    #[test]
    fn lookup_returns_first_match() {
        let keymap = Keymap::from_bindings(vec![
            KeyBinding { pattern: KeyPattern::Char('q'), action: "quit", description: "Quit" },
            KeyBinding { pattern: KeyPattern::Char('q'), action: "other", description: "Other" },
        ]);
        assert_eq!(keymap.lookup(&key(KeyCode::Char('q'), Modifiers::default())), Some("quit"));
        assert_eq!(keymap.lookup(&key(KeyCode::Char('x'), Modifiers::default())), None);
    }
}
