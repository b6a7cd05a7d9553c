mod input;
mod rendering;

use sixtrack_core::view::SlotId;
use sixtrack_core::Editor;

use crate::ui::Keymap;

/// The whole control surface: header, track or mixer page, footer.
pub struct SurfacePane {
    keymap: Keymap,
    focus: Option<SlotId>,
    status: Option<String>,
}

impl SurfacePane {
    pub fn new(keymap: Keymap) -> Self {
        Self {
            keymap,
            focus: None,
            status: None,
        }
    }

    pub fn id(&self) -> &'static str {
        "surface"
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Focused slot, falling back to the first visible one when the stored
    /// focus went hidden after a view change.
    pub fn focused(&self, editor: &Editor) -> Option<SlotId> {
        let visible = editor.visible_slots();
        match self.focus {
            Some(slot) if visible.contains(&slot) => Some(slot),
            _ => visible.first().copied(),
        }
    }

    fn move_focus(&mut self, delta: isize, editor: &Editor) {
        let visible = editor.visible_slots();
        if visible.is_empty() {
            self.focus = None;
            return;
        }
        let current = self
            .focused(editor)
            .and_then(|slot| visible.iter().position(|s| *s == slot))
            .unwrap_or(0) as isize;
        let len = visible.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.focus = Some(visible[next]);
    }
}
