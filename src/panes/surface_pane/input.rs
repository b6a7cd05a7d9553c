use sixtrack_core::{Action, Editor, SlotAction, ViewAction};

use super::SurfacePane;

const BIG_STEP: i32 = 10;

impl SurfacePane {
    pub fn handle_action(&mut self, action: &str, editor: &Editor) -> Action {
        let view = *editor.view();
        match action {
            "next" => {
                self.move_focus(1, editor);
                Action::None
            }
            "prev" => {
                self.move_focus(-1, editor);
                Action::None
            }
            "first" => {
                self.focus = editor.visible_slots().first().copied();
                Action::None
            }
            "last" => {
                self.focus = editor.visible_slots().last().copied();
                Action::None
            }
            "inc" => self.adjust(1, editor),
            "dec" => self.adjust(-1, editor),
            "inc_big" => self.adjust(BIG_STEP, editor),
            "dec_big" => self.adjust(-BIG_STEP, editor),
            "toggle" => match self.focused(editor) {
                Some(slot) => Action::Slot(SlotAction::Toggle(slot)),
                None => Action::None,
            },
            "label_next" => self.step_label(1, editor),
            "label_prev" => self.step_label(-1, editor),
            "mixer" => Action::View(ViewAction::ToggleMixer),
            "exit_mixer" => Action::View(ViewAction::ExitMixer),
            "pan_swap" => Action::View(ViewAction::SetPanSwap(!view.pan_swap)),
            "delay_swap" => Action::View(ViewAction::SetDelaySwap(!view.delay_swap)),
            "reverb_swap" => Action::View(ViewAction::SetReverbSwap(!view.reverb_swap)),
            "sync" => Action::View(ViewAction::SetSyncSwap(!view.sync_swap)),
            "lfo" => Action::View(ViewAction::SetLfoDetail(!view.lfo_detail)),
            _ => match action.strip_prefix("track_").and_then(|n| n.parse::<usize>().ok()) {
                // Same semantics as pressing the footer button.
                Some(n) if n >= 1 => Action::View(ViewAction::TrackButton(n - 1)),
                _ => Action::None,
            },
        }
    }

    /// Dials showing a label selector step through labels, not raw values.
    fn adjust(&self, delta: i32, editor: &Editor) -> Action {
        let Some(slot) = self.focused(editor) else {
            return Action::None;
        };
        match editor.slot_view(slot).mirror {
            Some((label, _)) => Action::Slot(SlotAction::AdjustLabel(label, delta)),
            None => Action::Slot(SlotAction::Adjust(slot, delta)),
        }
    }

    fn step_label(&self, delta: i32, editor: &Editor) -> Action {
        self.focused(editor)
            .and_then(|slot| editor.slot_view(slot).mirror)
            .map(|(label, _)| Action::Slot(SlotAction::AdjustLabel(label, delta)))
            .unwrap_or(Action::None)
    }
}
