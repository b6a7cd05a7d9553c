use crate::action::{DispatchResult, SlotAction, ViewAction};
use crate::editor::{label_page_slot, Editor};
use crate::labels::{label_index_to_numeric, step_label_numeric, LabelSlot};
use crate::view::{HeaderSlot, SlotId};

use super::view::dispatch_view;

pub(super) fn dispatch_slot(action: &SlotAction, editor: &mut Editor) -> DispatchResult {
    match action {
        SlotAction::Set(slot, value) => set_slot(editor, *slot, *value),
        SlotAction::Adjust(slot, delta) => {
            let current = editor.registry().holder(*slot).value;
            set_slot(editor, *slot, current.saturating_add(*delta))
        }
        SlotAction::Toggle(slot) => {
            if !is_toggle(editor, *slot) {
                log::debug!("{:?} is not a toggle", slot);
                return DispatchResult::none();
            }
            let current = editor.registry().holder(*slot).value;
            set_slot(editor, *slot, (current == 0) as i32)
        }
        SlotAction::SelectLabel(label, index) => {
            let numeric = label_index_to_numeric(*index, label.len());
            write_label(editor, *label, numeric)
        }
        SlotAction::AdjustLabel(label, delta) => {
            let page = SlotId::Page(label_page_slot(*label));
            let current = editor.registry().holder(page).value;
            let numeric = step_label_numeric(current, label.len(), *delta);
            write_label(editor, *label, numeric)
        }
    }
}

/// Header switches and track buttons, plus any slot bound to an on/off
/// parameter.
fn is_toggle(editor: &Editor, slot: SlotId) -> bool {
    match slot {
        SlotId::Header(
            HeaderSlot::PanSwap
            | HeaderSlot::DelaySwap
            | HeaderSlot::ReverbSwap
            | HeaderSlot::DelaySync,
        )
        | SlotId::MixDelaySync
        | SlotId::TrackButton(_) => true,
        _ => editor
            .registry()
            .bound_param(slot)
            .and_then(|id| editor.store().spec(id))
            .is_some_and(|spec| spec.is_bool()),
    }
}

/// Toggle slots that drive view state go through the view transitions so
/// the overlay rules apply; everything else is a plain write-through.
fn set_slot(editor: &mut Editor, slot: SlotId, value: i32) -> DispatchResult {
    let on = value != 0;
    match slot {
        SlotId::Header(HeaderSlot::PanSwap) => dispatch_view(&ViewAction::SetPanSwap(on), editor),
        SlotId::Header(HeaderSlot::DelaySwap) => {
            dispatch_view(&ViewAction::SetDelaySwap(on), editor)
        }
        SlotId::Header(HeaderSlot::ReverbSwap) => {
            dispatch_view(&ViewAction::SetReverbSwap(on), editor)
        }
        SlotId::Header(HeaderSlot::DelaySync) | SlotId::MixDelaySync => {
            dispatch_view(&ViewAction::SetSyncSwap(on), editor)
        }
        SlotId::TrackButton(track) => dispatch_view(&ViewAction::TrackButton(track.get()), editor),
        _ => {
            if !editor.registry().holder(slot).visible {
                log::debug!("ignoring edit on hidden slot {:?}", slot);
                return DispatchResult::none();
            }
            editor.registry_mut().edit(slot, value);
            DispatchResult::render()
        }
    }
}

/// A label pick is one explicit numeric write; the mirror itself is then
/// recomputed from the stored value.
fn write_label(editor: &mut Editor, label: LabelSlot, numeric: i32) -> DispatchResult {
    if !editor.labels().get(label).visible {
        return DispatchResult::none();
    }
    editor
        .registry_mut()
        .edit(SlotId::Page(label_page_slot(label)), numeric);
    editor.refresh_labels();
    DispatchResult::render()
}
