use std::collections::BTreeSet;

use crate::action::DispatchResult;
use crate::editor::{Editor, Watched};
use crate::params::ParamId;

/// Apply a coalesced batch of store changes to the editor.
pub(crate) fn dispatch_param_changes(changed: &BTreeSet<ParamId>, editor: &mut Editor) -> DispatchResult {
    let mut result = DispatchResult::none();
    let mut view_inputs = false;
    let mut overlays = false;
    let mut labels = false;

    for &param in changed {
        if editor.registry_mut().refresh_param(param) > 0 {
            result.needs_render = true;
        }
        match editor.watched(param) {
            Some(Watched::DelayOverlay | Watched::ReverbOverlay) => {
                view_inputs = true;
                overlays = true;
            }
            Some(Watched::PanOverlay | Watched::Sync) => view_inputs = true,
            Some(Watched::Machine(track)) => {
                if track == editor.view().active_track {
                    view_inputs = true;
                }
            }
            // Track button outlines show mute state in either mode.
            Some(Watched::Mute(_)) => result.needs_render = true,
            Some(Watched::Label(_, track)) => {
                if track == editor.view().active_track {
                    labels = true;
                }
            }
            None => {}
        }
    }

    if view_inputs {
        let before = *editor.view();
        if editor.sync_view_from_store(overlays) {
            result.push_status("Delay and reverb overlays both set; delay kept");
        }
        if before != *editor.view() {
            editor.apply_view();
            result.needs_render = true;
        }
    }
    if labels && editor.refresh_labels() {
        result.needs_render = true;
    }
    result
}
