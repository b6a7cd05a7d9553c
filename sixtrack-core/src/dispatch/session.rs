use crate::action::{DispatchResult, SessionAction};
use crate::editor::Editor;
use crate::params::snapshot::{load_from_path, save_to_path};

pub(super) fn dispatch_session(action: &SessionAction, editor: &mut Editor) -> DispatchResult {
    match action {
        SessionAction::Save(path) => match save_to_path(editor.store(), path) {
            Ok(()) => DispatchResult::with_status(format!("Saved {}", path.display())),
            Err(e) => {
                log::error!("{}", e);
                DispatchResult::with_status(e)
            }
        },
        SessionAction::Load(path) => match load_from_path(editor.store(), path) {
            // Changed values reach the view through the notification pump.
            Ok(changed) => DispatchResult::with_status(format!(
                "Loaded {} ({} changed)",
                path.display(),
                changed
            )),
            Err(e) => {
                log::error!("{}", e);
                DispatchResult::with_status(e)
            }
        },
        SessionAction::ResetDefaults => {
            editor.store().reset_to_defaults();
            DispatchResult::with_status("Reset to defaults")
        }
    }
}
