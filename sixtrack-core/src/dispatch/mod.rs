pub(crate) mod feedback;
mod session;
mod slot;
mod view;

use crate::action::{Action, DispatchResult};
use crate::editor::Editor;

/// Dispatch an action against an open editor. Returns a DispatchResult
/// describing side effects for the front-end.
pub fn dispatch_action(action: &Action, editor: &mut Editor) -> DispatchResult {
    match action {
        Action::Quit => DispatchResult::with_quit(),
        Action::View(a) => view::dispatch_view(a, editor),
        Action::Slot(a) => slot::dispatch_slot(a, editor),
        Action::Session(a) => session::dispatch_session(a, editor),
        Action::None => DispatchResult::none(),
    }
}
