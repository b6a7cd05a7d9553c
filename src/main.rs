mod panes;
mod ui;

use std::fs::File;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;

use panes::SurfacePane;
use sixtrack_core::config::Config;
use sixtrack_core::params::snapshot::{load_from_path, save_to_path};
use sixtrack_core::{dispatch_action, Action, DispatchResult, Editor, Processor, SessionAction};
use ui::{keybindings, InputEvent, Keymap, LayerResult, LayerStack};

const POLL_INTERVAL: Duration = Duration::from_millis(16);

fn main() -> std::io::Result<()> {
    let config = Config::load();
    init_logging(&config);

    let processor = Processor::default();
    let state_path = config.state_path();
    if state_path.exists() {
        if let Err(e) = load_from_path(processor.store(), &state_path) {
            log::warn!("{}", e);
        }
    }

    let mut editor = processor.create_editor(config.start_track());
    let mut terminal = ratatui::init();
    let result = run(&mut terminal, &mut editor, &state_path);
    ratatui::restore();

    // Closing the editor tears down every listener; the store lives on.
    drop(editor);
    if config.autosave {
        if let Err(e) = save_to_path(processor.store(), &state_path) {
            log::error!("{}", e);
            eprintln!("{}", e);
        }
    }
    result
}

/// The terminal belongs to the UI, so logs go to a file.
fn init_logging(config: &Config) {
    match open_log_file(&config.log_path()) {
        Ok(file) => {
            if let Err(e) = simplelog::WriteLogger::init(config.log_level(), simplelog::Config::default(), file) {
                eprintln!("Failed to init logger: {}", e);
            }
        }
        Err(e) => eprintln!("{}", e),
    }
}

fn open_log_file(path: &Path) -> Result<File, String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create log directory {}: {}", parent.display(), e))?;
    }
    File::create(path).map_err(|e| format!("Failed to open log file {}: {}", path.display(), e))
}

/// Actions resolved from the global layer, before the pane sees the key.
fn global_action(name: &str, state_path: &Path) -> Option<Action> {
    match name {
        "quit" => Some(Action::Quit),
        "save" => Some(Action::Session(SessionAction::Save(state_path.to_path_buf()))),
        "load" => Some(Action::Session(SessionAction::Load(state_path.to_path_buf()))),
        "reset" => Some(Action::Session(SessionAction::ResetDefaults)),
        _ => None,
    }
}

fn apply_dispatch_result(result: &DispatchResult, pane: &mut SurfacePane, needs_render: &mut bool) {
    if let Some(message) = result.status.last() {
        pane.set_status(message.clone());
    }
    *needs_render |= result.needs_render;
}

fn run(terminal: &mut DefaultTerminal, editor: &mut Editor, state_path: &Path) -> std::io::Result<()> {
    let (layers, mut keymaps) = keybindings::load_keybindings();
    let mut pane = SurfacePane::new(keymaps.remove("surface").unwrap_or_else(Keymap::new));

    let mut layer_stack = LayerStack::new(layers);
    layer_stack.push("global");
    layer_stack.push(pane.id());

    let mut needs_render = true;
    loop {
        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let Some(input) = InputEvent::from_crossterm(key) else {
                        continue;
                    };
                    let action = match layer_stack.resolve(&input) {
                        LayerResult::Action(name) => {
                            pane.clear_status();
                            needs_render = true;
                            global_action(name, state_path)
                                .unwrap_or_else(|| pane.handle_action(name, editor))
                        }
                        LayerResult::Blocked | LayerResult::Unresolved => Action::None,
                    };
                    let result = dispatch_action(&action, editor);
                    if result.quit {
                        break;
                    }
                    apply_dispatch_result(&result, &mut pane, &mut needs_render);
                }
                Event::Resize(_, _) => needs_render = true,
                _ => {}
            }
        }

        // Store changes from this tick, including our own writes.
        let feedback = editor.pump_notifications();
        apply_dispatch_result(&feedback, &mut pane, &mut needs_render);

        if needs_render {
            terminal.draw(|frame| pane.render(frame.area(), frame.buffer_mut(), editor))?;
            needs_render = false;
        }
    }
    Ok(())
}
