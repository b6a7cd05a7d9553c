use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

use super::keymap::{KeyBinding, KeyPattern, Keymap};
use super::layer::Layer;
use super::KeyCode;

/// Raw TOML structure for the keybindings file
#[derive(Deserialize, Default)]
struct KeybindingConfig {
    #[allow(dead_code)]
    version: u32,
    layers: HashMap<String, LayerConfig>,
}

#[derive(Deserialize)]
struct LayerConfig {
    #[serde(default = "default_transparent")]
    transparent: bool,
    bindings: Vec<RawBinding>,
}

fn default_transparent() -> bool {
    true
}

#[derive(Deserialize)]
struct RawBinding {
    key: String,
    action: String,
    description: String,
}

/// Loaded once at startup and never freed.
fn intern(s: String) -> &'static str {
    Box::leak(s.into_boxed_str())
}

/// Parse a key notation string into a KeyPattern.
///
/// Supported formats:
/// - `"q"` → Char('q')
/// - `"Up"` → Key(KeyCode::Up)
/// - `"Ctrl+s"` → Ctrl('s')
/// - `"Alt+x"` → Alt('x')
/// - `"Ctrl+Left"` → CtrlKey(KeyCode::Left)
/// - `"Shift+Up"` → ShiftKey(KeyCode::Up)
/// - `"F1"` → Key(KeyCode::F(1))
fn parse_key(s: &str) -> Result<KeyPattern, String> {
    if let Some(rest) = s.strip_prefix("Ctrl+") {
        match single_char(rest) {
            Some(c) => Ok(KeyPattern::Ctrl(c)),
            None => parse_named_key(rest).map(KeyPattern::CtrlKey),
        }
    } else if let Some(rest) = s.strip_prefix("Alt+") {
        single_char(rest)
            .map(KeyPattern::Alt)
            .ok_or_else(|| format!("Alt needs a single character: {}", s))
    } else if let Some(rest) = s.strip_prefix("Shift+") {
        parse_named_key(rest).map(KeyPattern::ShiftKey)
    } else if let Some(c) = single_char(s) {
        Ok(KeyPattern::Char(c))
    } else if s == "Space" {
        Ok(KeyPattern::Char(' '))
    } else {
        parse_named_key(s).map(KeyPattern::Key)
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn parse_named_key(s: &str) -> Result<KeyCode, String> {
    let key = match s {
        "Up" => KeyCode::Up,
        "Down" => KeyCode::Down,
        "Left" => KeyCode::Left,
        "Right" => KeyCode::Right,
        "Enter" => KeyCode::Enter,
        "Escape" => KeyCode::Escape,
        "Backspace" => KeyCode::Backspace,
        "Tab" => KeyCode::Tab,
        "BackTab" => KeyCode::BackTab,
        "Home" => KeyCode::Home,
        "End" => KeyCode::End,
        "PageUp" => KeyCode::PageUp,
        "PageDown" => KeyCode::PageDown,
        "Insert" => KeyCode::Insert,
        "Delete" => KeyCode::Delete,
        _ => {
            return s
                .strip_prefix('F')
                .and_then(|n| n.parse::<u8>().ok())
                .map(KeyCode::F)
                .ok_or_else(|| format!("Unknown key: {}", s))
        }
    };
    Ok(key)
}

/// Embedded default keybindings TOML
const DEFAULT_KEYBINDINGS: &str = include_str!("../../keybindings.toml");

/// Layers that do not belong to a pane
const MODE_LAYERS: &[&str] = &["global"];

/// Load keybindings: embedded default, optionally merged with user override.
/// Returns (Vec<Layer> for LayerStack, pane keymaps for pane construction).
pub fn load_keybindings() -> (Vec<Layer>, HashMap<String, Keymap>) {
    let mut config: KeybindingConfig = toml::from_str(DEFAULT_KEYBINDINGS).unwrap_or_else(|e| {
        log::error!("embedded keybindings.toml is invalid: {}", e);
        KeybindingConfig::default()
    });

    if let Some(path) = user_keybindings_path() {
        if path.exists() {
            match std::fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|s| toml::from_str::<KeybindingConfig>(&s).map_err(|e| e.to_string()))
            {
                Ok(user_config) => merge_config(&mut config, user_config),
                Err(e) => log::warn!("ignoring {}: {}", path.display(), e),
            }
        }
    }

    let layers = build_layers(&config.layers);
    let pane_keymaps = build_pane_keymaps(&config.layers);

    (layers, pane_keymaps)
}

fn user_keybindings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("sixtrack").join("keybindings.toml"))
}

/// User layer entries fully replace the default layer entries.
fn merge_config(base: &mut KeybindingConfig, user: KeybindingConfig) {
    for (layer_id, layer_config) in user.layers {
        base.layers.insert(layer_id, layer_config);
    }
}

fn build_bindings(raw: &[RawBinding]) -> Vec<KeyBinding> {
    raw.iter()
        .filter_map(|b| match parse_key(&b.key) {
            Ok(pattern) => Some(KeyBinding {
                pattern,
                action: intern(b.action.clone()),
                description: intern(b.description.clone()),
            }),
            Err(e) => {
                log::warn!("skipping binding for '{}': {}", b.action, e);
                None
            }
        })
        .collect()
}

fn build_layers(layers: &HashMap<String, LayerConfig>) -> Vec<Layer> {
    layers
        .iter()
        .map(|(name, config)| Layer {
            name: intern(name.clone()),
            keymap: Keymap::from_bindings(build_bindings(&config.bindings)),
            transparent: config.transparent,
        })
        .collect()
}

fn build_pane_keymaps(layers: &HashMap<String, LayerConfig>) -> HashMap<String, Keymap> {
    layers
        .iter()
        .filter(|(name, _)| !MODE_LAYERS.contains(&name.as_str()))
        .map(|(name, config)| {
            (
                name.clone(),
                Keymap::from_bindings(build_bindings(&config.bindings)),
            )
        })
        .collect()
}
