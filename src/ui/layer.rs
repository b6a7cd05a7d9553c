use super::{InputEvent, Keymap};

#[derive(Debug, Clone)]
pub struct Layer {
    pub name: &'static str,
    pub keymap: Keymap,
    /// Unmatched keys fall through to the layer below.
    pub transparent: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerResult {
    Action(&'static str),
    Blocked,
    Unresolved,
}

/// Active keymap layers; the last pushed resolves first.
pub struct LayerStack {
    layers: Vec<Layer>,
    active: Vec<&'static str>,
}

impl LayerStack {
    pub fn new(layers: Vec<Layer>) -> Self {
        Self { layers, active: Vec::new() }
    }

    pub fn push(&mut self, name: &str) {
        match self.layers.iter().find(|l| l.name == name) {
            Some(layer) => {
                if !self.active.contains(&layer.name) {
                    self.active.push(layer.name);
                }
            }
            None => log::warn!("no keybinding layer named '{}'", name),
        }
    }

    pub fn pop(&mut self, name: &str) {
        self.active.retain(|n| *n != name);
    }

    pub fn has_layer(&self, name: &str) -> bool {
        self.active.contains(&name)
    }

    pub fn resolve(&self, event: &InputEvent) -> LayerResult {
        for name in self.active.iter().rev() {
            let Some(layer) = self.layers.iter().find(|l| l.name == *name) else {
                continue;
            };
            if let Some(action) = layer.keymap.lookup(event) {
                return LayerResult::Action(action);
            }
            if !layer.transparent {
                return LayerResult::Blocked;
            }
        }
        LayerResult::Unresolved
    }
}
