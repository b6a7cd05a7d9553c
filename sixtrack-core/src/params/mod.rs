pub mod layout;
pub mod snapshot;
pub mod store;

pub use layout::{create_parameter_layout, track_param_id, Machine, TrackIndex, NUM_TRACKS};
pub use snapshot::Snapshot;
pub use store::{ListenerId, ParamChange, ParamStore};

/// Dense index of a parameter in the layout it was created from.
pub type ParamId = usize;

#[derive(Debug, Clone, PartialEq)]
pub enum ParamKind {
    Int { min: i32, max: i32 },
    Bool,
    Choice(Vec<String>),
}

/// Declarative description of one parameter cell.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: String,
    pub label: String,
    pub kind: ParamKind,
    pub default: i32,
}

impl ParamSpec {
    pub fn int(name: impl Into<String>, label: impl Into<String>, min: i32, max: i32, default: i32) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind: ParamKind::Int { min, max },
            default: default.clamp(min, max),
        }
    }

    pub fn boolean(name: impl Into<String>, label: impl Into<String>, default: bool) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind: ParamKind::Bool,
            default: default as i32,
        }
    }

    pub fn choice<S: Into<String>>(
        name: impl Into<String>,
        label: impl Into<String>,
        choices: impl IntoIterator<Item = S>,
        default: usize,
    ) -> Self {
        let choices: Vec<String> = choices.into_iter().map(Into::into).collect();
        let last = choices.len().saturating_sub(1);
        Self {
            name: name.into(),
            label: label.into(),
            kind: ParamKind::Choice(choices),
            default: default.min(last) as i32,
        }
    }

    pub fn min(&self) -> i32 {
        match &self.kind {
            ParamKind::Int { min, .. } => *min,
            ParamKind::Bool | ParamKind::Choice(_) => 0,
        }
    }

    pub fn max(&self) -> i32 {
        match &self.kind {
            ParamKind::Int { max, .. } => *max,
            ParamKind::Bool => 1,
            ParamKind::Choice(choices) => choices.len().saturating_sub(1) as i32,
        }
    }

    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.min(), self.max())
    }

    pub fn is_bool(&self) -> bool {
        matches!(self.kind, ParamKind::Bool)
    }

    /// Choice labels, or None for numeric and boolean parameters.
    pub fn choices(&self) -> Option<&[String]> {
        match &self.kind {
            ParamKind::Choice(choices) => Some(choices),
            _ => None,
        }
    }

    /// Human-readable rendering of a raw value.
    pub fn display_value(&self, value: i32) -> String {
        let value = self.clamp(value);
        match &self.kind {
            ParamKind::Int { .. } => value.to_string(),
            ParamKind::Bool => if value != 0 { "ON" } else { "OFF" }.to_string(),
            ParamKind::Choice(choices) => choices
                .get(value as usize)
                .cloned()
                .unwrap_or_default(),
        }
    }
}
