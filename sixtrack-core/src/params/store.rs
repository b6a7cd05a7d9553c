//! ParamStore: the named parameter cells shared between the UI thread and
//! the audio thread.
//!
//! Values live in atomics so either thread can read or write a single
//! parameter without locking. Change notifications are delivered through
//! mpsc senders registered per parameter; the receiving side decides when
//! to act on them (the editor drains its channel on the UI thread).

use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, AtomicU64, Ordering};
use std::sync::mpsc::Sender;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{create_parameter_layout, ParamId, ParamSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Sent to listeners after a parameter's stored value changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamChange {
    pub param: ParamId,
}

struct Listener {
    id: ListenerId,
    param: ParamId,
    tx: Sender<ParamChange>,
}

pub struct ParamStore {
    specs: Vec<ParamSpec>,
    index: HashMap<String, ParamId>,
    values: Vec<AtomicI32>,
    listeners: Mutex<Vec<Listener>>,
    next_listener: AtomicU64,
}

impl ParamStore {
    pub fn new(layout: Vec<ParamSpec>) -> Self {
        let index = layout
            .iter()
            .enumerate()
            .map(|(id, spec)| (spec.name.clone(), id))
            .collect();
        let values = layout.iter().map(|spec| AtomicI32::new(spec.default)).collect();
        Self {
            specs: layout,
            index,
            values,
            listeners: Mutex::new(Vec::new()),
            next_listener: AtomicU64::new(1),
        }
    }

    pub fn with_default_layout() -> Self {
        Self::new(create_parameter_layout())
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn param_id(&self, name: &str) -> Option<ParamId> {
        self.index.get(name).copied()
    }

    pub fn spec(&self, id: ParamId) -> Option<&ParamSpec> {
        self.specs.get(id)
    }

    pub fn get_parameter(&self, name: &str) -> Option<&ParamSpec> {
        self.param_id(name).and_then(|id| self.spec(id))
    }

    pub fn specs(&self) -> impl Iterator<Item = (ParamId, &ParamSpec)> {
        self.specs.iter().enumerate()
    }

    /// Current raw value; unknown ids read as 0.
    pub fn value(&self, id: ParamId) -> i32 {
        self.values
            .get(id)
            .map(|v| v.load(Ordering::Acquire))
            .unwrap_or(0)
    }

    pub fn value_of(&self, name: &str) -> Option<i32> {
        self.param_id(name).map(|id| self.value(id))
    }

    pub fn flag_of(&self, name: &str) -> bool {
        self.value_of(name).unwrap_or(0) != 0
    }

    /// Clamp and store a value. Listeners are notified only when the stored
    /// value actually changed. Returns whether it changed.
    pub fn set_value(&self, id: ParamId, value: i32) -> bool {
        let (Some(spec), Some(cell)) = (self.specs.get(id), self.values.get(id)) else {
            return false;
        };
        let value = spec.clamp(value);
        let previous = cell.swap(value, Ordering::AcqRel);
        if previous == value {
            return false;
        }
        self.notify(id);
        true
    }

    pub fn set_value_by_name(&self, name: &str, value: i32) -> bool {
        match self.param_id(name) {
            Some(id) => self.set_value(id, value),
            None => {
                log::warn!("set_value on unknown parameter '{}'", name);
                false
            }
        }
    }

    pub fn reset_to_defaults(&self) {
        for id in 0..self.specs.len() {
            self.set_value(id, self.specs[id].default);
        }
    }

    pub fn add_listener(&self, id: ParamId, tx: Sender<ParamChange>) -> ListenerId {
        let listener = ListenerId(self.next_listener.fetch_add(1, Ordering::Relaxed));
        self.lock_listeners().push(Listener { id: listener, param: id, tx });
        listener
    }

    /// Removing a listener never emits a notification.
    pub fn remove_listener(&self, listener: ListenerId) -> bool {
        let mut listeners = self.lock_listeners();
        let before = listeners.len();
        listeners.retain(|l| l.id != listener);
        listeners.len() != before
    }

    pub fn listener_count(&self, id: ParamId) -> usize {
        self.lock_listeners().iter().filter(|l| l.param == id).count()
    }

    fn notify(&self, id: ParamId) {
        // Listeners whose receiver is gone are dropped here.
        self.lock_listeners()
            .retain(|l| l.param != id || l.tx.send(ParamChange { param: id }).is_ok());
    }

    fn lock_listeners(&self) -> MutexGuard<'_, Vec<Listener>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ParamStore {
    fn default() -> Self {
        Self::with_default_layout()
    }
}
