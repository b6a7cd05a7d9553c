//! Slot arena: one value holder per slot plus at most one live connection to
//! a store parameter.

use std::sync::mpsc::Sender;
use std::sync::Arc;

use crate::params::{ListenerId, ParamChange, ParamId, ParamStore};
use crate::view::slots::SLOT_COUNT;
use crate::view::SlotId;

/// What the front-end shows for a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValueHolder {
    pub value: i32,
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub param: ParamId,
    pub listener: ListenerId,
}

#[derive(Debug, Default)]
struct SlotEntry {
    holder: ValueHolder,
    /// Last requested parameter name, kept even when the name was missing.
    target: Option<String>,
    binding: Option<Binding>,
}

pub struct BindingRegistry {
    store: Arc<ParamStore>,
    notify: Sender<ParamChange>,
    slots: Vec<SlotEntry>,
}

impl BindingRegistry {
    pub fn new(store: Arc<ParamStore>, notify: Sender<ParamChange>) -> Self {
        let slots = (0..SLOT_COUNT).map(|_| SlotEntry::default()).collect();
        Self { store, notify, slots }
    }

    fn entry(&self, slot: SlotId) -> &SlotEntry {
        &self.slots[slot.index()]
    }

    fn entry_mut(&mut self, slot: SlotId) -> &mut SlotEntry {
        &mut self.slots[slot.index()]
    }

    /// Connect `slot` to the parameter called `name`. The previous connection
    /// is torn down first. An unknown name leaves the slot unbound.
    pub fn bind(&mut self, slot: SlotId, name: &str) -> bool {
        self.teardown(slot);
        self.entry_mut(slot).target = Some(name.to_string());

        let Some(param) = self.store.param_id(name) else {
            log::warn!("{:?}: no parameter named '{}', slot left unbound", slot, name);
            return false;
        };
        let listener = self.store.add_listener(param, self.notify.clone());
        let value = self.store.value(param);
        let entry = self.entry_mut(slot);
        entry.binding = Some(Binding { param, listener });
        entry.holder.value = value;
        log::debug!("bound {:?} -> {}", slot, name);
        true
    }

    /// Drop the connection. The holder keeps its last value.
    pub fn unbind(&mut self, slot: SlotId) {
        self.teardown(slot);
        self.entry_mut(slot).target = None;
    }

    pub fn unbind_all(&mut self) {
        for slot in SlotId::all() {
            self.unbind(slot);
        }
    }

    fn teardown(&mut self, slot: SlotId) {
        if let Some(binding) = self.entry_mut(slot).binding.take() {
            self.store.remove_listener(binding.listener);
        }
    }

    /// UI -> parameter. Bound slots write through (clamped by the store);
    /// an unbound slot only updates its holder.
    pub fn edit(&mut self, slot: SlotId, value: i32) {
        match self.entry(slot).binding {
            Some(binding) => {
                self.store.set_value(binding.param, value);
                let stored = self.store.value(binding.param);
                self.entry_mut(slot).holder.value = stored;
            }
            None => self.entry_mut(slot).holder.value = value,
        }
    }

    pub fn nudge(&mut self, slot: SlotId, delta: i32) {
        let current = self.entry(slot).holder.value;
        self.edit(slot, current.saturating_add(delta));
    }

    /// Parameter -> UI for every slot currently bound to `param`. Returns the
    /// number of holders refreshed.
    pub fn refresh_param(&mut self, param: ParamId) -> usize {
        let value = self.store.value(param);
        let mut refreshed = 0;
        for entry in &mut self.slots {
            if entry.binding.map(|b| b.param) == Some(param) {
                entry.holder.value = value;
                refreshed += 1;
            }
        }
        refreshed
    }

    pub fn set_visible(&mut self, slot: SlotId, visible: bool) {
        self.entry_mut(slot).holder.visible = visible;
    }

    pub fn holder(&self, slot: SlotId) -> ValueHolder {
        self.entry(slot).holder
    }

    pub fn binding(&self, slot: SlotId) -> Option<Binding> {
        self.entry(slot).binding
    }

    pub fn bound_param(&self, slot: SlotId) -> Option<ParamId> {
        self.entry(slot).binding.map(|b| b.param)
    }

    pub fn target(&self, slot: SlotId) -> Option<&str> {
        self.entry(slot).target.as_deref()
    }

    pub fn is_bound(&self, slot: SlotId) -> bool {
        self.entry(slot).binding.is_some()
    }

    pub fn live_connections(&self) -> usize {
        self.slots.iter().filter(|e| e.binding.is_some()).count()
    }

    pub fn slots_bound_to(&self, param: ParamId) -> Vec<SlotId> {
        SlotId::all()
            .into_iter()
            .filter(|slot| self.bound_param(*slot) == Some(param))
            .collect()
    }

    pub fn store(&self) -> &Arc<ParamStore> {
        &self.store
    }
}

impl Drop for BindingRegistry {
    fn drop(&mut self) {
        self.unbind_all();
    }
}
