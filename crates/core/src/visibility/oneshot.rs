use std::collections::HashMap;

use site_ux_protocol::ElementId;

/// Per-element one-shot state.
#[derive(Debug, Clone, PartialEq)]
pub enum Watch<T> {
    /// Waiting for the first qualifying visibility report; holds what the
    /// transition needs.
    Pending(T),
    /// Transition has happened. Terminal.
    Fired,
}

/// Registry of one-shot watches keyed by element, in registration order.
///
/// The only way out of `Pending` is [`fire`](Self::fire), which hands the
/// payload over exactly once. There is no way back.
#[derive(Debug, Clone)]
pub struct OneShotSet<T> {
    order: Vec<ElementId>,
    watches: HashMap<ElementId, Watch<T>>,
}

impl<T> OneShotSet<T> {
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            watches: HashMap::new(),
        }
    }

    /// Start watching `element`. Returns `false` (and keeps the existing
    /// state) if the element is already registered, fired or not.
    pub fn watch(&mut self, element: ElementId, payload: T) -> bool {
        if self.watches.contains_key(&element) {
            return false;
        }
        self.order.push(element.clone());
        self.watches.insert(element, Watch::Pending(payload));
        true
    }

    /// Move `element` from `Pending` to `Fired`, returning its payload.
    /// Unknown or already fired elements yield `None`.
    pub fn fire(&mut self, element: &ElementId) -> Option<T> {
        let watch = self.watches.get_mut(element)?;
        match std::mem::replace(watch, Watch::Fired) {
            Watch::Pending(payload) => Some(payload),
            Watch::Fired => None,
        }
    }

    pub fn is_pending(&self, element: &ElementId) -> bool {
        matches!(self.watches.get(element), Some(Watch::Pending(_)))
    }

    pub fn has_fired(&self, element: &ElementId) -> bool {
        matches!(self.watches.get(element), Some(Watch::Fired))
    }

    /// Pending elements in registration order.
    pub fn pending(&self) -> impl Iterator<Item = &ElementId> {
        self.order.iter().filter(|id| self.is_pending(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<T> Default for OneShotSet<T> {
    fn default() -> Self {
        Self::new()
    }
}
