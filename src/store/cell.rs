use parking_lot::RwLock;

use super::reducer::{Action, Reducer};

/// The single mutable value owned by a store.
///
/// The value is unsigned, so it can never go below zero. Writes only happen
/// through [`StateCell::apply`], which runs a reducer over the current value.
#[derive(Debug, Default)]
pub(crate) struct StateCell {
    value: RwLock<u64>,
}

impl StateCell {
    pub(crate) fn new(initial: u64) -> Self {
        Self {
            value: RwLock::new(initial),
        }
    }

    pub(crate) fn get(&self) -> u64 {
        *self.value.read()
    }

    /// Apply `action` and return the `(previous, next)` pair.
    pub(crate) fn apply<R: Reducer>(&self, action: Action) -> (u64, u64) {
        let mut value = self.value.write();
        let previous = *value;
        *value = R::reduce(previous, action);
        (previous, *value)
    }
}
