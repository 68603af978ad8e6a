//! Actions and the reducer that turns them into counter transitions.

/// A requested mutation of the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Add one to the counter.
    Increment,
    /// Subtract one from the counter, stopping at zero.
    Decrement,
}

/// Reducer transforms the counter value based on actions.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure function: (value, action) -> value
pub trait Reducer {
    /// Process an action and return the next value.
    fn reduce(current: u64, action: Action) -> u64;
}

/// The default counter reducer.
///
/// `Increment` has no upper bound other than saturating at `u64::MAX`.
/// `Decrement` clamps at zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct CounterReducer;

impl Reducer for CounterReducer {
    fn reduce(current: u64, action: Action) -> u64 {
        match action {
            Action::Increment => current.saturating_add(1),
            Action::Decrement => current.saturating_sub(1),
        }
    }
}

/// Apply `action` to `current` using [`CounterReducer`].
pub fn reduce(current: u64, action: Action) -> u64 {
    CounterReducer::reduce(current, action)
}
