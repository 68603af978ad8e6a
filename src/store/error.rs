use thiserror::Error;

use super::reducer::Action;

/// Errors returned by store mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A subscriber called `dispatch` while a notification pass was running
    /// and the store is configured to reject it.
    #[error("re-entrant dispatch of {action:?} during a notification pass")]
    ReentrantDispatch { action: Action },
}
