use serde::{Deserialize, Serialize};

/// What a store does when a subscriber dispatches during a notification pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReentrancyPolicy {
    /// Fail the nested dispatch with [`StoreError::ReentrantDispatch`](crate::StoreError::ReentrantDispatch).
    #[default]
    Reject,
    /// Queue the nested action and apply it once the current pass finishes.
    Defer,
}

/// Store construction options.
///
/// Deserializes with defaults for missing fields, so a host application can
/// embed it in its own configuration file:
///
/// ```
/// use tally::{ReentrancyPolicy, StoreConfig};
///
/// let config = StoreConfig::default()
///     .with_initial(5)
///     .with_reentrancy(ReentrancyPolicy::Defer);
///
/// assert_eq!(config.initial, 5);
/// assert_eq!(config.reentrancy, ReentrancyPolicy::Defer);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct StoreConfig {
    /// Value of the counter when the store is created.
    pub initial: u64,
    /// Handling of dispatches issued from inside a subscriber.
    pub reentrancy: ReentrancyPolicy,
}

impl StoreConfig {
    /// Set the initial counter value.
    pub fn with_initial(mut self, initial: u64) -> Self {
        self.initial = initial;
        self
    }

    /// Set the re-entrancy policy.
    pub fn with_reentrancy(mut self, reentrancy: ReentrancyPolicy) -> Self {
        self.reentrancy = reentrancy;
        self
    }
}
