use std::fmt;
use std::sync::Arc;

type Callback = Arc<dyn Fn() + Send + Sync>;

/// Handle returned by [`Store::subscribe`](crate::Store::subscribe).
///
/// Ids are unique within one store and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub#{}", self.0)
    }
}

/// Ordered set of notification callbacks.
#[derive(Default)]
pub(crate) struct SubscriberRegistry {
    next_id: u64,
    // Kept sorted by id, which is also registration order.
    entries: Vec<(SubscriptionId, Callback)>,
}

impl SubscriberRegistry {
    pub(crate) fn insert(&mut self, callback: Callback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, callback));
        id
    }

    /// Returns `false` if `id` was not registered.
    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        match self.entries.binary_search_by_key(&id, |(entry, _)| *entry) {
            Ok(index) => {
                self.entries.remove(index);
                true
            }
            Err(_) => false,
        }
    }

    pub(crate) fn contains(&self, id: SubscriptionId) -> bool {
        self.entries
            .binary_search_by_key(&id, |(entry, _)| *entry)
            .is_ok()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Copy of the current registrations, in registration order.
    pub(crate) fn snapshot(&self) -> Vec<(SubscriptionId, Callback)> {
        self.entries.clone()
    }
}

impl fmt::Debug for SubscriberRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriberRegistry")
            .field("next_id", &self.next_id)
            .field("len", &self.entries.len())
            .finish()
    }
}
