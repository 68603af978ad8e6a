use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::store::{CounterReducer, Reducer, Store, StoreError, SubscriptionId};

/// Connects one consumer to a store for as long as the binding is alive.
///
/// Attaching subscribes to the store; dropping the binding (or calling
/// [`Binding::detach`]) unsubscribes. The store only keeps a weak reference
/// back. Once detached, the consumer is not called by any later dispatch; a
/// notification pass already running on another thread may still deliver
/// one final value.
///
/// # Examples
///
/// ```
/// use tally::{Binding, Store};
///
/// let store = Store::new();
/// let header = Binding::attach(&store, |value| println!("header: {value}"));
/// let page = Binding::attach(&store, |value| println!("page: {value}"));
///
/// page.increment().unwrap();
/// assert_eq!(header.observed(), 1);
///
/// header.detach();
/// assert_eq!(store.subscriber_count(), 1);
/// ```
pub struct Binding<R = CounterReducer> {
    store: Store<R>,
    subscription: SubscriptionId,
    observed: Arc<AtomicU64>,
}

impl<R: Reducer> Binding<R> {
    /// Subscribe `render` to `store`.
    ///
    /// The current value becomes the initial [`observed`](Self::observed)
    /// value; `render` is first called with the new value on the next
    /// mutation.
    pub fn attach<F>(store: &Store<R>, render: F) -> Self
    where
        F: Fn(u64) + Send + Sync + 'static,
    {
        let observed = Arc::new(AtomicU64::new(store.get_value()));
        let source = store.downgrade();
        let target = Arc::clone(&observed);

        let subscription = store.subscribe(move || {
            if let Some(inner) = source.upgrade() {
                let value = inner.value();
                target.store(value, Ordering::SeqCst);
                render(value);
            }
        });

        tracing::debug!(%subscription, "binding attached");

        Self {
            store: store.clone(),
            subscription,
            observed,
        }
    }

    /// Unsubscribe from the store.
    ///
    /// Equivalent to dropping the binding.
    pub fn detach(self) {
        drop(self);
    }

    /// Read the store's current value.
    pub fn value(&self) -> u64 {
        self.store.get_value()
    }

    /// The last value pushed to this consumer.
    pub fn observed(&self) -> u64 {
        self.observed.load(Ordering::SeqCst)
    }

    /// Increment the shared counter.
    pub fn increment(&self) -> Result<(), StoreError> {
        self.store.increment()
    }

    /// Decrement the shared counter, stopping at zero.
    pub fn decrement(&self) -> Result<(), StoreError> {
        self.store.decrement()
    }

    /// The store subscription owned by this binding.
    pub fn subscription(&self) -> SubscriptionId {
        self.subscription
    }
}

impl<R> Drop for Binding<R> {
    fn drop(&mut self) {
        self.store.unsubscribe(self.subscription);
        tracing::debug!(subscription = %self.subscription, "binding detached");
    }
}

impl<R> fmt::Debug for Binding<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("subscription", &self.subscription)
            .field("observed", &self.observed.load(Ordering::SeqCst))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn attach_captures_current_value() {
        let store = Store::new();
        store.increment().unwrap();
        store.increment().unwrap();

        let binding = Binding::attach(&store, |_| {});
        assert_eq!(binding.observed(), 2);
        assert_eq!(binding.value(), 2);
    }

    #[test]
    fn renders_on_every_mutation() {
        let store = Store::new();
        let rendered = Arc::new(Mutex::new(Vec::new()));
        let binding = Binding::attach(&store, {
            let rendered = rendered.clone();
            move |value| rendered.lock().push(value)
        });

        binding.increment().unwrap();
        binding.increment().unwrap();
        binding.decrement().unwrap();

        assert_eq!(*rendered.lock(), vec![1, 2, 1]);
        assert_eq!(binding.observed(), 1);
    }

    #[test]
    fn bindings_see_each_others_mutations() {
        let store = Store::new();
        let header = Binding::attach(&store, |_| {});
        let page = Binding::attach(&store, |_| {});

        page.increment().unwrap();
        assert_eq!(header.observed(), 1);

        header.increment().unwrap();
        assert_eq!(page.observed(), 2);
    }

    #[test]
    fn drop_unsubscribes() {
        let store = Store::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let binding = Binding::attach(&store, {
            let calls = calls.clone();
            move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
            }
        });
        assert_eq!(store.subscriber_count(), 1);

        drop(binding);
        assert_eq!(store.subscriber_count(), 0);

        store.increment().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn detach_after_manual_unsubscribe_is_harmless() {
        let store = Store::new();
        let binding = Binding::attach(&store, |_| {});

        assert!(store.unsubscribe(binding.subscription()));
        binding.detach();
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn binding_dropped_mid_pass_is_not_rendered() {
        let store = Store::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let slot: Arc<Mutex<Option<Binding>>> = Arc::new(Mutex::new(None));

        store.subscribe({
            let slot = slot.clone();
            move || {
                slot.lock().take();
            }
        });
        *slot.lock() = Some(Binding::attach(&store, {
            let calls = calls.clone();
            move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
            }
        }));

        store.increment().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.subscriber_count(), 1);
    }

    #[test]
    fn binding_does_not_keep_store_alive_through_registry() {
        let store = Store::new();
        let binding = Binding::attach(&store, |_| {});
        let weak = store.downgrade();

        drop(store);
        assert!(weak.upgrade().is_some());

        drop(binding);
        assert!(weak.upgrade().is_none());
    }
}
