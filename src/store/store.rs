use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, ReentrantMutex};

use super::cell::StateCell;
use super::config::{ReentrancyPolicy, StoreConfig};
use super::error::StoreError;
use super::reducer::{Action, CounterReducer, Reducer};
use super::registry::{SubscriberRegistry, SubscriptionId};

/// Bookkeeping for the dispatch currently running on the owning thread.
#[derive(Debug, Default)]
struct DispatchState {
    notifying: bool,
    pending: VecDeque<Action>,
}

pub(crate) struct StoreInner {
    cell: StateCell,
    registry: Mutex<SubscriberRegistry>,
    // Re-entrant so a subscriber on the dispatching thread reaches the
    // policy check instead of deadlocking. Other threads block here.
    dispatch: ReentrantMutex<RefCell<DispatchState>>,
    config: StoreConfig,
}

impl StoreInner {
    pub(crate) fn value(&self) -> u64 {
        self.cell.get()
    }
}

/// A shared counter store.
///
/// All clones of a store share the same value and the same subscribers.
/// Mutations go through [`Store::dispatch`] (or the `increment` and
/// `decrement` shorthands), which runs the reducer and then synchronously
/// notifies every subscriber in registration order.
///
/// # Examples
///
/// ```
/// use tally::Store;
/// use std::sync::{Arc, atomic::{AtomicU64, Ordering}};
///
/// let store = Store::new();
/// let seen = Arc::new(AtomicU64::new(0));
///
/// let _id = store.subscribe({
///     let store = store.clone();
///     let seen = seen.clone();
///     move || seen.store(store.get_value(), Ordering::SeqCst)
/// });
///
/// store.increment().unwrap();
/// store.increment().unwrap();
/// store.decrement().unwrap();
///
/// assert_eq!(store.get_value(), 1);
/// assert_eq!(seen.load(Ordering::SeqCst), 1);
/// ```
pub struct Store<R = CounterReducer> {
    inner: Arc<StoreInner>,
    _reducer: PhantomData<fn() -> R>,
}

impl Store<CounterReducer> {
    /// Create a store starting at zero that rejects re-entrant dispatch.
    pub fn new() -> Self {
        Self::from_config(StoreConfig::default())
    }

    /// Create a store with the given options.
    pub fn with_config(config: StoreConfig) -> Self {
        Self::from_config(config)
    }
}

impl Default for Store<CounterReducer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Store<R> {
    /// Get the current value.
    pub fn get_value(&self) -> u64 {
        self.inner.value()
    }

    /// The options this store was built with.
    pub fn config(&self) -> StoreConfig {
        self.inner.config
    }

    /// Subscribe to state changes.
    ///
    /// The callback runs after every successful mutation. A callback added
    /// while a notification pass is running is first called on the next
    /// dispatch.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = self.inner.registry.lock().insert(Arc::new(callback));
        tracing::debug!(%id, "subscribed");
        id
    }

    /// Remove a subscription.
    ///
    /// Returns `false` if `id` was already removed or never belonged to
    /// this store; that case is not an error.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self.inner.registry.lock().remove(id);
        if removed {
            tracing::debug!(%id, "unsubscribed");
        } else {
            tracing::trace!(%id, "unsubscribe of unknown subscription ignored");
        }
        removed
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner.registry.lock().len()
    }

    pub(crate) fn downgrade(&self) -> Weak<StoreInner> {
        Arc::downgrade(&self.inner)
    }
}

impl<R: Reducer> Store<R> {
    /// Create a store that uses the reducer `R`.
    ///
    /// ```
    /// use tally::{Action, Reducer, Store, StoreConfig};
    ///
    /// struct ByTwo;
    ///
    /// impl Reducer for ByTwo {
    ///     fn reduce(current: u64, action: Action) -> u64 {
    ///         match action {
    ///             Action::Increment => current.saturating_add(2),
    ///             Action::Decrement => current.saturating_sub(2),
    ///         }
    ///     }
    /// }
    ///
    /// let store = Store::<ByTwo>::from_config(StoreConfig::default());
    /// store.increment().unwrap();
    /// assert_eq!(store.get_value(), 2);
    /// ```
    pub fn from_config(config: StoreConfig) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                cell: StateCell::new(config.initial),
                registry: Mutex::new(SubscriberRegistry::default()),
                dispatch: ReentrantMutex::new(RefCell::new(DispatchState::default())),
                config,
            }),
            _reducer: PhantomData,
        }
    }

    /// Apply `action`, then notify every subscriber.
    ///
    /// Calling this from inside a subscriber callback is governed by
    /// [`ReentrancyPolicy`]: with `Reject` the call fails and the value is
    /// left untouched, with `Defer` the action is applied after the current
    /// notification pass completes.
    ///
    /// Calls from different threads are serialized; each mutation and its
    /// notification pass finish before the next mutation starts.
    pub fn dispatch(&self, action: Action) -> Result<(), StoreError> {
        let lock = self.inner.dispatch.lock();

        {
            let mut state = lock.borrow_mut();
            if state.notifying {
                return match self.inner.config.reentrancy {
                    ReentrancyPolicy::Reject => {
                        tracing::warn!(?action, "rejected re-entrant dispatch");
                        Err(StoreError::ReentrantDispatch { action })
                    }
                    ReentrancyPolicy::Defer => {
                        state.pending.push_back(action);
                        tracing::debug!(
                            ?action,
                            queued = state.pending.len(),
                            "deferred re-entrant dispatch"
                        );
                        Ok(())
                    }
                };
            }
        }

        let mut next = Some(action);
        while let Some(action) = next {
            self.apply(action, &lock);
            next = lock.borrow_mut().pending.pop_front();
        }
        Ok(())
    }

    /// Shorthand for `dispatch(Action::Increment)`.
    pub fn increment(&self) -> Result<(), StoreError> {
        self.dispatch(Action::Increment)
    }

    /// Shorthand for `dispatch(Action::Decrement)`.
    pub fn decrement(&self) -> Result<(), StoreError> {
        self.dispatch(Action::Decrement)
    }

    fn apply(&self, action: Action, state: &RefCell<DispatchState>) {
        let (previous, value) = self.inner.cell.apply::<R>(action);
        tracing::debug!(?action, previous, value, "dispatched");

        state.borrow_mut().notifying = true;
        let _pass = scopeguard::guard(state, |state| {
            let mut state = state.borrow_mut();
            state.notifying = false;
            if std::thread::panicking() {
                state.pending.clear();
            }
        });

        self.notify();
    }

    /// Notify all subscribers of a state change.
    fn notify(&self) {
        let subscribers = self.inner.registry.lock().snapshot();
        tracing::trace!(count = subscribers.len(), "notifying subscribers");

        for (id, callback) in subscribers {
            // Skip anything unsubscribed by an earlier callback in this pass.
            let live = self.inner.registry.lock().contains(id);
            if live {
                callback();
            }
        }
    }
}

impl<R> Clone for Store<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            _reducer: PhantomData,
        }
    }
}

impl<R> fmt::Debug for Store<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("value", &self.inner.value())
            .field("subscribers", &self.inner.registry.lock().len())
            .field("config", &self.inner.config)
            .finish()
    }
}
