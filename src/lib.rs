//! # Tally
//!
//! A small observable counter store.
//!
//! Tally keeps one non-negative counter that several unrelated consumers
//! share. Any consumer can mutate it, and every other consumer sees the new
//! value without wiring the consumers to each other:
//!
//! - [`Store`] - owns the counter and its subscribers, applies [`Action`]s
//!   through a [`Reducer`] and notifies subscribers synchronously
//! - [`Binding`] - one per consumer; subscribes on attach, unsubscribes on
//!   drop and exposes bound `increment`/`decrement` dispatchers
//! - [`StoreConfig`] - initial value and the [`ReentrancyPolicy`] applied to
//!   dispatches issued from inside a subscriber
//!
//! ```
//! use tally::{Binding, Store};
//!
//! let store = Store::new();
//! let header = Binding::attach(&store, |value| println!("header shows {value}"));
//! let page = Binding::attach(&store, |value| println!("page shows {value}"));
//!
//! page.increment().unwrap();
//! header.increment().unwrap();
//!
//! assert_eq!(header.observed(), 2);
//! assert_eq!(page.observed(), 2);
//! ```

pub mod binding;
pub mod store;

// Re-export main types for convenience
pub use binding::Binding;
pub use store::{
    reduce, Action, CounterReducer, Reducer, ReentrancyPolicy, Store, StoreConfig, StoreError,
    SubscriptionId,
};
