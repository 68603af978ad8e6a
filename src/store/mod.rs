//! The shared counter store.
//!
//! A [`Store`] owns one non-negative counter and a list of subscribers.
//! Mutations are expressed as [`Action`]s, applied by a [`Reducer`], and
//! followed by a synchronous notification pass over every subscriber.

mod cell;
mod config;
mod error;
mod reducer;
mod registry;
mod store;

pub use config::{ReentrancyPolicy, StoreConfig};
pub use error::StoreError;
pub use reducer::{reduce, Action, CounterReducer, Reducer};
pub use registry::SubscriptionId;
pub use store::Store;
