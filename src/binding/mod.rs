//! Per-consumer adapters over a [`Store`](crate::Store).
//!
//! A [`Binding`] ties a consumer's lifetime to a store subscription and
//! hands it bound `increment`/`decrement` dispatchers, so consumers never
//! build actions or touch the reducer themselves.

mod binding;

pub use binding::Binding;
