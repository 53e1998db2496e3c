//! TTL Store Module
//!
//! Unbounded key-value store with one global TTL, swept in the background.

mod store;

pub(crate) use store::TtlEntries;
pub use store::TtlStore;
