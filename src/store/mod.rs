//! In-memory entity cache the presentation layer reads from.
//!
//! One [`EntityStore`] holds one entity kind (a "slice"): tasks or
//! notifications. Every mutation is synchronous and observers are notified
//! before the mutating call returns, so a reader never sees a half-applied
//! change.
//!
//! ## Components
//!
//! - [`EntityStore`]: ordered, id-keyed collection with `load`/`upsert`/`remove`/`get`
//! - [`StoreEvent`]: what observers are told after each mutation
//! - [`Version`]: per-entity write stamp used for compare-and-rollback

mod entity_store;

pub use entity_store::{EntityStore, ObserverId, StoreEvent, Version};
