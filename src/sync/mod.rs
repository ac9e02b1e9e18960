//! Optimistic synchronization between the local [`EntityStore`](crate::store::EntityStore)
//! and the remote service.
//!
//! - [`OptimisticMutationController`]: write locally first, call the server, roll back on failure
//! - [`ReconciliationScheduler`]: replace a slice with server truth, on demand or on an interval
//! - [`UnreadCounter`]: memoized unread count derived from the notification slice

mod controller;
mod counter;
mod scheduler;

pub use controller::OptimisticMutationController;
pub use counter::{UnreadCounter, count_unread};
pub use scheduler::{Authority, DEFAULT_POLL_INTERVAL, ReconciliationScheduler};
