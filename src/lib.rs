//! # Taskora - a personal task manager client with optimistic sync
//!
//! Taskora keeps a local, instantly updated view of tasks and notifications
//! consistent with a remote task service. Mutations are applied to the local
//! store before the network round-trip and rolled back if the server rejects
//! them; a polling loop periodically replaces local state with server truth.
//!
//! ## Features
//!
//! - **Optimistic mutations**: toggle, delete, read, snooze and mark-all-read
//!   show up immediately and revert on failure
//! - **Compare-and-rollback**: a failed mutation never clobbers a newer write
//! - **Reconciliation**: wholesale refresh from the server, on demand or on a timer
//! - **Derived unread count**: always equal to a direct count over the store
//!
//! ## Quick Start
//!
//! ```bash
//! # Sign in (password is read from stdin)
//! taskora login me@example.com
//!
//! # Create and list tasks
//! taskora add "Write report" --due 2026-05-01 --estimate 90 -p high
//! taskora tasks --view priority
//!
//! # Complete a task
//! taskora toggle <id>
//!
//! # Follow the unread notification count
//! taskora watch
//! ```
//!
//! ## Modules
//!
//! - [`api`]: Remote service contract and HTTP client
//! - [`board`]: Task and notification facades for the presentation layer
//! - [`cli`]: Command-line interface definitions and handlers
//! - [`config`]: Configuration loading
//! - [`error`]: Error types and result aliases
//! - [`model`]: Data models (Task, Notification, etc.)
//! - [`session`]: Authentication state
//! - [`store`]: Observable in-memory entity store
//! - [`sync`]: Optimistic mutations, reconciliation and the unread counter
//! - [`validation`]: Input validation utilities

/// Remote task service contract.
///
/// Defines the `RemoteApi` trait and its reqwest implementation `HttpApi`.
pub mod api;

/// Facades composing the sync engine: `TaskBoard` and `NotificationCenter`.
pub mod board;

/// Command-line interface definitions using clap.
pub mod cli;

/// Configuration loading and management.
///
/// Handles the YAML config file and per-user directories.
pub mod config;

/// Error types and result aliases.
///
/// Defines `TaskoraError` enum and `Result<T>` type alias.
pub mod error;

pub mod logging;

/// Data models for tasks, notifications and account settings.
pub mod model;

/// Session token and identity, optionally persisted to disk.
pub mod session;

/// Generic observable entity store.
pub mod store;

/// Client-side synchronization engine.
///
/// Optimistic mutation controller, reconciliation scheduler and unread counter.
pub mod sync;

/// Input validation utilities.
///
/// Validates titles, estimates, IDs and settings before they reach the server.
pub mod validation;
