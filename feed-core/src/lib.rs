//! # feed-core
//!
//! Pure logic for feedsync (no I/O, instant tests).
//!
//! This crate implements the load lifecycle, pagination bookkeeping, and
//! text handling for feed reading without any network or disk I/O,
//! enabling fast unit tests.
//!
//! ## Design Philosophy
//!
//! All modules in this crate are **pure** - they take input and produce output
//! without side effects. This enables:
//! - Instant unit tests (no mocks, no async)
//! - Deterministic behavior (same input → same output)
//! - Easy reasoning about state transitions
//!
//! The actual I/O (HTTP, SQLite) is performed by `feed-client`, which
//! interprets the actions produced by the state machine.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod pages;
pub mod snapshot;
pub mod state;
pub mod text;

pub use pages::PageTracker;
pub use snapshot::Snapshot;
pub use state::{Generation, LoadAction, LoadEvent, LoadState};
pub use text::strip_markup;
