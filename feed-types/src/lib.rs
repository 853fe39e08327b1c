//! # feed-types
//!
//! Shared data model for the feedsync offline-first feed reader.
//!
//! This crate provides the foundational types used across all feedsync crates:
//! - [`PostId`], [`PageNumber`], [`ScanCursor`] - Identity and pagination types
//! - [`Post`], [`Rendered`] - The post record as the remote API ships it

#![warn(missing_docs)]
#![warn(clippy::all)]

mod ids;
mod post;

pub use ids::{PageNumber, PostId, ScanCursor};
pub use post::{Post, Rendered};
