// SPDX-License-Identifier: MIT

//! Scoped, crash-safe lifecycle wrappers for the four CLI handle kinds.
//!
//! Ownership is a strict tree: environment -> connection -> {statement,
//! descriptor}. Every wrapper acquires on construction, releases on every
//! exit path (including panics, via `Drop`), and exposes no manual release
//! method. Destructors swallow any error the release call produces —
//! errors must never propagate out of automatic cleanup.

pub mod connection;
pub mod descriptor;
pub mod environment;
pub mod statement;

pub use connection::Connection;
pub use descriptor::{Descriptor, DescriptorRole};
pub use environment::Environment;
pub use statement::Statement;
