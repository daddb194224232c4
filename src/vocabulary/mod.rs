// SPDX-License-Identifier: MIT

//! Shared vocabulary the probe catalog is written against: dialect
//! fallback, scratch-table lifecycle, capability gating, and a result
//! builder. None of this module knows about any specific probe category.

pub mod builder;
pub mod dialect;
pub mod gating;
pub mod tempschema;

pub use builder::ResultBuilder;
pub use dialect::execute_first_that_succeeds;
pub use gating::run_if_supported;
pub use tempschema::with_temp_table;
