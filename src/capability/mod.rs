// SPDX-License-Identifier: MIT

//! Capability discovery: queries and caches everything the driver
//! advertises about itself, once per connection, before any probe runs.

mod functions;
mod info;
mod scalar;
mod types;

pub use functions::FunctionSupport;
pub use scalar::ScalarFunctionSupport;
pub use types::TypeInfo;

use crate::handles::Connection;
use serde::Serialize;
use tracing::debug;

/// Immutable record of everything discovery learned about a driver and
/// its DBMS. Constructed once via [`CapabilitySnapshot::collect`] and
/// passed by reference to every probe category.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CapabilitySnapshot {
    pub driver_name: Option<String>,
    pub driver_version: Option<String>,
    pub dbms_name: Option<String>,
    pub dbms_version: Option<String>,
    pub odbc_version: Option<String>,
    pub catalog_term: Option<String>,
    pub schema_term: Option<String>,
    pub table_term: Option<String>,
    pub procedure_term: Option<String>,
    pub identifier_quote_char: Option<String>,
    pub user_name: Option<String>,
    pub server_name: Option<String>,
    pub database_name: Option<String>,
    pub sql_conformance: Option<u32>,
    pub odbc_interface_conformance: Option<u32>,
    pub max_concurrent_activities: Option<u32>,
    pub max_identifier_len: Option<u32>,

    pub types: Vec<TypeInfo>,

    pub functions: FunctionSupport,
    pub scalar_functions: ScalarFunctionSupport,
}

impl CapabilitySnapshot {
    /// Run every sub-collector. Each info item is individually optional:
    /// an unsupported info type is recorded as absent, never as an error.
    pub fn collect(conn: &Connection) -> Self {
        let mut snapshot = CapabilitySnapshot::default();
        info::collect_info(conn, &mut snapshot);
        snapshot.types = types::collect_types(conn);
        snapshot.functions = functions::collect_functions(conn);
        snapshot.scalar_functions = scalar::collect_scalar_functions(conn);
        debug!(
            types = snapshot.types.len(),
            functions = snapshot.functions.supported.len(),
            "capability discovery complete"
        );
        snapshot
    }

    /// Does the driver's catalog advertise a type whose SQL type code
    /// matches `sql_type`? Used by probes for capability gating.
    pub fn has_sql_type(&self, sql_type: i16) -> bool {
        self.types.iter().any(|t| t.sql_type == sql_type)
    }

    pub fn supports_function(&self, name: &str) -> bool {
        self.functions.supported.iter().any(|f| f == name)
    }
}
