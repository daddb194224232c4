// SPDX-License-Identifier: MIT

//! The full conformance catalog: 23 categories, each a small, focused
//! collection of probes (spec §4.8's required category list).

pub mod advanced;
pub mod array_params;
pub mod boundary;
pub mod cancellation;
pub mod catalog;
pub mod catalog_depth;
pub mod connection;
pub mod cursor;
pub mod cursor_stress;
pub mod datatype_edge;
pub mod datatypes;
pub mod descriptor;
pub mod diagnostic_depth;
pub mod error_queue;
pub mod escape;
pub mod numeric_struct;
pub mod parameter_binding;
pub mod sqlstate;
pub mod state_machine;
pub mod statement;
pub mod transactions;
pub mod wide_surface;
pub mod buffer;

use crate::harness::Category;

/// The catalog in registration order, matching spec §4.8's numbered list.
/// The runner drives categories in exactly this order.
pub fn all_categories() -> Vec<Box<dyn Category>> {
    vec![
        Box::new(connection::ConnectionCategory),
        Box::new(statement::StatementCategory),
        Box::new(catalog::CatalogCategory),
        Box::new(datatypes::DataTypeCategory),
        Box::new(transactions::TransactionCategory),
        Box::new(advanced::AdvancedCategory),
        Box::new(buffer::BufferCategory),
        Box::new(error_queue::ErrorQueueCategory),
        Box::new(state_machine::StateMachineCategory),
        Box::new(wide_surface::WideSurfaceCategory),
        Box::new(catalog_depth::CatalogDepthCategory),
        Box::new(diagnostic_depth::DiagnosticDepthCategory),
        Box::new(cursor::CursorCategory),
        Box::new(parameter_binding::ParameterBindingCategory),
        Box::new(sqlstate::SqlStateCategory),
        Box::new(boundary::BoundaryCategory),
        Box::new(datatype_edge::DataTypeEdgeCategory),
        Box::new(array_params::ArrayParamsCategory),
        Box::new(numeric_struct::NumericStructCategory),
        Box::new(escape::EscapeCategory),
        Box::new(cursor_stress::CursorStressCategory),
        Box::new(descriptor::DescriptorCategory),
        Box::new(cancellation::CancellationCategory),
    ]
}

#[cfg(all(test, feature = "mock-driver"))]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_all_twenty_three_required_categories() {
        assert_eq!(all_categories().len(), 23);
    }
}
