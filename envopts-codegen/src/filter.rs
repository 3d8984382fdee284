//! Field eligibility.

use crate::model::{FieldDescriptor, TypeDescriptor};

/// Fields that get a setter: exported and tagged, in declaration order.
///
/// Everything else is dropped without error; an empty result is valid.
pub fn eligible(descriptor: &TypeDescriptor) -> Vec<&FieldDescriptor> {
    descriptor
        .fields
        .iter()
        .filter(|field| {
            if !field.is_eligible() {
                tracing::debug!(
                    type_name = %descriptor.name,
                    field = %field.name,
                    has_tag = field.has_tag,
                    is_exported = field.is_exported,
                    "field dropped"
                );
            }
            field.is_eligible()
        })
        .collect()
}
