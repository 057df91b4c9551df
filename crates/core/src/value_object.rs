//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values
/// (an [`Email`](crate::Email) is equal to another email with the same
/// address). Contrast with [`Entity`](crate::Entity), which is compared by id.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
