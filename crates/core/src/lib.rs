//! `hrm-core` — domain foundation building blocks for the HRM portal.
//!
//! This crate contains **pure domain** primitives (no storage, no async).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{Email, UploadId, UserId};
pub use value_object::ValueObject;
