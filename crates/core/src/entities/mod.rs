//! Entity identity and cross-document references.

mod entity;

pub(crate) use entity::non_empty;
pub use entity::{same_identity, Entity, Reference};
