//! Runtime capability traits for the three non-leaf value shapes.
//!
//! These traits carry only what descriptors cannot: live iteration over a
//! value's contents and type-checked insertion during decoding. Everything
//! shape-static (key and value types, field tables, constructors) lives in
//! [`info`](crate::info).

mod mapping;
mod sequence;

pub use mapping::Mapping;
pub use sequence::Sequence;

use crate::Model;

/// A scalar handled wholesale by its serde implementation.
///
/// The `erased_serde::Serialize` supertrait is the encode capability: the
/// emitter serializes a `&dyn Leaf` without knowing its concrete type.
/// Decoding goes through the hook registered in
/// [`LeafInfo`](crate::info::LeafInfo).
pub trait Leaf: Model + erased_serde::Serialize {}

erased_serde::serialize_trait_object!(Leaf);
