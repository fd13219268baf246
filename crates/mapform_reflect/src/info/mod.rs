//! Type descriptors: the per-type shape data that drives the codec.
//!
//! A [`Descriptor`] is computed once per concrete type, published
//! process-wide, and immutable afterward (see [`cell`]). The codec never
//! inspects values to learn a type's shape; it only consults descriptors.

mod cell;
mod field;
mod leaf;
mod mapping;
mod record;
mod sequence;

pub use cell::{DescriptorCell, GenericDescriptorCell};
pub use field::{FieldInfo, FieldValue, Getter, Setter};
pub use leaf::{LeafDecodeFn, LeafInfo};
pub use mapping::MappingInfo;
pub use record::RecordInfo;
pub use sequence::SequenceInfo;

use core::any::TypeId;

use crate::Model;

// -----------------------------------------------------------------------------
// Described

/// A type with a statically reachable [`Descriptor`].
///
/// Implementations compute their descriptor exactly once, inside a
/// [`DescriptorCell`] (or [`GenericDescriptorCell`] for generic containers),
/// and hand out the cached reference forever after:
///
/// ```rust,ignore
/// impl Described for Tree {
///     fn descriptor() -> &'static Descriptor {
///         static CELL: DescriptorCell = DescriptorCell::new();
///         CELL.get_or_init(|| {
///             Descriptor::Record(
///                 RecordInfo::new::<Self>(vec![/* fields */])
///                     .with_constructor(|| Box::new(Self::default())),
///             )
///         })
///     }
/// }
/// ```
pub trait Described {
    /// Returns the descriptor for `Self`, computing it on first access.
    fn descriptor() -> &'static Descriptor;
}

// -----------------------------------------------------------------------------
// TypeRef

/// A lazy handle to another type's descriptor.
///
/// Descriptor graphs can be recursive (a record holding a sequence of
/// itself), so cross-type links hold a function pointer and resolve it on
/// use instead of eagerly chasing the whole graph during construction.
#[derive(Clone, Copy, Debug)]
pub struct TypeRef {
    descriptor: fn() -> &'static Descriptor,
}

impl TypeRef {
    /// Creates a reference to `T`'s descriptor.
    #[inline]
    pub fn of<T: Described>() -> Self {
        Self {
            descriptor: T::descriptor,
        }
    }

    /// Resolves the referenced descriptor.
    #[inline]
    pub fn get(&self) -> &'static Descriptor {
        (self.descriptor)()
    }
}

// -----------------------------------------------------------------------------
// Descriptor

/// A parameterless constructor producing a fresh, empty instance.
pub type Maker = fn() -> Box<dyn Model>;

/// The serialization shape of a runtime type.
///
/// A type is exactly one of these four things to the codec. The hybrid
/// "mapping that also has named fields" case is *not* a fifth kind: it is a
/// [`Mapping`](Descriptor::Mapping) whose [`MappingInfo::fields`] is
/// non-empty. Named fields and entry storage are disjoint at the value
/// level and merged into one JSON object at the wire level.
#[derive(Debug)]
pub enum Descriptor {
    /// Named fields only.
    Record(RecordInfo),
    /// Key-value entries, plus optional named fields layered on top.
    Mapping(MappingInfo),
    /// An ordered run of one element type.
    Sequence(SequenceInfo),
    /// A scalar delegated wholesale to its serde implementation.
    Leaf(LeafInfo),
}

impl Descriptor {
    /// Returns the described type's `TypeId`.
    #[inline]
    pub fn ty_id(&self) -> TypeId {
        match self {
            Descriptor::Record(info) => info.ty_id(),
            Descriptor::Mapping(info) => info.ty_id(),
            Descriptor::Sequence(info) => info.ty_id(),
            Descriptor::Leaf(info) => info.ty_id(),
        }
    }

    /// Returns the described type's name, for diagnostics.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        match self {
            Descriptor::Record(info) => info.type_name(),
            Descriptor::Mapping(info) => info.type_name(),
            Descriptor::Sequence(info) => info.type_name(),
            Descriptor::Leaf(info) => info.type_name(),
        }
    }

    /// Returns `true` if the described type stores key-value entries.
    #[inline]
    pub fn is_map_like(&self) -> bool {
        matches!(self, Descriptor::Mapping(_))
    }

    /// Returns the named fields of the described type, in declaration order.
    ///
    /// Non-empty for records and for hybrid mappings; empty otherwise.
    #[inline]
    pub fn named_fields(&self) -> &[FieldInfo] {
        match self {
            Descriptor::Record(info) => info.fields(),
            Descriptor::Mapping(info) => info.fields(),
            _ => &[],
        }
    }

    /// Returns the registered parameterless constructor, if any.
    #[inline]
    pub fn constructor(&self) -> Option<Maker> {
        match self {
            Descriptor::Record(info) => info.constructor(),
            Descriptor::Mapping(info) => info.constructor(),
            Descriptor::Sequence(info) => info.constructor(),
            Descriptor::Leaf(_) => None,
        }
    }
}
