use core::any::TypeId;

use crate::info::{Described, Descriptor, Maker, TypeRef};
use crate::ops::Sequence;

/// Shape data for an ordered container of one element type.
#[derive(Debug)]
pub struct SequenceInfo {
    ty_id: TypeId,
    type_name: &'static str,
    element: TypeRef,
    make: Option<Maker>,
}

impl SequenceInfo {
    /// Creates a new [`SequenceInfo`] for sequence type `TS` with element
    /// type `TE`.
    pub fn new<TS, TE>() -> Self
    where
        TS: Sequence,
        TE: Described,
    {
        Self {
            ty_id: TypeId::of::<TS>(),
            type_name: core::any::type_name::<TS>(),
            element: TypeRef::of::<TE>(),
            make: None,
        }
    }

    /// Registers a parameterless constructor, enabling decoding.
    pub fn with_constructor(mut self, make: Maker) -> Self {
        self.make = Some(make);
        self
    }

    /// Returns the `TypeId` of the described type.
    #[inline]
    pub fn ty_id(&self) -> TypeId {
        self.ty_id
    }

    /// Returns the described type's name.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Resolves the element type's descriptor.
    #[inline]
    pub fn element(&self) -> &'static Descriptor {
        self.element.get()
    }

    /// Returns the registered constructor, if any.
    #[inline]
    pub fn constructor(&self) -> Option<Maker> {
        self.make
    }
}
