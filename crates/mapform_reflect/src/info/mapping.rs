use core::any::TypeId;

use crate::info::{Described, Descriptor, FieldInfo, Maker, TypeRef};
use crate::ops::Mapping;

/// Shape data for a key-value container.
///
/// A plain map has an empty field table. A non-empty table makes this the
/// hybrid case: a mapping that also exposes named fields, where the JSON
/// object is the union of both. Field storage and entry storage are
/// distinct locations in the value; the descriptor keeps them distinct too,
/// and the codec merges them only at the member level.
#[derive(Debug)]
pub struct MappingInfo {
    ty_id: TypeId,
    type_name: &'static str,
    key: TypeRef,
    value: TypeRef,
    fields: Box<[FieldInfo]>,
    make: Option<Maker>,
}

impl MappingInfo {
    /// Creates a new [`MappingInfo`] for map type `TM` with key `TK` and
    /// value `TV`, with no named fields.
    pub fn new<TM, TK, TV>() -> Self
    where
        TM: Mapping,
        TK: Described,
        TV: Described,
    {
        Self {
            ty_id: TypeId::of::<TM>(),
            type_name: core::any::type_name::<TM>(),
            key: TypeRef::of::<TK>(),
            value: TypeRef::of::<TV>(),
            fields: Box::from([]),
            make: None,
        }
    }

    /// Layers named fields on top of the entry storage.
    pub fn with_fields(mut self, fields: Vec<FieldInfo>) -> Self {
        self.fields = fields.into_boxed_slice();
        self
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

    /// Resolves the key type's descriptor.
    #[inline]
    pub fn key(&self) -> &'static Descriptor {
        self.key.get()
    }

    /// Resolves the value type's descriptor.
    #[inline]
    pub fn value(&self) -> &'static Descriptor {
        self.value.get()
    }

    /// Returns the named fields, in declaration order. Empty for plain maps.
    #[inline]
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    /// Looks a named field up by member name.
    #[inline]
    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Returns the registered constructor, if any.
    #[inline]
    pub fn constructor(&self) -> Option<Maker> {
        self.make
    }
}
