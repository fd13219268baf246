use core::any::TypeId;

use crate::Model;
use crate::info::{FieldInfo, Maker};

/// Shape data for a type with named fields only.
#[derive(Debug)]
pub struct RecordInfo {
    ty_id: TypeId,
    type_name: &'static str,
    fields: Box<[FieldInfo]>,
    make: Option<Maker>,
}

impl RecordInfo {
    /// Creates a new [`RecordInfo`] for `T` with the given field table.
    ///
    /// Field order is kept as given and becomes the member emission order.
    pub fn new<T: Model>(fields: Vec<FieldInfo>) -> Self {
        Self {
            ty_id: TypeId::of::<T>(),
            type_name: core::any::type_name::<T>(),
            fields: fields.into_boxed_slice(),
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

    /// Returns the field table in declaration order.
    #[inline]
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    /// Looks a field up by member name.
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
