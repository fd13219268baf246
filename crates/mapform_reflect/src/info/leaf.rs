use core::any::TypeId;

use serde_core::Deserialize;
use serde_json::Value;

use crate::Model;

/// Decodes a parsed JSON node into a boxed leaf value.
pub type LeafDecodeFn = fn(&Value) -> Result<Box<dyn Model>, serde_json::Error>;

/// Shape data for a scalar handled wholesale by serde.
///
/// Encoding needs no hook here: leaf values reach the emitter through
/// [`Leaf`](crate::ops::Leaf)'s erased `Serialize` supertrait. Decoding is
/// type-directed, so the hook is registered per type and monomorphized
/// once.
#[derive(Debug)]
pub struct LeafInfo {
    ty_id: TypeId,
    type_name: &'static str,
    decode: LeafDecodeFn,
}

impl LeafInfo {
    /// Creates a new [`LeafInfo`] for `T`.
    pub fn new<T>() -> Self
    where
        T: Model + for<'de> Deserialize<'de>,
    {
        fn decode_into<T>(value: &Value) -> Result<Box<dyn Model>, serde_json::Error>
        where
            T: Model + for<'de> Deserialize<'de>,
        {
            T::deserialize(value).map(|leaf| Box::new(leaf) as Box<dyn Model>)
        }

        Self {
            ty_id: TypeId::of::<T>(),
            type_name: core::any::type_name::<T>(),
            decode: decode_into::<T>,
        }
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

    /// Decodes `value` into a boxed instance of the described type.
    #[inline]
    pub fn decode(&self, value: &Value) -> Result<Box<dyn Model>, serde_json::Error> {
        (self.decode)(value)
    }
}
