use crate::Model;
use crate::info::{Descriptor, TypeRef};

// -----------------------------------------------------------------------------
// Accessors

/// How a named field's current value is read out of its host.
#[derive(Clone, Copy, Debug)]
pub enum Getter {
    /// The field occupies a slot in the host and can be borrowed directly.
    Slot(fn(&dyn Model) -> &dyn Model),
    /// The field is materialized on each read.
    ///
    /// This is the accessor for properties whose backing store is somewhere
    /// else entirely, such as a hybrid mapping's field that reads through to
    /// its own entry storage.
    Computed(fn(&dyn Model) -> Box<dyn Model>),
}

/// Writes a decoded value into the host.
///
/// A setter that cannot accept the payload (wrong concrete type) hands the
/// box back, and the decoder reports it as a field-assignment failure.
pub type Setter = fn(&mut dyn Model, Box<dyn Model>) -> Result<(), Box<dyn Model>>;

/// A field value obtained through a [`Getter`].
pub enum FieldValue<'a> {
    Borrowed(&'a dyn Model),
    Owned(Box<dyn Model>),
}

impl FieldValue<'_> {
    /// Borrows the value regardless of how it was obtained.
    #[inline]
    pub fn as_model(&self) -> &dyn Model {
        match self {
            FieldValue::Borrowed(model) => *model,
            FieldValue::Owned(model) => &**model,
        }
    }
}

// -----------------------------------------------------------------------------
// FieldInfo

/// A named field: its wire name, value type, and accessor pair.
///
/// Field order in a descriptor is declaration order, and the encoder emits
/// members in exactly that order.
#[derive(Clone, Debug)]
pub struct FieldInfo {
    name: &'static str,
    ty: TypeRef,
    getter: Getter,
    setter: Setter,
}

impl FieldInfo {
    /// Creates a new [`FieldInfo`].
    #[inline]
    pub fn new(name: &'static str, ty: TypeRef, getter: Getter, setter: Setter) -> Self {
        Self {
            name,
            ty,
            getter,
            setter,
        }
    }

    /// Returns the member name this field reads and writes.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Resolves the field's value-type descriptor.
    #[inline]
    pub fn ty(&self) -> &'static Descriptor {
        self.ty.get()
    }

    /// Reads the field's current value out of `host`.
    #[inline]
    pub fn get<'a>(&self, host: &'a dyn Model) -> FieldValue<'a> {
        match self.getter {
            Getter::Slot(get) => FieldValue::Borrowed(get(host)),
            Getter::Computed(get) => FieldValue::Owned(get(host)),
        }
    }

    /// Writes `value` into `host` through the field's setter.
    #[inline]
    pub fn set(
        &self,
        host: &mut dyn Model,
        value: Box<dyn Model>,
    ) -> Result<(), Box<dyn Model>> {
        (self.setter)(host, value)
    }
}
