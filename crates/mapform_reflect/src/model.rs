use core::any::{Any, TypeId};

use crate::info::Descriptor;
use crate::ops::{Leaf, Mapping, Sequence};

// -----------------------------------------------------------------------------
// Model

/// The type-erased value surface every supported type implements.
///
/// A `Model` value knows its own [`Descriptor`] and can classify itself as
/// one of the four value shapes via [`view`]/[`view_mut`]. Everything else
/// (field access, entry iteration, construction) is reached through the
/// descriptor or the shape traits, never through `Model` itself.
///
/// # Implementing
///
/// Concrete types implement this by delegating to their
/// [`Described`](crate::info::Described) impl and returning the matching
/// [`View`] variant:
///
/// ```rust,ignore
/// impl Model for Tree {
///     fn descriptor(&self) -> &'static Descriptor {
///         <Self as Described>::descriptor()
///     }
///     fn view(&self) -> View<'_> { View::Record(self) }
///     fn view_mut(&mut self) -> ViewMut<'_> { ViewMut::Record(self) }
/// }
/// ```
///
/// [`view`]: Model::view
/// [`view_mut`]: Model::view_mut
pub trait Model: Any {
    /// Returns the descriptor computed for this value's concrete type.
    fn descriptor(&self) -> &'static Descriptor;

    /// Classifies this value by shape, borrowing it.
    fn view(&self) -> View<'_>;

    /// Classifies this value by shape, borrowing it mutably.
    fn view_mut(&mut self) -> ViewMut<'_>;
}

/// An immutable, shape-classified borrow of a [`Model`] value.
pub enum View<'a> {
    /// A type with named fields only.
    Record(&'a dyn Model),
    /// A key-value container, possibly carrying named fields as well.
    Mapping(&'a dyn Mapping),
    /// An ordered container of one element type.
    Sequence(&'a dyn Sequence),
    /// A scalar handled wholesale by its serde implementation.
    Leaf(&'a dyn Leaf),
}

/// A mutable, shape-classified borrow of a [`Model`] value.
pub enum ViewMut<'a> {
    Record(&'a mut dyn Model),
    Mapping(&'a mut dyn Mapping),
    Sequence(&'a mut dyn Sequence),
    Leaf(&'a mut dyn Leaf),
}

impl dyn Model {
    /// Returns `true` if the underlying value is of type `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        <dyn Any>::type_id(self) == TypeId::of::<T>()
    }

    /// Downcasts the value to type `T` by reference.
    ///
    /// Returns `None` if the underlying value is not of type `T`.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    /// Downcasts the value to type `T` by mutable reference.
    ///
    /// Returns `None` if the underlying value is not of type `T`.
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    /// Downcasts the value to type `T`, unboxing and consuming the box.
    ///
    /// If the underlying value is not of type `T`, the box is handed back
    /// unchanged so the caller can keep routing it.
    pub fn take<T: Any>(self: Box<dyn Model>) -> Result<T, Box<dyn Model>> {
        if (*self).is::<T>() {
            let any: Box<dyn Any> = self;
            Ok(*any
                .downcast::<T>()
                .expect("type was checked before the downcast"))
        } else {
            Err(self)
        }
    }
}

impl core::fmt::Debug for dyn Model {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Model(`{}`)", self.descriptor().type_name())
    }
}

// -----------------------------------------------------------------------------
// Accessor helpers

/// Borrows the concrete host out of an accessor's type-erased argument.
///
/// Field accessors are registered per host type and only ever invoked with
/// that host, so a mismatch is a broken registration.
///
/// # Panics
///
/// Panics if `model` is not a `T`.
#[inline]
pub fn host<T: Model>(model: &dyn Model) -> &T {
    model.downcast_ref::<T>().unwrap_or_else(|| {
        panic!(
            "accessor for `{}` invoked with a host of type `{}`",
            core::any::type_name::<T>(),
            model.descriptor().type_name(),
        )
    })
}

/// Mutable counterpart of [`host`].
///
/// # Panics
///
/// Panics if `model` is not a `T`.
#[inline]
pub fn host_mut<T: Model>(model: &mut dyn Model) -> &mut T {
    let type_name = model.descriptor().type_name();
    model.downcast_mut::<T>().unwrap_or_else(|| {
        panic!(
            "accessor for `{}` invoked with a host of type `{}`",
            core::any::type_name::<T>(),
            type_name,
        )
    })
}

// -----------------------------------------------------------------------------
// Tests
