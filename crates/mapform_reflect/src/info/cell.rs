//! Containers for static storage of descriptors.
//!
//! Descriptors are a pure function of type shape, so they are computed once
//! and cached for the lifetime of the process. A descriptor is always
//! constructed completely before it is published, and is immutable
//! afterward, so readers never need a lock after the first access.

use core::any::{Any, TypeId};
use std::collections::BTreeMap;
use std::sync::{OnceLock, PoisonError, RwLock};

use log::trace;

use crate::info::Descriptor;

// -----------------------------------------------------------------------------
// DescriptorCell

/// Static descriptor storage for a non-generic type.
///
/// Lives in a function-local `static` inside
/// [`Described::descriptor`](crate::info::Described::descriptor); the inner
/// [`OnceLock`] makes first-time population safe against concurrent callers.
pub struct DescriptorCell(OnceLock<Descriptor>);

impl DescriptorCell {
    /// Creates an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored descriptor, computing it on first access.
    #[inline]
    pub fn get_or_init<F>(&self, f: F) -> &Descriptor
    where
        F: FnOnce() -> Descriptor,
    {
        self.0.get_or_init(f)
    }
}

// -----------------------------------------------------------------------------
// GenericDescriptorCell

/// Static descriptor storage for a generic type.
///
/// A `static` inside a generic function is shared by every instantiation,
/// so generic containers key their descriptors by `TypeId` instead. Entries
/// are leaked on insertion; the table only ever grows by one immutable
/// descriptor per distinct instantiation.
pub struct GenericDescriptorCell(RwLock<BTreeMap<TypeId, &'static Descriptor>>);

impl GenericDescriptorCell {
    /// Creates an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(BTreeMap::new()))
    }

    /// Returns the descriptor stored for `G`, computing it on first access.
    #[inline]
    pub fn get_or_insert<G: Any + ?Sized>(
        &self,
        f: impl FnOnce() -> Descriptor,
    ) -> &'static Descriptor {
        self.get_or_insert_by_id(TypeId::of::<G>(), f)
    }

    fn get_or_insert_by_id(
        &self,
        type_id: TypeId,
        f: impl FnOnce() -> Descriptor,
    ) -> &'static Descriptor {
        if let Some(descriptor) = self
            .0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
        {
            return descriptor;
        }

        // Computed outside the write lock; a racing first accessor may do
        // the same work, and whichever publishes first wins.
        let descriptor = f();

        let mut table = self.0.write().unwrap_or_else(PoisonError::into_inner);
        *table.entry(type_id).or_insert_with(|| {
            trace!("publishing descriptor for `{}`", descriptor.type_name());
            Box::leak(Box::new(descriptor))
        })
    }
}

// -----------------------------------------------------------------------------
// Tests
