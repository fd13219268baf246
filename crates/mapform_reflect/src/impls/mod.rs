//! Provided [`Model`](crate::Model) implementations: scalar leaves and the
//! std containers.
//!
//! User-defined records and hybrid mappings implement the traits by hand
//! with explicit field tables; everything here is the ready-made layer
//! underneath them.

/// Implements the leaf surface (`Model` + `Leaf` + `Described`) for types
/// that serde already round-trips on its own.
macro_rules! impl_leaf {
    ($($ty:ty),* $(,)?) => {$(
        impl $crate::Model for $ty {
            #[inline]
            fn descriptor(&self) -> &'static $crate::info::Descriptor {
                <Self as $crate::info::Described>::descriptor()
            }

            #[inline]
            fn view(&self) -> $crate::View<'_> {
                $crate::View::Leaf(self)
            }

            #[inline]
            fn view_mut(&mut self) -> $crate::ViewMut<'_> {
                $crate::ViewMut::Leaf(self)
            }
        }

        impl $crate::ops::Leaf for $ty {}

        impl $crate::info::Described for $ty {
            fn descriptor() -> &'static $crate::info::Descriptor {
                static CELL: $crate::info::DescriptorCell = $crate::info::DescriptorCell::new();
                CELL.get_or_init(|| {
                    $crate::info::Descriptor::Leaf($crate::info::LeafInfo::new::<$ty>())
                })
            }
        }
    )*};
}

pub(crate) use impl_leaf;

mod collections;
mod scalars;

#[cfg(feature = "uuid")]
mod uuid;
