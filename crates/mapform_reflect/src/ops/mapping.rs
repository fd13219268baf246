use crate::Model;

/// Type-erased access to a key-value container's entries.
///
/// Entry storage only. A hybrid type's named fields are reached through its
/// descriptor's field table, never through this trait; the two never
/// overlap even when their JSON members do.
///
/// Keys are unique within one mapping. [`entries`](Mapping::entries) yields
/// them in the container's natural order, whatever that is: an
/// order-preserving container must iterate deterministically, a hash-style
/// map makes no promise.
pub trait Mapping: Model {
    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the mapping holds no entries.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates the entries in the mapping's natural order.
    fn entries(&self) -> Box<dyn Iterator<Item = (&dyn Model, &dyn Model)> + '_>;

    /// Inserts an entry, returning the value it replaced, if any.
    ///
    /// If either box is not of the mapping's key or value type, the pair is
    /// handed back unchanged.
    fn insert_boxed(
        &mut self,
        key: Box<dyn Model>,
        value: Box<dyn Model>,
    ) -> Result<Option<Box<dyn Model>>, (Box<dyn Model>, Box<dyn Model>)>;
}
