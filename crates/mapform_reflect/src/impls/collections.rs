use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use crate::info::{Described, Descriptor, GenericDescriptorCell, MappingInfo, SequenceInfo};
use crate::ops::{Mapping, Sequence};
use crate::{Model, View, ViewMut};

// -----------------------------------------------------------------------------
// HashMap

impl<K, V> Model for HashMap<K, V>
where
    K: Model + Described + Eq + Hash,
    V: Model + Described,
{
    #[inline]
    fn descriptor(&self) -> &'static Descriptor {
        <Self as Described>::descriptor()
    }

    #[inline]
    fn view(&self) -> View<'_> {
        View::Mapping(self)
    }

    #[inline]
    fn view_mut(&mut self) -> ViewMut<'_> {
        ViewMut::Mapping(self)
    }
}

impl<K, V> Described for HashMap<K, V>
where
    K: Model + Described + Eq + Hash,
    V: Model + Described,
{
    fn descriptor() -> &'static Descriptor {
        static CELL: GenericDescriptorCell = GenericDescriptorCell::new();
        CELL.get_or_insert::<Self>(|| {
            Descriptor::Mapping(
                MappingInfo::new::<Self, K, V>().with_constructor(|| Box::new(Self::new())),
            )
        })
    }
}

impl<K, V> Mapping for HashMap<K, V>
where
    K: Model + Described + Eq + Hash,
    V: Model + Described,
{
    #[inline]
    fn len(&self) -> usize {
        Self::len(self)
    }

    #[inline]
    fn entries(&self) -> Box<dyn Iterator<Item = (&dyn Model, &dyn Model)> + '_> {
        Box::new(self.iter().map(|(k, v)| (k as &dyn Model, v as &dyn Model)))
    }

    fn insert_boxed(
        &mut self,
        key: Box<dyn Model>,
        value: Box<dyn Model>,
    ) -> Result<Option<Box<dyn Model>>, (Box<dyn Model>, Box<dyn Model>)> {
        let key = match key.take::<K>() {
            Ok(key) => key,
            Err(key) => return Err((key, value)),
        };
        let value = match value.take::<V>() {
            Ok(value) => value,
            Err(value) => return Err((Box::new(key), value)),
        };

        Ok(Self::insert(self, key, value).map(|old| Box::new(old) as Box<dyn Model>))
    }
}

// -----------------------------------------------------------------------------
// BTreeMap

impl<K, V> Model for BTreeMap<K, V>
where
    K: Model + Described + Ord,
    V: Model + Described,
{
    #[inline]
    fn descriptor(&self) -> &'static Descriptor {
        <Self as Described>::descriptor()
    }

    #[inline]
    fn view(&self) -> View<'_> {
        View::Mapping(self)
    }

    #[inline]
    fn view_mut(&mut self) -> ViewMut<'_> {
        ViewMut::Mapping(self)
    }
}

impl<K, V> Described for BTreeMap<K, V>
where
    K: Model + Described + Ord,
    V: Model + Described,
{
    fn descriptor() -> &'static Descriptor {
        static CELL: GenericDescriptorCell = GenericDescriptorCell::new();
        CELL.get_or_insert::<Self>(|| {
            Descriptor::Mapping(
                MappingInfo::new::<Self, K, V>().with_constructor(|| Box::new(Self::new())),
            )
        })
    }
}

impl<K, V> Mapping for BTreeMap<K, V>
where
    K: Model + Described + Ord,
    V: Model + Described,
{
    #[inline]
    fn len(&self) -> usize {
        Self::len(self)
    }

    #[inline]
    fn entries(&self) -> Box<dyn Iterator<Item = (&dyn Model, &dyn Model)> + '_> {
        Box::new(self.iter().map(|(k, v)| (k as &dyn Model, v as &dyn Model)))
    }

    fn insert_boxed(
        &mut self,
        key: Box<dyn Model>,
        value: Box<dyn Model>,
    ) -> Result<Option<Box<dyn Model>>, (Box<dyn Model>, Box<dyn Model>)> {
        let key = match key.take::<K>() {
            Ok(key) => key,
            Err(key) => return Err((key, value)),
        };
        let value = match value.take::<V>() {
            Ok(value) => value,
            Err(value) => return Err((Box::new(key), value)),
        };

        Ok(Self::insert(self, key, value).map(|old| Box::new(old) as Box<dyn Model>))
    }
}

// -----------------------------------------------------------------------------
// Vec

impl<T> Model for Vec<T>
where
    T: Model + Described,
{
    #[inline]
    fn descriptor(&self) -> &'static Descriptor {
        <Self as Described>::descriptor()
    }

    #[inline]
    fn view(&self) -> View<'_> {
        View::Sequence(self)
    }

    #[inline]
    fn view_mut(&mut self) -> ViewMut<'_> {
        ViewMut::Sequence(self)
    }
}

impl<T> Described for Vec<T>
where
    T: Model + Described,
{
    fn descriptor() -> &'static Descriptor {
        static CELL: GenericDescriptorCell = GenericDescriptorCell::new();
        CELL.get_or_insert::<Self>(|| {
            Descriptor::Sequence(
                SequenceInfo::new::<Self, T>().with_constructor(|| Box::new(Self::new())),
            )
        })
    }
}

impl<T> Sequence for Vec<T>
where
    T: Model + Described,
{
    #[inline]
    fn len(&self) -> usize {
        Self::len(self)
    }

    #[inline]
    fn elements(&self) -> Box<dyn Iterator<Item = &dyn Model> + '_> {
        Box::new(self.iter().map(|element| element as &dyn Model))
    }

    fn push_boxed(&mut self, element: Box<dyn Model>) -> Result<(), Box<dyn Model>> {
        self.push(element.take::<T>()?);
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::ops::Mapping;
    use crate::{from_json, to_json};

    #[test]
    fn btree_map_round_trips_in_key_order() {
        let mut map = BTreeMap::new();
        map.insert("b".to_string(), 2_i32);
        map.insert("a".to_string(), 1_i32);

        let text = to_json(&map).unwrap();
        assert_eq!(text, r#"{"a":1,"b":2}"#);
        assert_eq!(from_json::<BTreeMap<String, i32>>(&text).unwrap(), map);
    }

    #[test]
    fn vec_round_trips() {
        let values = vec![1_i64, 2, 3];
        let text = to_json(&values).unwrap();
        assert_eq!(text, "[1,2,3]");
        assert_eq!(from_json::<Vec<i64>>(&text).unwrap(), values);
    }

    #[test]
    fn insert_boxed_rejects_foreign_types() {
        let mut map = BTreeMap::<String, i32>::new();

        let rejected = map
            .insert_boxed(Box::new(1_u8), Box::new(2_i32))
            .unwrap_err();
        assert!(rejected.0.is::<u8>());

        let rejected = map
            .insert_boxed(Box::new("k".to_string()), Box::new(2_u8))
            .unwrap_err();
        assert!(rejected.0.is::<String>());
        assert!(rejected.1.is::<u8>());
        assert!(map.is_empty());
    }
}
