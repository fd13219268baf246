//! Round-trip coverage for the hard dictionary shapes: hybrid mappings with
//! named fields over entry storage, maps keyed by non-strings and by whole
//! records, and recursive trees.

use std::collections::{BTreeMap, HashMap};

use mapform_reflect::info::{
    Described, Descriptor, DescriptorCell, FieldInfo, Getter, MappingInfo, RecordInfo, TypeRef,
};
use mapform_reflect::ops::Mapping;
use mapform_reflect::{Error, Model, View, ViewMut, from_json, host, host_mut, to_json};

use uuid::Uuid;

// -----------------------------------------------------------------------------
// Fixtures

macro_rules! impl_record_model {
    ($ty:ty) => {
        impl Model for $ty {
            fn descriptor(&self) -> &'static Descriptor {
                <Self as Described>::descriptor()
            }
            fn view(&self) -> View<'_> {
                View::Record(self)
            }
            fn view_mut(&mut self) -> ViewMut<'_> {
                ViewMut::Record(self)
            }
        }
    };
}

/// A string-to-string property bag with a numeric `id` riding on top of the
/// entry storage: the field reads and writes the `"id"` entry, so field
/// state and entry state share one backing store while staying two distinct
/// things at the JSON level.
#[derive(Debug, Default, Clone, PartialEq)]
struct PropertyBag {
    entries: BTreeMap<String, String>,
}

impl PropertyBag {
    fn sample(i: i32) -> Self {
        let mut bag = Self::default();
        bag.set_id(i);
        bag.entries.insert(i.to_string(), i.to_string());
        bag
    }

    fn id(&self) -> i32 {
        self.entries
            .get("id")
            .and_then(|text| text.parse().ok())
            .unwrap_or(0)
    }

    fn set_id(&mut self, id: i32) {
        self.entries.insert("id".to_string(), id.to_string());
    }
}

impl Model for PropertyBag {
    fn descriptor(&self) -> &'static Descriptor {
        <Self as Described>::descriptor()
    }
    fn view(&self) -> View<'_> {
        View::Mapping(self)
    }
    fn view_mut(&mut self) -> ViewMut<'_> {
        ViewMut::Mapping(self)
    }
}

impl Mapping for PropertyBag {
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&dyn Model, &dyn Model)> + '_> {
        Box::new(
            self.entries
                .iter()
                .map(|(k, v)| (k as &dyn Model, v as &dyn Model)),
        )
    }

    fn insert_boxed(
        &mut self,
        key: Box<dyn Model>,
        value: Box<dyn Model>,
    ) -> Result<Option<Box<dyn Model>>, (Box<dyn Model>, Box<dyn Model>)> {
        let key = match key.take::<String>() {
            Ok(key) => key,
            Err(key) => return Err((key, value)),
        };
        let value = match value.take::<String>() {
            Ok(value) => value,
            Err(value) => return Err((Box::new(key), value)),
        };
        Ok(self
            .entries
            .insert(key, value)
            .map(|old| Box::new(old) as Box<dyn Model>))
    }
}

impl Described for PropertyBag {
    fn descriptor() -> &'static Descriptor {
        static CELL: DescriptorCell = DescriptorCell::new();
        CELL.get_or_init(|| {
            Descriptor::Mapping(
                MappingInfo::new::<PropertyBag, String, String>()
                    .with_fields(vec![FieldInfo::new(
                        "id",
                        TypeRef::of::<i32>(),
                        Getter::Computed(|m| Box::new(host::<PropertyBag>(m).id())),
                        |m, v| {
                            let id = v.take::<i32>()?;
                            host_mut::<PropertyBag>(m).set_id(id);
                            Ok(())
                        },
                    )])
                    .with_constructor(|| Box::new(PropertyBag::default())),
            )
        })
    }
}

/// A recursive record: every node holds a label and its children.
#[derive(Debug, Default, Clone, PartialEq)]
struct Tree {
    label: String,
    children: Vec<Tree>,
}

impl Tree {
    fn leaf(label: &str) -> Self {
        Self {
            label: label.to_string(),
            children: Vec::new(),
        }
    }

    fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(Tree::depth)
            .max()
            .unwrap_or(0)
    }
}

impl_record_model!(Tree);

impl Described for Tree {
    fn descriptor() -> &'static Descriptor {
        static CELL: DescriptorCell = DescriptorCell::new();
        CELL.get_or_init(|| {
            Descriptor::Record(
                RecordInfo::new::<Tree>(vec![
                    FieldInfo::new(
                        "label",
                        TypeRef::of::<String>(),
                        Getter::Slot(|m| &host::<Tree>(m).label),
                        |m, v| {
                            host_mut::<Tree>(m).label = v.take::<String>()?;
                            Ok(())
                        },
                    ),
                    FieldInfo::new(
                        "children",
                        TypeRef::of::<Vec<Tree>>(),
                        Getter::Slot(|m| &host::<Tree>(m).children),
                        |m, v| {
                            host_mut::<Tree>(m).children = v.take::<Vec<Tree>>()?;
                            Ok(())
                        },
                    ),
                ])
                .with_constructor(|| Box::new(Tree::default())),
            )
        })
    }
}

/// A composite key: a whole record in the member-name position.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
struct RouteKey {
    tag: String,
    seq: i32,
}

impl_record_model!(RouteKey);

impl Described for RouteKey {
    fn descriptor() -> &'static Descriptor {
        static CELL: DescriptorCell = DescriptorCell::new();
        CELL.get_or_init(|| {
            Descriptor::Record(
                RecordInfo::new::<RouteKey>(vec![
                    FieldInfo::new(
                        "tag",
                        TypeRef::of::<String>(),
                        Getter::Slot(|m| &host::<RouteKey>(m).tag),
                        |m, v| {
                            host_mut::<RouteKey>(m).tag = v.take::<String>()?;
                            Ok(())
                        },
                    ),
                    FieldInfo::new(
                        "seq",
                        TypeRef::of::<i32>(),
                        Getter::Slot(|m| &host::<RouteKey>(m).seq),
                        |m, v| {
                            host_mut::<RouteKey>(m).seq = v.take::<i32>()?;
                            Ok(())
                        },
                    ),
                ])
                .with_constructor(|| Box::new(RouteKey::default())),
            )
        })
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Payload {
    p1: String,
    p2: String,
}

impl_record_model!(Payload);

impl Described for Payload {
    fn descriptor() -> &'static Descriptor {
        static CELL: DescriptorCell = DescriptorCell::new();
        CELL.get_or_init(|| {
            Descriptor::Record(
                RecordInfo::new::<Payload>(vec![
                    FieldInfo::new(
                        "p1",
                        TypeRef::of::<String>(),
                        Getter::Slot(|m| &host::<Payload>(m).p1),
                        |m, v| {
                            host_mut::<Payload>(m).p1 = v.take::<String>()?;
                            Ok(())
                        },
                    ),
                    FieldInfo::new(
                        "p2",
                        TypeRef::of::<String>(),
                        Getter::Slot(|m| &host::<Payload>(m).p2),
                        |m, v| {
                            host_mut::<Payload>(m).p2 = v.take::<String>()?;
                            Ok(())
                        },
                    ),
                ])
                .with_constructor(|| Box::new(Payload::default())),
            )
        })
    }
}

/// A record holding a composite-keyed map.
#[derive(Debug, Default, Clone, PartialEq)]
struct Registry {
    listing: HashMap<RouteKey, Payload>,
}

impl_record_model!(Registry);

impl Described for Registry {
    fn descriptor() -> &'static Descriptor {
        static CELL: DescriptorCell = DescriptorCell::new();
        CELL.get_or_init(|| {
            Descriptor::Record(
                RecordInfo::new::<Registry>(vec![FieldInfo::new(
                    "listing",
                    TypeRef::of::<HashMap<RouteKey, Payload>>(),
                    Getter::Slot(|m| &host::<Registry>(m).listing),
                    |m, v| {
                        host_mut::<Registry>(m).listing = v.take::<HashMap<RouteKey, Payload>>()?;
                        Ok(())
                    },
                )])
                .with_constructor(|| Box::new(Registry::default())),
            )
        })
    }
}

/// A record holding a string-keyed map of records.
#[derive(Debug, Default, Clone, PartialEq)]
struct Directory {
    listing: HashMap<String, Payload>,
}

impl_record_model!(Directory);

impl Described for Directory {
    fn descriptor() -> &'static Descriptor {
        static CELL: DescriptorCell = DescriptorCell::new();
        CELL.get_or_init(|| {
            Descriptor::Record(
                RecordInfo::new::<Directory>(vec![FieldInfo::new(
                    "listing",
                    TypeRef::of::<HashMap<String, Payload>>(),
                    Getter::Slot(|m| &host::<Directory>(m).listing),
                    |m, v| {
                        host_mut::<Directory>(m).listing = v.take::<HashMap<String, Payload>>()?;
                        Ok(())
                    },
                )])
                .with_constructor(|| Box::new(Directory::default())),
            )
        })
    }
}

// -----------------------------------------------------------------------------
// Hybrid mapping: named fields over entry storage

#[test]
fn hybrid_emits_fields_before_entries_without_deduplication() {
    let bag = PropertyBag::sample(1);

    // One member per named field first, then one per entry. The `id` field
    // and the `"id"` entry collide by name and both are written.
    let text = to_json(&bag).unwrap();
    assert_eq!(text, r#"{"id":1,"1":"1","id":"1"}"#);
}

#[test]
fn hybrid_round_trips_to_identical_text() {
    let bag = PropertyBag::sample(1);

    let text = to_json(&bag).unwrap();
    let back: PropertyBag = from_json(&text).unwrap();
    assert_eq!(back, bag);

    assert_eq!(to_json(&back).unwrap(), text);
}

#[test]
fn hybrid_decode_routes_members_to_field_and_entries() {
    let bag: PropertyBag = from_json(r#"{"id":"1","1":"1"}"#).unwrap();

    assert_eq!(bag.id(), 1);
    assert_eq!(bag.entries.get("1").map(String::as_str), Some("1"));
    assert_eq!(bag, PropertyBag::sample(1));
}

#[test]
fn list_of_hybrids_round_trips() {
    let bags = vec![PropertyBag::sample(1), PropertyBag::sample(2)];

    let text = to_json(&bags).unwrap();
    assert_eq!(
        text,
        r#"[{"id":1,"1":"1","id":"1"},{"id":2,"2":"2","id":"2"}]"#
    );

    let back: Vec<PropertyBag> = from_json(&text).unwrap();
    assert_eq!(back, bags);
    assert_eq!(to_json(&back).unwrap(), text);
}

#[test]
fn map_of_hybrids_round_trips() {
    let mut model = BTreeMap::new();
    model.insert("A".to_string(), PropertyBag::sample(1));
    model.insert("B".to_string(), PropertyBag::sample(2));

    let text = to_json(&model).unwrap();
    assert_eq!(
        text,
        r#"{"A":{"id":1,"1":"1","id":"1"},"B":{"id":2,"2":"2","id":"2"}}"#
    );

    let back: BTreeMap<String, PropertyBag> = from_json(&text).unwrap();
    assert_eq!(back, model);
    assert_eq!(to_json(&back).unwrap(), text);
}

// -----------------------------------------------------------------------------
// Non-string keys

#[test]
fn uuid_keys_use_their_canonical_text_form() {
    let id: Uuid = "3fa85f64-5717-4562-b3fc-2c963f66afa6".parse().unwrap();
    let mut model = HashMap::new();
    model.insert(id, "test".to_string());

    let text = to_json(&model).unwrap();
    assert_eq!(
        text,
        r#"{"3fa85f64-5717-4562-b3fc-2c963f66afa6":"test"}"#
    );

    let back: HashMap<Uuid, String> = from_json(&text).unwrap();
    assert_eq!(back, model);
    assert_eq!(back.keys().next(), Some(&id));
    assert_eq!(to_json(&back).unwrap(), text);
}

#[test]
fn integer_keys_round_trip_exactly() {
    let mut model = BTreeMap::new();
    model.insert(-3_i64, "low".to_string());
    model.insert(10_i64, "high".to_string());

    let text = to_json(&model).unwrap();
    assert_eq!(text, r#"{"-3":"low","10":"high"}"#);
    assert_eq!(from_json::<BTreeMap<i64, String>>(&text).unwrap(), model);
}

#[test]
fn garbage_member_name_for_an_integer_key_fails() {
    let err = from_json::<BTreeMap<i64, String>>(r#"{"ten":"high"}"#).unwrap_err();
    assert!(matches!(err, Error::KeyDecode { .. }));
}

// -----------------------------------------------------------------------------
// Composite keys

#[test]
fn composite_key_is_the_nested_json_fragment() {
    let mut listing = HashMap::new();
    listing.insert(
        RouteKey {
            tag: "probe".to_string(),
            seq: 1,
        },
        Payload {
            p1: "1".to_string(),
            p2: "2".to_string(),
        },
    );

    let text = to_json(&listing).unwrap();
    assert_eq!(
        text,
        r#"{"{\"tag\":\"probe\",\"seq\":1}":{"p1":"1","p2":"2"}}"#
    );

    // The nested fragment is escaped into a single well-formed member name.
    let reparsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(reparsed.as_object().unwrap().len(), 1);
    assert!(
        reparsed
            .as_object()
            .unwrap()
            .contains_key(r#"{"tag":"probe","seq":1}"#)
    );
}

#[test]
fn composite_keyed_map_in_a_record_round_trips() {
    let mut model = Registry::default();
    model.listing.insert(
        RouteKey {
            tag: "probe".to_string(),
            seq: 1,
        },
        Payload {
            p1: "1".to_string(),
            p2: "2".to_string(),
        },
    );

    let text = to_json(&model).unwrap();
    let back: Registry = from_json(&text).unwrap();
    assert_eq!(back, model);
    assert_eq!(to_json(&back).unwrap(), text);
}

#[test]
fn string_keyed_map_of_records_in_a_record_round_trips() {
    let mut model = Directory::default();
    model.listing.insert(
        "key1".to_string(),
        Payload {
            p1: "1".to_string(),
            p2: "2".to_string(),
        },
    );

    let text = to_json(&model).unwrap();
    assert_eq!(
        text,
        r#"{"listing":{"key1":{"p1":"1","p2":"2"}}}"#
    );

    let back: Directory = from_json(&text).unwrap();
    assert_eq!(back, model);
    assert_eq!(to_json(&back).unwrap(), text);
}

// -----------------------------------------------------------------------------
// Recursive trees

#[test]
fn tree_round_trips_to_identical_text() {
    let original = Tree {
        label: "root".to_string(),
        children: vec![Tree::leaf("foo"), Tree::leaf("bar"), Tree::leaf("baz")],
    };

    let text = to_json(&original).unwrap();
    assert_eq!(
        text,
        r#"{"label":"root","children":[{"label":"foo","children":[]},{"label":"bar","children":[]},{"label":"baz","children":[]}]}"#
    );

    let back: Tree = from_json(&text).unwrap();
    assert_eq!(back, original);
    assert_eq!(back.depth(), original.depth());
    assert_eq!(back.children.len(), 3);
    assert_eq!(to_json(&back).unwrap(), text);
}

// -----------------------------------------------------------------------------
// Failure behavior

#[test]
fn truncated_input_is_malformed_json_and_yields_nothing() {
    let err = from_json::<PropertyBag>(r#"{"id":"1","#).unwrap_err();
    assert!(matches!(err, Error::MalformedJson(_)));
}

#[test]
fn well_formed_but_wrong_shape_is_not_malformed_json() {
    let err = from_json::<Tree>(r#"[1,2,3]"#).unwrap_err();
    assert!(matches!(err, Error::ValueDecode { .. }));
}
