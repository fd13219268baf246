use serde_core::ser::{self, SerializeMap, SerializeSeq};
use serde_core::{Serialize, Serializer};

use crate::info::Descriptor;
use crate::json::key::encode_key;
use crate::{Error, Model, View};

// -----------------------------------------------------------------------------
// Entry point

/// Encodes a value as JSON text.
///
/// The source value is read-only throughout; nothing is cached or mutated.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use mapform_reflect::to_json;
///
/// let mut map = BTreeMap::new();
/// map.insert(1_i32, "one".to_string());
///
/// assert_eq!(to_json(&map).unwrap(), r#"{"1":"one"}"#);
/// ```
pub fn to_json(value: &dyn Model) -> Result<String, Error> {
    serde_json::to_string(&JsonEmit { value }).map_err(Error::Emit)
}

// -----------------------------------------------------------------------------
// JsonEmit

/// Serializer driver for type-erased values.
///
/// Dispatches on the value's [`View`]:
/// - records emit one member per named field, in declaration order;
/// - mappings emit named-field members first, then one member per entry in
///   the mapping's natural order, with the member name produced by the key
///   codec. No de-duplication is performed: if a field name and an entry
///   key collide, both members are written;
/// - sequences emit arrays, leaves go through their erased serde impl.
pub(crate) struct JsonEmit<'a> {
    pub value: &'a dyn Model,
}

impl Serialize for JsonEmit<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value.view() {
            View::Leaf(leaf) => leaf.serialize(serializer),
            View::Record(record) => {
                let Descriptor::Record(info) = record.descriptor() else {
                    return Err(classification_mismatch::<S>(record.descriptor(), "record"));
                };

                let mut state = serializer.serialize_map(Some(info.fields().len()))?;
                for field in info.fields() {
                    let value = field.get(record);
                    state.serialize_entry(
                        field.name(),
                        &JsonEmit {
                            value: value.as_model(),
                        },
                    )?;
                }
                state.end()
            }
            View::Mapping(mapping) => {
                let Descriptor::Mapping(info) = self.value.descriptor() else {
                    return Err(classification_mismatch::<S>(self.value.descriptor(), "mapping"));
                };

                let mut state =
                    serializer.serialize_map(Some(info.fields().len() + mapping.len()))?;

                for field in info.fields() {
                    let value = field.get(self.value);
                    state.serialize_entry(
                        field.name(),
                        &JsonEmit {
                            value: value.as_model(),
                        },
                    )?;
                }

                for (key, value) in mapping.entries() {
                    let name = encode_key(key).map_err(ser::Error::custom)?;
                    state.serialize_entry(&name, &JsonEmit { value })?;
                }

                state.end()
            }
            View::Sequence(sequence) => {
                let mut state = serializer.serialize_seq(Some(sequence.len()))?;
                for element in sequence.elements() {
                    state.serialize_element(&JsonEmit { value: element })?;
                }
                state.end()
            }
        }
    }
}

fn classification_mismatch<S: Serializer>(descriptor: &Descriptor, surface: &str) -> S::Error {
    ser::Error::custom(format!(
        "value of type `{}` classifies as a {surface} but its descriptor disagrees",
        descriptor.type_name(),
    ))
}
