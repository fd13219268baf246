use log::trace;
use serde_json::Value;

use crate::info::{Described, Descriptor, FieldInfo};
use crate::json::key::decode_key;
use crate::{Error, Model, ViewMut};

// -----------------------------------------------------------------------------
// Entry points

/// Decodes JSON text into a fresh instance of `T`.
///
/// Fails with [`Error::MalformedJson`] before anything is constructed if
/// the text is not JSON; every later failure also yields no instance.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use mapform_reflect::from_json;
///
/// let map: BTreeMap<i32, String> = from_json(r#"{"1":"one"}"#).unwrap();
/// assert_eq!(map.get(&1).map(String::as_str), Some("one"));
/// ```
pub fn from_json<T: Model + Described>(text: &str) -> Result<T, Error> {
    let instance = from_json_dynamic(<T as Described>::descriptor(), text)?;
    instance.take::<T>().map_err(|rejected| Error::UnsupportedType {
        type_name: rejected.descriptor().type_name(),
        reason: format!(
            "its registered constructor produced a value that is not `{}`",
            core::any::type_name::<T>(),
        ),
    })
}

/// Decodes JSON text against an explicit descriptor, returning the
/// reconstructed instance type-erased.
pub fn from_json_dynamic(
    descriptor: &'static Descriptor,
    text: &str,
) -> Result<Box<dyn Model>, Error> {
    let node: Value = serde_json::from_str(text).map_err(Error::MalformedJson)?;
    decode_value(descriptor, node)
}

// -----------------------------------------------------------------------------
// Node walking

/// Decodes one parsed node against one descriptor.
///
/// The node is consumed; it exists only for the duration of the decode.
pub(crate) fn decode_value(
    descriptor: &'static Descriptor,
    node: Value,
) -> Result<Box<dyn Model>, Error> {
    match descriptor {
        Descriptor::Leaf(info) => match info.decode(&node) {
            Ok(leaf) => Ok(leaf),
            Err(primary) => {
                // A string node may carry the canonical text of a non-string
                // leaf ("1" for an integer field backed by string storage);
                // retry against its content before giving up.
                if let Value::String(text) = &node {
                    if let Ok(inner) = serde_json::from_str::<Value>(text) {
                        if let Ok(leaf) = info.decode(&inner) {
                            return Ok(leaf);
                        }
                    }
                }

                Err(Error::ValueDecode {
                    type_name: info.type_name(),
                    found: json_kind(&node),
                    source: Some(primary),
                })
            }
        },
        Descriptor::Record(info) => {
            let found = json_kind(&node);
            let Value::Object(members) = node else {
                return Err(Error::ValueDecode {
                    type_name: info.type_name(),
                    found,
                    source: None,
                });
            };

            let mut instance = instantiate(descriptor)?;
            for (name, raw) in members {
                let Some(field) = info.field(&name) else {
                    return Err(Error::UnknownField {
                        type_name: info.type_name(),
                        member: name,
                    });
                };
                assign_field(&mut *instance, info.type_name(), field, raw)?;
            }
            Ok(instance)
        }
        Descriptor::Mapping(info) => {
            let found = json_kind(&node);
            let Value::Object(members) = node else {
                return Err(Error::ValueDecode {
                    type_name: info.type_name(),
                    found,
                    source: None,
                });
            };

            let mut instance = instantiate(descriptor)?;
            for (name, raw) in members {
                // A member matching a named field routes there exclusively;
                // it is never also inserted as an entry.
                if let Some(field) = info.field(&name) {
                    trace!("`{}`: member `{name}` routed to its named field", info.type_name());
                    assign_field(&mut *instance, info.type_name(), field, raw)?;
                    continue;
                }

                let key = decode_key(&name, info.key())?;
                let value = decode_value(info.value(), raw)?;

                let ViewMut::Mapping(mapping) = instance.view_mut() else {
                    return Err(classification_mismatch(info.type_name(), "mapping"));
                };
                if mapping.insert_boxed(key, value).is_err() {
                    return Err(classification_mismatch(info.type_name(), "mapping"));
                }
            }
            Ok(instance)
        }
        Descriptor::Sequence(info) => {
            let found = json_kind(&node);
            let Value::Array(items) = node else {
                return Err(Error::ValueDecode {
                    type_name: info.type_name(),
                    found,
                    source: None,
                });
            };

            let mut instance = instantiate(descriptor)?;
            for item in items {
                let element = decode_value(info.element(), item)?;

                let ViewMut::Sequence(sequence) = instance.view_mut() else {
                    return Err(classification_mismatch(info.type_name(), "sequence"));
                };
                if sequence.push_boxed(element).is_err() {
                    return Err(classification_mismatch(info.type_name(), "sequence"));
                }
            }
            Ok(instance)
        }
    }
}

fn instantiate(descriptor: &'static Descriptor) -> Result<Box<dyn Model>, Error> {
    match descriptor.constructor() {
        Some(make) => Ok(make()),
        None => Err(Error::MissingConstructor {
            type_name: descriptor.type_name(),
        }),
    }
}

fn assign_field(
    host: &mut dyn Model,
    type_name: &'static str,
    field: &FieldInfo,
    raw: Value,
) -> Result<(), Error> {
    let value = decode_value(field.ty(), raw)?;
    field.set(host, value).map_err(|_| Error::FieldAssignment {
        type_name,
        field: field.name(),
    })
}

fn classification_mismatch(type_name: &'static str, surface: &str) -> Error {
    Error::UnsupportedType {
        type_name,
        reason: format!("its descriptor promises a {surface} its value surface does not deliver"),
    }
}

fn json_kind(node: &Value) -> &'static str {
    match node {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// -----------------------------------------------------------------------------
// Tests
