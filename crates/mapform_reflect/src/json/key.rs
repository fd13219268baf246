//! The key codec: arbitrary key types in the member-name position.
//!
//! JSON object member names are strings, full stop. Three key families map
//! onto that position:
//!
//! - string-shaped leaves (strings, identifiers with a canonical text form)
//!   use their inner text verbatim;
//! - other leaves (numbers, booleans) use their JSON fragment text, which
//!   is already their canonical text form;
//! - composite keys use their *entire JSON fragment* as the member name,
//!   re-escaped by the emitter as any string is. Only a full JSON round
//!   trip guarantees every field of a composite key survives, so this takes
//!   precedence over any display-style rendering.

use log::trace;
use serde_json::Value;

use crate::info::Descriptor;
use crate::json::de::decode_value;
use crate::json::ser::JsonEmit;
use crate::{Error, Model};

/// Encodes a mapping key into its member-name string.
pub(crate) fn encode_key(key: &dyn Model) -> Result<String, Error> {
    let fragment = serde_json::to_string(&JsonEmit { value: key }).map_err(Error::Emit)?;

    if matches!(key.descriptor(), Descriptor::Leaf(_)) && fragment.starts_with('"') {
        // A string-shaped leaf keys the object with its unescaped inner text.
        let inner: String = serde_json::from_str(&fragment).map_err(Error::Emit)?;
        return Ok(inner);
    }

    Ok(fragment)
}

/// Decodes a member-name string back into a boxed key of the given type.
///
/// Leaf keys try the name as a JSON fragment first (numbers, booleans,
/// nested-fragment strings), then fall back to treating the name as the
/// text of a string-shaped key. Composite keys parse the name as a complete
/// JSON document and decode it through the engine.
///
/// Any failure is a [`Error::KeyDecode`]; it propagates to the caller of
/// the decode, never silently dropping the member.
pub(crate) fn decode_key(
    name: &str,
    descriptor: &'static Descriptor,
) -> Result<Box<dyn Model>, Error> {
    match descriptor {
        Descriptor::Leaf(info) => {
            if let Ok(node) = serde_json::from_str::<Value>(name) {
                if let Ok(key) = info.decode(&node) {
                    return Ok(key);
                }
            }

            trace!(
                "member name `{name}` retried as the text of a `{}` key",
                info.type_name(),
            );
            info.decode(&Value::String(name.to_owned()))
                .map_err(|_| Error::KeyDecode {
                    key_type: info.type_name(),
                    name: name.to_owned(),
                    source: None,
                })
        }
        _ => {
            let node: Value = serde_json::from_str(name).map_err(|_| Error::KeyDecode {
                key_type: descriptor.type_name(),
                name: name.to_owned(),
                source: None,
            })?;

            decode_value(descriptor, node).map_err(|source| Error::KeyDecode {
                key_type: descriptor.type_name(),
                name: name.to_owned(),
                source: Some(Box::new(source)),
            })
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{decode_key, encode_key};
    use crate::info::Described;
    use crate::{Error, Model};

    fn encoded(key: &dyn Model) -> String {
        encode_key(key).unwrap()
    }

    #[test]
    fn string_keys_are_identity() {
        assert_eq!(encoded(&String::from("plain")), "plain");
        assert_eq!(encoded(&String::from("needs \"escaping\"")), "needs \"escaping\"");
    }

    #[test]
    fn numeric_and_bool_keys_use_their_canonical_text() {
        assert_eq!(encoded(&42_i32), "42");
        assert_eq!(encoded(&true), "true");
        assert_eq!(encoded(&2.5_f64), "2.5");
    }

    #[test]
    fn leaf_keys_decode_from_their_text() {
        let key = decode_key("42", <i32 as Described>::descriptor()).unwrap();
        assert_eq!(key.take::<i32>().unwrap(), 42);

        let key = decode_key("plain", <String as Described>::descriptor()).unwrap();
        assert_eq!(key.take::<String>().unwrap(), "plain");
    }

    #[test]
    fn numeric_text_still_decodes_as_a_string_key() {
        // "1" lexes as a JSON number, but a string-keyed map owns it as text.
        let key = decode_key("1", <String as Described>::descriptor()).unwrap();
        assert_eq!(key.take::<String>().unwrap(), "1");
    }

    #[test]
    fn unparsable_text_for_a_numeric_key_is_a_key_decode_error() {
        let err = decode_key("not-a-number", <i32 as Described>::descriptor()).unwrap_err();
        assert!(matches!(err, Error::KeyDecode { .. }));
    }
}
