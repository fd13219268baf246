use thiserror::Error as ThisError;

/// Everything that can go wrong while encoding or decoding.
///
/// The variants keep three situations apart, because callers react to them
/// differently: input text that is not JSON at all ([`MalformedJson`]),
/// well-formed JSON that does not fit the requested type ([`ValueDecode`],
/// [`KeyDecode`], [`UnknownField`], [`FieldAssignment`]), and types the
/// engine cannot work with in the first place ([`UnsupportedType`],
/// [`MissingConstructor`]).
///
/// A failed decode never yields a partial instance, and no variant is
/// recovered from internally.
///
/// [`MalformedJson`]: Error::MalformedJson
/// [`ValueDecode`]: Error::ValueDecode
/// [`KeyDecode`]: Error::KeyDecode
/// [`UnknownField`]: Error::UnknownField
/// [`FieldAssignment`]: Error::FieldAssignment
/// [`UnsupportedType`]: Error::UnsupportedType
/// [`MissingConstructor`]: Error::MissingConstructor
#[derive(Debug, ThisError)]
pub enum Error {
    /// The type cannot be handled by the engine as registered.
    #[error("type `{type_name}` is not usable here: {reason}")]
    UnsupportedType {
        type_name: &'static str,
        reason: String,
    },

    /// An object member name did not parse back into the mapping's key type.
    #[error("member name `{name}` does not parse as key type `{key_type}`")]
    KeyDecode {
        key_type: &'static str,
        name: String,
        #[source]
        source: Option<Box<Error>>,
    },

    /// Well-formed JSON whose shape or content does not fit the target type.
    #[error("JSON {found} does not fit `{type_name}`")]
    ValueDecode {
        type_name: &'static str,
        /// The JSON kind that was actually present ("object", "string", ...).
        found: &'static str,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// A record object carried a member with no matching named field.
    #[error("no field `{member}` on record `{type_name}`")]
    UnknownField {
        type_name: &'static str,
        member: String,
    },

    /// The target type registered no parameterless constructor.
    #[error("type `{type_name}` has no parameterless constructor registered")]
    MissingConstructor { type_name: &'static str },

    /// A named field's setter rejected the decoded payload.
    #[error("decoded value for `{type_name}::{field}` was rejected by its setter")]
    FieldAssignment {
        type_name: &'static str,
        field: &'static str,
    },

    /// The input text is not valid JSON. Propagated from the parser unchanged.
    #[error("malformed JSON input")]
    MalformedJson(#[source] serde_json::Error),

    /// The JSON emitter failed while rendering output text.
    #[error("JSON emission failed")]
    Emit(#[source] serde_json::Error),
}
