//! The JSON codec: descriptor-driven encoding and decoding.
//!
//! Encoding streams through a [`serde_core::Serialize`] driver so that
//! colliding field/entry member names are written verbatim (a value tree
//! would silently merge them). Decoding parses the input into an ordered
//! member tree first and walks it with the target descriptor, so every
//! failure surfaces as a typed [`Error`](crate::Error) instead of a
//! stringly serde error.

mod de;
mod key;
mod ser;

pub use de::{from_json, from_json_dynamic};
pub use ser::to_json;
