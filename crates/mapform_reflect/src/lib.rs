#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Modules

mod error;
mod model;

pub mod impls;
pub mod info;
pub mod json;
pub mod ops;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use error::Error;
pub use info::Described;
pub use json::{from_json, from_json_dynamic, to_json};
pub use model::{Model, View, ViewMut, host, host_mut};
