#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use mapform_reflect as reflect;

pub use mapform_reflect::{Described, Model, from_json, from_json_dynamic, to_json};
