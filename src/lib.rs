//! Declarative test-fixture factories.
//!
//! This crate builds record generators from a declarative description of each
//! attribute, in the spirit of Factory Boy:
//!
//! - **Factories**: [`define`] a [`Factory`] once, call it as often as needed
//! - **Overrides**: replace any attribute for a single call
//! - **Sequences**: attributes computed from the 1-based invocation count
//! - **Derived attributes**: values computed from sibling attributes, in any
//!   declaration order, with circular derivations reported as errors
//! - **Composition**: nested factories, [`array`] factories and [`extend`]
//!
//! # Quick Start
//!
//! ```
//! use cooky_cutter::prelude::*;
//! use serde_json::json;
//!
//! let model = define(config! { "id" => Attribute::sequence() });
//!
//! let user = extend(&model, config! {
//!     "firstName" => "Bob",
//!     "fullName" => derive(
//!         |input| format!("{} {}", input["firstName"], input["lastName"]),
//!         ["firstName", "lastName"],
//!     ),
//!     "lastName" => Attribute::indexed(|i| format!("Smith #{}", i)),
//! });
//!
//! let post = define(config! {
//!     "title" => "The Best Post Ever",
//!     "author" => &user,
//!     "comments" => array(&user, 2),
//! });
//!
//! assert_eq!(
//!     to_json(&user.build()?),
//!     json!({"id": 1, "firstName": "Bob", "lastName": "Smith #1", "fullName": "Bob Smith #1"})
//! );
//!
//! let record = post.build()?;
//! assert_eq!(record["author"].as_object().unwrap()["id"].as_u64(), Some(2));
//! assert_eq!(record["comments"].as_array().unwrap().len(), 2);
//! # Ok::<(), cooky_cutter::FactoryError>(())
//! ```
//!
//! # Architecture
//!
//! - [`Attribute`](factory::Attribute) - the five ways a key can be produced
//! - [`Config`](factory::Config) - ordered key to attribute mapping, also used
//!   for overrides
//! - [`Factory`](factory::Factory) - generator handle with its own invocation
//!   counter
//! - [`Value`](value::Value) / [`Record`](value::Record) - generated data;
//!   arrays and objects are shared handles
//! - [`Settings`](settings::Settings) - whether hard-coded object and array
//!   literals warn or fail
//!
//! # Hard-coded literals
//!
//! An object or array literal in a factory configuration is shared by every
//! record the factory produces. Resolving one logs a warning through
//! `tracing`; with `error_on_hard_coded_values` enabled it fails the call
//! instead. Values passed as overrides are never reported.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod factory;
pub mod prelude;
pub mod settings;
pub mod value;

// Re-export commonly used types at crate root
pub use error::{FactoryError, FactoryResult, LiteralKind};
pub use factory::{
	ArrayFactory, ArraySize, Attribute, AttributeKind, Config, Derived, Factory, array,
	array_with, classify, define, derive, extend, random, sequence,
};
pub use settings::{Settings, configure, get_config, reset_config};
pub use value::{Record, Value, to_json};
