//! Convenience re-exports for common usage.
//!
//! # Example
//!
//! ```
//! use cooky_cutter::prelude::*;
//!
//! let user = define(config! { "id" => Attribute::sequence() });
//! assert_eq!(user.build().unwrap()["id"].as_u64(), Some(1));
//! ```

// Error types
pub use crate::error::{FactoryError, FactoryResult};

// Factory types
pub use crate::factory::{ArrayFactory, Attribute, Config, Derived, Factory};

// Factory functions
pub use crate::factory::{array, array_with, define, derive, extend, random, sequence};

// Values
pub use crate::value::{Record, Value, to_json};

// Settings
pub use crate::settings::{Settings, configure, get_config};

pub use crate::config;
