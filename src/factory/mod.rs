//! Factory definition, composition and attribute resolution.
//!
//! - [`define`] builds a [`Factory`] from a [`Config`]
//! - [`extend`] layers a [`Config`] over an existing factory
//! - [`derive`] declares an attribute computed from sibling attributes
//! - [`array`] repeats a factory to produce a list of records
//! - [`sequence`] and [`random`] are ready-made indexed values

pub mod array;
pub mod attribute;
mod compute;
pub mod define;
pub mod derive;
pub mod extend;
pub mod helpers;

pub use array::{ArrayFactory, ArraySize, DEFAULT_ARRAY_SIZE, array, array_with};
pub use attribute::{Attribute, AttributeKind, Config, IndexedFn, classify};
pub use define::{Factory, define};
pub use derive::{DeriveFn, Derived, derive};
pub use extend::extend;
pub use helpers::{RANDOM_MAX, random, sequence};
