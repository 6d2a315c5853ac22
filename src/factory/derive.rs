//! Derived attributes.
//!
//! A derived attribute is computed from other attributes of the same record.
//! Its dependencies are declared up front, so resolution order is decided by
//! the declared edges rather than by whatever the function happens to read:
//!
//! ```
//! use cooky_cutter::{Value, config, define, derive, to_json};
//! use serde_json::json;
//!
//! let user = define(config! {
//!     "firstName" => "Bob",
//!     "fullName" => derive(
//!         |input| format!("{} {}", input["firstName"], input["lastName"]),
//!         ["firstName", "lastName"],
//!     ),
//!     // Declared after the attribute that needs it.
//!     "lastName" => "Smith",
//! });
//!
//! assert_eq!(
//!     to_json(&user.build().unwrap()),
//!     json!({"firstName": "Bob", "lastName": "Smith", "fullName": "Bob Smith"})
//! );
//! ```
//!
//! Dependencies that are themselves unresolved are resolved on demand, and a
//! dependency chain that leads back to a key already being derived fails with
//! [`FactoryError::CircularDerivation`].

use core::fmt;

extern crate alloc;
use alloc::rc::Rc;

use super::compute::Resolution;
use crate::error::{FactoryError, FactoryResult};
use crate::value::{Record, Value};

/// Function computing a derived value from its dependencies.
pub type DeriveFn = Rc<dyn Fn(&Record) -> Value>;

/// A value computed from a declared set of sibling attributes.
#[derive(Clone)]
pub struct Derived {
	dependencies: Rc<[String]>,
	derive: DeriveFn,
}

/// Declares a derived attribute.
///
/// `f` receives a record holding exactly the values of `dependencies` as they
/// exist on the result when the attribute is resolved. A dependency the
/// factory never declares is simply absent from that record.
///
/// # Arguments
///
/// * `f` - Reduces the dependent values into the derived value
/// * `dependencies` - Keys `f` reads, in resolution order
pub fn derive<F, V, I, K>(f: F, dependencies: I) -> Derived
where
	F: Fn(&Record) -> V + 'static,
	V: Into<Value>,
	I: IntoIterator<Item = K>,
	K: Into<String>,
{
	Derived {
		dependencies: dependencies.into_iter().map(Into::into).collect(),
		derive: Rc::new(move |input| f(input).into()),
	}
}

impl Derived {
	/// Keys this attribute depends on.
	pub fn dependencies(&self) -> &[String] {
		&self.dependencies
	}

	/// Resolves every dependency not yet on the result, then computes the
	/// value. Dependencies already on the result are used as-is.
	///
	/// `path` holds the keys currently being derived, outermost first, and
	/// always ends with the key this attribute is resolving.
	pub(crate) fn resolve(
		&self,
		resolution: &mut Resolution<'_>,
		path: &[String],
	) -> FactoryResult<Value> {
		for key in self.dependencies.iter() {
			if resolution.is_resolved(key) {
				continue;
			}

			if let Some(start) = path.iter().position(|visited| visited == key) {
				let cycle = path[start..].to_vec();
				tracing::debug!(key = %key, path = ?cycle, "circular derivation");
				return Err(FactoryError::CircularDerivation {
					key: key.clone(),
					path: cycle,
				});
			}

			resolution.compute(key, path)?;
		}

		let input: Record = self
			.dependencies
			.iter()
			.filter_map(|key| {
				resolution
					.result()
					.get(key)
					.map(|value| (key.clone(), value.clone()))
			})
			.collect();

		Ok((self.derive)(&input))
	}
}

impl fmt::Debug for Derived {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Derived")
			.field("dependencies", &self.dependencies)
			.finish_non_exhaustive()
	}
}
