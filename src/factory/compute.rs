//! Attribute resolution.
//!
//! A [`Resolution`] carries everything one factory invocation needs to turn a
//! merged configuration into a record: the record being filled, the merged
//! configuration, the caller's overrides, the invocation count and the set of
//! keys already written. Derived attributes re-enter [`Resolution::compute`]
//! for their dependencies, sharing this state so no key is computed twice.

use std::backtrace::Backtrace;
use std::collections::HashSet;

use super::attribute::{Attribute, Config, classify};
use crate::error::{FactoryError, FactoryResult, LiteralKind};
use crate::settings::{Settings, get_config};
use crate::value::{Record, Value};

/// Per-invocation resolution state.
pub(crate) struct Resolution<'a> {
	values: &'a Config,
	overrides: &'a Config,
	invocation: usize,
	settings: Option<Settings>,
	result: Record,
	finalized: HashSet<String>,
}

impl<'a> Resolution<'a> {
	/// Starts a resolution that writes into `seed`.
	///
	/// A key that `values` declares is recomputed and overwrites the seeded
	/// value, even though derivations resolved before that point read the
	/// seeded one.
	pub(crate) fn new(
		values: &'a Config,
		overrides: &'a Config,
		invocation: usize,
		settings: Option<Settings>,
		seed: Record,
	) -> Self {
		Self {
			values,
			overrides,
			invocation,
			settings,
			result: seed,
			finalized: HashSet::new(),
		}
	}

	pub(crate) fn result(&self) -> &Record {
		&self.result
	}

	pub(crate) fn into_record(self) -> Record {
		self.result
	}

	/// True if a derived attribute can read `key` as-is: it is already on the
	/// result, seeded or computed, or it was visited and has no declaration.
	///
	/// A seeded key that this configuration redeclares still counts as
	/// resolved here, so derivations read the base value. [`Resolution::compute`]
	/// recomputes it afterwards regardless.
	pub(crate) fn is_resolved(&self, key: &str) -> bool {
		self.result.contains_key(key) || self.finalized.contains(key)
	}

	/// Computes `key` and stores it on the result.
	///
	/// `path` lists the keys currently being derived. Calling this for a key
	/// that is already final is a no-op.
	pub(crate) fn compute(&mut self, key: &str, path: &[String]) -> FactoryResult<()> {
		if self.finalized.contains(key) {
			return Ok(());
		}

		let values = self.values;
		let Some(attribute) = values.get(key) else {
			// Undeclared dependency of a derived attribute.
			self.finalized.insert(key.to_string());
			return Ok(());
		};

		tracing::trace!(
			key,
			kind = ?classify(attribute),
			invocation = self.invocation,
			"resolving attribute"
		);

		let value = match attribute {
			Attribute::Derived(derived) => {
				let mut visited = path.to_vec();
				visited.push(key.to_string());
				derived.resolve(self, &visited)?
			}
			Attribute::Factory(factory) => Value::object(factory.build()?),
			Attribute::Array(array) => Value::array(
				array
					.build()?
					.into_iter()
					.map(Value::object)
					.collect(),
			),
			Attribute::Indexed(f) => f(self.invocation),
			Attribute::Literal(value) => {
				self.check_hard_coded(key, value)?;
				value.clone()
			}
		};

		self.result.insert(key.to_string(), value);
		self.finalized.insert(key.to_string());
		Ok(())
	}

	/// Reports a declared object or array literal. Overridden keys are exempt.
	fn check_hard_coded(&self, key: &str, value: &Value) -> FactoryResult<()> {
		if self.overrides.contains_key(key) {
			return Ok(());
		}

		let kind = match value {
			Value::Object(_) => LiteralKind::Object,
			Value::Array(_) => LiteralKind::Array,
			_ => return Ok(()),
		};

		let settings = self.settings.unwrap_or_else(get_config);
		let error = FactoryError::HardCodedValue {
			key: key.to_string(),
			kind,
		};

		if settings.error_on_hard_coded_values {
			let backtrace = Backtrace::force_capture();
			tracing::error!(key, kind = %kind, "{}\n{}", error, backtrace);
			return Err(error);
		}

		tracing::warn!(key, kind = %kind, "{}", error);
		Ok(())
	}
}
