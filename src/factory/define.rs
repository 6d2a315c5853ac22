//! Factory definition.
//!
//! [`define`] turns a [`Config`] into a [`Factory`]: a handle that builds one
//! record per call. Each factory owns a private invocation counter that starts
//! at 0 and is incremented at the start of every call, so the Nth call passes
//! `N` to indexed attributes.
//!
//! # Example
//!
//! ```
//! use cooky_cutter::{Attribute, config, define, to_json};
//! use serde_json::json;
//!
//! let user = define(config! {
//!     "firstName" => "Bob",
//!     "age" => Attribute::sequence(),
//! });
//!
//! assert_eq!(to_json(&user.build().unwrap()), json!({"firstName": "Bob", "age": 1}));
//! assert_eq!(
//!     to_json(&user.build_with(config! { "firstName" => "Sarah" }).unwrap()),
//!     json!({"firstName": "Sarah", "age": 2})
//! );
//! ```

use core::cell::Cell;
use core::fmt;

extern crate alloc;
use alloc::rc::Rc;

use serde::de::DeserializeOwned;

use super::attribute::Config;
use super::compute::Resolution;
use crate::error::FactoryResult;
use crate::settings::Settings;
use crate::value::{self, Record};

/// A record generator.
///
/// Cloning a `Factory` yields another handle to the same generator; clones
/// share the invocation counter.
#[derive(Clone)]
pub struct Factory {
	inner: Rc<FactoryInner>,
}

struct FactoryInner {
	config: Config,
	base: Option<Factory>,
	invocations: Cell<usize>,
	settings: Cell<Option<Settings>>,
}

/// Defines a new factory from `config`.
///
/// # Arguments
///
/// * `config` - How each key of the record is produced
pub fn define(config: Config) -> Factory {
	Factory::new(config)
}

impl Factory {
	/// Creates a factory from `config`. Same as [`define`].
	pub fn new(config: Config) -> Self {
		Self::with_base(None, config)
	}

	pub(crate) fn with_base(base: Option<Factory>, config: Config) -> Self {
		Self {
			inner: Rc::new(FactoryInner {
				config,
				base,
				invocations: Cell::new(0),
				settings: Cell::new(None),
			}),
		}
	}

	/// Uses `settings` for this factory instead of the process-wide settings.
	///
	/// Applies to every handle of this factory. When this factory was built
	/// with [`extend`](super::extend()), the base factory is invoked with the
	/// same settings unless it carries its own. Nested factories and array
	/// factories keep their own settings.
	pub fn with_settings(self, settings: Settings) -> Self {
		self.inner.settings.set(Some(settings));
		self
	}

	/// Settings set with [`Factory::with_settings`], if any.
	pub fn settings(&self) -> Option<Settings> {
		self.inner.settings.get()
	}

	/// The declared configuration.
	pub fn config(&self) -> &Config {
		&self.inner.config
	}

	/// The factory this one extends, if it was built with
	/// [`extend`](super::extend()).
	pub fn base(&self) -> Option<&Factory> {
		self.inner.base.as_ref()
	}

	/// Number of calls since creation or the last reset.
	pub fn invocations(&self) -> usize {
		self.inner.invocations.get()
	}

	/// Resets the invocation counter so the next call behaves as the first.
	///
	/// Only this factory's counter is affected; a base factory keeps counting.
	pub fn reset_sequence(&self) {
		tracing::debug!(
			previous = self.inner.invocations.get(),
			"resetting factory sequence"
		);
		self.inner.invocations.set(0);
	}

	/// Builds a record from the declared configuration.
	pub fn build(&self) -> FactoryResult<Record> {
		self.invoke(&Config::new())
	}

	/// Builds a record with `overrides` layered over the declared
	/// configuration. Overrides win key for key.
	pub fn build_with(&self, overrides: Config) -> FactoryResult<Record> {
		self.invoke(&overrides)
	}

	/// Builds `count` records in sequence.
	pub fn build_batch(&self, count: usize) -> FactoryResult<Vec<Record>> {
		(0..count).map(|_| self.build()).collect()
	}

	/// Builds a record and deserializes it into `T`.
	///
	/// # Example
	///
	/// ```
	/// use cooky_cutter::{Attribute, config, define};
	/// use serde::Deserialize;
	///
	/// #[derive(Deserialize)]
	/// struct User {
	///     name: String,
	///     age: u32,
	/// }
	///
	/// let user = define(config! { "name" => "Bob", "age" => Attribute::sequence() });
	/// let built: User = user.build_as().unwrap();
	/// assert_eq!((built.name.as_str(), built.age), ("Bob", 1));
	/// ```
	pub fn build_as<T: DeserializeOwned>(&self) -> FactoryResult<T> {
		self.build_as_with(Config::new())
	}

	/// [`Factory::build_with`] followed by deserialization into `T`.
	pub fn build_as_with<T: DeserializeOwned>(&self, overrides: Config) -> FactoryResult<T> {
		let record = self.build_with(overrides)?;
		Ok(serde_json::from_value(value::to_json(&record))?)
	}

	pub(crate) fn invoke(&self, overrides: &Config) -> FactoryResult<Record> {
		self.invoke_with_settings(overrides, None)
	}

	/// One call: count it, seed from the base, then resolve every key of the
	/// merged configuration in declaration order.
	///
	/// `inherited` applies when this factory has no settings of its own.
	pub(crate) fn invoke_with_settings(
		&self,
		overrides: &Config,
		inherited: Option<Settings>,
	) -> FactoryResult<Record> {
		let invocation = self.inner.invocations.get() + 1;
		self.inner.invocations.set(invocation);

		let settings = self.inner.settings.get().or(inherited);
		let seed = self.seed(overrides, settings)?;
		let values = self.inner.config.merged(overrides);
		let mut resolution = Resolution::new(&values, overrides, invocation, settings, seed);

		for key in values.keys() {
			resolution.compute(key, &[])?;
		}

		Ok(resolution.into_record())
	}
}

impl fmt::Debug for Factory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Factory")
			.field("keys", &self.inner.config.keys().collect::<Vec<_>>())
			.field("extends", &self.inner.base.is_some())
			.field("invocations", &self.inner.invocations.get())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::FactoryError;
	use crate::factory::Attribute;
	use crate::value::to_json;
	use rstest::rstest;
	use serde::Deserialize;
	use serde_json::json;

	#[rstest]
	fn test_invocation_count_is_one_based() {
		let user = define(crate::config! {
			"firstName" => Attribute::indexed(|i| format!("Bob #{}", i)),
			"age" => Attribute::indexed(|i| i * 42),
		});

		for n in 1..=3 {
			assert_eq!(
				to_json(&user.build().unwrap()),
				json!({"firstName": format!("Bob #{}", n), "age": n * 42})
			);
		}
		assert_eq!(user.invocations(), 3);
	}

	#[rstest]
	fn test_each_call_returns_a_new_record() {
		let user = define(crate::config! { "name" => "Bob" });

		let mut first = user.build().unwrap();
		first.insert("name".to_string(), "Changed".into());

		assert_eq!(user.build().unwrap()["name"].as_str(), Some("Bob"));
	}

	#[rstest]
	fn test_override_only_keys_are_appended() {
		let user = define(crate::config! { "firstName" => "Bob", "age" => 30 });

		let record = user
			.build_with(crate::config! { "admin" => true, "firstName" => "Mickey" })
			.unwrap();

		let keys: Vec<_> = record.keys().cloned().collect();
		assert_eq!(keys, vec!["firstName", "age", "admin"]);
		assert_eq!(
			to_json(&record),
			json!({"firstName": "Mickey", "age": 30, "admin": true})
		);
	}

	#[rstest]
	fn test_reset_sequence() {
		let user = define(crate::config! { "age" => Attribute::sequence() });

		user.build().unwrap();
		user.build().unwrap();
		user.reset_sequence();

		assert_eq!(user.invocations(), 0);
		assert_eq!(user.build().unwrap()["age"].as_u64(), Some(1));
	}

	#[rstest]
	fn test_failed_call_still_counts() {
		let broken = define(crate::config! {
			"n" => Attribute::sequence(),
			"a" => crate::factory::derive(|_| 0, ["a"]),
		});

		assert!(broken.build().is_err());
		assert_eq!(broken.invocations(), 1);
	}

	#[rstest]
	fn test_build_batch() {
		let user = define(crate::config! { "id" => Attribute::sequence() });

		let ids: Vec<_> = user
			.build_batch(3)
			.unwrap()
			.iter()
			.map(|record| record["id"].as_u64().unwrap())
			.collect();

		assert_eq!(ids, vec![1, 2, 3]);
	}

	#[derive(Debug, Deserialize, PartialEq)]
	#[serde(rename_all = "camelCase")]
	struct User {
		first_name: String,
		age: u32,
	}

	#[rstest]
	fn test_build_as() {
		let user = define(crate::config! {
			"firstName" => "Bob",
			"age" => Attribute::sequence(),
		});

		let built: User = user
			.build_as_with(crate::config! { "age" => 42 })
			.unwrap();

		assert_eq!(
			built,
			User {
				first_name: "Bob".to_string(),
				age: 42
			}
		);
	}

	#[rstest]
	fn test_build_as_type_mismatch() {
		let user = define(crate::config! { "firstName" => 7, "age" => 1 });

		let result: FactoryResult<User> = user.build_as();

		assert!(matches!(result, Err(FactoryError::Deserialize(_))));
	}

	#[rstest]
	fn test_settings_handle() {
		let user = define(crate::config! { "a" => 1 });
		assert!(user.settings().is_none());

		let user = user.with_settings(Settings::new().with_error_on_hard_coded_values(true));

		assert_eq!(
			user.settings(),
			Some(Settings {
				error_on_hard_coded_values: true
			})
		);
		assert!(user.base().is_none());
		assert_eq!(user.config().len(), 1);
	}
}
