//! Factory composition.
//!
//! [`extend`] layers a configuration on top of an existing factory. Each call
//! invokes the base factory first, forwarding the caller's overrides, and then
//! resolves the extension's own keys into the base record. Extension keys that
//! collide with base keys are recomputed under the extension's rules, and
//! derived attributes of the extension can read base attributes. A derived
//! attribute reads whatever is on the record when it runs, so a base key the
//! extension redeclares is seen with its base value until it is recomputed.
//! This lets an extension derive a key from its own base value.
//!
//! The extended factory counts its own invocations; the base factory keeps its
//! own, independent counter.

use super::attribute::Config;
use super::define::Factory;
use crate::error::FactoryResult;
use crate::settings::Settings;
use crate::value::Record;

/// Defines a factory producing everything `base` produces plus the keys in
/// `config`.
///
/// # Arguments
///
/// * `base` - Factory whose records seed every call
/// * `config` - Additional keys, and optional replacements for base keys
///
/// Settings given to the returned factory with
/// [`Factory::with_settings`] also govern the base's literals, unless the
/// base carries settings of its own.
///
/// # Example
///
/// ```
/// use cooky_cutter::{Attribute, config, define, extend, to_json};
/// use serde_json::json;
///
/// let model = define(config! { "id" => Attribute::sequence() });
/// let user = extend(&model, config! { "name" => "X" });
///
/// assert_eq!(to_json(&user.build().unwrap()), json!({"id": 1, "name": "X"}));
/// assert_eq!(to_json(&model.build().unwrap()), json!({"id": 2}));
/// ```
pub fn extend(base: &Factory, config: Config) -> Factory {
	Factory::with_base(Some(base.clone()), config)
}

impl Factory {
	/// Record an invocation starts from: the base factory's record built with
	/// the same overrides and settings, or an empty record.
	pub(crate) fn seed(
		&self,
		overrides: &Config,
		settings: Option<Settings>,
	) -> FactoryResult<Record> {
		match self.base() {
			Some(base) => base.invoke_with_settings(overrides, settings),
			None => Ok(Record::new()),
		}
	}
}
