//! Process-wide factory settings.
//!
//! Settings are read by the attribute resolver every time it evaluates a
//! declared object or array literal. A factory may carry its own
//! [`Settings`] via [`Factory::with_settings`](crate::Factory::with_settings),
//! which takes precedence over the process-wide value stored here.
//!
//! # Example
//!
//! ```
//! use cooky_cutter::{Settings, configure, get_config, reset_config};
//!
//! configure(Settings { error_on_hard_coded_values: true });
//! assert!(get_config().error_on_hard_coded_values);
//!
//! reset_config();
//! assert!(!get_config().error_on_hard_coded_values);
//! ```

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::{FactoryError, FactoryResult};

/// Options recognised by the resolver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
	/// Fail instead of warn when a declared object or array literal is
	/// resolved.
	pub error_on_hard_coded_values: bool,
}

impl Settings {
	/// Creates settings with every option at its default.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets `error_on_hard_coded_values`.
	pub fn with_error_on_hard_coded_values(mut self, enabled: bool) -> Self {
		self.error_on_hard_coded_values = enabled;
		self
	}

	/// Parses settings from a JSON document such as
	/// `{"errorOnHardCodedValues": true}`. Missing fields keep their default.
	pub fn from_json(source: &str) -> FactoryResult<Self> {
		serde_json::from_str(source).map_err(|e| FactoryError::Settings(e.to_string()))
	}
}

/// Global settings store.
static SETTINGS: Lazy<RwLock<Settings>> = Lazy::new(|| RwLock::new(Settings::default()));

/// Replaces the process-wide settings. The last write wins.
pub fn configure(settings: Settings) {
	*SETTINGS.write() = settings;
}

/// Returns a copy of the current process-wide settings.
pub fn get_config() -> Settings {
	*SETTINGS.read()
}

/// Restores the process-wide settings to their defaults.
///
/// This is primarily useful for testing.
pub fn reset_config() {
	configure(Settings::default());
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serial_test::serial;

	#[rstest]
	fn test_default_does_not_error() {
		assert!(!Settings::default().error_on_hard_coded_values);
		assert_eq!(Settings::new(), Settings::default());
	}

	#[rstest]
	#[case(r#"{"errorOnHardCodedValues": true}"#, true)]
	#[case(r#"{"errorOnHardCodedValues": false}"#, false)]
	#[case("{}", false)]
	fn test_from_json(#[case] source: &str, #[case] expected: bool) {
		let settings = Settings::from_json(source).unwrap();
		assert_eq!(settings.error_on_hard_coded_values, expected);
	}

	#[rstest]
	fn test_from_json_rejects_malformed_document() {
		let result = Settings::from_json("{errorOnHardCodedValues}");
		assert!(matches!(result, Err(FactoryError::Settings(_))));
	}

	#[rstest]
	fn test_serializes_camel_case() {
		let settings = Settings::new().with_error_on_hard_coded_values(true);
		assert_eq!(
			serde_json::to_value(settings).unwrap(),
			serde_json::json!({"errorOnHardCodedValues": true})
		);
	}

	#[rstest]
	#[serial(settings)]
	fn test_configure_last_write_wins() {
		configure(Settings::new().with_error_on_hard_coded_values(true));
		configure(Settings::new().with_error_on_hard_coded_values(false));
		assert!(!get_config().error_on_hard_coded_values);

		configure(Settings::new().with_error_on_hard_coded_values(true));
		assert!(get_config().error_on_hard_coded_values);

		reset_config();
		assert_eq!(get_config(), Settings::default());
	}
}
