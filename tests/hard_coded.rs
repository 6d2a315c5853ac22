//! Hard-coded literal diagnostic tests
//!
//! Tests for declared object and array literals: the warning text and count,
//! shared handles across invocations, override exemption and escalation to an
//! error.

#[allow(dead_code)]
#[path = "helpers/log_capture.rs"]
mod log_capture;

use cooky_cutter::prelude::*;
use cooky_cutter::LiteralKind;
use log_capture::{capture_logs, hard_coded_message};
use rstest::{fixture, rstest};
use serde_json::json;

// =============================================================================
// Fixtures
// =============================================================================

#[fixture]
fn strict() -> Settings {
	Settings::new().with_error_on_hard_coded_values(true)
}

#[fixture]
fn tagged() -> Factory {
	define(config! {
		"name" => "Bob",
		"tags" => json!(["admin"]),
		"profile" => json!({"theme": "dark"}),
	})
	.with_settings(Settings::default())
}

// =============================================================================
// Warning Tests
// =============================================================================

/// Test the warnings emitted for declared literals
///
/// **Category**: Diagnostics
/// **Verifies**: one warning per literal per call, with the exact text
#[rstest]
fn test_warns_once_per_resolution(tagged: Factory) {
	// Arrange
	let logs = capture_logs();

	// Act
	tagged.build().unwrap();

	// Assert
	assert_eq!(
		logs.warnings(),
		vec![
			hard_coded_message("tags", "array"),
			hard_coded_message("profile", "object"),
		]
	);

	tagged.build().unwrap();
	assert_eq!(logs.warnings().len(), 4);
}

/// Test that scalar literals are not reported
///
/// **Category**: Diagnostics
/// **Verifies**: strings, numbers, booleans and null never warn
#[rstest]
fn test_scalars_do_not_warn() {
	let logs = capture_logs();
	let user = define(config! {
		"name" => "Bob",
		"age" => 42,
		"admin" => false,
		"nickname" => Value::Null,
	})
	.with_settings(Settings::default());

	user.build().unwrap();

	assert!(logs.warnings().is_empty());
}

/// Test that generated values are not reported
///
/// **Category**: Diagnostics
/// **Verifies**: factories, array factories and functions returning arrays
/// are not hard-coded literals
#[rstest]
fn test_generated_values_do_not_warn() {
	let logs = capture_logs();
	let user = define(config! { "name" => "Bob" });
	let team = define(config! {
		"lead" => &user,
		"members" => array(&user, 2),
		"labels" => Attribute::indexed(|i| Value::from(json!([format!("team-{}", i)]))),
	})
	.with_settings(Settings::default());

	team.build().unwrap();

	assert!(logs.warnings().is_empty());
}

/// Test that overrides are exempt
///
/// **Category**: Diagnostics
/// **Verifies**: object and array overrides never warn
#[rstest]
fn test_overrides_do_not_warn(tagged: Factory) {
	let logs = capture_logs();

	tagged
		.build_with(config! {
			"tags" => json!(["owner"]),
			"profile" => json!({"theme": "light"}),
			"extra" => json!([1, 2, 3]),
		})
		.unwrap();

	assert!(logs.warnings().is_empty());
}

// =============================================================================
// Shared Handle Tests
// =============================================================================

/// Test that declared literals are shared across invocations
///
/// **Category**: Invariant
/// **Verifies**: a mutation through one record is visible in the next
#[rstest]
fn test_literal_shared_between_invocations(tagged: Factory) {
	let first = tagged.build().unwrap();
	first["tags"].array_mut().unwrap().push(Value::from("owner"));
	first["profile"]
		.object_mut()
		.unwrap()
		.insert("theme".to_string(), Value::from("light"));

	let second = tagged.build().unwrap();

	assert!(first["tags"].same_handle(&second["tags"]));
	assert_eq!(second["tags"].to_json(), json!(["admin", "owner"]));
	assert_eq!(second["profile"].to_json(), json!({"theme": "light"}));
}

// =============================================================================
// Escalation Tests
// =============================================================================

/// Test escalation to an error
///
/// **Category**: Error Path
/// **Verifies**: the call fails with the hard-coded error and logs a backtrace
#[rstest]
fn test_error_when_enabled(strict: Settings) {
	// Arrange
	let logs = capture_logs();
	let user = define(config! {
		"name" => "Bob",
		"tags" => json!([]),
	})
	.with_settings(strict);

	// Act
	let result = user.build();

	// Assert
	match result {
		Err(FactoryError::HardCodedValue { key, kind }) => {
			assert_eq!(key, "tags");
			assert_eq!(kind, LiteralKind::Array);
		}
		other => panic!("expected hard-coded error, got {:?}", other),
	}
	assert!(logs.warnings().is_empty());
	let errors = logs.errors();
	assert_eq!(errors.len(), 1);
	assert!(errors[0].starts_with(&hard_coded_message("tags", "array")));
}

/// Test the error message for objects
///
/// **Category**: Error Path
/// **Verifies**: the error text matches the warning text
#[rstest]
fn test_object_error_message(strict: Settings) {
	let user = define(config! { "profile" => json!({}) }).with_settings(strict);

	assert_eq!(
		user.build().unwrap_err().to_string(),
		hard_coded_message("profile", "object")
	);
}

/// Test that overrides are exempt from escalation
///
/// **Category**: Error Path
/// **Verifies**: an overridden literal never fails the call
#[rstest]
fn test_override_avoids_error(strict: Settings) {
	let user = define(config! { "tags" => json!(["admin"]) }).with_settings(strict);

	let record = user
		.build_with(config! { "tags" => json!(["guest"]) })
		.unwrap();

	assert_eq!(record["tags"].to_json(), json!(["guest"]));
}

/// Test errors from nested factories
///
/// **Category**: Error Path
/// **Verifies**: a nested failure fails the outer call
#[rstest]
fn test_nested_error_propagates(strict: Settings) {
	let user = define(config! { "tags" => json!(["admin"]) }).with_settings(strict);
	let post = define(config! { "title" => "Hello", "author" => &user })
		.with_settings(Settings::default());

	let error = post.build().unwrap_err();

	assert!(matches!(error, FactoryError::HardCodedValue { .. }));
}

/// Test extension settings governing base literals
///
/// **Category**: Error Path
/// **Verifies**: strict settings on an extension fail on the base's literal
#[rstest]
fn test_extension_settings_cover_base(strict: Settings) {
	// Arrange
	let logs = capture_logs();
	let base = define(config! { "tags" => json!(["admin"]) });
	let user = extend(&base, config! { "name" => "Bob" }).with_settings(strict);

	// Act
	let result = user.build();

	// Assert
	assert!(matches!(result, Err(FactoryError::HardCodedValue { .. })));
	assert!(logs.warnings().is_empty());
	assert_eq!(logs.errors().len(), 1);
}
