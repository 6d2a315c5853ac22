//! Error types for factory invocation.
//!
//! This module defines the error types used throughout the cooky-cutter crate.
//! Every generator call either returns a complete record or one of these
//! errors; there is no partial result.

use std::fmt;

use thiserror::Error;

/// Shape of a hard-coded literal found in a factory configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
	/// A JSON-like object literal.
	Object,
	/// An array literal.
	Array,
}

impl LiteralKind {
	/// Returns the lowercase name used in diagnostics.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Object => "object",
			Self::Array => "array",
		}
	}
}

impl fmt::Display for LiteralKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Errors that can occur while a factory produces a record.
#[derive(Debug, Error)]
pub enum FactoryError {
	/// A derived attribute depends on itself, directly or through other
	/// derived attributes.
	#[error("{key} cannot circularly derive itself. Check along this path: {}->{key}", .path.join("->"))]
	CircularDerivation {
		/// Dependency that closed the cycle.
		key: String,
		/// Keys being derived when the cycle was found, outermost first.
		path: Vec<String>,
	},

	/// A declared object or array literal was resolved while
	/// `error_on_hard_coded_values` is enabled.
	#[error(
		"`{key}` contains a hard-coded {kind}. It will be shared across all instances of this factory. Consider using a factory function."
	)]
	HardCodedValue {
		/// Attribute holding the literal.
		key: String,
		/// Whether the literal is an object or an array.
		kind: LiteralKind,
	},

	/// The generated record could not be converted into the requested type.
	#[error("Deserialization error: {0}")]
	Deserialize(#[from] serde_json::Error),

	/// A settings document could not be parsed.
	#[error("Settings error: {0}")]
	Settings(String),
}

impl FactoryError {
	/// Returns true if this is a circular derivation failure.
	pub fn is_circular(&self) -> bool {
		matches!(self, Self::CircularDerivation { .. })
	}
}

/// Result type alias for factory operations.
pub type FactoryResult<T> = Result<T, FactoryError>;
