//! Attribute specifications and factory configuration.
//!
//! Every key of a factory configuration maps to an [`Attribute`], a closed set
//! of variants that the resolver dispatches on:
//!
//! | Variant | Produces |
//! |---------|----------|
//! | [`Attribute::Literal`] | the same value on every invocation |
//! | [`Attribute::Indexed`] | `f(invocation)` with the 1-based invocation count |
//! | [`Attribute::Factory`] | a record from a nested factory |
//! | [`Attribute::Array`] | an array of records from an [`ArrayFactory`] |
//! | [`Attribute::Derived`] | a value computed from sibling attributes |

use core::fmt;

extern crate alloc;
use alloc::rc::Rc;

use indexmap::IndexMap;

use super::array::ArrayFactory;
use super::define::Factory;
use super::derive::Derived;
use super::helpers;
use crate::value::{Record, Value};

/// Function of the invocation count.
pub type IndexedFn = Rc<dyn Fn(usize) -> Value>;

/// How one key of a generated record gets its value.
#[derive(Clone)]
pub enum Attribute {
	/// A fixed value. Arrays and objects are shared by handle across every
	/// record the factory produces.
	Literal(Value),
	/// A function receiving the 1-based invocation count.
	Indexed(IndexedFn),
	/// A nested factory, invoked without overrides.
	Factory(Factory),
	/// A nested array factory, invoked without overrides.
	Array(ArrayFactory),
	/// A value derived from other attributes of the same record.
	Derived(Derived),
}

/// Discriminant of an [`Attribute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
	/// [`Attribute::Derived`]
	Derived,
	/// [`Attribute::Factory`]
	Factory,
	/// [`Attribute::Array`]
	ArrayFactory,
	/// [`Attribute::Indexed`]
	Indexed,
	/// [`Attribute::Literal`]
	Literal,
}

/// Determines which kind of attribute specification `attribute` is.
///
/// Library-built variants (derived, factory, array factory) are matched before
/// plain indexed functions; literals are whatever remains.
pub fn classify(attribute: &Attribute) -> AttributeKind {
	match attribute {
		Attribute::Derived(_) => AttributeKind::Derived,
		Attribute::Factory(_) => AttributeKind::Factory,
		Attribute::Array(_) => AttributeKind::ArrayFactory,
		Attribute::Indexed(_) => AttributeKind::Indexed,
		Attribute::Literal(_) => AttributeKind::Literal,
	}
}

impl Attribute {
	/// A fixed value.
	pub fn literal(value: impl Into<Value>) -> Self {
		Self::Literal(value.into())
	}

	/// A function of the invocation count.
	///
	/// # Example
	///
	/// ```
	/// use cooky_cutter::{Attribute, config, define};
	///
	/// let user = define(config! {
	///     "firstName" => Attribute::indexed(|i| format!("Bob #{}", i)),
	/// });
	/// assert_eq!(user.build().unwrap()["firstName"].as_str(), Some("Bob #1"));
	/// ```
	pub fn indexed<F, V>(f: F) -> Self
	where
		F: Fn(usize) -> V + 'static,
		V: Into<Value>,
	{
		Self::Indexed(Rc::new(move |invocation| f(invocation).into()))
	}

	/// The invocation count itself.
	pub fn sequence() -> Self {
		Self::indexed(helpers::sequence)
	}

	/// A fresh random integer on every invocation.
	pub fn random() -> Self {
		Self::indexed(|_| helpers::random())
	}

	/// Shorthand for [`classify`].
	pub fn kind(&self) -> AttributeKind {
		classify(self)
	}
}

impl fmt::Debug for Attribute {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
			Self::Indexed(_) => f.write_str("Indexed(..)"),
			Self::Factory(factory) => f.debug_tuple("Factory").field(factory).finish(),
			Self::Array(array) => f.debug_tuple("Array").field(array).finish(),
			Self::Derived(derived) => f.debug_tuple("Derived").field(derived).finish(),
		}
	}
}

macro_rules! impl_literal_from {
	($($ty:ty),*) => {
		$(
			impl From<$ty> for Attribute {
				fn from(value: $ty) -> Self {
					Self::Literal(value.into())
				}
			}
		)*
	};
}

impl_literal_from!(
	bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, &str, String, Value,
	Vec<Value>, Record, serde_json::Value
);

impl From<Factory> for Attribute {
	fn from(factory: Factory) -> Self {
		Self::Factory(factory)
	}
}

impl From<&Factory> for Attribute {
	fn from(factory: &Factory) -> Self {
		Self::Factory(factory.clone())
	}
}

impl From<ArrayFactory> for Attribute {
	fn from(array: ArrayFactory) -> Self {
		Self::Array(array)
	}
}

impl From<Derived> for Attribute {
	fn from(derived: Derived) -> Self {
		Self::Derived(derived)
	}
}

/// Ordered mapping from result keys to attribute specifications.
///
/// The same type describes a factory's declared configuration and the
/// per-call overrides layered on top of it.
#[derive(Clone, Default)]
pub struct Config {
	attributes: IndexMap<String, Attribute>,
}

impl Config {
	/// Creates an empty config.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds or replaces `key`, returning the updated config.
	pub fn with(mut self, key: impl Into<String>, attribute: impl Into<Attribute>) -> Self {
		self.insert(key, attribute);
		self
	}

	/// Adds or replaces `key`. A replaced key keeps its position.
	pub fn insert(&mut self, key: impl Into<String>, attribute: impl Into<Attribute>) {
		self.attributes.insert(key.into(), attribute.into());
	}

	/// Returns the attribute declared for `key`.
	pub fn get(&self, key: &str) -> Option<&Attribute> {
		self.attributes.get(key)
	}

	/// Returns true if `key` is declared.
	pub fn contains_key(&self, key: &str) -> bool {
		self.attributes.contains_key(key)
	}

	/// Declared keys, in order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.attributes.keys().map(String::as_str)
	}

	/// Declared keys and attributes, in order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Attribute)> {
		self.attributes.iter().map(|(key, attribute)| (key.as_str(), attribute))
	}

	/// Number of declared keys.
	pub fn len(&self) -> usize {
		self.attributes.len()
	}

	/// Returns true if no key is declared.
	pub fn is_empty(&self) -> bool {
		self.attributes.is_empty()
	}

	/// Layers `overrides` on top of this config.
	///
	/// The merge is shallow: an overriding attribute replaces the declared one
	/// wholesale. Declared keys keep their declaration position and
	/// override-only keys are appended in override order.
	pub fn merged(&self, overrides: &Config) -> Config {
		let mut merged = self.clone();
		for (key, attribute) in &overrides.attributes {
			merged.attributes.insert(key.clone(), attribute.clone());
		}
		merged
	}
}

impl fmt::Debug for Config {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_map().entries(self.attributes.iter()).finish()
	}
}

impl<K: Into<String>, A: Into<Attribute>> FromIterator<(K, A)> for Config {
	fn from_iter<I: IntoIterator<Item = (K, A)>>(iter: I) -> Self {
		let mut config = Config::new();
		for (key, attribute) in iter {
			config.insert(key, attribute);
		}
		config
	}
}

/// Builds a [`Config`] from `key => attribute` pairs.
///
/// Each right-hand side is converted with [`Attribute::from`], so plain
/// values, `serde_json::json!` literals, factories, array factories and
/// derived attributes can be mixed freely.
///
/// # Example
///
/// ```
/// use cooky_cutter::{Attribute, config, define};
/// use serde_json::json;
///
/// let user = define(config! {
///     "firstName" => "Bob",
///     "age" => Attribute::sequence(),
/// });
/// assert_eq!(
///     cooky_cutter::to_json(&user.build().unwrap()),
///     json!({"firstName": "Bob", "age": 1})
/// );
/// ```
#[macro_export]
macro_rules! config {
	() => {
		$crate::Config::new()
	};
	($($key:expr => $value:expr),+ $(,)?) => {{
		let mut config = $crate::Config::new();
		$(
			config.insert($key, $crate::Attribute::from($value));
		)+
		config
	}};
}
