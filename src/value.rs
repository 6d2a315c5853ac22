//! Dynamic values produced by factories.
//!
//! A factory result is a [`Record`]: an ordered map from attribute name to
//! [`Value`]. Arrays and objects are held behind shared handles
//! (`Rc<RefCell<..>>`), so cloning a [`Value`] clones the handle rather than
//! the contents. A literal array declared once in a factory configuration is
//! therefore the *same* array in every record that factory produces:
//!
//! ```
//! use cooky_cutter::{Value, config, define};
//! use serde_json::json;
//!
//! let user = define(config! { "tags" => json!(["admin"]) });
//!
//! let first = user.build().unwrap();
//! first["tags"].array_mut().unwrap().push(Value::from("owner"));
//!
//! // The second record sees the mutation made through the first one.
//! let second = user.build().unwrap();
//! assert_eq!(second["tags"].as_array().unwrap().len(), 2);
//! ```

use core::cell::{Ref, RefCell, RefMut};
use core::fmt;

extern crate alloc;
use alloc::rc::Rc;

use indexmap::IndexMap;
use serde::ser::{Serialize, Serializer};
use serde_json::Number;

/// Shared, interiorly mutable handle used for arrays and objects.
pub type Shared<T> = Rc<RefCell<T>>;

/// A generated record: attribute name to value, in resolution order.
pub type Record = IndexMap<String, Value>;

/// A dynamically typed attribute value.
#[derive(Clone, Default)]
pub enum Value {
	/// Absence of a value.
	#[default]
	Null,
	/// A boolean.
	Bool(bool),
	/// An integer or floating point number.
	Number(Number),
	/// A string.
	String(String),
	/// An array, shared by handle.
	Array(Shared<Vec<Value>>),
	/// An object, shared by handle.
	Object(Shared<Record>),
}

impl Value {
	/// Wraps `items` in a fresh array handle.
	pub fn array(items: Vec<Value>) -> Self {
		Self::Array(Rc::new(RefCell::new(items)))
	}

	/// Wraps `record` in a fresh object handle.
	pub fn object(record: Record) -> Self {
		Self::Object(Rc::new(RefCell::new(record)))
	}

	/// Returns true for [`Value::Null`].
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Returns the boolean, if this is one.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(b) => Some(*b),
			_ => None,
		}
	}

	/// Returns the string slice, if this is a string.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(s) => Some(s),
			_ => None,
		}
	}

	/// Returns the number as `i64`, if it fits.
	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Self::Number(n) => n.as_i64(),
			_ => None,
		}
	}

	/// Returns the number as `u64`, if it fits.
	pub fn as_u64(&self) -> Option<u64> {
		match self {
			Self::Number(n) => n.as_u64(),
			_ => None,
		}
	}

	/// Returns the number as `f64`, if this is a number.
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Self::Number(n) => n.as_f64(),
			_ => None,
		}
	}

	/// Borrows the array contents.
	///
	/// # Panics
	///
	/// Panics if the array is currently borrowed mutably.
	pub fn as_array(&self) -> Option<Ref<'_, Vec<Value>>> {
		match self {
			Self::Array(items) => Some(items.borrow()),
			_ => None,
		}
	}

	/// Mutably borrows the array contents. Changes are visible through every
	/// clone of this value.
	///
	/// # Panics
	///
	/// Panics if the array is currently borrowed.
	pub fn array_mut(&self) -> Option<RefMut<'_, Vec<Value>>> {
		match self {
			Self::Array(items) => Some(items.borrow_mut()),
			_ => None,
		}
	}

	/// Borrows the object contents.
	///
	/// # Panics
	///
	/// Panics if the object is currently borrowed mutably.
	pub fn as_object(&self) -> Option<Ref<'_, Record>> {
		match self {
			Self::Object(record) => Some(record.borrow()),
			_ => None,
		}
	}

	/// Mutably borrows the object contents. Changes are visible through every
	/// clone of this value.
	///
	/// # Panics
	///
	/// Panics if the object is currently borrowed.
	pub fn object_mut(&self) -> Option<RefMut<'_, Record>> {
		match self {
			Self::Object(record) => Some(record.borrow_mut()),
			_ => None,
		}
	}

	/// Returns true if both values are arrays or objects backed by the same
	/// handle.
	pub fn same_handle(&self, other: &Value) -> bool {
		match (self, other) {
			(Self::Array(a), Self::Array(b)) => Rc::ptr_eq(a, b),
			(Self::Object(a), Self::Object(b)) => Rc::ptr_eq(a, b),
			_ => false,
		}
	}

	/// Deep copy into a `serde_json::Value`.
	pub fn to_json(&self) -> serde_json::Value {
		match self {
			Self::Null => serde_json::Value::Null,
			Self::Bool(b) => serde_json::Value::Bool(*b),
			Self::Number(n) => serde_json::Value::Number(n.clone()),
			Self::String(s) => serde_json::Value::String(s.clone()),
			Self::Array(items) => {
				serde_json::Value::Array(items.borrow().iter().map(Value::to_json).collect())
			}
			Self::Object(record) => to_json(&record.borrow()),
		}
	}
}

/// Renders a record as a `serde_json::Value` object.
pub fn to_json(record: &Record) -> serde_json::Value {
	serde_json::Value::Object(
		record
			.iter()
			.map(|(key, value)| (key.clone(), value.to_json()))
			.collect(),
	)
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Null, Self::Null) => true,
			(Self::Bool(a), Self::Bool(b)) => a == b,
			(Self::Number(a), Self::Number(b)) => a == b,
			(Self::String(a), Self::String(b)) => a == b,
			(Self::Array(a), Self::Array(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
			(Self::Object(a), Self::Object(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
			_ => false,
		}
	}
}

impl fmt::Debug for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Null => f.write_str("Null"),
			Self::Bool(b) => write!(f, "Bool({})", b),
			Self::Number(n) => write!(f, "Number({})", n),
			Self::String(s) => write!(f, "String({:?})", s),
			Self::Array(items) => f.debug_list().entries(items.borrow().iter()).finish(),
			Self::Object(record) => f.debug_map().entries(record.borrow().iter()).finish(),
		}
	}
}

/// Strings render without quotes; everything else renders as JSON.
impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::String(s) => f.write_str(s),
			other => write!(f, "{}", other.to_json()),
		}
	}
}

impl Serialize for Value {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Self::Null => serializer.serialize_unit(),
			Self::Bool(b) => serializer.serialize_bool(*b),
			Self::Number(n) => n.serialize(serializer),
			Self::String(s) => serializer.serialize_str(s),
			Self::Array(items) => serializer.collect_seq(items.borrow().iter()),
			Self::Object(record) => serializer.collect_map(record.borrow().iter()),
		}
	}
}

macro_rules! impl_from_integer {
	($($ty:ty),*) => {
		$(
			impl From<$ty> for Value {
				fn from(n: $ty) -> Self {
					Self::Number(n.into())
				}
			}
		)*
	};
}

impl_from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f64> for Value {
	fn from(n: f64) -> Self {
		Number::from_f64(n).map_or(Self::Null, Self::Number)
	}
}

impl From<f32> for Value {
	fn from(n: f32) -> Self {
		Self::from(f64::from(n))
	}
}

impl From<bool> for Value {
	fn from(b: bool) -> Self {
		Self::Bool(b)
	}
}

impl From<&str> for Value {
	fn from(s: &str) -> Self {
		Self::String(s.to_string())
	}
}

impl From<String> for Value {
	fn from(s: String) -> Self {
		Self::String(s)
	}
}

impl From<Vec<Value>> for Value {
	fn from(items: Vec<Value>) -> Self {
		Self::array(items)
	}
}

impl From<Record> for Value {
	fn from(record: Record) -> Self {
		Self::object(record)
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::Null, Into::into)
	}
}

impl From<serde_json::Value> for Value {
	fn from(value: serde_json::Value) -> Self {
		match value {
			serde_json::Value::Null => Self::Null,
			serde_json::Value::Bool(b) => Self::Bool(b),
			serde_json::Value::Number(n) => Self::Number(n),
			serde_json::Value::String(s) => Self::String(s),
			serde_json::Value::Array(items) => {
				Self::array(items.into_iter().map(Value::from).collect())
			}
			serde_json::Value::Object(map) => Self::object(
				map.into_iter()
					.map(|(key, value)| (key, Value::from(value)))
					.collect(),
			),
		}
	}
}
