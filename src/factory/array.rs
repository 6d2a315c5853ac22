//! Array factories.
//!
//! An [`ArrayFactory`] repeats a [`Factory`] to produce a list of records. Used
//! as an attribute it yields an array of objects.

use core::cell::Cell;
use core::fmt;

extern crate alloc;
use alloc::rc::Rc;

use super::attribute::Config;
use super::define::Factory;
use crate::error::FactoryResult;
use crate::value::Record;

/// Number of records an [`ArrayFactory`] builds when no size is given.
pub const DEFAULT_ARRAY_SIZE: usize = 5;

/// How many records an [`ArrayFactory`] builds per call.
#[derive(Clone)]
pub enum ArraySize {
	/// The same count on every call.
	Fixed(usize),
	/// A count computed from the array factory's own 1-based invocation count.
	PerInvocation(Rc<dyn Fn(usize) -> usize>),
}

impl fmt::Debug for ArraySize {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Fixed(size) => f.debug_tuple("Fixed").field(size).finish(),
			Self::PerInvocation(_) => f.write_str("PerInvocation(..)"),
		}
	}
}

/// Builds lists of records from an underlying factory.
#[derive(Clone)]
pub struct ArrayFactory {
	inner: Rc<ArrayFactoryInner>,
}

struct ArrayFactoryInner {
	factory: Factory,
	size: ArraySize,
	invocations: Cell<usize>,
}

/// Declares an array of `size` records built by `factory`.
///
/// # Example
///
/// ```
/// use cooky_cutter::{array, config, define};
///
/// let user = define(config! { "firstName" => "Mike" });
/// let moderators = define(config! {
///     "role" => "moderator",
///     "users" => array(&user, 2),
/// });
///
/// let record = moderators.build().unwrap();
/// assert_eq!(record["users"].as_array().unwrap().len(), 2);
/// ```
pub fn array(factory: &Factory, size: usize) -> ArrayFactory {
	ArrayFactory::with_size(factory, ArraySize::Fixed(size))
}

/// Declares an array whose length is computed per call from the array
/// factory's invocation count.
pub fn array_with<F>(factory: &Factory, size: F) -> ArrayFactory
where
	F: Fn(usize) -> usize + 'static,
{
	ArrayFactory::with_size(factory, ArraySize::PerInvocation(Rc::new(size)))
}

impl ArrayFactory {
	/// An array factory building [`DEFAULT_ARRAY_SIZE`] records per call.
	pub fn new(factory: &Factory) -> Self {
		array(factory, DEFAULT_ARRAY_SIZE)
	}

	/// An array factory with an explicit [`ArraySize`].
	pub fn with_size(factory: &Factory, size: ArraySize) -> Self {
		Self {
			inner: Rc::new(ArrayFactoryInner {
				factory: factory.clone(),
				size,
				invocations: Cell::new(0),
			}),
		}
	}

	/// The repeated factory.
	pub fn factory(&self) -> &Factory {
		&self.inner.factory
	}

	/// Number of records built on the given 1-based invocation.
	pub fn len_for(&self, invocation: usize) -> usize {
		match &self.inner.size {
			ArraySize::Fixed(size) => *size,
			ArraySize::PerInvocation(size) => size(invocation),
		}
	}

	/// Resets the counter used by [`ArraySize::PerInvocation`]. The repeated
	/// factory's counter is not affected.
	pub fn reset_sequence(&self) {
		self.inner.invocations.set(0);
	}

	/// Builds one list of records.
	pub fn build(&self) -> FactoryResult<Vec<Record>> {
		self.build_with(Config::new())
	}

	/// Builds every record with the same `overrides`.
	pub fn build_with(&self, overrides: Config) -> FactoryResult<Vec<Record>> {
		let invocation = self.inner.invocations.get() + 1;
		self.inner.invocations.set(invocation);

		(0..self.len_for(invocation))
			.map(|_| self.inner.factory.invoke(&overrides))
			.collect()
	}
}

impl fmt::Debug for ArrayFactory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ArrayFactory")
			.field("factory", &self.inner.factory)
			.field("size", &self.inner.size)
			.finish()
	}
}
