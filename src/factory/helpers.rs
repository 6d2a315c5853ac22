//! Value generators usable as indexed attributes.

use rand::Rng;

/// Largest value [`random`] can return.
pub const RANDOM_MAX: u64 = i64::MAX as u64;

/// Returns the invocation count unchanged.
///
/// Useful for counts and ordinal fields; [`random`] is usually the better
/// choice for identifiers so tests do not pass by accident of ordering.
pub fn sequence(invocation: usize) -> usize {
	invocation
}

/// Returns an integer uniformly distributed over `1..=RANDOM_MAX`.
pub fn random() -> u64 {
	rand::thread_rng().gen_range(1..=RANDOM_MAX)
}
