//! # primesieve-nth
//!
//! Computes the n-th prime (0-indexed: index 0 → 2) with an adaptive-bound
//! segmented Sieve of Eratosthenes.
//!
//! ```
//! assert_eq!(primesieve_nth::nth_prime(0), 2);
//! assert_eq!(primesieve_nth::nth_prime(99), 541);
//! assert_eq!(primesieve_nth::nth_prime(-1), 0);
//! ```
//!
//! - [`sieve`]: the [`Sieve`] capability with basic and segmented
//!   implementations.
//! - [`resolver`]: bound estimation and the doubling retry loop.

pub mod resolver;
pub mod sieve;

pub use resolver::NthPrime;
pub use sieve::{BasicSieve, SegmentedSieve, Sieve};

/// The prime at 0-based `index` using the segmented sieve, or 0 for a
/// negative index.
pub fn nth_prime(index: i64) -> i64 {
    NthPrime::new().nth_prime(index)
}
