//! # Sieve — Prime Generation up to a Bound
//!
//! Produces the ordered list of primes in `[2, limit]`. Two implementations
//! share the [`Sieve`] capability so callers (the resolver in particular)
//! never depend on a concrete algorithm:
//!
//! 1. **Basic sieve** ([`BasicSieve`]): the classical Sieve of Eratosthenes
//!    over a single `limit + 1` flag array. O(n log log n) time, O(n) space.
//! 2. **Segmented sieve** ([`SegmentedSieve`]): sieves `[2, √n]` with a base
//!    sieve, then walks `(√n, n]` in blocks of width `√n`, crossing off
//!    multiples of the small primes block by block. Same time complexity,
//!    O(√n) working set plus the output list.
//!
//! ## Algorithm: Segmented Sieve
//!
//! Every composite c ≤ n has a prime factor p ≤ √n, so the small-prime list
//! is enough to clear every composite in any later block. For a block
//! `[low, high]` the first multiple of p to clear is ⌈low / p⌉·p, computed as
//! `(low + p - 1) / p * p` rather than by scanning with `%`.
//!
//! Blocks are visited in increasing order, so appending the survivors of each
//! block yields a globally sorted list without a merge or sort step.
//!
//! ## Limits
//!
//! Bounds are `u64`. Block arithmetic (`low + p - 1`, `high + 1`) is exact for
//! every bound that could be allocated in practice; bounds within √n of
//! `u64::MAX` are not supported.
//!
//! ## References
//!
//! - Eratosthenes of Cyrene, ~240 BCE (sieve algorithm).
//! - C. Bays, R. Hudson, "The segmented sieve of Eratosthenes and primes in
//!   arithmetic progressions to 10^12", BIT 17 (1977).

use tracing::trace;

/// Anything that can list the primes up to an inclusive bound.
///
/// Implementors must return every prime in `[2, limit]` exactly once, in
/// ascending order, and an empty list for `limit < 2`. They must not keep
/// state between calls.
pub trait Sieve: Send + Sync {
    fn sieve(&self, limit: u64) -> Vec<u64>;
}

/// Exact integer square root: the largest r with r·r ≤ n.
///
/// Seeds from `f64::sqrt` and corrects the result, since the float estimate
/// can be off by one for large n and at perfect squares.
pub fn isqrt(n: u64) -> u64 {
    if n < 2 {
        return n;
    }
    let mut r = (n as f64).sqrt() as u64;
    while r.checked_mul(r).is_none_or(|sq| sq > n) {
        r -= 1;
    }
    while (r + 1).checked_mul(r + 1).is_some_and(|sq| sq <= n) {
        r += 1;
    }
    r
}

/// Rough upper estimate of π(n), used to pre-size result vectors.
fn estimate_prime_count(n: u64) -> usize {
    if n < 10 {
        return 4;
    }
    let nf = n as f64;
    (1.3 * nf / nf.ln()) as usize
}

/// Classical Sieve of Eratosthenes over the full range `[0, limit]`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BasicSieve;

impl Sieve for BasicSieve {
    fn sieve(&self, limit: u64) -> Vec<u64> {
        if limit < 2 {
            return vec![];
        }

        let limit = limit as usize;
        let mut is_prime = vec![true; limit + 1];
        is_prime[0] = false;
        is_prime[1] = false;

        // Multiples below i*i were already cleared by a smaller prime factor.
        let mut i = 2usize;
        while i * i <= limit {
            if is_prime[i] {
                let mut j = i * i;
                while j <= limit {
                    is_prime[j] = false;
                    j += i;
                }
            }
            i += 1;
        }

        let mut primes = Vec::with_capacity(estimate_prime_count(limit as u64));
        primes.extend(
            is_prime
                .iter()
                .enumerate()
                .filter(|&(_, &flag)| flag)
                .map(|(n, _)| n as u64),
        );
        trace!(limit, count = primes.len(), "basic sieve pass");
        primes
    }
}

/// Segmented Sieve of Eratosthenes.
///
/// The small primes up to √limit come from the base sieve `B` (the basic
/// sieve by default); the rest of the range is processed in blocks of width
/// ⌊√limit⌋, each with its own freshly allocated flag array.
#[derive(Clone, Copy, Debug, Default)]
pub struct SegmentedSieve<B = BasicSieve> {
    base: B,
}

impl<B: Sieve> SegmentedSieve<B> {
    /// Create a segmented sieve that seeds its blocks from `base`.
    pub fn with_base(base: B) -> Self {
        SegmentedSieve { base }
    }
}

impl SegmentedSieve {
    pub fn new() -> Self {
        SegmentedSieve { base: BasicSieve }
    }
}

impl<B: Sieve> Sieve for SegmentedSieve<B> {
    fn sieve(&self, limit: u64) -> Vec<u64> {
        if limit < 2 {
            return vec![];
        }

        // width >= 1 here, so every block below is non-empty
        let width = isqrt(limit);
        let small_primes = self.base.sieve(width);

        let mut primes = Vec::with_capacity(estimate_prime_count(limit));
        primes.extend_from_slice(&small_primes);

        let mut segments = 0u64;
        let mut low = width + 1;
        while low <= limit {
            let high = (low + width - 1).min(limit);
            let mut segment = vec![true; (high - low + 1) as usize];

            for &p in &small_primes {
                let mut start = (low + p - 1) / p * p;
                if start < low {
                    start += p;
                }
                let mut m = start;
                while m <= high {
                    segment[(m - low) as usize] = false;
                    m += p;
                }
            }

            primes.extend(
                segment
                    .iter()
                    .enumerate()
                    .filter(|&(_, &flag)| flag)
                    .map(|(offset, _)| low + offset as u64),
            );

            segments += 1;
            if high == limit {
                break;
            }
            low = high + 1;
        }

        trace!(
            limit,
            width,
            segments,
            count = primes.len(),
            "segmented sieve pass"
        );
        primes
    }
}
