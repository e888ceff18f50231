//! # Resolver — Nth Prime by Adaptive Bound
//!
//! Finds the prime at a 0-based index (index 0 → 2) by sieving up to an
//! estimated bound and doubling the bound until the sieve returns enough
//! primes.
//!
//! ## Bound Estimation
//!
//! The prime number theorem gives p_n ≈ n·ln(n). For n ≥ 6 that product is
//! the first bound tried. It slightly underestimates p_n (the true value is
//! closer to n·(ln n + ln ln n − 1)), so most lookups take one doubling; the
//! estimate only affects how much work is redone, never the result.
//!
//! For indices 0..=5 the logarithm is useless (ln 0 is undefined, ln 1 = 0),
//! so a fixed bound of 20 is used; it already covers p_0..p_7.
//!
//! ## Limits
//!
//! Doubling saturates at `u64::MAX` instead of wrapping. Any index whose prime
//! lies beyond what a flag array can address in memory is unsupported; the
//! call will exhaust memory before reaching that point.

use crate::sieve::{SegmentedSieve, Sieve};
use tracing::debug;

/// Fixed first bound for indices below [`LOG_ESTIMATE_MIN_INDEX`].
pub const SMALL_INDEX_BOUND: u64 = 20;

/// Smallest index for which n·ln(n) is used as the first bound.
pub const LOG_ESTIMATE_MIN_INDEX: u64 = 6;

/// First sieve bound to try for `index`.
///
/// Always at least 6, so the doubling loop in [`NthPrime::nth_prime`] makes
/// progress from the first retry.
pub fn initial_bound(index: u64) -> u64 {
    if index < LOG_ESTIMATE_MIN_INDEX {
        return SMALL_INDEX_BOUND;
    }
    let n = index as f64;
    (n * n.ln()) as u64
}

/// Resolves 0-based prime indices using any [`Sieve`].
///
/// Holds no state besides the sieve itself, so a single resolver can be
/// shared across threads and called concurrently.
#[derive(Clone, Copy, Debug, Default)]
pub struct NthPrime<S = SegmentedSieve> {
    sieve: S,
}

impl NthPrime {
    /// Resolver backed by the segmented sieve.
    pub fn new() -> Self {
        NthPrime {
            sieve: SegmentedSieve::new(),
        }
    }
}

impl<S: Sieve> NthPrime<S> {
    pub fn with_sieve(sieve: S) -> Self {
        NthPrime { sieve }
    }

    /// The prime at 0-based `index`, or 0 when `index` is negative.
    pub fn nth_prime(&self, index: i64) -> i64 {
        if index < 0 {
            return 0;
        }
        let target = index as u64;
        let mut bound = initial_bound(target);

        loop {
            let primes = self.sieve.sieve(bound);
            if let Some(&p) = primes.get(target as usize) {
                return p as i64;
            }
            debug!(
                index,
                bound,
                found = primes.len(),
                "sieve bound too small, doubling"
            );
            bound = bound.saturating_mul(2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sieve::BasicSieve;
    use std::sync::Mutex;

    /// Records every bound it is asked to sieve, delegating to the basic sieve.
    #[derive(Default)]
    struct RecordingSieve {
        bounds: Mutex<Vec<u64>>,
    }

    impl Sieve for RecordingSieve {
        fn sieve(&self, limit: u64) -> Vec<u64> {
            self.bounds.lock().unwrap().push(limit);
            BasicSieve.sieve(limit)
        }
    }

    // ── Bound estimation ───────────────────────────────────────────────

    #[test]
    fn initial_bound_small_indices_use_fixed_bound() {
        for index in 0..LOG_ESTIMATE_MIN_INDEX {
            assert_eq!(initial_bound(index), SMALL_INDEX_BOUND);
        }
    }

    #[test]
    fn initial_bound_uses_n_ln_n() {
        // 6·ln 6 = 10.75, 100·ln 100 = 460.5, 10^6·ln 10^6 = 13815510.5
        assert_eq!(initial_bound(6), 10);
        assert_eq!(initial_bound(100), 460);
        assert_eq!(initial_bound(1_000_000), 13_815_510);
    }

    #[test]
    fn initial_bound_is_never_below_six() {
        for index in 0..10_000 {
            assert!(initial_bound(index) >= 6, "bound for {} too small", index);
        }
    }

    // ── Resolution ─────────────────────────────────────────────────────

    #[test]
    fn negative_index_returns_zero() {
        let resolver = NthPrime::new();
        assert_eq!(resolver.nth_prime(-1), 0);
        assert_eq!(resolver.nth_prime(-1_000), 0);
        assert_eq!(resolver.nth_prime(i64::MIN), 0);
    }

    #[test]
    fn first_primes() {
        let resolver = NthPrime::new();
        let expected = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47];
        for (index, &p) in expected.iter().enumerate() {
            assert_eq!(resolver.nth_prime(index as i64), p, "index {}", index);
        }
    }

    #[test]
    fn known_values() {
        let resolver = NthPrime::new();
        assert_eq!(resolver.nth_prime(19), 71);
        assert_eq!(resolver.nth_prime(99), 541);
        assert_eq!(resolver.nth_prime(500), 3_581);
        assert_eq!(resolver.nth_prime(986), 7_793);
        assert_eq!(resolver.nth_prime(2_000), 17_393);
    }

    #[test]
    fn repeated_calls_agree() {
        let resolver = NthPrime::new();
        let first = resolver.nth_prime(1_234);
        for _ in 0..5 {
            assert_eq!(resolver.nth_prime(1_234), first);
        }
    }

    #[test]
    fn negative_index_never_sieves() {
        let resolver = NthPrime::with_sieve(RecordingSieve::default());
        resolver.nth_prime(-5);
        assert!(resolver.sieve.bounds.lock().unwrap().is_empty());
    }

    #[test]
    fn small_index_resolves_in_one_pass() {
        let resolver = NthPrime::with_sieve(RecordingSieve::default());
        assert_eq!(resolver.nth_prime(5), 13);
        assert_eq!(*resolver.sieve.bounds.lock().unwrap(), vec![20]);
    }

    /// p_6 = 17 lies above the first bound ⌊6·ln 6⌋ = 10.
    #[test]
    fn bound_doubles_until_index_is_covered() {
        let resolver = NthPrime::with_sieve(RecordingSieve::default());
        assert_eq!(resolver.nth_prime(6), 17);
        assert_eq!(*resolver.sieve.bounds.lock().unwrap(), vec![10, 20]);
    }

    /// π(13) = 6 covers indices 0..=5 only; p_7 = 19 needs one doubling.
    #[test]
    fn short_prime_list_triggers_retry() {
        let resolver = NthPrime::with_sieve(RecordingSieve::default());
        assert_eq!(resolver.nth_prime(7), 19);
        assert_eq!(*resolver.sieve.bounds.lock().unwrap(), vec![13, 26]);
    }

    #[test]
    fn basic_and_segmented_resolvers_agree() {
        let basic = NthPrime::with_sieve(BasicSieve);
        let segmented = NthPrime::new();
        for index in (0..3_000).step_by(37) {
            assert_eq!(basic.nth_prime(index), segmented.nth_prime(index));
        }
    }

    #[test]
    fn shared_across_threads() {
        let resolver = NthPrime::new();
        std::thread::scope(|s| {
            let handles: Vec<_> = [19i64, 99, 500, 986]
                .into_iter()
                .map(|index| s.spawn(move || (index, resolver.nth_prime(index))))
                .collect();
            for handle in handles {
                let (index, p) = handle.join().unwrap();
                assert_eq!(p, NthPrime::new().nth_prime(index));
            }
        });
    }
}
