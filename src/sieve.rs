//! # Sieve — Windowed Sieve of Eratosthenes
//!
//! The number-theoretic core used by the cache. Provides:
//!
//! 1. **`CandidateWindow`**: a packed bitset of the odd integers in a half-open
//!    window `(low, high]`. This is the candidate set of one growth phase;
//!    elimination clears bits instead of removing set entries.
//! 2. **`sieve_window`**: runs elimination over one window, first against
//!    previously known primes and then against the window's own survivors.
//! 3. **`has_known_factor`**: trial division against an ascending prime list.
//!
//! ## Algorithm: Windowed Sieve
//!
//! Even numbers are never stored (2 is the only even prime and is seeded by the
//! cache), so bit `i` represents `first + 2i`. A composite `m` in the window has
//! a smallest prime factor `q <= sqrt(m) <= sqrt(high)`. Either `q <= low`, in
//! which case `q` is a known prime, or `q > low`, in which case `q` is itself a
//! window survivor. Striking multiples of both sets from `q²` upwards therefore
//! leaves exactly the primes in the window.
//!
//! Complexity: O(w log log high) time for a window of `w` values, O(w/128)
//! bytes of space.

/// Packed bit array over the odd integers of `(low, high]`.
///
/// A set bit means the candidate **survives**; a clear bit means it was
/// eliminated. Bit layout: candidate `first + 2i` lives in word `i / 64`, bit
/// `i % 64`.
pub struct CandidateWindow {
    first: u64,
    len: usize,
    words: Vec<u64>,
}

impl CandidateWindow {
    /// Build the candidate set of every odd integer in `(low, high]`, all
    /// initially surviving.
    ///
    /// The caller bounds the window so that its candidate count fits in memory
    /// (the cache grows in segments).
    pub fn odd_between(low: u64, high: u64) -> Self {
        let first = if low % 2 == 0 { low + 1 } else { low + 2 };
        let len = if first > high {
            0
        } else {
            ((high - first) / 2 + 1) as usize
        };
        let num_words = len.div_ceil(64);
        let mut words = vec![u64::MAX; num_words];
        // Clear unused high bits in the last word
        let extra = num_words * 64 - len;
        if extra > 0 {
            words[num_words - 1] >>= extra;
        }
        CandidateWindow { first, len, words }
    }

    /// Number of candidate slots (survivors and eliminated alike).
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Largest candidate slot in the window, if any.
    pub fn last(&self) -> Option<u64> {
        if self.len == 0 {
            None
        } else {
            Some(self.first + 2 * (self.len as u64 - 1))
        }
    }

    #[inline]
    fn index_of(&self, value: u64) -> Option<usize> {
        if value < self.first || (value - self.first) % 2 != 0 {
            return None;
        }
        let idx = ((value - self.first) / 2) as usize;
        (idx < self.len).then_some(idx)
    }

    /// True if `value` is an odd candidate of this window that has not been
    /// eliminated.
    #[inline]
    pub fn contains(&self, value: u64) -> bool {
        match self.index_of(value) {
            Some(idx) => self.words[idx / 64] & (1u64 << (idx % 64)) != 0,
            None => false,
        }
    }

    /// Eliminate `value` if it is a candidate of this window.
    #[inline]
    pub fn remove(&mut self, value: u64) {
        if let Some(idx) = self.index_of(value) {
            self.words[idx / 64] &= !(1u64 << (idx % 64));
        }
    }

    /// Eliminate every odd multiple `m` of `p` with `m >= p²` that lies in the
    /// window. `p` itself is never eliminated.
    ///
    /// Multiples below `p²` carry a smaller prime factor and are struck by that
    /// factor's own pass.
    pub fn strike_multiples(&mut self, p: u64) {
        debug_assert!(p >= 3 && p % 2 == 1, "only odd primes are struck");
        let Some(last) = self.last() else {
            return;
        };
        let Some(square) = p.checked_mul(p) else {
            return;
        };
        if square > last {
            return;
        }
        // First multiple of p at or above the window start, then force it odd
        let mut m = self.first.div_ceil(p) * p;
        if m < square {
            m = square;
        }
        if m % 2 == 0 {
            m += p;
        }
        let step = 2 * p;
        while m <= last {
            self.remove(m);
            m = match m.checked_add(step) {
                Some(next) => next,
                None => break,
            };
        }
    }

    /// Count surviving candidates using hardware POPCNT.
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Iterate over surviving candidates in ascending order.
    pub fn survivors(&self) -> impl Iterator<Item = u64> + '_ {
        let first = self.first;
        self.words
            .iter()
            .enumerate()
            .flat_map(|(wi, &word)| BitIter {
                word,
                base: wi * 64,
            })
            .map(move |idx| first + 2 * idx as u64)
    }
}

/// Iterator over set bits within a single u64 word.
struct BitIter {
    word: u64,
    base: usize,
}

impl Iterator for BitIter {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.word == 0 {
            return None;
        }
        let tz = self.word.trailing_zeros() as usize;
        self.word &= self.word - 1; // clear lowest set bit
        Some(self.base + tz)
    }
}

/// Find the odd primes in `(low, high]`.
///
/// `known` must hold, in ascending order, every prime `<= low`. Candidates are
/// first struck by the known odd primes `p` with `p² <= high`, then by the
/// window's own survivors in ascending order.
pub fn sieve_window(known: &[u64], low: u64, high: u64) -> Vec<u64> {
    let mut window = CandidateWindow::odd_between(low, high);
    let Some(last) = window.last() else {
        return Vec::new();
    };

    for &p in known.iter().filter(|&&p| p % 2 == 1) {
        if p.checked_mul(p).is_none_or(|sq| sq > last) {
            break;
        }
        window.strike_multiples(p);
    }

    // Self-elimination: a survivor at the time it is visited is prime
    let mut candidate = window.first;
    while candidate
        .checked_mul(candidate)
        .is_some_and(|sq| sq <= last)
    {
        if window.contains(candidate) {
            window.strike_multiples(candidate);
        }
        candidate += 2;
    }

    window.survivors().collect()
}

/// True if some prime `p` in `primes` with `p² <= value` and `p != value`
/// divides `value`.
///
/// With `primes` exhaustive up to `isqrt(value)`, `value >= 2` is prime iff
/// this returns false.
pub fn has_known_factor(value: u64, primes: &[u64]) -> bool {
    for &p in primes {
        if p.checked_mul(p).is_none_or(|sq| sq > value) {
            break;
        }
        if value % p == 0 && value != p {
            return true;
        }
    }
    false
}
