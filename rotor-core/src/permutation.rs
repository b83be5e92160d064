// File:    permutation.rs
// Date:    2026-05-11
//
// Description: Bijective wiring permutations, the cryptographic primitive behind every rotor, reflector and plugboard.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! Bijective mappings over `0..n`, kept as a forward table and its
//! functional inverse in lockstep.

use rand::TryRngCore;

use crate::error::{CipherError, Result};

/// A bijective mapping over the contacts `0..n` of one wired disc.
///
/// Both lookup directions are table-backed; every mutation keeps the two
/// tables consistent, so `forward[inverse[i]] == i` holds at all times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    forward: Vec<usize>,
    inverse: Vec<usize>,
}

impl Permutation {
    /// Builds a permutation from an explicit image array.
    ///
    /// Values are taken mod `image.len()`. This is the historical, lenient
    /// entry point: an image with duplicates produces a table that is not a
    /// bijection, and that is the caller's responsibility to avoid. Use
    /// [`Permutation::new_checked`] when the data crosses a trust boundary.
    #[must_use]
    pub fn new(image: &[usize]) -> Self {
        let n = image.len();
        let mut forward = vec![0; n];
        let mut inverse = vec![0; n];
        for (slot, &value) in image.iter().enumerate() {
            let value = value % n;
            forward[slot] = value;
            inverse[value] = slot;
        }
        Permutation { forward, inverse }
    }

    /// Builds a permutation from an image array, rejecting malformed data.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::NotBijective`] if the image contains an
    /// out-of-range or duplicate value.
    pub fn new_checked(image: &[usize]) -> Result<Self> {
        let n = image.len();
        let mut seen = vec![false; n];
        for &value in image {
            if value >= n || seen[value] {
                return Err(CipherError::NotBijective(n));
            }
            seen[value] = true;
        }
        Ok(Self::new(image))
    }

    /// The identity permutation over `0..n`.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        let forward: Vec<usize> = (0..n).collect();
        Permutation {
            inverse: forward.clone(),
            forward,
        }
    }

    /// Number of contacts this permutation maps.
    #[must_use]
    pub fn size(&self) -> usize {
        self.forward.len()
    }

    /// Maps `x` through the forward table.
    ///
    /// # Panics
    ///
    /// Panics if `x >= self.size()`; symbols outside the alphabet are a
    /// caller error.
    #[must_use]
    pub fn encrypt(&self, x: usize) -> usize {
        self.forward[x]
    }

    /// Maps `x` through the inverse table.
    ///
    /// # Panics
    ///
    /// Panics if `x >= self.size()`.
    #[must_use]
    pub fn decrypt(&self, x: usize) -> usize {
        self.inverse[x]
    }

    /// Applies transpositions of output positions in place.
    ///
    /// Each pair `(a, b)` swaps which inputs produce the outputs `a` and
    /// `b`. Both tables are updated per pair, so the bijection invariant
    /// holds after every call, under arbitrary interleaving.
    pub fn modify(&mut self, swaps: &[(usize, usize)]) {
        for &(a, b) in swaps {
            let pre_a = self.inverse[a];
            let pre_b = self.inverse[b];
            self.forward[pre_a] = b;
            self.forward[pre_b] = a;
            self.inverse.swap(a, b);
        }
    }

    /// Returns a new permutation whose forward table is this one's inverse.
    #[must_use]
    pub fn get_inverse(&self) -> Self {
        Permutation {
            forward: self.inverse.clone(),
            inverse: self.forward.clone(),
        }
    }

    /// Reinterprets the wiring as connected the other way around, in O(1),
    /// by swapping the two internal tables.
    pub fn switch_to_inverse(&mut self) {
        std::mem::swap(&mut self.forward, &mut self.inverse);
    }

    /// Checks whether this permutation is a fixed-point-free involution.
    ///
    /// Returns the 2-cycles, each reported once with the smaller contact
    /// first, or `None` if any contact is a fixed point or the mapping is
    /// not self-inverse. Reflector and plugboard wirings are validated with
    /// this before acceptance.
    #[must_use]
    pub fn test_for_involution(&self) -> Option<Vec<(usize, usize)>> {
        let n = self.size();
        let mut cycles = Vec::with_capacity(n / 2);
        for x in 0..n {
            let y = self.forward[x];
            if y == x || self.forward[y] != x {
                return None;
            }
            if x < y {
                cycles.push((x, y));
            }
        }
        Some(cycles)
    }

    /// Draws a uniformly random permutation over `0..n`.
    ///
    /// Each contact is tagged with an independent random key and the
    /// contacts are sorted by key.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::RandomSource`] if the entropy source fails
    /// mid-draw; no partial or biased result is ever returned.
    pub fn random<R: TryRngCore>(rng: &mut R, n: usize) -> Result<Self> {
        let mut tagged: Vec<(u64, usize)> = Vec::with_capacity(n);
        for slot in 0..n {
            let key = rng
                .try_next_u64()
                .map_err(|e| CipherError::RandomSource(e.to_string()))?;
            tagged.push((key, slot));
        }
        tagged.sort_unstable();
        let image: Vec<usize> = tagged.into_iter().map(|(_, slot)| slot).collect();
        Ok(Self::new(&image))
    }

    /// Draws a random fixed-point-free involution over `0..n`, e.g. for
    /// generating plugboard or reflector wirings.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::OddInvolution`] when `n` is odd and
    /// [`CipherError::RandomSource`] on entropy failure.
    pub fn random_involution<R: TryRngCore>(rng: &mut R, n: usize) -> Result<Self> {
        if n % 2 != 0 {
            return Err(CipherError::OddInvolution(n));
        }
        let arrangement = Self::random(rng, n)?;
        let mut image = vec![0; n];
        for pair in arrangement.forward.chunks_exact(2) {
            image[pair[0]] = pair[1];
            image[pair[1]] = pair[0];
        }
        Ok(Self::new(&image))
    }
}
