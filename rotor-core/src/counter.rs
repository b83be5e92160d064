//! Small wraparound counters used for rotor and ring arithmetic.

use crate::permutation::Permutation;

/// A counter over `0..modulus` that wraps on both ends.
///
/// The increment path is branch-on-compare only; no division or modulo,
/// since this runs once per rotor per symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModularCounter {
    value: usize,
    modulus: usize,
}

impl ModularCounter {
    /// A zeroed counter over `0..modulus`.
    #[must_use]
    pub fn new(modulus: usize) -> Self {
        debug_assert!(modulus > 0, "counter modulus must be positive");
        ModularCounter { value: 0, modulus }
    }

    /// A counter preloaded with `value` (reduced mod `modulus`).
    #[must_use]
    pub fn with_value(modulus: usize, value: usize) -> Self {
        let mut counter = Self::new(modulus);
        counter.set(value);
        counter
    }

    /// Current value, always in `0..modulus`.
    #[must_use]
    pub fn get(&self) -> usize {
        self.value
    }

    /// The wraparound point.
    #[must_use]
    pub fn modulus(&self) -> usize {
        self.modulus
    }

    /// Sets the value, reducing mod `modulus`.
    pub fn set(&mut self, value: usize) {
        self.value = value % self.modulus;
    }

    /// Advances by one position, wrapping to zero.
    pub fn increment(&mut self) {
        self.value += 1;
        if self.value == self.modulus {
            self.value = 0;
        }
    }

    /// Retreats by one position, wrapping to `modulus - 1`.
    pub fn decrement(&mut self) {
        if self.value == 0 {
            self.value = self.modulus;
        }
        self.value -= 1;
    }

    /// Advances by `steps` positions.
    pub fn advance_by(&mut self, steps: usize) {
        let steps = steps % self.modulus;
        self.set(self.value + steps);
    }

    /// The current value mapped through a permutation, a composition
    /// helper for gears that read a wiring at the counter's position.
    ///
    /// # Panics
    ///
    /// Panics if the permutation is smaller than the current value.
    #[must_use]
    pub fn permuted(&self, perm: &Permutation) -> usize {
        perm.encrypt(self.value)
    }
}
