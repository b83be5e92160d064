//! Notch-controlled Enigma motion, double-step anomaly included.

use super::{RotorSlot, check_slot_index, require_ring};
use crate::error::{CipherError, Result};
use crate::rotor::PositionBank;

/// Enigma-family motion over three moving wheels.
///
/// The fast wheel steps every symbol. A wheel at its turnover notch, read
/// from its ring track at the current dial position, steps its left
/// neighbor. The middle wheel additionally steps *itself* whenever it sits
/// at its own notch: the double-step anomaly, reproduced here as an
/// explicit branch rather than left to emerge from a generic carry rule.
///
/// Slots outside the three wheel positions (e.g. an M4 greek wheel) are
/// simply never moved by this gear.
#[derive(Debug, Clone)]
pub struct EnigmaGear {
    fast: usize,
    middle: usize,
    slow: usize,
}

impl EnigmaGear {
    /// Names the fast (entry-side), middle and slow wheel slots.
    #[must_use]
    pub fn new(fast: usize, middle: usize, slow: usize) -> Self {
        EnigmaGear { fast, middle, slow }
    }

    pub(super) fn validate(&self, slots: &[RotorSlot]) -> Result<()> {
        if self.fast == self.middle || self.middle == self.slow || self.fast == self.slow {
            return Err(CipherError::Configuration(
                "enigma wheel slots must be distinct".to_string(),
            ));
        }
        require_ring(slots, self.fast, "fast wheel")?;
        require_ring(slots, self.middle, "middle wheel")?;
        check_slot_index(slots, self.slow, "slow wheel")
    }

    pub(super) fn step(&self, slots: &[RotorSlot], bank: &mut PositionBank) {
        // Notches are sampled before anything moves: a wheel carries as it
        // leaves its turnover position.
        let fast_at_notch = slots[self.fast].at_notch(bank);
        let middle_at_notch = slots[self.middle].at_notch(bank);

        bank.advance(slots[self.fast].rotor().cell());
        if middle_at_notch {
            // Double-step anomaly: the middle wheel at its own notch moves
            // itself together with the slow wheel.
            bank.advance(slots[self.middle].rotor().cell());
            bank.advance(slots[self.slow].rotor().cell());
        } else if fast_at_notch {
            bank.advance(slots[self.middle].rotor().cell());
        }
    }
}
