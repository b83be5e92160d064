//! SG39 pin-wheel-controlled motion.

use super::{RotorSlot, check_slot_index, require_ring};
use crate::error::{CipherError, Result};
use crate::rotor::PositionBank;

/// SG39 motion: three pin wheels of coprime sizes free-run one position
/// per symbol; each gates one cipher rotor, which turns only when the pin
/// under the sensing lever is set. The remaining rotor is driven straight
/// off the key shaft and steps every symbol.
#[derive(Debug, Clone)]
pub struct Sg39Gear {
    fast: usize,
    gated: Vec<(usize, usize)>,
}

impl Sg39Gear {
    /// Names the always-stepping rotor slot and the (pin wheel, rotor)
    /// gate pairs.
    #[must_use]
    pub fn new(fast: usize, gated: Vec<(usize, usize)>) -> Self {
        Sg39Gear { fast, gated }
    }

    pub(super) fn validate(&self, slots: &[RotorSlot]) -> Result<()> {
        check_slot_index(slots, self.fast, "fast rotor")?;
        if self.gated.is_empty() {
            return Err(CipherError::Configuration(
                "sg39 gear has no pin wheels".to_string(),
            ));
        }
        for &(wheel, rotor) in &self.gated {
            require_ring(slots, wheel, "pin wheel")?;
            check_slot_index(slots, rotor, "gated rotor")?;
            if rotor == self.fast {
                return Err(CipherError::Configuration(
                    "the fast rotor cannot also be pin-gated".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub(super) fn step(&self, slots: &[RotorSlot], bank: &mut PositionBank) {
        // Pins are sensed before the wheels free-run forward.
        let go: Vec<bool> = self
            .gated
            .iter()
            .map(|&(wheel, _)| slots[wheel].at_notch(bank))
            .collect();

        bank.advance(slots[self.fast].rotor().cell());
        for (gate, &(wheel, rotor)) in self.gated.iter().enumerate() {
            bank.advance(slots[wheel].rotor().cell());
            if go[gate] {
                bank.advance(slots[rotor].rotor().cell());
            }
        }
    }
}
