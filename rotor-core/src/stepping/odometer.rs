//! Carry-chain motion, the mechanical counter analogue.

use super::{RotorSlot, check_slot_index};
use crate::error::{CipherError, Result};
use crate::rotor::PositionBank;

/// Plain odometer: the first slot in the chain is the fastest wheel and
/// advances every symbol; a wheel carries into the next only when it
/// completes a full revolution. No dependency on notch data.
#[derive(Debug, Clone)]
pub struct OdometerGear {
    chain: Vec<usize>,
}

impl OdometerGear {
    /// Builds the carry chain, fastest slot first.
    #[must_use]
    pub fn new(chain: Vec<usize>) -> Self {
        OdometerGear { chain }
    }

    pub(super) fn validate(&self, slots: &[RotorSlot]) -> Result<()> {
        if self.chain.is_empty() {
            return Err(CipherError::Configuration(
                "odometer chain is empty".to_string(),
            ));
        }
        for &index in &self.chain {
            check_slot_index(slots, index, "odometer")?;
        }
        Ok(())
    }

    pub(super) fn step(&self, slots: &[RotorSlot], bank: &mut PositionBank) {
        for &index in &self.chain {
            let cell = slots[index].rotor().cell();
            bank.advance(cell);
            if bank.get(cell) != 0 {
                break;
            }
        }
    }
}
