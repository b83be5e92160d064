//! KL7 notch-ring feed motion.

use super::{RotorSlot, check_slot_index, require_ring};
use crate::error::{CipherError, Result};
use crate::rotor::PositionBank;

/// KL7-style motion: every moving slot carries a steppable notch ring
/// (the ring turns with its rotor and is independently offsettable), and
/// a slot steps when the ring of the slot feeding it shows a notch at the
/// current dial position. The first chain slot is fed by the key shaft
/// and steps every symbol; one designated slot never moves at all.
#[derive(Debug, Clone)]
pub struct Kl7Gear {
    chain: Vec<usize>,
    stationary: usize,
}

impl Kl7Gear {
    /// Builds the feed chain (fastest slot first) around one stationary
    /// slot.
    #[must_use]
    pub fn new(chain: Vec<usize>, stationary: usize) -> Self {
        Kl7Gear { chain, stationary }
    }

    /// The slot that never moves.
    #[must_use]
    pub fn stationary(&self) -> usize {
        self.stationary
    }

    pub(super) fn validate(&self, slots: &[RotorSlot]) -> Result<()> {
        if self.chain.is_empty() {
            return Err(CipherError::Configuration(
                "kl7 feed chain is empty".to_string(),
            ));
        }
        check_slot_index(slots, self.stationary, "stationary")?;
        for &index in &self.chain {
            require_ring(slots, index, "kl7 chain")?;
            if index == self.stationary {
                return Err(CipherError::Configuration(format!(
                    "stationary slot '{}' cannot sit in the feed chain",
                    slots[index].name()
                )));
            }
        }
        Ok(())
    }

    pub(super) fn step(&self, slots: &[RotorSlot], bank: &mut PositionBank) {
        // All notch rings are sensed before any wheel turns.
        let notched: Vec<bool> = self
            .chain
            .iter()
            .map(|&index| slots[index].at_notch(bank))
            .collect();

        bank.advance(slots[self.chain[0]].rotor().cell());
        for (link, &index) in self.chain.iter().enumerate().skip(1) {
            if notched[link - 1] {
                bank.advance(slots[index].rotor().cell());
            }
        }
    }
}
