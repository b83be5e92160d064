//! Nema gear-train motion.

use super::{RotorSlot, check_slot_index, require_ring};
use crate::error::{CipherError, Result};
use crate::rotor::PositionBank;

/// Nema motion models a gear train rather than an electrical carry chain.
///
/// The red wheel turns on every symbol and carries one notch track per
/// drive/contact pair; a drive wheel turns when the red wheel's track for
/// its pair is active, and a contact wheel turns when its drive wheel's
/// own notch track is active. All gating is sensed before anything moves.
#[derive(Debug, Clone)]
pub struct NemaGear {
    red: usize,
    pairs: Vec<(usize, usize)>,
}

impl NemaGear {
    /// Names the red wheel slot and the (drive wheel, contact wheel)
    /// pairs it gates.
    #[must_use]
    pub fn new(red: usize, pairs: Vec<(usize, usize)>) -> Self {
        NemaGear { red, pairs }
    }

    pub(super) fn validate(&self, slots: &[RotorSlot]) -> Result<()> {
        if self.pairs.is_empty() {
            return Err(CipherError::Configuration(
                "nema gear has no drive/contact pairs".to_string(),
            ));
        }
        require_ring(slots, self.red, "red wheel")?;
        let red_size = slots[self.red].rotor().size();
        if self.pairs.len() > red_size {
            return Err(CipherError::Configuration(format!(
                "red wheel of size {red_size} cannot gate {} pairs",
                self.pairs.len()
            )));
        }
        for &(drive, contact) in &self.pairs {
            require_ring(slots, drive, "drive wheel")?;
            check_slot_index(slots, contact, "contact wheel")?;
        }
        Ok(())
    }

    pub(super) fn step(&self, slots: &[RotorSlot], bank: &mut PositionBank) {
        let red_ring = &slots[self.red];
        // The red wheel's track is read one position ahead per pair, so a
        // single wheel gates every drive wheel independently.
        let drive_go: Vec<bool> = (0..self.pairs.len())
            .map(|pair| {
                red_ring
                    .ring()
                    .is_some_and(|ring| ring.get_current_data(bank, pair) != 0)
            })
            .collect();
        let contact_go: Vec<bool> = self
            .pairs
            .iter()
            .map(|&(drive, _)| slots[drive].at_notch(bank))
            .collect();

        bank.advance(slots[self.red].rotor().cell());
        for (pair, &(drive, contact)) in self.pairs.iter().enumerate() {
            if drive_go[pair] {
                bank.advance(slots[drive].rotor().cell());
            }
            if contact_go[pair] {
                bank.advance(slots[contact].rotor().cell());
            }
        }
    }
}
