//! SIGABA multi-bank motion: control rotors drive cipher rotors through
//! the index bank.

use super::{RotorSlot, check_slot_index};
use crate::error::{CipherError, Result};
use crate::rotor::PositionBank;

/// Control-bank position at which a wheel carries into its neighbor
/// (the letter `O` on a 26-contact wheel).
const CONTROL_TRIGGER: usize = 14;

/// The four always-energized control-bank inputs (`F` through `I`).
const STEP_INPUTS: [usize; 4] = [5, 6, 7, 8];

/// CSP-889 grouping of control-bank outputs onto index-bank contacts.
const DEFAULT_SELECTOR: [usize; 26] = [
    9, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4, 5, 5, 5, 5, 6, 6, 6, 6, 6, 7, 7, 7, 7, 7, 7,
];

/// SIGABA driver/cipher/index motion.
///
/// Each cycle runs a three-stage pipeline: the control bank steps under
/// odometer-like rules, four energized inputs are threaded through the
/// control stack, the resulting output pattern is grouped through the
/// selector onto the index bank, and the index outputs, taken in pairs,
/// form the advance mask for the cipher bank. Between one and four cipher
/// rotors move on every symbol.
#[derive(Debug, Clone)]
pub struct SigabaGear {
    cipher: Vec<usize>,
    control: Vec<usize>,
    index: Vec<usize>,
    selector: Vec<usize>,
}

impl SigabaGear {
    /// Names the cipher, control and index bank slots, five each, using
    /// the historical CSP-889 selector grouping.
    #[must_use]
    pub fn new(cipher: Vec<usize>, control: Vec<usize>, index: Vec<usize>) -> Self {
        Self::with_selector(cipher, control, index, DEFAULT_SELECTOR.to_vec())
    }

    /// As [`SigabaGear::new`] with an explicit selector table mapping each
    /// control-bank output contact onto an index-bank contact.
    #[must_use]
    pub fn with_selector(
        cipher: Vec<usize>,
        control: Vec<usize>,
        index: Vec<usize>,
        selector: Vec<usize>,
    ) -> Self {
        SigabaGear {
            cipher,
            control,
            index,
            selector,
        }
    }

    pub(super) fn validate(&self, slots: &[RotorSlot]) -> Result<()> {
        if self.cipher.len() != 5 || self.control.len() != 5 || self.index.len() != 5 {
            return Err(CipherError::Configuration(
                "sigaba needs five cipher, five control and five index slots".to_string(),
            ));
        }
        for &slot in self.cipher.iter().chain(&self.control).chain(&self.index) {
            check_slot_index(slots, slot, "sigaba")?;
        }
        let contact_size = slots[self.control[0]].rotor().size();
        if contact_size <= STEP_INPUTS[3] {
            return Err(CipherError::Configuration(format!(
                "control rotors of size {contact_size} cannot carry the stepping inputs"
            )));
        }
        for &slot in self.cipher.iter().chain(&self.control) {
            if slots[slot].rotor().size() != contact_size {
                return Err(CipherError::Configuration(
                    "sigaba cipher and control rotors must share one size".to_string(),
                ));
            }
        }
        if self.selector.len() != contact_size {
            return Err(CipherError::Configuration(format!(
                "sigaba selector covers {} contacts, control rotors have {contact_size}",
                self.selector.len()
            )));
        }
        let index_size = slots[self.index[0]].rotor().size();
        for &slot in &self.index {
            if slots[slot].rotor().size() != index_size {
                return Err(CipherError::Configuration(
                    "sigaba index rotors must share one size".to_string(),
                ));
            }
        }
        for &contact in &self.selector {
            if contact >= index_size {
                return Err(CipherError::Configuration(format!(
                    "selector contact {contact} exceeds index rotor size {index_size}"
                )));
            }
        }
        if index_size > 2 * self.cipher.len() {
            return Err(CipherError::Configuration(
                "index outputs do not pair onto the cipher bank".to_string(),
            ));
        }
        Ok(())
    }

    pub(super) fn step(&self, slots: &[RotorSlot], bank: &mut PositionBank) {
        // Stage 1: step the control bank. The middle wheel is the fast one;
        // its neighbors carry when the faster wheel leaves the trigger
        // position. The two outermost control wheels never move.
        let fast = slots[self.control[2]].rotor().cell();
        let medium = slots[self.control[3]].rotor().cell();
        let slow = slots[self.control[1]].rotor().cell();

        let carry_medium = bank.get(fast) == CONTROL_TRIGGER;
        let carry_slow = carry_medium && bank.get(medium) == CONTROL_TRIGGER;
        bank.advance(fast);
        if carry_medium {
            bank.advance(medium);
        }
        if carry_slow {
            bank.advance(slow);
        }

        // Stage 2 and 3: thread the energized inputs through the control
        // stack, group the outputs onto the index bank, pair the index
        // outputs into the cipher advance mask.
        let mut mask = vec![false; self.cipher.len()];
        for input in STEP_INPUTS {
            let mut contact = input;
            for &slot in self.control.iter().rev() {
                contact = slots[slot].rotor().encrypt(bank, contact);
            }
            let mut index_contact = self.selector[contact];
            for &slot in &self.index {
                index_contact = slots[slot].rotor().encrypt(bank, index_contact);
            }
            mask[index_contact / 2] = true;
        }

        // Stage 4: apply the mask to the cipher bank.
        for (&slot, stepped) in self.cipher.iter().zip(mask) {
            if stepped {
                bank.advance(slots[slot].rotor().cell());
            }
        }
    }
}
