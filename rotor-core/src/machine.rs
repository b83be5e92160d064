// File:    machine.rs
// Date:    2026-05-11
//
// Description: The machine transform pipeline: input transform, rotor stack, reflector and output transform around a stepping gear.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! The per-symbol transform pipeline.
//!
//! A [`RotorMachine`] steps its gear, then threads the symbol through
//! `input transform -> rotor stack (forward) -> reflector -> rotor stack
//! (reverse) -> output transform`. Machines without a reflector run the
//! stack straight through, and whether the reverse pass re-enters the
//! stack is a runtime flag, since some machines let any rotor be
//! reconfigured as a reflecting rotor.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{CipherError, Result};
use crate::permutation::Permutation;
use crate::rotor::Rotor;
use crate::stepping::SteppingGear;

/// Snapshot of every displacement and ring offset in a machine, in slot
/// order.
///
/// Produced by [`RotorMachine::save_state`] for the persistence layer,
/// which owns the actual encoding; restoring a snapshot into a machine
/// with identical wiring reproduces the identical encryption stream.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MachineState {
    /// Raw rotor displacement per slot.
    pub displacements: Vec<usize>,
    /// Ring offset per slot, `None` where the slot has no ring.
    pub ring_offsets: Vec<Option<usize>>,
}

/// One rotor cipher machine: a stepping gear, the ordered stack of slots
/// the signal passes through, and the transforms around that stack.
#[derive(Debug, Clone)]
pub struct RotorMachine {
    gear: SteppingGear,
    stack: Vec<usize>,
    input_transform: Option<Permutation>,
    output_transform: Option<Permutation>,
    reflector: Option<Permutation>,
    reflecting: bool,
}

impl RotorMachine {
    /// Assembles a machine over a gear and the slot indices forming the
    /// signal path, listed from the entry side towards the reflector side.
    ///
    /// The machine starts in straight-through mode; install a reflector
    /// with [`RotorMachine::set_reflector`] or toggle
    /// [`RotorMachine::set_reflecting`] to turn around on the last stack
    /// rotor.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::Configuration`] for an empty stack or
    /// out-of-range slot index, and [`CipherError::SizeMismatch`] when the
    /// stack rotors do not share one alphabet size.
    pub fn new(gear: SteppingGear, stack: Vec<usize>) -> Result<Self> {
        if stack.is_empty() {
            return Err(CipherError::Configuration(
                "machine stack is empty".to_string(),
            ));
        }
        for &index in &stack {
            if index >= gear.slot_count() {
                return Err(CipherError::Configuration(format!(
                    "stack slot index {index} out of range ({} slots)",
                    gear.slot_count()
                )));
            }
        }
        let size = gear.slot(stack[0]).rotor().size();
        for &index in &stack[1..] {
            let actual = gear.slot(index).rotor().size();
            if actual != size {
                return Err(CipherError::SizeMismatch {
                    expected: size,
                    actual,
                });
            }
        }
        debug!(
            "rotor machine assembled: stack={} alphabet={size}",
            stack.len()
        );
        Ok(RotorMachine {
            gear,
            stack,
            input_transform: None,
            output_transform: None,
            reflector: None,
            reflecting: false,
        })
    }

    /// Alphabet size of the signal path.
    #[must_use]
    pub fn alphabet_size(&self) -> usize {
        self.gear.slot(self.stack[0]).rotor().size()
    }

    /// Installs a reflector and switches the machine into reflecting mode.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::SizeMismatch`] on a wrong-sized wiring and
    /// [`CipherError::Configuration`] when the wiring is not a
    /// fixed-point-free involution, which no physical reflector can be.
    pub fn set_reflector(&mut self, reflector: Permutation) -> Result<()> {
        self.check_size(&reflector)?;
        if reflector.test_for_involution().is_none() {
            return Err(CipherError::Configuration(
                "reflector is not a fixed-point-free involution".to_string(),
            ));
        }
        self.reflector = Some(reflector);
        self.reflecting = true;
        Ok(())
    }

    /// Removes the fixed reflector. While reflecting mode stays on, the
    /// last stack rotor becomes the turnaround.
    pub fn clear_reflector(&mut self) {
        self.reflector = None;
    }

    /// Toggles whether the reverse pass re-enters the stack. This is a
    /// runtime switch, mirroring machines whose rotors can be reconfigured
    /// as reflecting rotors in place.
    pub fn set_reflecting(&mut self, reflecting: bool) {
        self.reflecting = reflecting;
    }

    /// Whether the signal currently turns around through the stack.
    #[must_use]
    pub fn is_reflecting(&self) -> bool {
        self.reflecting
    }

    /// Installs the entry-side transform (e.g. a plugboard or keyboard
    /// wiring).
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::SizeMismatch`] on a wrong-sized wiring.
    pub fn set_input_transform(&mut self, perm: Permutation) -> Result<()> {
        self.check_size(&perm)?;
        self.input_transform = Some(perm);
        Ok(())
    }

    /// Installs the exit-side transform (e.g. a printwheel wiring).
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::SizeMismatch`] on a wrong-sized wiring.
    pub fn set_output_transform(&mut self, perm: Permutation) -> Result<()> {
        self.check_size(&perm)?;
        self.output_transform = Some(perm);
        Ok(())
    }

    /// Installs one involution as both entry and exit transform, the
    /// plugboard arrangement of the Enigma family.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::SizeMismatch`] on a wrong-sized wiring and
    /// [`CipherError::Configuration`] when the wiring is not self-inverse.
    pub fn set_plugboard(&mut self, perm: Permutation) -> Result<()> {
        self.check_size(&perm)?;
        let n = perm.size();
        if (0..n).any(|x| perm.decrypt(perm.encrypt(x)) != x || perm.encrypt(perm.encrypt(x)) != x)
        {
            return Err(CipherError::Configuration(
                "plugboard wiring is not self-inverse".to_string(),
            ));
        }
        self.output_transform = Some(perm.clone());
        self.input_transform = Some(perm);
        Ok(())
    }

    /// Encrypts one symbol, stepping the gear first as a key press would.
    ///
    /// # Panics
    ///
    /// Panics if `symbol` is outside the machine's alphabet.
    pub fn encrypt(&mut self, symbol: usize) -> usize {
        self.gear.step();
        self.cipher_forward(symbol)
    }

    /// Decrypts one symbol, stepping the gear first.
    ///
    /// `decrypt(encrypt(x)) == x` holds for the same machine state; since
    /// stepping precedes both calls, the state must be replayed (via
    /// [`RotorMachine::reset`] or a restored snapshot) to exercise the
    /// round trip.
    ///
    /// # Panics
    ///
    /// Panics if `symbol` is outside the machine's alphabet.
    pub fn decrypt(&mut self, symbol: usize) -> usize {
        self.gear.step();
        self.cipher_backward(symbol)
    }

    /// Encrypts a sequence of symbols.
    pub fn encrypt_sequence(&mut self, symbols: &[usize]) -> Vec<usize> {
        symbols.iter().map(|&s| self.encrypt(s)).collect()
    }

    /// Decrypts a sequence of symbols.
    pub fn decrypt_sequence(&mut self, symbols: &[usize]) -> Vec<usize> {
        symbols.iter().map(|&s| self.decrypt(s)).collect()
    }

    /// Returns every rotor and ring to the zero position.
    pub fn reset(&mut self) {
        self.gear.reset();
    }

    /// The stepping gear, for position and ring access.
    #[must_use]
    pub fn gear(&self) -> &SteppingGear {
        &self.gear
    }

    /// Mutable access to the stepping gear, for position and ring setup.
    pub fn gear_mut(&mut self) -> &mut SteppingGear {
        &mut self.gear
    }

    /// Snapshots every displacement and ring offset.
    #[must_use]
    pub fn save_state(&self) -> MachineState {
        let slots = self.gear.slot_count();
        MachineState {
            displacements: (0..slots).map(|i| self.gear.get_displacement(i)).collect(),
            ring_offsets: (0..slots).map(|i| self.gear.get_ring_offset(i)).collect(),
        }
    }

    /// Restores a snapshot taken from a machine with the same slot layout.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::SizeMismatch`] when the snapshot does not
    /// cover this machine's slots, and [`CipherError::Configuration`] when
    /// it carries a ring offset for a ringless slot.
    pub fn restore_state(&mut self, state: &MachineState) -> Result<()> {
        let slots = self.gear.slot_count();
        if state.displacements.len() != slots {
            return Err(CipherError::SizeMismatch {
                expected: slots,
                actual: state.displacements.len(),
            });
        }
        if state.ring_offsets.len() != slots {
            return Err(CipherError::SizeMismatch {
                expected: slots,
                actual: state.ring_offsets.len(),
            });
        }
        // The whole snapshot is checked before any slot is touched, so a
        // rejected snapshot leaves the machine exactly as it was.
        for (index, offset) in state.ring_offsets.iter().enumerate() {
            if offset.is_some() && self.gear.get_ring_offset(index).is_none() {
                return Err(CipherError::Configuration(format!(
                    "snapshot carries a ring offset for ringless slot '{}'",
                    self.gear.slot(index).name()
                )));
            }
        }
        for (index, &offset) in state.ring_offsets.iter().enumerate() {
            if let Some(offset) = offset {
                self.gear.set_ring_offset(index, offset)?;
            }
        }
        for (index, &displacement) in state.displacements.iter().enumerate() {
            self.gear.set_displacement(index, displacement);
        }
        Ok(())
    }

    fn check_size(&self, perm: &Permutation) -> Result<()> {
        let expected = self.alphabet_size();
        if perm.size() != expected {
            return Err(CipherError::SizeMismatch {
                expected,
                actual: perm.size(),
            });
        }
        Ok(())
    }

    fn stack_rotor(&self, position: usize) -> &Rotor {
        self.gear.slot(self.stack[position]).rotor()
    }

    /// The stack body and turnaround position for reflecting mode: with a
    /// fixed reflector the whole stack is the body, otherwise the last
    /// stack rotor turns the signal around.
    fn body_len(&self) -> usize {
        if self.reflector.is_some() {
            self.stack.len()
        } else {
            self.stack.len() - 1
        }
    }

    fn cipher_forward(&self, mut c: usize) -> usize {
        let bank = self.gear.bank();
        if let Some(perm) = &self.input_transform {
            c = perm.encrypt(c);
        }
        if self.reflecting {
            let body = self.body_len();
            for position in 0..body {
                c = self.stack_rotor(position).encrypt(bank, c);
            }
            c = match &self.reflector {
                Some(reflector) => reflector.encrypt(c),
                None => self.stack_rotor(self.stack.len() - 1).encrypt(bank, c),
            };
            for position in (0..body).rev() {
                c = self.stack_rotor(position).decrypt(bank, c);
            }
        } else {
            for position in 0..self.stack.len() {
                c = self.stack_rotor(position).encrypt(bank, c);
            }
        }
        if let Some(perm) = &self.output_transform {
            c = perm.encrypt(c);
        }
        c
    }

    fn cipher_backward(&self, mut c: usize) -> usize {
        let bank = self.gear.bank();
        if let Some(perm) = &self.output_transform {
            c = perm.decrypt(c);
        }
        if self.reflecting {
            let body = self.body_len();
            for position in 0..body {
                c = self.stack_rotor(position).encrypt(bank, c);
            }
            c = match &self.reflector {
                Some(reflector) => reflector.decrypt(c),
                None => self.stack_rotor(self.stack.len() - 1).decrypt(bank, c),
            };
            for position in (0..body).rev() {
                c = self.stack_rotor(position).decrypt(bank, c);
            }
        } else {
            for position in (0..self.stack.len()).rev() {
                c = self.stack_rotor(position).decrypt(bank, c);
            }
        }
        if let Some(perm) = &self.input_transform {
            c = perm.decrypt(c);
        }
        c
    }
}
