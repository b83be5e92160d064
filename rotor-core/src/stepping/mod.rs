// File:    mod.rs
// Date:    2026-05-11
//
// Description: Stepping gears, the per-family state machines that advance rotors before each symbol.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! Stepping gears.
//!
//! A [`SteppingGear`] owns the displacement bank and an ordered list of
//! named rotor slots; the family-specific motion law is a closed
//! [`GearKind`] variant selected once at construction. `step()` fires once
//! per symbol, before that symbol is enciphered, exactly as a key press
//! moves the wheels before the circuit closes.

mod enigma;
mod kl7;
mod nema;
mod odometer;
mod sg39;
mod sigaba;

pub use enigma::EnigmaGear;
pub use kl7::Kl7Gear;
pub use nema::NemaGear;
pub use odometer::OdometerGear;
pub use sg39::Sg39Gear;
pub use sigaba::SigabaGear;

use log::{debug, trace};

use crate::error::{CipherError, Result};
use crate::rotor::{PositionBank, Rotor, RotorRing};

/// One named rotor position inside a gear.
#[derive(Debug, Clone)]
pub struct RotorSlot {
    name: String,
    rotor: Rotor,
    ring: Option<RotorRing>,
}

impl RotorSlot {
    /// A slot holding a bare rotor, no notch track.
    pub fn new(name: impl Into<String>, rotor: Rotor) -> Self {
        RotorSlot {
            name: name.into(),
            rotor,
            ring: None,
        }
    }

    /// A slot holding a rotor with a notch/pin track bound to it.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::RingLengthMismatch`] when the track does not
    /// cover the rotor.
    pub fn with_ring(name: impl Into<String>, rotor: Rotor, ring_data: Vec<u32>) -> Result<Self> {
        let ring = RotorRing::new(ring_data, &rotor)?;
        Ok(RotorSlot {
            name: name.into(),
            rotor,
            ring: Some(ring),
        })
    }

    /// The slot's name, e.g. `"fast"` or `"cipher-3"`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The rotor seated in this slot.
    #[must_use]
    pub fn rotor(&self) -> &Rotor {
        &self.rotor
    }

    /// Mutable access to the seated rotor, e.g. to swap its wiring.
    pub fn rotor_mut(&mut self) -> &mut Rotor {
        &mut self.rotor
    }

    /// The bound ring, if the slot carries one.
    #[must_use]
    pub fn ring(&self) -> Option<&RotorRing> {
        self.ring.as_ref()
    }

    /// Mutable access to the bound ring.
    pub fn ring_mut(&mut self) -> Option<&mut RotorRing> {
        self.ring.as_mut()
    }

    /// Whether the slot's notch track reads nonzero at the current dial
    /// position. Slots without a ring never show a notch.
    #[must_use]
    pub fn at_notch(&self, bank: &PositionBank) -> bool {
        self.ring
            .as_ref()
            .is_some_and(|ring| ring.get_current_data(bank, 0) != 0)
    }
}

/// The family-specific motion law driving a gear.
#[derive(Debug, Clone)]
pub enum GearKind {
    /// Plain carry chain.
    Odometer(OdometerGear),
    /// Notch-controlled motion with the double-step anomaly.
    Enigma(EnigmaGear),
    /// Driver/cipher/index banks with cross-drive.
    Sigaba(SigabaGear),
    /// Notch-ring feed chain with one stationary slot.
    Kl7(Kl7Gear),
    /// Gear train: drive wheels gated by the red wheel.
    Nema(NemaGear),
    /// Pin-wheel-controlled advance.
    Sg39(Sg39Gear),
}

impl GearKind {
    fn validate(&self, slots: &[RotorSlot]) -> Result<()> {
        match self {
            GearKind::Odometer(gear) => gear.validate(slots),
            GearKind::Enigma(gear) => gear.validate(slots),
            GearKind::Sigaba(gear) => gear.validate(slots),
            GearKind::Kl7(gear) => gear.validate(slots),
            GearKind::Nema(gear) => gear.validate(slots),
            GearKind::Sg39(gear) => gear.validate(slots),
        }
    }

    fn step(&self, slots: &[RotorSlot], bank: &mut PositionBank) {
        match self {
            GearKind::Odometer(gear) => gear.step(slots, bank),
            GearKind::Enigma(gear) => gear.step(slots, bank),
            GearKind::Sigaba(gear) => gear.step(slots, bank),
            GearKind::Kl7(gear) => gear.step(slots, bank),
            GearKind::Nema(gear) => gear.step(slots, bank),
            GearKind::Sg39(gear) => gear.step(slots, bank),
        }
    }

    fn family_name(&self) -> &'static str {
        match self {
            GearKind::Odometer(_) => "odometer",
            GearKind::Enigma(_) => "enigma",
            GearKind::Sigaba(_) => "sigaba",
            GearKind::Kl7(_) => "kl7",
            GearKind::Nema(_) => "nema",
            GearKind::Sg39(_) => "sg39",
        }
    }
}

/// The displacement bank, the slots it drives and the motion law over them.
///
/// Slot bindings are fixed after construction; only displacement and ring
/// offset values change while the machine runs.
#[derive(Debug, Clone)]
pub struct SteppingGear {
    bank: PositionBank,
    slots: Vec<RotorSlot>,
    kind: GearKind,
}

impl SteppingGear {
    /// Assembles a gear from its bank, slots and motion law.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::Configuration`] when the slot layout does not
    /// satisfy the family's requirements (wrong slot count, a gated slot
    /// missing its notch track, out-of-range slot references).
    pub fn new(bank: PositionBank, slots: Vec<RotorSlot>, kind: GearKind) -> Result<Self> {
        kind.validate(&slots)?;
        debug!(
            "stepping gear assembled: family={} slots={}",
            kind.family_name(),
            slots.len()
        );
        Ok(SteppingGear { bank, slots, kind })
    }

    /// Returns every rotor and ring to the zero position.
    pub fn reset(&mut self) {
        trace!("gear reset");
        for slot in &self.slots {
            match &slot.ring {
                Some(ring) => ring.set_pos(&mut self.bank, 0),
                None => self.bank.set(slot.rotor.cell(), 0),
            }
        }
    }

    /// Advances exactly one symbol's worth of motion.
    ///
    /// Must be called before that symbol's encryption; never fails.
    pub fn step(&mut self) {
        self.kind.step(&self.slots, &mut self.bank);
    }

    /// Number of slots.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Borrow a slot by index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn slot(&self, index: usize) -> &RotorSlot {
        &self.slots[index]
    }

    /// All slots, in order.
    #[must_use]
    pub fn slots(&self) -> &[RotorSlot] {
        &self.slots
    }

    /// The displacement bank, for threading symbols through rotors.
    #[must_use]
    pub fn bank(&self) -> &PositionBank {
        &self.bank
    }

    /// Raw displacement of a slot's rotor.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn get_displacement(&self, index: usize) -> usize {
        self.bank.get(self.slots[index].rotor.cell())
    }

    /// Sets the raw displacement of a slot's rotor.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set_displacement(&mut self, index: usize, value: usize) {
        self.bank.set(self.slots[index].rotor.cell(), value);
    }

    /// Ring offset of a slot, or `None` if the slot has no ring.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn get_ring_offset(&self, index: usize) -> Option<usize> {
        self.slots[index].ring.as_ref().map(RotorRing::get_offset)
    }

    /// Rotates a slot's ring against its rotor.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::Configuration`] if the slot has no ring.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set_ring_offset(&mut self, index: usize, offset: usize) -> Result<()> {
        match self.slots[index].ring.as_mut() {
            Some(ring) => {
                ring.set_offset(offset);
                Ok(())
            }
            None => Err(CipherError::Configuration(format!(
                "slot '{}' has no ring",
                self.slots[index].name
            ))),
        }
    }

    /// Dial position of a slot: the ring reading where a ring is bound,
    /// the raw displacement otherwise.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn get_position(&self, index: usize) -> usize {
        let slot = &self.slots[index];
        match &slot.ring {
            Some(ring) => ring.get_pos(&self.bank),
            None => self.bank.get(slot.rotor.cell()),
        }
    }

    /// Turns a slot's dial to `pos`, preserving any ring offset.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set_position(&mut self, index: usize, pos: usize) {
        let slot = &self.slots[index];
        match &slot.ring {
            Some(ring) => ring.set_pos(&mut self.bank, pos),
            None => self.bank.set(slot.rotor.cell(), pos),
        }
    }
}

fn check_slot_index(slots: &[RotorSlot], index: usize, role: &str) -> Result<()> {
    if index >= slots.len() {
        return Err(CipherError::Configuration(format!(
            "{role} slot index {index} out of range ({} slots)",
            slots.len()
        )));
    }
    Ok(())
}

fn require_ring(slots: &[RotorSlot], index: usize, role: &str) -> Result<()> {
    check_slot_index(slots, index, role)?;
    if slots[index].ring().is_none() {
        return Err(CipherError::Configuration(format!(
            "{role} slot '{}' needs a notch track",
            slots[index].name()
        )));
    }
    Ok(())
}
