// File:    rotor.rs
// Date:    2026-05-11
//
// Description: Rotors, notch rings and the shared displacement bank that stepping gears mutate.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! The mechanical model: a [`Rotor`] couples a wiring permutation with a
//! displacement cell, a [`RotorRing`] is a notch/pin track rotated
//! independently of its rotor, and a [`PositionBank`] is the arena of
//! displacement cells a stepping gear owns.

use crate::counter::ModularCounter;
use crate::error::{CipherError, Result};
use crate::permutation::Permutation;

/// Handle to one displacement cell inside a [`PositionBank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellId(usize);

/// Arena of displacement cells owned by a stepping gear.
///
/// Multi-bank machines drive many rotors through one shared position
/// store; a rotor holds a [`CellId`] into this bank, never an alias into
/// another component's state.
#[derive(Debug, Clone, Default)]
pub struct PositionBank {
    cells: Vec<ModularCounter>,
}

impl PositionBank {
    /// An empty bank.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a zeroed cell wrapping at `modulus` and returns its handle.
    pub fn add_cell(&mut self, modulus: usize) -> CellId {
        let id = CellId(self.cells.len());
        self.cells.push(ModularCounter::new(modulus));
        id
    }

    /// Current value of a cell.
    #[must_use]
    pub fn get(&self, cell: CellId) -> usize {
        self.cells[cell.0].get()
    }

    /// Sets a cell, reducing mod its modulus.
    pub fn set(&mut self, cell: CellId, value: usize) {
        self.cells[cell.0].set(value);
    }

    /// Advances a cell by one position.
    pub fn advance(&mut self, cell: CellId) {
        self.cells[cell.0].increment();
    }

    /// Retreats a cell by one position.
    pub fn retreat(&mut self, cell: CellId) {
        self.cells[cell.0].decrement();
    }

    /// Number of cells in the bank.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the bank holds no cells yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Zeroes every cell.
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.set(0);
        }
    }
}

/// A wired disc: a permutation applied relative to a displacement cell.
#[derive(Debug, Clone)]
pub struct Rotor {
    perm: Permutation,
    cell: CellId,
    size: usize,
    reversed: bool,
}

impl Rotor {
    /// Binds a wiring to a displacement cell.
    ///
    /// `reversed` models inserting the disc the other way around: the
    /// signal then traverses the mirrored inverse wiring.
    #[must_use]
    pub fn new(perm: Permutation, cell: CellId, reversed: bool) -> Self {
        let size = perm.size();
        Rotor {
            perm,
            cell,
            size,
            reversed,
        }
    }

    /// Alphabet size of the bound wiring.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Handle of the displacement cell this rotor reads.
    #[must_use]
    pub fn cell(&self) -> CellId {
        self.cell
    }

    /// Whether the disc is inserted reversed.
    #[must_use]
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// The bound wiring.
    #[must_use]
    pub fn permutation(&self) -> &Permutation {
        &self.perm
    }

    /// Swaps in a different wiring, refreshing the cached size.
    pub fn set_permutation(&mut self, perm: Permutation) {
        self.size = perm.size();
        self.perm = perm;
    }

    /// Rebinds the rotor to a different displacement cell.
    pub fn rebind(&mut self, cell: CellId) {
        self.cell = cell;
    }

    /// Maps `c` through the wiring at the current displacement.
    ///
    /// The conjugation `(p((c + d) mod n) - d) mod n` is implemented with
    /// branchless wraparound only; this runs per symbol per rotor and
    /// machines chain up to ten rotors.
    ///
    /// # Panics
    ///
    /// Panics if `c >= self.size()`.
    #[must_use]
    pub fn encrypt(&self, bank: &PositionBank, c: usize) -> usize {
        let n = self.size;
        let d = bank.get(self.cell);
        let mut shifted = c + d;
        if shifted >= n {
            shifted -= n;
        }
        let mapped = if self.reversed {
            n - 1 - self.perm.decrypt(n - 1 - shifted)
        } else {
            self.perm.encrypt(shifted)
        };
        let mut out = mapped + n - d;
        if out >= n {
            out -= n;
        }
        out
    }

    /// The inverse of [`Rotor::encrypt`] at the same displacement.
    ///
    /// # Panics
    ///
    /// Panics if `c >= self.size()`.
    #[must_use]
    pub fn decrypt(&self, bank: &PositionBank, c: usize) -> usize {
        let n = self.size;
        let d = bank.get(self.cell);
        let mut shifted = c + d;
        if shifted >= n {
            shifted -= n;
        }
        let mapped = if self.reversed {
            n - 1 - self.perm.encrypt(n - 1 - shifted)
        } else {
            self.perm.decrypt(shifted)
        };
        let mut out = mapped + n - d;
        if out >= n {
            out -= n;
        }
        out
    }
}

/// A notch or pin track attached to a rotor, rotatable against it.
///
/// The ring reads and writes the rotor's displacement cell through the
/// shared bank; its own `offset` is the ring's rotation relative to the
/// disc.
#[derive(Debug, Clone)]
pub struct RotorRing {
    data: Vec<u32>,
    offset: usize,
    cell: CellId,
    size: usize,
}

impl RotorRing {
    /// Binds notch/pin data to a rotor.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::RingLengthMismatch`] when the track does not
    /// cover the rotor; that is a fatal configuration error.
    pub fn new(data: Vec<u32>, rotor: &Rotor) -> Result<Self> {
        if data.len() != rotor.size() {
            return Err(CipherError::RingLengthMismatch {
                ring: data.len(),
                rotor: rotor.size(),
            });
        }
        Ok(RotorRing {
            offset: 0,
            cell: rotor.cell(),
            size: rotor.size(),
            data,
        })
    }

    /// The ring's rotation relative to its rotor.
    #[must_use]
    pub fn get_offset(&self) -> usize {
        self.offset
    }

    /// Rotates the ring against the rotor. Does not move the rotor.
    pub fn set_offset(&mut self, offset: usize) {
        self.offset = offset % self.size;
    }

    /// The dial reading: displacement plus ring offset.
    #[must_use]
    pub fn get_pos(&self, bank: &PositionBank) -> usize {
        let mut pos = bank.get(self.cell) + self.offset;
        if pos >= self.size {
            pos -= self.size;
        }
        pos
    }

    /// Moves the rotor so the dial shows `pos`, holding the offset fixed.
    pub fn set_pos(&self, bank: &mut PositionBank, pos: usize) {
        let pos = pos % self.size;
        let mut displacement = pos + self.size - self.offset;
        if displacement >= self.size {
            displacement -= self.size;
        }
        bank.set(self.cell, displacement);
    }

    /// Reads the track at `extra_offset` positions ahead of the dial,
    /// without moving anything. Stepping gears use this to sense notches.
    #[must_use]
    pub fn get_current_data(&self, bank: &PositionBank, extra_offset: usize) -> u32 {
        let index = (self.get_pos(bank) + extra_offset) % self.size;
        self.data[index]
    }

    /// The raw notch/pin track.
    #[must_use]
    pub fn data(&self) -> &[u32] {
        &self.data
    }
}
