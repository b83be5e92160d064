#![allow(dead_code)]
#![allow(unreachable_pub)]

use rotor_core::machine::RotorMachine;
use rotor_core::permutation::Permutation;
use rotor_core::rotor::{PositionBank, Rotor};
use rotor_core::stepping::{EnigmaGear, GearKind, RotorSlot, SteppingGear};

// Historical Enigma I wirings and turnover notches.
pub const ROTOR_I: &str = "EKMFLGDQVZNTOWYHXUSPAIBRCJ";
pub const ROTOR_II: &str = "AJDKSIRUXBLHWTMCQGZNPYFVOE";
pub const ROTOR_III: &str = "BDFHJLCPRTXVZNYEIWGAKMUSQO";
pub const ROTOR_IV: &str = "ESOVPZJAYQUIRHXLNFTGKDCMWB";
pub const ROTOR_V: &str = "VZBRGITYUPSDNHLXAWMJQOFECK";
pub const REFLECTOR_B: &str = "YRUHQSLDPXNGOKMIEBFZCWVJAT";

/// Turns an uppercase wiring specification into an image array.
pub fn wiring(spec: &str) -> Vec<usize> {
    spec.bytes().map(|b| usize::from(b - b'A')).collect()
}

pub fn perm(spec: &str) -> Permutation {
    Permutation::new_checked(&wiring(spec)).expect("historical wiring is a bijection")
}

/// A notch track with a mark at each given turnover letter.
pub fn notch_track(size: usize, notches: &[char]) -> Vec<u32> {
    let mut track = vec![0; size];
    for &notch in notches {
        track[(notch as u8 - b'A') as usize] = 1;
    }
    track
}

/// An affine bijection over `0..size`; `factor` must be coprime to `size`.
pub fn affine_perm(size: usize, factor: usize, shift: usize) -> Permutation {
    let image: Vec<usize> = (0..size).map(|i| (i * factor + shift) % size).collect();
    Permutation::new_checked(&image).expect("affine image with coprime factor is a bijection")
}

/// Enigma I with reflector B, rotors I (slow), II (middle), III (fast),
/// all rings and positions at A. Slot order: fast, middle, slow; the
/// stack enters at the fast wheel.
pub fn enigma_b_123() -> RotorMachine {
    let mut bank = PositionBank::new();
    let fast_cell = bank.add_cell(26);
    let middle_cell = bank.add_cell(26);
    let slow_cell = bank.add_cell(26);

    let slots = vec![
        RotorSlot::with_ring(
            "fast",
            Rotor::new(perm(ROTOR_III), fast_cell, false),
            notch_track(26, &['V']),
        )
        .expect("track covers the rotor"),
        RotorSlot::with_ring(
            "middle",
            Rotor::new(perm(ROTOR_II), middle_cell, false),
            notch_track(26, &['E']),
        )
        .expect("track covers the rotor"),
        RotorSlot::new("slow", Rotor::new(perm(ROTOR_I), slow_cell, false)),
    ];

    let gear = SteppingGear::new(bank, slots, GearKind::Enigma(EnigmaGear::new(0, 1, 2)))
        .expect("valid enigma layout");
    let mut machine = RotorMachine::new(gear, vec![0, 1, 2]).expect("valid stack");
    machine
        .set_reflector(perm(REFLECTOR_B))
        .expect("reflector B is an involution");
    machine
}

/// Encodes an uppercase letter to its symbol.
pub fn sym(c: char) -> usize {
    (c as u8 - b'A') as usize
}

/// Decodes a symbol sequence to uppercase letters.
pub fn letters(symbols: &[usize]) -> String {
    symbols
        .iter()
        .map(|&s| char::from(b'A' + u8::try_from(s).expect("symbol fits a letter")))
        .collect()
}
