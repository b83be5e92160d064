// File:    lib.rs
// Date:    2026-05-11
//
// Description: The main library crate for rotor-core, the cryptographic transform engine for rotor cipher machines.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! # Rotor Machine Core Library
//!
//! This library reproduces, to the symbol, the encryption behavior of
//! electromechanical rotor cipher machines: the permutation primitive, the
//! rotor and ring mechanical model, the per-family stepping gears (odometer,
//! Enigma with its double-step anomaly, SIGABA's driver/cipher/index banks,
//! KL7, Nema, SG39) and the machine transform pipeline that ties them
//! together.
//!
//! The crate owns only the transform engine. Configuration parsing,
//! persistence encoding, UI and transport layers are callers of this API.

/// Character/symbol mapping used at the machine boundary.
pub mod alphabet;
/// Wraparound counters for rotor and ring arithmetic.
pub mod counter;
/// Error taxonomy for the engine.
pub mod error;
/// The machine transform pipeline orchestrating rotors, reflector and gears.
pub mod machine;
/// Bijective wiring permutations and their construction helpers.
pub mod permutation;
/// Rotors, notch rings and the shared displacement bank.
pub mod rotor;
/// Stepping gears: the state machines that advance rotors between symbols.
pub mod stepping;

pub use error::{CipherError, Result};
