use thiserror::Error;

/// Errors surfaced by the rotor machine core.
///
/// Everything here is fatal at the point it occurs: configuration problems
/// abort construction, entropy failures abort a random draw. Runtime
/// stepping and per-symbol transforms never fail.
#[derive(Debug, Error)]
pub enum CipherError {
    /// A wiring image contained duplicate or out-of-range contacts.
    #[error("wiring image over {0} contacts is not a bijection")]
    NotBijective(usize),

    /// Two components that must share an alphabet size do not.
    #[error("size mismatch: expected {expected}, got {actual}")]
    SizeMismatch {
        /// The size required by the receiving component.
        expected: usize,
        /// The size actually supplied.
        actual: usize,
    },

    /// Ring data does not cover the rotor it is being bound to.
    #[error("ring data length {ring} does not match rotor size {rotor}")]
    RingLengthMismatch {
        /// Length of the supplied notch/pin track.
        ring: usize,
        /// Size of the rotor the ring was bound to.
        rotor: usize,
    },

    /// A gear or machine was built from an inconsistent slot layout.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The underlying entropy source failed mid-draw.
    #[error("random source failure: {0}")]
    RandomSource(String),

    /// Fixed-point-free involutions only exist over even alphabets.
    #[error("cannot build a fixed-point-free involution over {0} contacts")]
    OddInvolution(usize),

    /// A character is not part of the machine's alphabet.
    #[error("symbol '{0}' is not in the alphabet")]
    UnknownSymbol(char),
}

/// Convenience result type used throughout the crate.
pub type Result<T> = std::result::Result<T, CipherError>;
