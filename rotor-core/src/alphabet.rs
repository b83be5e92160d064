//! Character/symbol mapping at the machine boundary.
//!
//! The engine itself only ever sees symbols `0..n`; front ends and tests
//! use an [`Alphabet`] to move between characters and symbols.

use std::collections::HashMap;

use crate::error::{CipherError, Result};

/// An ordered character set mapped onto the symbols `0..n`.
#[derive(Debug, Clone)]
pub struct Alphabet {
    chars: Vec<char>,
    lookup: HashMap<char, usize>,
}

impl Alphabet {
    /// Builds an alphabet from an ordered character sequence.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::Configuration`] on a duplicated character.
    pub fn new(chars: &str) -> Result<Self> {
        let chars: Vec<char> = chars.chars().collect();
        let mut lookup = HashMap::with_capacity(chars.len());
        for (symbol, &c) in chars.iter().enumerate() {
            if lookup.insert(c, symbol).is_some() {
                return Err(CipherError::Configuration(format!(
                    "duplicate character '{c}' in alphabet"
                )));
            }
        }
        Ok(Alphabet { chars, lookup })
    }

    /// The 26-letter lowercase Latin alphabet.
    #[must_use]
    pub fn latin() -> Self {
        let chars: Vec<char> = ('a'..='z').collect();
        let lookup = chars.iter().enumerate().map(|(s, &c)| (c, s)).collect();
        Alphabet { chars, lookup }
    }

    /// Number of characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Whether the alphabet is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Whether `c` belongs to the alphabet.
    #[must_use]
    pub fn contains(&self, c: char) -> bool {
        self.lookup.contains_key(&c)
    }

    /// The symbol for a character.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::UnknownSymbol`] for characters outside the
    /// alphabet.
    pub fn encode(&self, c: char) -> Result<usize> {
        self.lookup
            .get(&c)
            .copied()
            .ok_or(CipherError::UnknownSymbol(c))
    }

    /// The character for a symbol, if in range.
    #[must_use]
    pub fn decode(&self, symbol: usize) -> Option<char> {
        self.chars.get(symbol).copied()
    }

    /// Encodes a string; every character must belong to the alphabet.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::UnknownSymbol`] on the first foreign
    /// character.
    pub fn encode_str(&self, text: &str) -> Result<Vec<usize>> {
        text.chars().map(|c| self.encode(c)).collect()
    }

    /// Encodes a string, silently dropping foreign characters. This is
    /// how the keyboard layer treats spacing in operator input.
    #[must_use]
    pub fn encode_lossy(&self, text: &str) -> Vec<usize> {
        text.chars()
            .filter_map(|c| self.lookup.get(&c).copied())
            .collect()
    }

    /// Decodes a symbol sequence, skipping out-of-range symbols.
    #[must_use]
    pub fn decode_seq(&self, symbols: &[usize]) -> String {
        symbols.iter().filter_map(|&s| self.decode(s)).collect()
    }
}
