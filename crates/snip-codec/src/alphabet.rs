use crate::error::ConfigError;
use snip_core::CoreError;

/// The 62 ASCII alphanumerics in a fixed shuffled order.
///
/// Shuffling keeps consecutive ids from producing visibly consecutive codes.
pub const DEFAULT_ID_ALPHABET: &str =
    "KxpCvbJTfEoHqk5mWL18uAX37GiNM90lP6DdIwc2aVyQYhBZFn4SsgtjRzUOre";

/// A reversible integer-to-text encoding over a permutation alphabet.
///
/// Ids are written most significant digit first, with the alphabet's first
/// symbol standing for zero. Codes shorter than `min_length` are left-padded
/// with that zero symbol. Every `u64` has exactly one encoding, and
/// [`IdAlphabet::decode`] rejects anything that is not such an encoding.
#[derive(Debug, Clone)]
pub struct IdAlphabet {
    symbols: Vec<u8>,
    lookup: [Option<u8>; 128],
    min_length: usize,
}

impl IdAlphabet {
    /// Builds an alphabet from its symbols, validating them.
    pub fn new(symbols: &str, min_length: usize) -> Result<Self, ConfigError> {
        let count = symbols.chars().count();
        if count < 2 {
            return Err(ConfigError::AlphabetTooShort(count));
        }

        let mut lookup = [None; 128];
        for (index, ch) in symbols.chars().enumerate() {
            if !ch.is_ascii_alphanumeric() {
                return Err(ConfigError::InvalidSymbol(ch));
            }
            let slot = &mut lookup[ch as usize];
            if slot.is_some() {
                return Err(ConfigError::DuplicateSymbol(ch));
            }
            // at most 62 distinct alphanumerics, so the index fits in a u8
            *slot = Some(index as u8);
        }

        Ok(Self {
            symbols: symbols.as_bytes().to_vec(),
            lookup,
            min_length,
        })
    }

    /// Returns the number of symbols, i.e. the numeric base.
    pub fn base(&self) -> u64 {
        self.symbols.len() as u64
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Encodes `id` as text.
    pub fn encode(&self, mut id: u64) -> String {
        let base = self.base();
        let mut digits = Vec::with_capacity(self.min_length.max(11));
        loop {
            digits.push(self.symbols[(id % base) as usize]);
            id /= base;
            if id == 0 {
                break;
            }
        }
        while digits.len() < self.min_length {
            digits.push(self.symbols[0]);
        }
        digits.iter().rev().map(|&b| b as char).collect()
    }

    /// Decodes text produced by [`IdAlphabet::encode`].
    pub fn decode(&self, code: &str) -> Result<u64, CoreError> {
        if code.is_empty() {
            return Err(CoreError::InvalidCode("code must not be empty".to_string()));
        }

        let base = self.base();
        let mut id: u64 = 0;
        for ch in code.chars() {
            let digit = self.digit(ch).ok_or_else(|| {
                CoreError::InvalidCode(format!("character {ch:?} is not in the id alphabet"))
            })?;
            id = id
                .checked_mul(base)
                .and_then(|value| value.checked_add(digit))
                .ok_or_else(|| CoreError::InvalidCode(format!("'{code}' overflows a 64-bit id")))?;
        }

        // Extra leading zero symbols would let several codes name one id.
        if self.encode(id) != code {
            return Err(CoreError::InvalidCode(format!(
                "'{code}' is not in canonical form"
            )));
        }

        Ok(id)
    }

    fn digit(&self, ch: char) -> Option<u64> {
        if !ch.is_ascii() {
            return None;
        }
        self.lookup[ch as usize].map(u64::from)
    }
}

impl Default for IdAlphabet {
    fn default() -> Self {
        Self::new(DEFAULT_ID_ALPHABET, 0).expect("default alphabet is valid")
    }
}
