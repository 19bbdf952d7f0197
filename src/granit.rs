//! Granit: the encrypt/decrypt pipeline.
//!
//! Orchestrates the substitution codec and the two transposition boxes:
//!
//! ```text
//! encrypt: clean -> letters_to_numbers -> Box(key1) -> Box(key2) -> digits
//! decrypt: digits -> Box⁻¹(key2) -> Box⁻¹(key1) -> numbers_to_letters
//! ```

use std::fmt;

use tracing::{debug, warn};

use crate::error::{KeyRole, Result};
use crate::key_order::KeyOrder;
use crate::number_codec::NumberCodec;
use crate::substitution::SubstitutionMap;
use crate::utils::text::{ciphertext_digits, clean_plaintext, digits_to_string};

/// Transposition keys shorter than this trigger a [`KeyAdvisory`].
pub const MIN_RECOMMENDED_KEY_LETTERS: usize = 15;

/// Non-fatal warning about a transposition key that is too short.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyAdvisory {
    /// Which key the advisory concerns.
    pub role: KeyRole,
    /// Letters left in the key after cleaning.
    pub letters: usize,
}

impl fmt::Display for KeyAdvisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} has {} letters, at least {} are recommended",
            self.role, self.letters, MIN_RECOMMENDED_KEY_LETTERS
        )
    }
}

/// GRANIT cipher bound to one subkey and one pair of transposition keys.
///
/// All key material is derived once at construction; [`encrypt`](Self::encrypt)
/// and [`decrypt`](Self::decrypt) take `&self` and keep no state between
/// messages.
#[derive(Debug, Clone)]
pub struct Granit {
    codec: NumberCodec,
    first: KeyOrder,
    second: KeyOrder,
    advisories: Vec<KeyAdvisory>,
}

impl Granit {
    /// Creates a cipher with the default substitution table.
    ///
    /// # Errors
    /// Returns [`GranitError::EmptyKey`](crate::GranitError::EmptyKey) if
    /// either key has no letters.
    ///
    /// # Examples
    ///
    /// ```
    /// use granit::Granit;
    ///
    /// let granit = Granit::new("transpositionskey", "zweiterschluessel").unwrap();
    /// let ciphertext = granit.encrypt("Treffen um 1830.");
    /// assert_eq!(granit.decrypt(&ciphertext).unwrap(), "treffenum1830.");
    /// ```
    pub fn new(key1: &str, key2: &str) -> Result<Self> {
        Self::with_subkey(None, key1, key2)
    }

    /// Creates a cipher whose substitution table is keyed by `subkey`.
    ///
    /// Keys with fewer than [`MIN_RECOMMENDED_KEY_LETTERS`] letters are
    /// accepted but recorded in [`advisories`](Self::advisories) and logged.
    ///
    /// # Errors
    /// Returns [`GranitError::EmptyKey`](crate::GranitError::EmptyKey) if
    /// either transposition key has no letters.
    ///
    /// ```
    /// use granit::{Granit, GranitError, KeyRole};
    ///
    /// let err = Granit::with_subkey(Some("granit"), "key", "42").unwrap_err();
    /// assert_eq!(err, GranitError::EmptyKey(KeyRole::Second));
    /// ```
    pub fn with_subkey(subkey: Option<&str>, key1: &str, key2: &str) -> Result<Self> {
        let first = KeyOrder::derive(KeyRole::First, key1)?;
        let second = KeyOrder::derive(KeyRole::Second, key2)?;

        let advisories: Vec<KeyAdvisory> = [(KeyRole::First, &first), (KeyRole::Second, &second)]
            .into_iter()
            .filter(|(_, key)| key.columns() < MIN_RECOMMENDED_KEY_LETTERS)
            .map(|(role, key)| KeyAdvisory {
                role,
                letters: key.columns(),
            })
            .collect();
        for advisory in &advisories {
            warn!(role = %advisory.role, letters = advisory.letters, "short transposition key");
        }

        Ok(Granit {
            codec: NumberCodec::new(SubstitutionMap::build(subkey)),
            first,
            second,
            advisories,
        })
    }

    /// Encrypts `plaintext` into a digit string.
    ///
    /// The text is cleaned first; characters the cipher cannot carry are
    /// dropped rather than rejected.
    pub fn encrypt(&self, plaintext: &str) -> String {
        let cleaned = clean_plaintext(plaintext);
        let stream = self.codec.letters_to_numbers(&cleaned);
        let boxed = self.first.forward(stream.digits());
        let boxed = self.second.forward(&boxed);
        debug!(
            symbols = cleaned.chars().count(),
            digits = boxed.len(),
            "message encrypted"
        );
        digits_to_string(&boxed)
    }

    /// Decrypts a ciphertext; characters other than decimal digits are ignored.
    ///
    /// # Errors
    /// Returns [`GranitError::ImpossiblePlaintext`](crate::GranitError::ImpossiblePlaintext)
    /// if the unboxed digit stream fails the plausibility check.
    pub fn decrypt(&self, ciphertext: &str) -> Result<String> {
        let digits = ciphertext_digits(ciphertext);
        let unboxed = self.second.inverse(&digits);
        let unboxed = self.first.inverse(&unboxed);
        let plaintext = self.codec.numbers_to_letters(&unboxed)?;
        debug!(digits = digits.len(), "message decrypted");
        Ok(plaintext)
    }

    /// Short-key warnings collected at construction.
    pub fn advisories(&self) -> &[KeyAdvisory] {
        &self.advisories
    }

    /// The substitution table in use.
    pub fn substitution_map(&self) -> &SubstitutionMap {
        self.codec.map()
    }

    /// Rank permutation of the first transposition key.
    pub fn first_key(&self) -> &KeyOrder {
        &self.first
    }

    /// Rank permutation of the second transposition key.
    pub fn second_key(&self) -> &KeyOrder {
        &self.second
    }
}
