//! GRANIT manual cipher engine.
//!
//! GRANIT combines a straddling-checkerboard substitution, which turns
//! letters into one- or two-digit codes and passes digits through a
//! tripled "number mode", with two columnar transpositions under
//! independent keys. Decryption checks that the recovered digit stream
//! could have been produced by an encoder and rejects it otherwise.
//!
//! # Architecture
//!
//! ```text
//! KeyOrder          (key text -> rank permutation + inverse)
//! SubstitutionMap   (28 symbols <-> 28 codes, optionally keyed by a subkey)
//!     ↓
//! NumberCodec       (letters <-> digit stream, number-mode state machine)
//!     ↓
//! transposition     (uneven columnar box, forward / inverse)
//!     ↓
//! Granit            (codec -> box(key1) -> box(key2), and back)
//! ```
//!
//! # Examples
//!
//! ```
//! let key1 = "stellenweisebewoelkt";
//! let key2 = "abendrotschoenwetter";
//!
//! let ciphertext = granit::encrypt(Some("granit"), key1, key2, "Ankunft 2200 Uhr.").unwrap();
//! assert!(ciphertext.bytes().all(|b| b.is_ascii_digit()));
//!
//! let plaintext = granit::decrypt(Some("granit"), key1, key2, &ciphertext).unwrap();
//! assert_eq!(plaintext, "ankunft2200uhr.");
//! ```

#![deny(clippy::all)]

pub mod error;
pub mod key_order;
pub mod number_codec;
pub mod substitution;
pub mod transposition;
pub mod utils;

mod granit;

pub use error::{GranitError, Implausibility, KeyRole, Result};
pub use granit::{Granit, KeyAdvisory, MIN_RECOMMENDED_KEY_LETTERS};
pub use key_order::{derive_order, KeyOrder};
pub use number_codec::{NumberCodec, NumberStream, Token};
pub use substitution::{Code, Letter, SubstitutionMap, Symbol};

/// Encrypts `plaintext` with a one-shot [`Granit`] instance.
///
/// # Errors
/// Returns [`GranitError::EmptyKey`] if `key1` or `key2` has no letters.
pub fn encrypt(subkey: Option<&str>, key1: &str, key2: &str, plaintext: &str) -> Result<String> {
    Ok(Granit::with_subkey(subkey, key1, key2)?.encrypt(plaintext))
}

/// Decrypts `ciphertext` with a one-shot [`Granit`] instance.
///
/// # Errors
/// Returns [`GranitError::EmptyKey`] for an empty key and
/// [`GranitError::ImpossiblePlaintext`] if the ciphertext does not decode
/// to a plausible message.
pub fn decrypt(subkey: Option<&str>, key1: &str, key2: &str, ciphertext: &str) -> Result<String> {
    Granit::with_subkey(subkey, key1, key2)?.decrypt(ciphertext)
}
