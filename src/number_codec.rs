//! NumberCodec: substitution with the number-mode escape protocol.
//!
//! Encoding turns cleaned plaintext into a [`NumberStream`]. Letters and
//! punctuation go through the [`SubstitutionMap`]; a run of digits is
//! bracketed by the toggle code and every digit in it is written three
//! times, so `a12b` becomes `code(a) 97 111 222 97 code(b)`.
//!
//! Decoding runs in two phases. A tokenizer splits the digit stream into
//! [`Token`]s, tracking whether it is inside number mode because that
//! changes how digits group. An interpreter then walks the tokens with an
//! explicit toggle parity, resolves codes, collapses digit triples, and
//! rejects anything an encoder could not have produced.
//!
//! Inside number mode a run of three equal digits is always read as a
//! digit before `9 7` is considered as the closing toggle. Encoded number
//! regions are whole triples followed by `97`, and `97` is never three
//! equal digits, so the rule is unambiguous for every encoder output:
//! `999 97` reads as the digit `9` and then the toggle.

use std::fmt;

use tracing::debug;

use crate::error::{Implausibility, Result};
use crate::substitution::{Code, SubstitutionMap, Symbol};
use crate::utils::text::digits_to_string;

/// Times each digit is repeated inside number mode.
const DIGIT_REPEAT: usize = 3;

/// Digit sequence produced by substitution, one value `0..=9` per entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NumberStream {
    digits: Vec<u8>,
}

impl NumberStream {
    /// Wraps raw digit values.
    pub fn from_digits(digits: Vec<u8>) -> Self {
        NumberStream { digits }
    }

    /// Returns the digit values.
    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    /// Consumes the stream, returning the digit values.
    pub fn into_digits(self) -> Vec<u8> {
        self.digits
    }

    /// Number of digits in the stream.
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// Returns `true` if the stream holds no digits.
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }
}

impl fmt::Display for NumberStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&digits_to_string(&self.digits))
    }
}

/// A lexical unit of a digit stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// A substitution code, the toggle included.
    Code(Code),
    /// A literal digit inside number mode.
    Digit(u8),
}

/// Splits a digit stream into tokens.
///
/// # Errors
/// Returns [`Implausibility::InvalidDigit`] for a value above `9`, and
/// [`Implausibility::TruncatedCode`] if the stream ends on the first digit
/// of a two-digit code.
pub fn tokenize(digits: &[u8]) -> Result<Vec<Token>> {
    if let Some(&value) = digits.iter().find(|&&d| d > 9) {
        return Err(Implausibility::InvalidDigit(value).into());
    }

    let mut tokens = Vec::with_capacity(digits.len());
    let mut number_mode = false;
    let mut i = 0;

    while i < digits.len() {
        if number_mode {
            let rest = &digits[i..];
            if rest.len() >= DIGIT_REPEAT && rest[1..DIGIT_REPEAT].iter().all(|&d| d == rest[0]) {
                tokens.extend(std::iter::repeat_n(Token::Digit(rest[0]), DIGIT_REPEAT));
                i += DIGIT_REPEAT;
            } else if rest.starts_with(&[9, 7]) {
                tokens.push(Token::Code(Code::TOGGLE));
                number_mode = false;
                i += 2;
            } else {
                tokens.push(Token::Digit(rest[0]));
                i += 1;
            }
            continue;
        }

        let first = digits[i];
        let code = if Code::is_prefix_digit(first) {
            let second = *digits.get(i + 1).ok_or(Implausibility::TruncatedCode)?;
            i += 2;
            Code::from_digits(first, Some(second))
        } else {
            i += 1;
            Code::from_digits(first, None)
        };
        if code == Code::TOGGLE {
            number_mode = true;
        }
        tokens.push(Token::Code(code));
    }

    Ok(tokens)
}

/// Substitution codec bound to one [`SubstitutionMap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberCodec {
    map: SubstitutionMap,
}

impl NumberCodec {
    /// Creates a codec over `map`.
    pub fn new(map: SubstitutionMap) -> Self {
        NumberCodec { map }
    }

    /// Returns the substitution table.
    pub fn map(&self) -> &SubstitutionMap {
        &self.map
    }

    /// Encodes cleaned plaintext into a digit stream.
    ///
    /// Characters without a code are skipped; feed text through
    /// [`clean_plaintext`](crate::utils::text::clean_plaintext) first.
    ///
    /// # Examples
    ///
    /// ```
    /// use granit::{NumberCodec, SubstitutionMap};
    ///
    /// let codec = NumberCodec::new(SubstitutionMap::default());
    /// assert_eq!(codec.letters_to_numbers("a12b").to_string(), "097111222971");
    /// ```
    pub fn letters_to_numbers(&self, text: &str) -> NumberStream {
        let mut digits = Vec::with_capacity(text.len() * 2);
        let mut number_mode = false;

        for c in text.chars() {
            if let Some(d) = c.to_digit(10) {
                if !number_mode {
                    Code::TOGGLE.write_digits(&mut digits);
                    number_mode = true;
                }
                digits.extend(std::iter::repeat_n(d as u8, DIGIT_REPEAT));
                continue;
            }

            let Some(symbol) = Symbol::from_char(c) else {
                continue;
            };
            if number_mode {
                Code::TOGGLE.write_digits(&mut digits);
                number_mode = false;
            }
            self.map.code_of(symbol).write_digits(&mut digits);
        }

        if number_mode {
            Code::TOGGLE.write_digits(&mut digits);
        }
        NumberStream::from_digits(digits)
    }

    /// Decodes a digit stream back into plaintext, validating it on the way.
    ///
    /// # Errors
    /// Returns [`GranitError::ImpossiblePlaintext`](crate::GranitError::ImpossiblePlaintext) if the stream
    /// holds a value above `9`, is truncated, leaves number mode open, holds an empty or untripled
    /// number region, or decodes to colliding punctuation.
    pub fn numbers_to_letters(&self, digits: &[u8]) -> Result<String> {
        let result = tokenize(digits).and_then(|tokens| self.decode_tokens(&tokens));
        if let Err(ref err) = result {
            debug!(digits = digits.len(), %err, "digit stream rejected");
        }
        result
    }

    fn decode_tokens(&self, tokens: &[Token]) -> Result<String> {
        let mut out = String::with_capacity(tokens.len());
        let mut toggle_parity = false;
        let mut region: Vec<u8> = Vec::new();
        let mut last_punctuation = false;

        for &token in tokens {
            match token {
                Token::Code(Code::TOGGLE) => {
                    if toggle_parity {
                        push_region(&mut out, &region)?;
                        region.clear();
                        last_punctuation = false;
                    }
                    toggle_parity = !toggle_parity;
                }
                Token::Digit(d) => {
                    // the tokenizer emits digits only between toggles
                    debug_assert!(toggle_parity);
                    region.push(d);
                }
                Token::Code(code) => {
                    last_punctuation = self.push_symbol(&mut out, code, last_punctuation)?;
                }
            }
        }

        if toggle_parity {
            return Err(Implausibility::UnterminatedNumberMode.into());
        }
        if out.ends_with(',') {
            return Err(Implausibility::PunctuationCollision.into());
        }
        Ok(out)
    }

    /// Appends the symbol for `code`; returns whether it was punctuation.
    fn push_symbol(&self, out: &mut String, code: Code, last_punctuation: bool) -> Result<bool> {
        let symbol = self.map.symbol_of(code);
        let punctuation = symbol.is_punctuation();
        if punctuation && last_punctuation {
            return Err(Implausibility::PunctuationCollision.into());
        }
        out.push(symbol.as_char());
        Ok(punctuation)
    }
}

/// Collapses the triples of a closed number region into `out`.
fn push_region(out: &mut String, region: &[u8]) -> Result<()> {
    if region.is_empty() {
        return Err(Implausibility::EmptyNumberRegion.into());
    }
    if !region.len().is_multiple_of(DIGIT_REPEAT) {
        return Err(Implausibility::UntripledDigits.into());
    }
    for triple in region.chunks_exact(DIGIT_REPEAT) {
        if triple.iter().any(|&d| d != triple[0]) {
            return Err(Implausibility::UntripledDigits.into());
        }
        out.push(char::from(b'0' + triple[0]));
    }
    Ok(())
}
