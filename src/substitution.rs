//! SubstitutionMap: the straddling checkerboard between symbols and codes.
//!
//! The table holds 28 symbols (25 letters without `j`, the number sign
//! `_`, `.` and `,`) and 28 codes. Codes `0`–`7` are written as a single
//! digit; codes `80`–`99` take two digits. Since no single-digit code
//! starts with `8` or `9`, a digit stream splits into codes without
//! separators.
//!
//! The number sign always lands on code `97`, the toggle that brackets
//! digit runs in number mode.

use std::fmt;

use crate::utils::text::fold_key_letters;

/// Number of symbols (and codes) in the table.
pub const TABLE_SIZE: usize = 28;

/// All codes in ascending order.
const CODES: [u8; TABLE_SIZE] = [
    0, 1, 2, 3, 4, 5, 6, 7, 80, 81, 82, 83, 84, 85, 86, 87, 88, 89, 90, 91, 92, 93, 94, 95, 96,
    97, 98, 99,
];

/// Letters carried by the table; `j` is written as `ii` instead.
const LETTERS: &[u8; 25] = b"abcdefghiklmnopqrstuvwxyz";

/// A letter of the substitution alphabet: `a`–`z` without `j`.
///
/// Only [`Letter::from_char`] builds one, so every value has a table slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Letter(u8);

impl Letter {
    /// Parses a lower-case table letter; `j` and anything else yield `None`.
    pub fn from_char(c: char) -> Option<Letter> {
        let b = u8::try_from(c).ok()?;
        LETTERS.iter().position(|&l| l == b).map(|i| Letter(i as u8))
    }

    /// Returns the character this letter is written as.
    pub fn as_char(self) -> char {
        char::from(LETTERS[self.0 as usize])
    }
}

/// A symbol of the substitution alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// A table letter.
    Letter(Letter),
    /// Number sign `_`: opens and closes number mode.
    NumberSign,
    /// Period `.`.
    Period,
    /// Comma `,`.
    Comma,
}

impl Symbol {
    /// Parses a plaintext character. Digits and unsupported characters yield `None`.
    pub fn from_char(c: char) -> Option<Symbol> {
        match c {
            '_' => Some(Symbol::NumberSign),
            '.' => Some(Symbol::Period),
            ',' => Some(Symbol::Comma),
            _ => Letter::from_char(c).map(Symbol::Letter),
        }
    }

    /// Returns the character this symbol is written as.
    pub fn as_char(self) -> char {
        match self {
            Symbol::Letter(letter) => letter.as_char(),
            Symbol::NumberSign => '_',
            Symbol::Period => '.',
            Symbol::Comma => ',',
        }
    }

    /// Returns `true` for `.` and `,`.
    pub fn is_punctuation(self) -> bool {
        matches!(self, Symbol::Period | Symbol::Comma)
    }

    /// Position of this symbol in the default table order.
    fn index(self) -> usize {
        match self {
            Symbol::Letter(letter) => letter.0 as usize,
            Symbol::NumberSign => 25,
            Symbol::Period => 26,
            Symbol::Comma => 27,
        }
    }

    /// Symbols in the default table order: `a..i`, `k..z`, `_`, `.`, `,`.
    fn default_order() -> impl Iterator<Item = Symbol> {
        (0..LETTERS.len() as u8)
            .map(|i| Symbol::Letter(Letter(i)))
            .chain([Symbol::NumberSign, Symbol::Period, Symbol::Comma])
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A numeric substitution code: `0`–`7` or `80`–`99`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code(u8);

impl Code {
    /// The number-mode toggle, code of [`Symbol::NumberSign`].
    pub const TOGGLE: Code = Code(97);

    /// Validates a code value.
    pub fn new(value: u8) -> Option<Code> {
        matches!(value, 0..=7 | 80..=99).then_some(Code(value))
    }

    /// Returns the numeric value.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Returns `true` for codes written with one digit.
    pub fn is_single_digit(self) -> bool {
        self.0 < 10
    }

    /// Appends the digits of this code to `out`.
    pub fn write_digits(self, out: &mut Vec<u8>) {
        if self.is_single_digit() {
            out.push(self.0);
        } else {
            out.push(self.0 / 10);
            out.push(self.0 % 10);
        }
    }

    /// Builds a code from stream digits `0..=9`; `second` follows a prefix digit.
    pub(crate) fn from_digits(first: u8, second: Option<u8>) -> Code {
        let value = match second {
            Some(second) => first * 10 + second,
            None => first,
        };
        debug_assert!(Code::new(value).is_some(), "digits {} {:?} form no code", first, second);
        Code(value)
    }

    /// Table slot of this code, `0..TABLE_SIZE` in ascending code order.
    fn slot(self) -> usize {
        if self.is_single_digit() {
            self.0 as usize
        } else {
            self.0 as usize - 72
        }
    }

    /// Returns `true` if `digit` can only start a two-digit code.
    pub fn is_prefix_digit(digit: u8) -> bool {
        digit == 8 || digit == 9
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_digit() {
            write!(f, "{}", self.0)
        } else {
            write!(f, "{:02}", self.0)
        }
    }
}

/// Bijection between the 28 symbols and the 28 codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionMap {
    to_code: [Code; TABLE_SIZE],
    to_symbol: [Symbol; TABLE_SIZE],
}

impl Default for SubstitutionMap {
    fn default() -> Self {
        Self::build(None)
    }
}

impl SubstitutionMap {
    /// Builds the table, optionally keyed by a subkey.
    ///
    /// Without a subkey, symbols take the codes in default order. With a
    /// subkey, its letters claim codes first (repeats ignored), the other
    /// letters follow alphabetically, then `_`. Period and comma stay on
    /// `98` and `99` in every table.
    ///
    /// # Examples
    ///
    /// ```
    /// use granit::{Code, SubstitutionMap, Symbol};
    ///
    /// let map = SubstitutionMap::build(Some("Zebra"));
    /// let z = Symbol::from_char('z').unwrap();
    /// let a = Symbol::from_char('a').unwrap();
    /// assert_eq!(map.code_of(z).value(), 0);
    /// assert_eq!(map.code_of(a).value(), 4);
    /// assert_eq!(map.code_of(Symbol::NumberSign), Code::TOGGLE);
    /// ```
    pub fn build(subkey: Option<&str>) -> Self {
        let mut sequence: Vec<Symbol> = Vec::with_capacity(TABLE_SIZE);
        if let Some(subkey) = subkey {
            for b in fold_key_letters(subkey) {
                if let Some(symbol) = Symbol::from_char(char::from(b)) {
                    if !sequence.contains(&symbol) {
                        sequence.push(symbol);
                    }
                }
            }
        }
        for symbol in Symbol::default_order() {
            if !sequence.contains(&symbol) {
                sequence.push(symbol);
            }
        }

        let mut to_code = [Code(0); TABLE_SIZE];
        let mut to_symbol = [Symbol::NumberSign; TABLE_SIZE];
        for (slot, (symbol, &value)) in sequence.into_iter().zip(CODES.iter()).enumerate() {
            to_code[symbol.index()] = Code(value);
            to_symbol[slot] = symbol;
        }

        debug_assert_eq!(to_code[Symbol::NumberSign.index()], Code::TOGGLE);
        SubstitutionMap { to_code, to_symbol }
    }

    /// Returns the code assigned to `symbol`.
    pub fn code_of(&self, symbol: Symbol) -> Code {
        self.to_code[symbol.index()]
    }

    /// Returns the symbol assigned to `code`.
    pub fn symbol_of(&self, code: Code) -> Symbol {
        self.to_symbol[code.slot()]
    }

    /// Iterates over `(symbol, code)` pairs in ascending code order.
    pub fn entries(&self) -> impl Iterator<Item = (Symbol, Code)> + '_ {
        CODES
            .iter()
            .zip(self.to_symbol.iter())
            .map(|(&value, &symbol)| (symbol, Code(value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letter(c: char) -> Symbol {
        Symbol::Letter(Letter::from_char(c).unwrap())
    }

    #[test]
    fn test_symbol_from_char() {
        assert_eq!(Symbol::from_char('a'), Some(letter('a')));
        assert_eq!(Symbol::from_char('_'), Some(Symbol::NumberSign));
        assert_eq!(Symbol::from_char('j'), None);
        assert_eq!(Symbol::from_char('5'), None);
        assert_eq!(Symbol::from_char('A'), None);
    }

    #[test]
    fn test_letter_rejects_j_and_out_of_table_chars() {
        for c in ['j', 'A', 'J', '{', '`', '@', '\0', 'ä', 'ß'] {
            assert_eq!(Letter::from_char(c), None, "char {:?}", c);
            assert_eq!(Symbol::from_char(c), None, "char {:?}", c);
        }
        // every accepted letter owns its own code in the default table
        let map = SubstitutionMap::default();
        let mut codes: Vec<u8> = ('a'..='z')
            .filter_map(Letter::from_char)
            .map(|l| map.code_of(Symbol::Letter(l)).value())
            .collect();
        assert_eq!(codes.len(), 25);
        codes.dedup();
        assert_eq!(codes.len(), 25);
        assert_eq!(Letter::from_char('k').map(Letter::as_char), Some('k'));
    }

    #[test]
    fn test_code_from_digits() {
        assert_eq!(Code::from_digits(5, None), Code(5));
        assert_eq!(Code::from_digits(9, Some(7)), Code::TOGGLE);
        assert_eq!(Code::from_digits(8, Some(0)).slot(), 8);
        assert_eq!(Code::from_digits(9, Some(9)).slot(), TABLE_SIZE - 1);
    }

    #[test]
    fn test_symbol_index_is_dense() {
        let mut seen = [false; TABLE_SIZE];
        for symbol in Symbol::default_order() {
            assert!(!seen[symbol.index()]);
            seen[symbol.index()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_code_validation() {
        assert!(Code::new(0).is_some());
        assert!(Code::new(7).is_some());
        assert!(Code::new(8).is_none());
        assert!(Code::new(79).is_none());
        assert!(Code::new(80).is_some());
        assert!(Code::new(99).is_some());
        assert!(Code::new(100).is_none());
    }

    #[test]
    fn test_code_digits() {
        let mut out = Vec::new();
        Code(3).write_digits(&mut out);
        Code::TOGGLE.write_digits(&mut out);
        Code(80).write_digits(&mut out);
        assert_eq!(out, vec![3, 9, 7, 8, 0]);
        assert_eq!(format!("{}", Code(3)), "3");
        assert_eq!(format!("{}", Code(85)), "85");
    }

    #[test]
    fn test_default_table() {
        let map = SubstitutionMap::default();
        assert_eq!(map.code_of(letter('a')).value(), 0);
        assert_eq!(map.code_of(letter('h')).value(), 7);
        assert_eq!(map.code_of(letter('i')).value(), 80);
        assert_eq!(map.code_of(letter('k')).value(), 81);
        assert_eq!(map.code_of(letter('z')).value(), 96);
        assert_eq!(map.code_of(Symbol::NumberSign), Code::TOGGLE);
        assert_eq!(map.code_of(Symbol::Period).value(), 98);
        assert_eq!(map.code_of(Symbol::Comma).value(), 99);
    }

    #[test]
    fn test_subkey_letters_first() {
        let map = SubstitutionMap::build(Some("Granit"));
        let expected = [('g', 0), ('r', 1), ('a', 2), ('n', 3), ('i', 4), ('t', 5), ('b', 6), ('c', 7), ('d', 80)];
        for (c, value) in expected {
            assert_eq!(map.code_of(letter(c)).value(), value, "letter {}", c);
        }
        assert_eq!(map.code_of(letter('z')).value(), 96);
        assert_eq!(map.code_of(Symbol::NumberSign), Code::TOGGLE);
    }

    #[test]
    fn test_subkey_repeats_and_j_skipped() {
        let map = SubstitutionMap::build(Some("jeep, JEEP 42"));
        assert_eq!(map.code_of(letter('e')).value(), 0);
        assert_eq!(map.code_of(letter('p')).value(), 1);
        assert_eq!(map.code_of(letter('a')).value(), 2);
    }

    #[test]
    fn test_punctuation_pinned_for_any_subkey() {
        for subkey in ["", "zyxwvutsrqponmlkihgfedcba", "..,,", "Ümlaut"] {
            let map = SubstitutionMap::build(Some(subkey));
            assert_eq!(map.code_of(Symbol::Period).value(), 98);
            assert_eq!(map.code_of(Symbol::Comma).value(), 99);
            assert_eq!(map.code_of(Symbol::NumberSign), Code::TOGGLE);
        }
    }

    #[test]
    fn test_map_is_bijective() {
        let map = SubstitutionMap::build(Some("quickbrownfox"));
        let entries: Vec<(Symbol, Code)> = map.entries().collect();
        assert_eq!(entries.len(), TABLE_SIZE);
        for (symbol, code) in entries {
            assert_eq!(map.code_of(symbol), code);
            assert_eq!(map.symbol_of(code), symbol);
        }
    }

    #[test]
    fn test_empty_subkey_equals_default() {
        assert_eq!(SubstitutionMap::build(Some("")), SubstitutionMap::default());
    }
}
