//! KeyOrder: numeric key derivation for the transposition boxes.
//!
//! A transposition key is reduced to its letters and turned into a rank
//! permutation: every key position receives the index it would occupy if
//! the letters were sorted alphabetically, equal letters keeping their
//! left-to-right order. The permutation is read as "original column →
//! destination column" by the box.

use crate::error::{GranitError, KeyRole, Result};
use crate::transposition;
use crate::utils::text::fold_key_letters;

/// Rank permutation derived from a transposition key, with its inverse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyOrder {
    order: Vec<usize>,
    lookup: Vec<usize>,
}

impl KeyOrder {
    /// Derives the rank permutation of `key`.
    ///
    /// Non-letters are discarded and case is folded before ranking.
    ///
    /// # Errors
    /// Returns [`GranitError::EmptyKey`] tagged with `role` if no letters remain.
    ///
    /// # Examples
    ///
    /// ```
    /// use granit::{KeyOrder, KeyRole};
    ///
    /// let order = KeyOrder::derive(KeyRole::First, "Bab").unwrap();
    /// assert_eq!(order.order(), &[1, 0, 2]);
    /// assert_eq!(order.lookup(), &[1, 0, 2]);
    /// ```
    pub fn derive(role: KeyRole, key: &str) -> Result<Self> {
        let letters = fold_key_letters(key);
        if letters.is_empty() {
            return Err(GranitError::EmptyKey(role));
        }

        let mut order = vec![0usize; letters.len()];
        let mut rank = 0usize;
        for letter in b'a'..=b'z' {
            for (pos, _) in letters.iter().enumerate().filter(|&(_, &l)| l == letter) {
                order[pos] = rank;
                rank += 1;
            }
        }

        let mut lookup = vec![0usize; order.len()];
        for (i, &o) in order.iter().enumerate() {
            lookup[o] = i;
        }

        Ok(KeyOrder { order, lookup })
    }

    /// Returns the permutation: key position → destination column.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Returns the inverse permutation: `lookup[order[i]] == i`.
    pub fn lookup(&self) -> &[usize] {
        &self.lookup
    }

    /// Number of key letters, i.e. box columns.
    pub fn columns(&self) -> usize {
        self.order.len()
    }

    /// Runs `input` through a forward box keyed by this order.
    pub fn forward<T: Copy>(&self, input: &[T]) -> Vec<T> {
        transposition::forward(&self.order, input)
    }

    /// Undoes [`forward`](Self::forward).
    pub fn inverse<T: Copy>(&self, input: &[T]) -> Vec<T> {
        transposition::inverse_with_lookup(&self.lookup, input)
    }
}

/// Derives the rank permutation of `key` as a plain vector.
///
/// # Errors
/// Returns [`GranitError::EmptyKey`] if `key` contains no letters.
pub fn derive_order(key: &str) -> Result<Vec<usize>> {
    KeyOrder::derive(KeyRole::First, key).map(|k| k.order)
}
