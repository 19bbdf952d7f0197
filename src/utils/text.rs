//! Text normalisation for plaintext, keys, and ciphertext.
//!
//! Everything the cipher consumes passes through one of these functions
//! first, so the codec only ever sees symbols it has a code for.

/// Transliterations applied after lower-casing.
fn transliterate(c: char) -> Option<&'static str> {
    match c {
        'ä' => Some("ae"),
        'ö' => Some("oe"),
        'ü' => Some("ue"),
        'ß' => Some("ss"),
        _ => None,
    }
}

fn is_punctuation(c: char) -> bool {
    c == '.' || c == ','
}

/// Lower-cases `text` and expands the German letters.
fn fold(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().flat_map(char::to_lowercase).flat_map(|c| {
        let expanded: Vec<char> = match transliterate(c) {
            Some(s) => s.chars().collect(),
            None => vec![c],
        };
        expanded.into_iter()
    })
}

/// Reduces a plaintext to the symbols the cipher can carry.
///
/// Applied rules, in order:
/// 1. Case folding and `ä→ae`, `ö→oe`, `ü→ue`, `ß→ss`, `j→ii`.
/// 2. Only `a`–`z`, `0`–`9`, `.` and `,` survive; whitespace and any other
///    character are dropped.
/// 3. A run of punctuation collapses to its first mark.
/// 4. Trailing commas are removed.
///
/// The output is exactly what decryption returns for the same message.
///
/// # Examples
///
/// ```
/// use granit::utils::text::clean_plaintext;
///
/// assert_eq!(clean_plaintext("Jäger, 12 Uhr..."), "iiaeger,12uhr.");
/// ```
pub fn clean_plaintext(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in fold(text) {
        match c {
            // `j` has no code of its own in the substitution table.
            'j' => out.push_str("ii"),
            'a'..='z' | '0'..='9' => out.push(c),
            '.' | ',' => {
                if !out.ends_with(is_punctuation) {
                    out.push(c);
                }
            }
            _ => {}
        }
    }
    while out.ends_with(',') {
        out.pop();
    }
    out
}

/// Returns the letters of a key as bytes `b'a'..=b'z'`.
///
/// Keys are folded like plaintext (`ä→ae` and friends) but `j` stays a
/// letter of its own; digits and punctuation are discarded.
pub fn fold_key_letters(key: &str) -> Vec<u8> {
    fold(key)
        .filter(char::is_ascii_lowercase)
        .map(|c| c as u8)
        .collect()
}

/// Extracts the decimal digit values of a ciphertext, ignoring everything else.
pub fn ciphertext_digits(text: &str) -> Vec<u8> {
    text.bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect()
}

/// Renders digit values `0..=9` as a decimal string.
pub(crate) fn digits_to_string(digits: &[u8]) -> String {
    digits.iter().map(|&d| char::from(b'0' + d)).collect()
}
