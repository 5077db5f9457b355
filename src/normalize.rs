//! Text normalization shared by the engine and the front ends.
//!
//! Two forms are used:
//! - the canonical form ([`canonicalize`]) is trimmed, uppercased and composed
//!   (NFC) but keeps accents, and is what the player eventually sees;
//! - the normalized form ([`normalize`]) additionally folds accented letters to
//!   their base letter and is only used for matching.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::{decompose_canonical, is_combining_mark};

/// Fold an accented letter to its base letter.
///
/// The character is decomposed (NFD) and its combining marks dropped, so
/// `'Ō'` and `'Ș'` fold like `'Ó'`. Case is preserved. Characters without a
/// canonical decomposition are returned as is, except for the stroked `Ø`.
#[must_use]
pub fn fold_accent(c: char) -> char {
    let mut base = None;
    decompose_canonical(c, |d| {
        if base.is_none() && !is_combining_mark(d) {
            base = Some(d);
        }
    });
    match base.unwrap_or(c) {
        'Ø' => 'O',
        'ø' => 'o',
        other => other,
    }
}

/// Trim, uppercase and compose, keeping accents.
#[must_use]
pub fn canonicalize(text: &str) -> String {
    text.trim().to_uppercase().nfc().collect()
}

/// Trim, uppercase and fold accents.
#[must_use]
pub fn normalize(text: &str) -> String {
    canonicalize(text).chars().map(fold_accent).collect()
}

/// Normalize a guess down to a single match key.
///
/// Only the first character survives, so `"word"` becomes `'W'`.
/// Returns `None` for blank input.
#[must_use]
pub fn normalize_letter(text: &str) -> Option<char> {
    normalize(text).chars().next()
}

/// Whether `c` belongs to the guessable letter/digit class, accents ignored.
#[must_use]
pub fn is_valid_letter(c: char) -> bool {
    fold_accent(c).is_ascii_alphanumeric()
}

/// Match key for a single character of a canonical word.
#[must_use]
pub fn letter_key(c: char) -> char {
    fold_accent(c).to_ascii_uppercase()
}

/// Guesses accepted by a restricted reveal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LetterClass {
    #[default]
    Any,
    Vowel,
    ConsonantOrNumber,
}

impl LetterClass {
    /// Whether the match key `key` belongs to this class.
    #[must_use]
    pub fn contains(self, key: char) -> bool {
        let key = letter_key(key);
        if !key.is_ascii_alphanumeric() {
            return false;
        }
        let vowel = matches!(key, 'A' | 'E' | 'I' | 'O' | 'U');
        match self {
            Self::Any => true,
            Self::Vowel => vowel,
            Self::ConsonantOrNumber => !vowel,
        }
    }
}
