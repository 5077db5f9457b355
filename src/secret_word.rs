//! The secret word reveal engine.
//!
//! A [`SecretWord`] owns the word being guessed and the per-position reveal
//! state shown to the player. Letters are matched accent-insensitively but
//! revealed with their original accent, so guessing `o` in `SABÃO EM PÓ`
//! shows both `O` and `Ó`.
//!
//! # State Machine
//! `InProgress` → `Complete`, the latter being terminal. In
//! [`RevealMode::Strict`] any reveal after completion fails with
//! [`SecretWordError::NothingLeftToGuess`].

use crate::debug_log;
use crate::error::SecretWordError;
use crate::normalize::{LetterClass, canonicalize, is_valid_letter, letter_key, normalize_letter};
use crate::wordbank::{DEFAULT_THEME, WordSource};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Symbol shown for a letter that is still hidden.
pub const PLACEHOLDER: char = '_';

/// How strictly [`SecretWord::reveal_letter`] polices its input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RevealMode {
    /// Invalid, repeated and post-completion guesses are errors.
    #[default]
    Strict,
    /// Every guess is accepted; invalid ones simply match nothing.
    Lenient,
}

#[derive(Clone, Debug)]
pub struct SecretWord {
    word: String,
    chars: Vec<char>,
    hidden: Vec<char>,
    positions: BTreeMap<char, Vec<usize>>,
    guessed: BTreeSet<char>,
    mode: RevealMode,
}

impl SecretWord {
    /// Build a strict engine around an explicit word.
    pub fn new(word: &str) -> Result<Self, SecretWordError> {
        Self::with_mode(word, RevealMode::Strict)
    }

    /// Build an engine around an explicit word using the given mode.
    ///
    /// A blank word is rejected with [`SecretWordError::RequiredField`].
    pub fn with_mode(word: &str, mode: RevealMode) -> Result<Self, SecretWordError> {
        let word = canonicalize(word);
        if word.is_empty() {
            return Err(SecretWordError::RequiredField);
        }

        let chars: Vec<char> = word.chars().collect();
        let hidden = chars
            .iter()
            .map(|&c| if is_valid_letter(c) { PLACEHOLDER } else { c })
            .collect();
        let positions = map_positions(&chars, mode);
        debug_log!(
            "SecretWord::with_mode() - {} chars, {} distinct keys, mode {:?}",
            chars.len(),
            positions.len(),
            mode
        );

        Ok(Self {
            word,
            chars,
            hidden,
            positions,
            guessed: BTreeSet::new(),
            mode,
        })
    }

    #[must_use]
    pub fn builder() -> SecretWordBuilder {
        SecretWordBuilder::default()
    }

    /// The canonical (trimmed, uppercased) word.
    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    /// A copy of the current reveal state.
    #[must_use]
    pub fn hidden_word(&self) -> Vec<char> {
        self.hidden.clone()
    }

    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        self.hidden.iter().filter(|&&c| c == PLACEHOLDER).count()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.hidden.contains(&PLACEHOLDER)
    }

    #[must_use]
    pub fn mode(&self) -> RevealMode {
        self.mode
    }

    /// Keys attempted so far, in alphabetical order.
    #[must_use]
    pub fn guessed_letters(&self) -> &BTreeSet<char> {
        &self.guessed
    }

    #[must_use]
    pub fn letter_positions(&self) -> &BTreeMap<char, Vec<usize>> {
        &self.positions
    }

    /// Case- and accent-insensitive membership test.
    #[must_use]
    pub fn has_letter(&self, letter: &str) -> bool {
        self.indexes_for(letter).is_some_and(|indexes| !indexes.is_empty())
    }

    #[must_use]
    pub fn letter_count(&self, letter: &str) -> usize {
        self.indexes_for(letter).map_or(0, Vec::len)
    }

    /// Reveal every occurrence of `letter`.
    ///
    /// Returns whether the letter occurs in the word. Failed calls leave the
    /// engine untouched.
    pub fn reveal_letter(&mut self, letter: &str) -> Result<bool, SecretWordError> {
        self.reveal_letter_in(letter, LetterClass::Any)
    }

    /// Reveal a vowel. Consonants and digits are `InvalidLetter`.
    pub fn reveal_vowel(&mut self, letter: &str) -> Result<bool, SecretWordError> {
        self.reveal_letter_in(letter, LetterClass::Vowel)
    }

    /// Reveal a consonant or a digit. Vowels are `InvalidLetter`.
    pub fn reveal_consonant_or_number(&mut self, letter: &str) -> Result<bool, SecretWordError> {
        self.reveal_letter_in(letter, LetterClass::ConsonantOrNumber)
    }

    /// Reveal `letter` only if it belongs to `class`.
    ///
    /// A guess outside the class is treated like any other invalid letter.
    pub fn reveal_letter_in(
        &mut self,
        letter: &str,
        class: LetterClass,
    ) -> Result<bool, SecretWordError> {
        let key = normalize_letter(letter).filter(|&k| is_valid_letter(k) && class.contains(k));

        if self.mode == RevealMode::Lenient {
            let Some(key) = key else {
                debug_log!("reveal_letter() - lenient, ignoring invalid '{}'", letter);
                return Ok(false);
            };
            return Ok(self.apply(key));
        }

        if self.is_complete() {
            return Err(SecretWordError::NothingLeftToGuess);
        }
        let Some(key) = key else {
            return Err(SecretWordError::InvalidLetter(letter.to_string()));
        };
        if self.guessed.contains(&key) {
            return Err(SecretWordError::HasGuessedLetterBefore(key));
        }

        Ok(self.apply(key))
    }

    fn apply(&mut self, key: char) -> bool {
        self.guessed.insert(key);
        let Some(indexes) = self.positions.get(&key).filter(|i| !i.is_empty()) else {
            debug_log!("apply() - '{}' not in word", key);
            return false;
        };
        for &i in indexes {
            self.hidden[i] = self.chars[i];
        }
        debug_log!(
            "apply() - revealed {} x '{}', {} placeholders left",
            indexes.len(),
            key,
            self.placeholder_count()
        );
        true
    }

    fn indexes_for(&self, letter: &str) -> Option<&Vec<usize>> {
        let key = normalize_letter(letter)?;
        if !is_valid_letter(key) {
            return None;
        }
        self.positions.get(&key)
    }
}

impl fmt::Display for SecretWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.hidden.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

fn map_positions(chars: &[char], mode: RevealMode) -> BTreeMap<char, Vec<usize>> {
    let mut positions: BTreeMap<char, Vec<usize>> = BTreeMap::new();
    for (i, &c) in chars.iter().enumerate() {
        if is_valid_letter(c) {
            positions.entry(letter_key(c)).or_default().push(i);
        } else if mode == RevealMode::Lenient {
            positions.entry(c).or_default();
        }
    }
    positions
}

/// Builder resolving where the secret word comes from.
#[derive(Clone, Debug, Default)]
pub struct SecretWordBuilder {
    word: Option<String>,
    theme: Option<String>,
    mode: RevealMode,
}

impl SecretWordBuilder {
    #[must_use]
    pub fn word(mut self, word: impl Into<String>) -> Self {
        self.word = Some(word.into());
        self
    }

    /// Theme name or path to a newline-delimited word list.
    #[must_use]
    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    #[must_use]
    pub fn mode(mut self, mode: RevealMode) -> Self {
        self.mode = mode;
        self
    }

    /// Resolve the word and build the engine.
    ///
    /// An explicit word wins over a theme. Without either, strict mode fails
    /// with [`SecretWordError::RequiredField`] while lenient mode falls back to
    /// [`DEFAULT_THEME`].
    pub fn build<S: WordSource + ?Sized>(
        self,
        source: &mut S,
    ) -> Result<SecretWord, SecretWordError> {
        let word = self.word.filter(|w| !w.trim().is_empty());
        let theme = self.theme.filter(|t| !t.trim().is_empty());

        let word = match (word, theme) {
            (Some(word), _) => word,
            (None, Some(theme)) => source.random_word(&theme)?,
            (None, None) if self.mode == RevealMode::Lenient => {
                source.random_word(DEFAULT_THEME)?
            }
            (None, None) => return Err(SecretWordError::RequiredField),
        };

        SecretWord::with_mode(&word, self.mode)
    }
}
