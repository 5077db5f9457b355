use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of a [`WordSource`](crate::wordbank::WordSource).
#[derive(Debug, Error)]
pub enum WordSourceError {
    #[error("theme '{theme}' not found")]
    ThemeNotFound { theme: String },

    #[error("theme '{theme}' has no words")]
    EmptyTheme { theme: String },

    #[error("failed to read word list '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failures of the secret word engine.
#[derive(Debug, Error)]
pub enum SecretWordError {
    #[error("a secret word or a theme is required")]
    RequiredField,

    #[error("'{0}' is not a valid letter")]
    InvalidLetter(String),

    #[error("the letter '{0}' has already been guessed")]
    HasGuessedLetterBefore(char),

    #[error("there is nothing left to guess")]
    NothingLeftToGuess,

    #[error(transparent)]
    Source(#[from] WordSourceError),
}

impl SecretWordError {
    /// Whether the caller can simply ask for another guess.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidLetter(_) | Self::HasGuessedLetterBefore(_)
        )
    }
}
