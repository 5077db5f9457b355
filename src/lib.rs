// Library interface for hangman
// The engine lives in `secret_word`; the rest drives it from a terminal

pub mod cli;
pub mod error;
pub mod game_state;
pub mod logging;
pub mod normalize;
pub mod secret_word;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use error::{SecretWordError, WordSourceError};
pub use game_state::{GameConfig, GameInterface, GameSummary, UserAction, game_loop};
pub use normalize::{LetterClass, is_valid_letter, normalize, normalize_letter};
pub use secret_word::{PLACEHOLDER, RevealMode, SecretWord, SecretWordBuilder};
pub use wordbank::{ThemeSource, WordSource, load_words_from_file, load_words_from_str};
