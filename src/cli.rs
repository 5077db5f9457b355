use crate::error::SecretWordError;
use crate::game_state::{
    Board, DEFAULT_GAME_THEME, DEFAULT_MAX_TRIES, GameConfig, GameInterface, GuessReport,
    RoundInfo, UserAction,
};
use crate::secret_word::RevealMode;
use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;

/// Hangman: guess the secret word one letter at a time
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Play with this secret word instead of drawing one from a theme
    #[arg(short = 'w', long = "word")]
    pub word: Option<String>,

    /// Theme name or path to a newline-delimited word list
    #[arg(short = 't', long = "theme", default_value = DEFAULT_GAME_THEME)]
    pub theme: String,

    /// Directory holding <theme>.txt word lists
    #[arg(long = "themes-dir")]
    pub themes_dir: Option<PathBuf>,

    /// Wrong guesses allowed before the game is lost
    #[arg(long = "tries", default_value_t = DEFAULT_MAX_TRIES,
          value_parser = clap::value_parser!(u8).range(1..=26))]
    pub tries: u8,

    /// Accept repeated and invalid guesses instead of rejecting them
    #[arg(long = "lenient")]
    pub lenient: bool,

    /// Seed for reproducible word selection
    #[arg(long = "seed")]
    pub seed: Option<u64>,

    /// Use the full-screen terminal interface
    #[arg(long = "tui")]
    pub tui: bool,

    /// Write logs to this file
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,

    /// List the available themes and exit
    #[arg(long = "list-themes")]
    pub list_themes: bool,
}

impl Cli {
    #[must_use]
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            word: self.word.clone(),
            theme: Some(self.theme.clone()),
            max_tries: self.tries,
            mode: if self.lenient {
                RevealMode::Lenient
            } else {
                RevealMode::Strict
            },
        }
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

pub enum GuessInput {
    Valid(String),
    Invalid,
    Exit,
    NewGame,
}

fn read_line<R: BufRead>(reader: &mut R) -> Option<String> {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_string()),
    }
}

pub fn read_guess<R: BufRead>(reader: &mut R) -> GuessInput {
    println!("\nGuess a letter (or 'exit' to quit, or 'next' to start a new game):");
    let Some(input) = read_line(reader) else {
        return GuessInput::Exit;
    };

    match input.to_uppercase().as_str() {
        "EXIT" => GuessInput::Exit,
        "NEXT" => GuessInput::NewGame,
        "" => {
            println!("Please type a letter.");
            GuessInput::Invalid
        }
        _ => GuessInput::Valid(input),
    }
}

pub fn read_play_again<R: BufRead>(reader: &mut R) -> UserAction {
    println!("\nPlay again? (y/n):");
    match read_line(reader).map(|s| s.to_lowercase()).as_deref() {
        Some("y" | "yes" | "next") => UserAction::NewGame,
        _ => UserAction::Exit,
    }
}

pub fn display_opening(info: &RoundInfo) {
    println!("***************************");
    println!("   Welcome to Hangman!");
    println!("***************************");
    match &info.theme {
        Some(theme) => println!("Theme: {theme}"),
        None => println!("Custom word"),
    }
    println!(
        "{} letters to find, {} wrong guesses allowed.",
        info.hidden_letters, info.max_tries
    );
}

pub fn display_board(board: &Board) {
    println!();
    println!("The secret word is:");
    println!("{}", board.hidden);
    println!();
    println!("You have {} tries left.", board.tries_left);
    if !board.guessed.is_empty() {
        let guessed: Vec<String> = board.guessed.iter().map(char::to_string).collect();
        println!("Guessed so far: {}", guessed.join(", "));
    }
    println!();
    for row in &board.gallows {
        println!("{row}");
    }
}

pub fn display_guess_result(report: &GuessReport) {
    let letter = report.letter.map_or_else(String::new, |c| c.to_string());
    if report.is_hit() {
        if report.count == 1 {
            println!("There is 1 letter '{letter}'.");
        } else {
            println!("There are {} letters '{letter}'.", report.count);
        }
    } else {
        println!("No '{letter}' this time.");
    }
}

pub fn display_error(error: &SecretWordError) {
    println!("{error}");
}

pub fn display_victory(word: &str) {
    println!("\nCongratulations, you found it: {word}");
}

pub fn display_defeat(word: &str) {
    println!("\nYou were hanged! The secret word was: {word}");
}

pub fn display_exit_message() {
    println!("Exiting.");
}

pub fn display_new_game_message() {
    println!("New game started.");
}

/// CLI implementation of the GameInterface trait
/// This struct wraps a BufRead reader and implements the game interface for CLI interaction
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_opening(&mut self, info: &RoundInfo) {
        display_opening(info);
    }

    fn display_board(&mut self, board: &Board) {
        display_board(board);
    }

    fn read_guess(&mut self) -> Option<UserAction> {
        match read_guess(&mut self.reader) {
            GuessInput::Valid(guess) => Some(UserAction::Guess(guess)),
            GuessInput::Exit => Some(UserAction::Exit),
            GuessInput::NewGame => Some(UserAction::NewGame),
            GuessInput::Invalid => None,
        }
    }

    fn display_guess_result(&mut self, report: &GuessReport) {
        display_guess_result(report);
    }

    fn display_error(&mut self, error: &SecretWordError) {
        display_error(error);
    }

    fn display_victory(&mut self, word: &str) {
        display_victory(word);
    }

    fn display_defeat(&mut self, word: &str) {
        display_defeat(word);
    }

    fn read_after_game(&mut self) -> UserAction {
        read_play_again(&mut self.reader)
    }

    fn display_new_game_message(&mut self) {
        display_new_game_message();
    }

    fn display_exit_message(&mut self) {
        display_exit_message();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_cli_defaults() {
        let cli = Cli::try_parse_from(["hangman"]).unwrap();
        assert_eq!(cli.word, None);
        assert_eq!(cli.theme, "fruits");
        assert_eq!(cli.tries, 7);
        assert!(!cli.lenient);
        assert!(!cli.tui);
    }

    #[test]
    fn test_parse_cli_with_options() {
        let cli = Cli::try_parse_from([
            "hangman",
            "-w",
            "Sabão em pó",
            "-t",
            "video_games",
            "--tries",
            "5",
            "--lenient",
            "--seed",
            "3",
        ])
        .unwrap();
        assert_eq!(cli.word.as_deref(), Some("Sabão em pó"));
        assert_eq!(cli.theme, "video_games");
        assert_eq!(cli.seed, Some(3));

        let config = cli.game_config();
        assert_eq!(config.max_tries, 5);
        assert_eq!(config.mode, RevealMode::Lenient);
        assert_eq!(config.word.as_deref(), Some("Sabão em pó"));
    }

    #[test]
    fn test_parse_cli_rejects_out_of_range_tries() {
        assert!(Cli::try_parse_from(["hangman", "--tries", "0"]).is_err());
        assert!(Cli::try_parse_from(["hangman", "--tries", "27"]).is_err());
    }

    #[test]
    fn test_read_guess_valid_letter() {
        let mut reader = Cursor::new("  a  \n");
        match read_guess(&mut reader) {
            GuessInput::Valid(guess) => assert_eq!(guess, "a"),
            _ => panic!("Expected Valid guess"),
        }
    }

    #[test]
    fn test_read_guess_keeps_symbols_for_the_engine() {
        let mut reader = Cursor::new("@\n");
        assert!(matches!(read_guess(&mut reader), GuessInput::Valid(g) if g == "@"));
    }

    #[test]
    fn test_read_guess_exit_case_insensitive() {
        let mut reader = Cursor::new("EXIT\n");
        assert!(matches!(read_guess(&mut reader), GuessInput::Exit));
        let mut reader = Cursor::new("exit\n");
        assert!(matches!(read_guess(&mut reader), GuessInput::Exit));
    }

    #[test]
    fn test_read_guess_new_game() {
        let mut reader = Cursor::new("next\n");
        assert!(matches!(read_guess(&mut reader), GuessInput::NewGame));
    }

    #[test]
    fn test_read_guess_blank_line_is_invalid() {
        let mut reader = Cursor::new("   \n");
        assert!(matches!(read_guess(&mut reader), GuessInput::Invalid));
    }

    #[test]
    fn test_read_guess_eof_exits() {
        let mut reader = Cursor::new("");
        assert!(matches!(read_guess(&mut reader), GuessInput::Exit));
    }

    #[test]
    fn test_read_play_again() {
        assert_eq!(read_play_again(&mut Cursor::new("y\n")), UserAction::NewGame);
        assert_eq!(read_play_again(&mut Cursor::new("YES\n")), UserAction::NewGame);
        assert_eq!(read_play_again(&mut Cursor::new("n\n")), UserAction::Exit);
        assert_eq!(read_play_again(&mut Cursor::new("")), UserAction::Exit);
    }

    #[test]
    fn test_cli_interface_maps_input() {
        let mut interface = CliInterface::new(Cursor::new("b\n\nnext\nexit\n"));
        assert_eq!(
            interface.read_guess(),
            Some(UserAction::Guess("b".to_string()))
        );
        assert_eq!(interface.read_guess(), None);
        assert_eq!(interface.read_guess(), Some(UserAction::NewGame));
        assert_eq!(interface.read_guess(), Some(UserAction::Exit));
        assert_eq!(interface.read_guess(), Some(UserAction::Exit));
    }
}
