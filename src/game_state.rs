use crate::error::SecretWordError;
use crate::normalize::normalize_letter;
use crate::secret_word::{RevealMode, SecretWord};
use crate::wordbank::WordSource;
use crate::{debug_log, info_log};

pub const DEFAULT_MAX_TRIES: u8 = 7;
pub const DEFAULT_GAME_THEME: &str = "fruits";

const GALLOWS_STAGES: usize = 7;

const GALLOWS_FRAME: [&str; 8] = [
    "  ________    ",
    " |/      |    ",
    " |            ",
    " |            ",
    " |            ",
    " |            ",
    " |            ",
    "_|_____       ",
];

// (first stage shown, row, drawing); later entries overwrite earlier ones
const GALLOWS_PARTS: [(usize, usize, &str); 7] = [
    (1, 2, " |      (_)   "),
    (2, 3, " |       |    "),
    (3, 3, " |      /|    "),
    (4, 3, " |      /|\\   "),
    (5, 4, " |       |    "),
    (6, 5, " |      /     "),
    (7, 5, " |      / \\   "),
];

/// Settings for a sequence of hangman games.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Fixed secret word; when set the theme is ignored.
    pub word: Option<String>,
    pub theme: Option<String>,
    pub max_tries: u8,
    pub mode: RevealMode,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            word: None,
            theme: Some(DEFAULT_GAME_THEME.to_string()),
            max_tries: DEFAULT_MAX_TRIES,
            mode: RevealMode::Strict,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(String),
    NewGame,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundInfo {
    /// `None` when the word was given explicitly.
    pub theme: Option<String>,
    pub hidden_letters: usize,
    pub max_tries: u8,
}

/// Snapshot of a round handed to the front end before each guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub hidden: String,
    pub tries_left: u8,
    pub max_tries: u8,
    pub guessed: Vec<char>,
    pub gallows: Vec<String>,
}

impl Board {
    #[must_use]
    pub fn new(secret: &SecretWord, tries_left: u8, max_tries: u8) -> Self {
        Self {
            hidden: secret.to_string(),
            tries_left,
            max_tries,
            guessed: secret.guessed_letters().iter().copied().collect(),
            gallows: gallows(gallows_stage(tries_left, max_tries)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessReport {
    pub letter: Option<char>,
    /// Occurrences revealed; zero on a miss.
    pub count: usize,
    pub tries_left: u8,
}

impl GuessReport {
    #[must_use]
    pub fn is_hit(&self) -> bool {
        self.count > 0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameSummary {
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
}

/// Front end seam: the CLI and the TUI both implement this.
pub trait GameInterface {
    fn display_opening(&mut self, info: &RoundInfo);
    fn display_board(&mut self, board: &Board);
    /// `None` means the input was unusable and the board should be shown again.
    fn read_guess(&mut self) -> Option<UserAction>;
    fn display_guess_result(&mut self, report: &GuessReport);
    fn display_error(&mut self, error: &SecretWordError);
    fn display_victory(&mut self, word: &str);
    fn display_defeat(&mut self, word: &str);
    /// Asked once a game has been won or lost.
    fn read_after_game(&mut self) -> UserAction;
    fn display_new_game_message(&mut self);
    fn display_exit_message(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoundOutcome {
    /// Tries left when the round ended.
    Won(u8),
    Lost(u8),
    NewGame,
    Exit,
}

/// Map tries used onto the eight gallows drawings.
#[must_use]
pub fn gallows_stage(tries_left: u8, max_tries: u8) -> usize {
    if max_tries == 0 {
        return GALLOWS_STAGES;
    }
    let misses = usize::from(max_tries.saturating_sub(tries_left));
    let max = usize::from(max_tries);
    (misses * GALLOWS_STAGES).div_ceil(max).min(GALLOWS_STAGES)
}

#[must_use]
pub fn gallows(stage: usize) -> Vec<String> {
    let mut rows: Vec<String> = GALLOWS_FRAME.iter().map(|row| (*row).to_string()).collect();
    for (first_stage, row, drawing) in GALLOWS_PARTS {
        if stage >= first_stage {
            rows[row] = drawing.to_string();
        }
    }
    rows
}

/// Play games until the player exits.
///
/// Errors building a secret word abort the loop; everything else is reported
/// through `interface`.
pub fn game_loop<S, I>(
    config: &GameConfig,
    source: &mut S,
    interface: &mut I,
) -> Result<GameSummary, SecretWordError>
where
    S: WordSource + ?Sized,
    I: GameInterface + ?Sized,
{
    let mut summary = GameSummary::default();

    loop {
        let mut secret = new_secret_word(config, source)?;
        summary.games_played += 1;
        info_log!("game_loop() - game {} started", summary.games_played);

        interface.display_opening(&RoundInfo {
            theme: if config.word.is_some() {
                None
            } else {
                config.theme.clone()
            },
            hidden_letters: secret.placeholder_count(),
            max_tries: config.max_tries,
        });

        match play_round(&mut secret, config.max_tries, interface) {
            RoundOutcome::Won(tries_left) => {
                summary.wins += 1;
                interface.display_board(&Board::new(&secret, tries_left, config.max_tries));
                interface.display_victory(secret.word());
            }
            RoundOutcome::Lost(tries_left) => {
                summary.losses += 1;
                interface.display_board(&Board::new(&secret, tries_left, config.max_tries));
                interface.display_defeat(secret.word());
            }
            RoundOutcome::NewGame => {
                interface.display_new_game_message();
                continue;
            }
            RoundOutcome::Exit => {
                interface.display_exit_message();
                break;
            }
        }

        if interface.read_after_game() == UserAction::NewGame {
            interface.display_new_game_message();
        } else {
            interface.display_exit_message();
            break;
        }
    }

    info_log!("game_loop() - finished: {:?}", summary);
    Ok(summary)
}

fn new_secret_word<S: WordSource + ?Sized>(
    config: &GameConfig,
    source: &mut S,
) -> Result<SecretWord, SecretWordError> {
    let mut builder = SecretWord::builder().mode(config.mode);
    if let Some(word) = &config.word {
        builder = builder.word(word.as_str());
    }
    if let Some(theme) = &config.theme {
        builder = builder.theme(theme.as_str());
    }
    builder.build(source)
}

fn play_round<I: GameInterface + ?Sized>(
    secret: &mut SecretWord,
    max_tries: u8,
    interface: &mut I,
) -> RoundOutcome {
    let mut tries_left = max_tries;

    loop {
        interface.display_board(&Board::new(secret, tries_left, max_tries));

        let guess = match interface.read_guess() {
            Some(UserAction::Guess(guess)) => guess,
            Some(UserAction::NewGame) => return RoundOutcome::NewGame,
            Some(UserAction::Exit) => return RoundOutcome::Exit,
            None => continue,
        };

        let letter = normalize_letter(&guess);
        // lenient engines accept repeats, so the round filters them instead
        if secret.mode() == RevealMode::Lenient
            && let Some(key) = letter
            && secret.guessed_letters().contains(&key)
        {
            interface.display_error(&SecretWordError::HasGuessedLetterBefore(key));
            continue;
        }

        let count = secret.letter_count(&guess);
        match secret.reveal_letter(&guess) {
            Ok(hit) => {
                if !hit {
                    tries_left = tries_left.saturating_sub(1);
                }
                debug_log!(
                    "play_round() - guess {:?}: hit={}, tries left {}",
                    letter,
                    hit,
                    tries_left
                );
                interface.display_guess_result(&GuessReport {
                    letter,
                    count: if hit { count } else { 0 },
                    tries_left,
                });
            }
            Err(e) if e.is_recoverable() => {
                interface.display_error(&e);
                continue;
            }
            Err(e) => {
                interface.display_error(&e);
                return if secret.is_complete() {
                    RoundOutcome::Won(tries_left)
                } else {
                    RoundOutcome::Lost(tries_left)
                };
            }
        }

        if secret.is_complete() {
            return RoundOutcome::Won(tries_left);
        }
        if tries_left == 0 {
            return RoundOutcome::Lost(tries_left);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordbank::ThemeSource;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct ScriptedInterface {
        guesses: VecDeque<Option<UserAction>>,
        after_game: VecDeque<UserAction>,
        boards: Vec<Board>,
        reports: Vec<GuessReport>,
        errors: Vec<String>,
        victories: Vec<String>,
        defeats: Vec<String>,
        openings: Vec<RoundInfo>,
        new_games: usize,
        exited: bool,
    }

    impl ScriptedInterface {
        fn new(guesses: &[&str], after_game: &[UserAction]) -> Self {
            Self {
                guesses: guesses
                    .iter()
                    .map(|g| match *g {
                        "exit" => Some(UserAction::Exit),
                        "next" => Some(UserAction::NewGame),
                        "" => None,
                        g => Some(UserAction::Guess(g.to_string())),
                    })
                    .collect(),
                after_game: after_game.iter().cloned().collect(),
                ..Self::default()
            }
        }
    }

    impl GameInterface for ScriptedInterface {
        fn display_opening(&mut self, info: &RoundInfo) {
            self.openings.push(info.clone());
        }

        fn display_board(&mut self, board: &Board) {
            self.boards.push(board.clone());
        }

        fn read_guess(&mut self) -> Option<UserAction> {
            self.guesses.pop_front().unwrap_or(Some(UserAction::Exit))
        }

        fn display_guess_result(&mut self, report: &GuessReport) {
            self.reports.push(report.clone());
        }

        fn display_error(&mut self, error: &SecretWordError) {
            self.errors.push(error.to_string());
        }

        fn display_victory(&mut self, word: &str) {
            self.victories.push(word.to_string());
        }

        fn display_defeat(&mut self, word: &str) {
            self.defeats.push(word.to_string());
        }

        fn read_after_game(&mut self) -> UserAction {
            self.after_game.pop_front().unwrap_or(UserAction::Exit)
        }

        fn display_new_game_message(&mut self) {
            self.new_games += 1;
        }

        fn display_exit_message(&mut self) {
            self.exited = true;
        }
    }

    fn word_config(word: &str) -> GameConfig {
        GameConfig {
            word: Some(word.to_string()),
            ..GameConfig::default()
        }
    }

    #[test]
    fn test_game_loop_immediate_exit() {
        let mut source = ThemeSource::embedded(1);
        let mut ui = ScriptedInterface::new(&["exit"], &[]);
        let summary = game_loop(&GameConfig::default(), &mut source, &mut ui).unwrap();

        assert_eq!(summary.games_played, 1);
        assert_eq!(summary.wins + summary.losses, 0);
        assert!(ui.exited);
        assert_eq!(ui.openings[0].theme.as_deref(), Some("fruits"));
    }

    #[test]
    fn test_game_loop_win() {
        let mut source = ThemeSource::embedded(1);
        let mut ui = ScriptedInterface::new(&["s", "a", "b", "o", "e", "m", "p"], &[]);
        let summary = game_loop(&word_config("Sabão em pó"), &mut source, &mut ui).unwrap();

        assert_eq!(summary, GameSummary { games_played: 1, wins: 1, losses: 0 });
        assert_eq!(ui.victories, vec!["SABÃO EM PÓ"]);
        assert_eq!(ui.openings[0].theme, None);
        assert_eq!(ui.openings[0].hidden_letters, 9);
        assert_eq!(ui.reports[1].count, 2);
        assert!(ui.reports.iter().all(GuessReport::is_hit));
    }

    #[test]
    fn test_game_loop_loss_after_max_tries() {
        let mut source = ThemeSource::embedded(1);
        let config = GameConfig {
            max_tries: 3,
            ..word_config("kiwi")
        };
        let mut ui = ScriptedInterface::new(&["x", "y", "z"], &[]);
        let summary = game_loop(&config, &mut source, &mut ui).unwrap();

        assert_eq!(summary.losses, 1);
        assert_eq!(ui.defeats, vec!["KIWI"]);
        assert_eq!(ui.reports.last().unwrap().tries_left, 0);
        assert_eq!(ui.boards.last().unwrap().tries_left, 0);
    }

    #[test]
    fn test_final_board_shown_before_victory() {
        let mut source = ThemeSource::embedded(1);
        let mut ui = ScriptedInterface::new(&["k", "x", "w", "i"], &[]);
        game_loop(&word_config("kiwi"), &mut source, &mut ui).unwrap();

        let last = ui.boards.last().unwrap();
        assert_eq!(last.hidden, "K I W I");
        assert!(last.guessed.contains(&'I'));
        assert_eq!(last.tries_left, DEFAULT_MAX_TRIES - 1);
        assert_eq!(ui.victories, vec!["KIWI"]);
    }

    #[test]
    fn test_final_board_shown_before_defeat() {
        let mut source = ThemeSource::embedded(1);
        let mut ui = ScriptedInterface::new(&["k", "q", "r", "s", "t", "u", "v", "x"], &[]);
        game_loop(&word_config("kiwi"), &mut source, &mut ui).unwrap();

        let last = ui.boards.last().unwrap();
        assert_eq!(last.tries_left, 0);
        assert!(last.guessed.contains(&'X'));
        assert_eq!(last.hidden, "K _ _ _");
        assert_eq!(last.gallows, gallows(gallows_stage(0, DEFAULT_MAX_TRIES)));
        assert_eq!(ui.defeats, vec!["KIWI"]);
    }

    #[test]
    fn test_invalid_and_repeated_guesses_cost_nothing() {
        let mut source = ThemeSource::embedded(1);
        let mut ui = ScriptedInterface::new(&["@", "k", "k", "", "w", "i"], &[]);
        let summary = game_loop(&word_config("kiwi"), &mut source, &mut ui).unwrap();

        assert_eq!(summary.wins, 1);
        assert_eq!(ui.errors.len(), 2);
        assert!(ui.errors[0].contains("not a valid letter"));
        assert!(ui.errors[1].contains("already been guessed"));
        assert!(ui.boards.iter().all(|b| b.tries_left == DEFAULT_MAX_TRIES));
    }

    #[test]
    fn test_lenient_round_filters_repeats() {
        let mut source = ThemeSource::embedded(1);
        let config = GameConfig {
            mode: RevealMode::Lenient,
            ..word_config("kiwi")
        };
        let mut ui = ScriptedInterface::new(&["z", "z", "k", "w", "i"], &[]);
        let summary = game_loop(&config, &mut source, &mut ui).unwrap();

        assert_eq!(summary.wins, 1);
        assert_eq!(ui.errors.len(), 1);
        assert_eq!(ui.reports[0].tries_left, DEFAULT_MAX_TRIES - 1);
        assert_eq!(ui.reports.last().unwrap().tries_left, DEFAULT_MAX_TRIES - 1);
    }

    #[test]
    fn test_new_game_after_win() {
        let mut source = ThemeSource::embedded(1);
        let mut ui = ScriptedInterface::new(
            &["k", "w", "i", "x", "y", "z", "q", "v", "j", "u"],
            &[UserAction::NewGame, UserAction::Exit],
        );
        let summary = game_loop(&word_config("kiwi"), &mut source, &mut ui).unwrap();

        assert_eq!(summary, GameSummary { games_played: 2, wins: 1, losses: 1 });
        assert_eq!(ui.new_games, 1);
        assert!(ui.exited);
    }

    #[test]
    fn test_new_game_mid_round() {
        let mut source = ThemeSource::embedded(1);
        let mut ui = ScriptedInterface::new(&["k", "next", "exit"], &[]);
        let summary = game_loop(&word_config("kiwi"), &mut source, &mut ui).unwrap();

        assert_eq!(summary.games_played, 2);
        assert_eq!(summary.wins, 0);
        assert_eq!(ui.new_games, 1);
        assert!(ui.boards.last().unwrap().guessed.is_empty());
    }

    #[test]
    fn test_game_loop_unknown_theme_is_an_error() {
        let mut source = ThemeSource::embedded(1);
        let config = GameConfig {
            theme: Some("a9s7d9a87sd9".to_string()),
            ..GameConfig::default()
        };
        let mut ui = ScriptedInterface::new(&[], &[]);
        assert!(matches!(
            game_loop(&config, &mut source, &mut ui),
            Err(SecretWordError::Source(_))
        ));
    }

    #[test]
    fn test_board_snapshot() {
        let mut secret = SecretWord::new("Sabão em pó").unwrap();
        secret.reveal_letter("o").unwrap();
        secret.reveal_letter("z").unwrap();
        let board = Board::new(&secret, 6, 7);

        assert_eq!(board.hidden, "_ _ _ _ O   _ _   _ Ó");
        assert_eq!(board.guessed, vec!['O', 'Z']);
        assert_eq!(board.gallows.len(), 8);
        assert_eq!(board.gallows[2], " |      (_)   ");
    }

    #[test]
    fn test_gallows_stage_scaling() {
        assert_eq!(gallows_stage(7, 7), 0);
        assert_eq!(gallows_stage(6, 7), 1);
        assert_eq!(gallows_stage(0, 7), 7);
        assert_eq!(gallows_stage(25, 26), 1);
        assert_eq!(gallows_stage(0, 26), 7);
        assert_eq!(gallows_stage(0, 1), 7);
        assert_eq!(gallows_stage(0, 0), 7);
    }

    #[test]
    fn test_gallows_drawing_grows() {
        let empty = gallows(0);
        let full = gallows(7);
        assert_eq!(empty, GALLOWS_FRAME.map(str::to_string).to_vec());
        assert_eq!(full[3], " |      /|\\   ");
        assert_eq!(full[5], " |      / \\   ");
    }
}
