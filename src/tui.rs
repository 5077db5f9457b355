//! TUI (Terminal User Interface) module for Hangman
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # State Machine
//! The UI follows these state transitions:
//! - `EnteringGuess` → `EnteringGuess` while the round lasts
//! - `EnteringGuess` → `GameOver` once the word is found or the player is hanged
//! - `GameOver` → `EnteringGuess` on a new game

use crate::error::SecretWordError;
use crate::game_state::{Board, GameInterface, GuessReport, RoundInfo, UserAction};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const MAX_INPUT_CHARS: usize = 1;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);
const WORD_STYLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    EnteringGuess,
    /// Round finished; the outcome message is stored in `message`.
    GameOver,
}

/// Context for rendering the UI
struct RenderContext<'a> {
    board: Option<&'a Board>,
    theme: Option<&'a str>,
    current_input: &'a str,
    state: TuiState,
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and game state display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    board: Option<Board>,
    theme: Option<String>,
    current_input: String,
    state: TuiState,
    message: String,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete");

        Ok(Self {
            terminal,
            board: None,
            theme: None,
            current_input: String::new(),
            state: TuiState::EnteringGuess,
            message: String::new(),
            error_message: String::new(),
            status: "Ready to start".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            board: self.board.as_ref(),
            theme: self.theme.as_deref(),
            current_input: &self.current_input,
            state: self.state,
            message: &self.message,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Title
                Constraint::Length(14), // Word and gallows
                Constraint::Min(6),     // Info panel
                Constraint::Length(3),  // Status line
                Constraint::Length(3),  // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0], ctx.theme);
        Self::render_board(f, chunks[1], ctx.board, ctx.current_input, ctx.state);
        Self::render_info(f, chunks[2], ctx.board, ctx.message, ctx.error_message);
        Self::render_status(f, chunks[3], ctx.status);
        Self::render_instructions(f, chunks[4], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect, theme: Option<&str>) {
        let text = match theme {
            Some(theme) => format!("HANGMAN - {theme}"),
            None => "HANGMAN".to_string(),
        };
        let title = Paragraph::new(text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_board(
        f: &mut Frame,
        area: Rect,
        board: Option<&Board>,
        current_input: &str,
        state: TuiState,
    ) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        let mut lines = Vec::new();
        if let Some(board) = board {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(board.hidden.clone(), WORD_STYLE),
            ]));
            lines.push(Line::from(""));
            lines.push(Line::from(format!(
                "  Tries left: {}/{}",
                board.tries_left, board.max_tries
            )));
        }
        if state == TuiState::EnteringGuess {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::raw("  Your guess: "),
                Span::styled(
                    format!(" {} ", current_input.chars().next().unwrap_or(' ')),
                    Style::default().fg(Color::White).bg(Color::DarkGray),
                ),
            ]));
        }
        let word = Paragraph::new(lines).block(Block::default().title("Word").borders(Borders::ALL));
        f.render_widget(word, columns[0]);

        let drawing: Vec<Line> = board
            .map(|b| b.gallows.iter().map(|row| Line::from(row.as_str())).collect())
            .unwrap_or_default();
        let gallows =
            Paragraph::new(drawing).block(Block::default().title("Gallows").borders(Borders::ALL));
        f.render_widget(gallows, columns[1]);
    }

    fn render_info(
        f: &mut Frame,
        area: Rect,
        board: Option<&Board>,
        message: &str,
        error_message: &str,
    ) {
        let mut lines = Vec::new();

        if let Some(board) = board
            && !board.guessed.is_empty()
        {
            let guessed: Vec<String> = board.guessed.iter().map(char::to_string).collect();
            lines.push(Line::from(vec![Span::styled("Guessed letters:", INFO_STYLE)]));
            lines.push(Line::from(format!("  {}", guessed.join(" "))));
            lines.push(Line::from(""));
        }

        if !message.is_empty() {
            lines.push(Line::from(vec![Span::styled(message, MESSAGE_STYLE)]));
        }

        if !error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(error_message, ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
        let text = match state {
            TuiState::EnteringGuess => "Type a letter | ENTER: Submit | CTRL-N: New game | ESC: Quit",
            TuiState::GameOver => "N: New Game | ESC: Quit",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    /// Wait briefly for a key press.
    fn next_key() -> Result<Option<KeyEvent>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == event::KeyEventKind::Press => {
                // Ignore garbage from escape sequences (e.g. while alt-tabbing)
                if let KeyCode::Char(c) = key.code
                    && (c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD)
                {
                    debug_log!("next_key() - Ignoring invalid character: {:?}", c);
                    return Ok(None);
                }
                Ok(Some(key))
            }
            other => {
                debug_log!("next_key() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }

    /// Raw mode delivers Ctrl-C as a key instead of a signal.
    fn is_interrupt(key: KeyEvent) -> bool {
        key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c' | 'C'))
    }

    /// Keys that leave the round whatever has been typed.
    fn guess_shortcut(key: KeyEvent) -> Option<UserAction> {
        if Self::is_interrupt(key) {
            info_log!("guess_shortcut() - Ctrl-C pressed, returning Exit");
            return Some(UserAction::Exit);
        }
        match key.code {
            KeyCode::Esc => {
                info_log!("guess_shortcut() - ESC pressed, returning Exit");
                Some(UserAction::Exit)
            }
            KeyCode::Char('n' | 'N') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(UserAction::NewGame)
            }
            _ => None,
        }
    }

    fn handle_guess_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        if let Some(action) = Self::guess_shortcut(key) {
            return Some(action);
        }
        let has_ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let has_alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Char(c) if !has_ctrl && !has_alt => {
                self.error_message.clear();
                self.current_input.clear();
                self.current_input.push(c);
                debug_log!("handle_guess_input() - input now '{}'", self.current_input);
                None
            }
            KeyCode::Backspace => {
                self.current_input.pop();
                None
            }
            KeyCode::Enter if self.current_input.chars().count() == MAX_INPUT_CHARS => {
                let guess = std::mem::take(&mut self.current_input);
                info_log!("handle_guess_input() - submitting '{}'", guess);
                Some(UserAction::Guess(guess))
            }
            KeyCode::Enter => {
                self.error_message = "Type a letter first!".to_string();
                None
            }
            _ => None,
        }
    }

    fn handle_game_over_input(key: KeyEvent) -> Option<UserAction> {
        if Self::is_interrupt(key) {
            return Some(UserAction::Exit);
        }
        match key.code {
            KeyCode::Char('n' | 'N') => Some(UserAction::NewGame),
            KeyCode::Esc | KeyCode::Char('q' | 'Q') => Some(UserAction::Exit),
            _ => None,
        }
    }

    fn finish_round(&mut self, message: String) {
        self.state = TuiState::GameOver;
        self.message = message;
        self.error_message.clear();
        self.status = "Game over".to_string();
        self.draw_or_log();
    }
}

impl GameInterface for TuiInterface {
    fn display_opening(&mut self, info: &RoundInfo) {
        self.theme.clone_from(&info.theme);
        self.state = TuiState::EnteringGuess;
        self.message = format!(
            "{} letters to find, {} wrong guesses allowed.",
            info.hidden_letters, info.max_tries
        );
        self.error_message.clear();
        self.status = "Guess the secret word".to_string();
        self.draw_or_log();
    }

    fn display_board(&mut self, board: &Board) {
        self.board = Some(board.clone());
        self.draw_or_log();
    }

    fn read_guess(&mut self) -> Option<UserAction> {
        loop {
            if self.draw().is_err() {
                info_log!("read_guess() - Draw failed, returning Exit");
                return Some(UserAction::Exit);
            }
            match Self::next_key() {
                Ok(Some(key)) => {
                    if let Some(action) = self.handle_guess_input(key) {
                        return Some(action);
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    debug_log!("read_guess() - Input error: {}", e);
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn display_guess_result(&mut self, report: &GuessReport) {
        let letter = report.letter.map_or_else(String::new, |c| c.to_string());
        self.message = if report.is_hit() {
            format!("'{letter}' appears {} time(s)!", report.count)
        } else {
            format!("No '{letter}' this time.")
        };
        self.status = format!("{} tries left", report.tries_left);
    }

    fn display_error(&mut self, error: &SecretWordError) {
        self.error_message = error.to_string();
    }

    fn display_victory(&mut self, word: &str) {
        self.finish_round(format!("You found it: {word}"));
    }

    fn display_defeat(&mut self, word: &str) {
        self.finish_round(format!("You were hanged! The word was: {word}"));
    }

    fn read_after_game(&mut self) -> UserAction {
        loop {
            if self.draw().is_err() {
                return UserAction::Exit;
            }
            match Self::next_key() {
                Ok(Some(key)) => {
                    if let Some(action) = Self::handle_game_over_input(key) {
                        return action;
                    }
                }
                Ok(None) => {}
                Err(_) => return UserAction::Exit,
            }
        }
    }

    fn display_new_game_message(&mut self) {
        self.board = None;
        self.current_input.clear();
        self.state = TuiState::EnteringGuess;
        self.message = "New game started.".to_string();
        self.error_message.clear();
        self.status = "New game".to_string();
        self.draw_or_log();
    }

    fn display_exit_message(&mut self) {
        self.message = "Exiting...".to_string();
        self.status = "Exiting application...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_game_over_input() {
        assert_eq!(
            TuiInterface::handle_game_over_input(key(KeyCode::Char('n'))),
            Some(UserAction::NewGame)
        );
        assert_eq!(
            TuiInterface::handle_game_over_input(key(KeyCode::Esc)),
            Some(UserAction::Exit)
        );
        assert_eq!(
            TuiInterface::handle_game_over_input(key(KeyCode::Char('x'))),
            None
        );
    }

    #[test]
    fn test_ctrl_c_exits() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(TuiInterface::is_interrupt(ctrl_c));
        assert_eq!(
            TuiInterface::guess_shortcut(ctrl_c),
            Some(UserAction::Exit)
        );
        assert_eq!(
            TuiInterface::handle_game_over_input(ctrl_c),
            Some(UserAction::Exit)
        );
    }

    #[test]
    fn test_guess_shortcuts() {
        assert!(!TuiInterface::is_interrupt(key(KeyCode::Char('c'))));
        assert_eq!(TuiInterface::guess_shortcut(key(KeyCode::Char('c'))), None);
        assert_eq!(
            TuiInterface::guess_shortcut(key(KeyCode::Esc)),
            Some(UserAction::Exit)
        );
        assert_eq!(
            TuiInterface::guess_shortcut(KeyEvent::new(
                KeyCode::Char('n'),
                KeyModifiers::CONTROL
            )),
            Some(UserAction::NewGame)
        );
    }
}
