use crate::error::WordSourceError;
use crate::{debug_log, info_log};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

pub const DEFAULT_THEME: &str = "video_games";

const THEMES_DIR_NAME: &str = "hangman";
const THEME_EXTENSION: &str = "txt";

/// Word lists compiled into the binary, keyed by theme name.
pub const EMBEDDED_THEMES: &[(&str, &str)] = &[
    ("fruits", include_str!("resources/fruits.txt")),
    ("video_games", include_str!("resources/video_games.txt")),
];

/// Supplies secret words for a theme.
pub trait WordSource {
    /// Draw one word from `theme`, which is a theme name or a path to a
    /// newline-delimited word list.
    fn random_word(&mut self, theme: &str) -> Result<String, WordSourceError>;
}

pub fn load_words_from_str(data: &str) -> Vec<String> {
    data.lines()
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn load_words_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>, WordSourceError> {
    let path = path.as_ref();
    let io_err = |source| WordSourceError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(io_err)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(io_err)?;
        let word = line.trim();
        if !word.is_empty() {
            words.push(word.to_string());
        }
    }
    Ok(words)
}

/// Default location of user supplied theme files.
pub fn get_themes_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(THEMES_DIR_NAME).join("themes"))
}

/// Names of the themes available from `themes_dir` and the embedded lists.
pub fn list_themes(themes_dir: Option<&Path>) -> Vec<String> {
    let mut themes: Vec<String> = EMBEDDED_THEMES
        .iter()
        .map(|(name, _)| (*name).to_string())
        .collect();

    if let Some(dir) = themes_dir
        && let Ok(entries) = std::fs::read_dir(dir)
    {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == THEME_EXTENSION)
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                themes.push(stem.to_string());
            }
        }
    }

    themes.sort();
    themes.dedup();
    themes
}

/// [`WordSource`] that resolves a theme to a word list on disk or in the
/// binary and picks a line uniformly at random.
///
/// Resolution order:
/// 1. `theme` is a path to an existing file;
/// 2. `<themes_dir>/<theme>.txt`;
/// 3. an embedded theme of that name.
#[derive(Debug)]
pub struct ThemeSource<R = ChaCha8Rng> {
    themes_dir: Option<PathBuf>,
    rng: R,
}

impl ThemeSource<ChaCha8Rng> {
    /// Source backed by `themes_dir` and seeded from the OS.
    #[must_use]
    pub fn new(themes_dir: Option<PathBuf>) -> Self {
        Self::with_rng(themes_dir, ChaCha8Rng::from_entropy())
    }

    /// Deterministic source restricted to the embedded themes and explicit
    /// file paths.
    #[must_use]
    pub fn embedded(seed: u64) -> Self {
        Self::with_rng(None, ChaCha8Rng::seed_from_u64(seed))
    }

    #[must_use]
    pub fn seeded(themes_dir: Option<PathBuf>, seed: u64) -> Self {
        Self::with_rng(themes_dir, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> ThemeSource<R> {
    pub fn with_rng(themes_dir: Option<PathBuf>, rng: R) -> Self {
        Self { themes_dir, rng }
    }

    #[must_use]
    pub fn themes_dir(&self) -> Option<&Path> {
        self.themes_dir.as_deref()
    }

    /// Load the full word list for `theme`.
    pub fn load_theme(&self, theme: &str) -> Result<Vec<String>, WordSourceError> {
        let direct = Path::new(theme);
        if direct.is_file() {
            debug_log!("load_theme() - reading file '{}'", direct.display());
            return load_words_from_file(direct);
        }

        if let Some(dir) = &self.themes_dir {
            let path = dir.join(format!("{theme}.{THEME_EXTENSION}"));
            if path.is_file() {
                debug_log!("load_theme() - reading theme file '{}'", path.display());
                return load_words_from_file(&path);
            }
        }

        EMBEDDED_THEMES
            .iter()
            .find(|(name, _)| *name == theme)
            .map(|(_, data)| load_words_from_str(data))
            .ok_or_else(|| WordSourceError::ThemeNotFound {
                theme: theme.to_string(),
            })
    }
}

impl<R: Rng> WordSource for ThemeSource<R> {
    fn random_word(&mut self, theme: &str) -> Result<String, WordSourceError> {
        let words = self.load_theme(theme)?;
        let word = words
            .choose(&mut self.rng)
            .cloned()
            .ok_or_else(|| WordSourceError::EmptyTheme {
                theme: theme.to_string(),
            })?;
        info_log!("random_word() - picked from '{}' ({} words)", theme, words.len());
        Ok(word)
    }
}
