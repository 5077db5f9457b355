use hangman::cli::{CliInterface, parse_cli};
use hangman::game_state::{GameInterface, GameSummary, game_loop};
use hangman::logging::{LogTarget, default_log_path, init_logging};
use hangman::tui::TuiInterface;
use hangman::wordbank::{ThemeSource, get_themes_dir, list_themes};
use hangman::{SecretWordError, info_log};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = parse_cli();

    let log_target = match (&cli.log_file, cli.tui) {
        (Some(path), _) => LogTarget::File(path.clone()),
        (None, true) => default_log_path().map_or(LogTarget::Stderr, LogTarget::File),
        (None, false) => LogTarget::Stderr,
    };
    if let Err(e) = init_logging(&log_target) {
        eprintln!("Failed to initialise logging: {e}");
    }

    let themes_dir = cli.themes_dir.clone().or_else(get_themes_dir);
    if cli.list_themes {
        for theme in list_themes(themes_dir.as_deref()) {
            println!("{theme}");
        }
        return ExitCode::SUCCESS;
    }

    let mut source = match cli.seed {
        Some(seed) => ThemeSource::seeded(themes_dir, seed),
        None => ThemeSource::new(themes_dir),
    };
    let config = cli.game_config();
    info_log!("main() - starting with {:?}", config);

    let result = if cli.tui {
        match TuiInterface::new() {
            Ok(mut interface) => run(&config, &mut source, &mut interface),
            Err(e) => {
                eprintln!("Failed to start the terminal interface: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock());
        run(&config, &mut source, &mut interface)
    };

    match result {
        Ok(summary) => {
            println!(
                "Games played: {}, won: {}, lost: {}",
                summary.games_played, summary.wins, summary.losses
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(
    config: &hangman::GameConfig,
    source: &mut ThemeSource,
    interface: &mut dyn GameInterface,
) -> Result<GameSummary, SecretWordError> {
    game_loop(config, source, interface)
}
