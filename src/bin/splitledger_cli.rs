use std::{
    env,
    io::{self, IsTerminal},
    path::PathBuf,
    process,
};

use splitledger::{
    cli::{self, CliError, Command},
    config::{Config, ConfigManager},
    init,
};

/// Overrides the preferences directory (defaults to the platform config dir).
const HOME_ENV: &str = "SPLITLEDGER_HOME";

fn main() {
    init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(match err {
            CliError::Usage(_) => 2,
            CliError::Split(_) => 1,
        });
    }
}

fn run() -> Result<(), CliError> {
    let command = Command::parse(env::args().skip(1))?;
    let base = env::var_os(HOME_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(Config::default_base_dir);
    let config = ConfigManager::with_base_dir(base)
        .and_then(|manager| manager.load())
        .map_err(splitledger::errors::SplitError::from)?;

    let stdout = io::stdout();
    let colors = stdout.is_terminal();
    let mut out = stdout.lock();
    cli::run(command, &config, colors, &mut out)
}
