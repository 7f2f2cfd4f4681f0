//! Terminal front end for the user grid.
//!
//! Reads one command per line from stdin and prints the grid after every
//! change. Debounced filters and finished requests are applied while waiting
//! for input.

mod commands;
mod config;
mod paths;
mod settings;
mod view;

use std::fs::File;
use std::sync::Arc;

use simplelog::{Config, WriteLogger};
use tokio::io::{AsyncBufReadExt, BufReader};
use usergrid_lib::UsersClient;
use usergrid_lib::grid::{GridConfig, GridController};

use crate::commands::{Command, HELP};
use crate::config::CliConfig;

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Grid(#[from] usergrid_lib::error::Error),

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

enum Event {
    Line(Option<String>),
    Stepped(bool),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let config = CliConfig::from_env()?;
    init_logging(&config);
    log::info!("Starting usergrid against {}", config.api_url);

    let client = UsersClient::builder()
        .url(config.api_url.as_str())
        .timeout(config.timeout)
        .build()
        .map_err(usergrid_lib::error::Error::from)?;

    let grid_config = GridConfig::default().with_endpoint_filters(config.endpoint_filters);
    let mut grid = GridController::new(Arc::new(client), grid_config);

    match settings::open().await {
        Ok(provider) => {
            if let Err(e) = grid.attach_settings(provider).await {
                log::warn!("Could not restore column widths: {}", e);
            }
        }
        Err(e) => log::warn!("Column widths will not be saved: {}", e),
    }

    grid.load();
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let event = tokio::select! {
            line = lines.next_line() => Event::Line(line?),
            stepped = grid.step(), if !grid.is_idle() => Event::Stepped(stepped),
        };

        match event {
            Event::Line(None) => break,
            Event::Line(Some(line)) => match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(Command::Help) => println!("{}", HELP),
                Ok(Command::Json) => match serde_json::to_string_pretty(&grid.snapshot()) {
                    Ok(json) => println!("{}", json),
                    Err(e) => println!("error: {}", e),
                },
                Ok(command) => match commands::apply(&command, &mut grid) {
                    Ok(()) => print!("{}", view::render(&grid.snapshot())),
                    Err(e) => println!("error: {}", e),
                },
                Err(e) => println!("{}", e),
            },
            Event::Stepped(true) if grid.is_idle() => print!("{}", view::render(&grid.snapshot())),
            Event::Stepped(_) => {}
        }
    }

    log::info!("Exiting");
    Ok(())
}

/// Writes the log to `latest.log` in the cache directory, archiving the previous one.
fn init_logging(config: &CliConfig) {
    paths::rotate_logs();

    let Some(path) = paths::log_file() else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    match File::create(&path) {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(config.log_level, Config::default(), file) {
                eprintln!("Failed to initialize logger: {}", e);
            }
        }
        Err(e) => eprintln!("Failed to create log file {}: {}", path.display(), e),
    }
}
