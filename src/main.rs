//! Stockroom terminal front end

use std::{
    io::{self, IsTerminal},
    process::ExitCode,
};

use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::util::TryInitError;

use stockroom::{
    cli::{CliError, Repl},
    clock::SystemClock,
    fixtures::{self, FixtureError},
    render::Renderer,
    session::Session,
};

use crate::config::Config;

mod config;
mod logging;

#[derive(Debug, Error)]
enum AppError {
    #[error("failed to initialise logging: {0}")]
    Logging(#[from] TryInitError),

    #[error("failed to load products: {0}")]
    Fixture(#[from] FixtureError),

    #[error(transparent)]
    Cli(#[from] CliError),
}

/// Stockroom entry point
pub fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(error) => {
            // clap renders its own help and usage text
            _ = error.print();

            return if error.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{error}");

            #[expect(
                clippy::print_stderr,
                reason = "the subscriber may be missing or filtered, the error must still reach the user"
            )]
            {
                eprintln!("{error}");
            }

            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<(), AppError> {
    logging::init_subscriber(config)?;

    let session = if config.empty {
        Session::empty(SystemClock)
    } else {
        let fixture = match &config.seed {
            Some(path) => fixtures::load(path)?,
            None => fixtures::seed()?,
        };

        Session::from_fixture(fixture, SystemClock)?
    };

    let stdout = io::stdout();
    let color = !config.no_color && stdout.is_terminal();
    let renderer = Renderer::new(session.currency()).with_color(color);

    info!(products = session.store().len(), color, "starting");

    let mut repl = Repl::new(session, renderer, io::stdin().lock(), stdout.lock());
    repl.run()?;

    Ok(())
}
