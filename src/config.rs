//! Configuration

use std::path::PathBuf;

use clap::Parser;

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Stockroom configuration
#[derive(Debug, Parser)]
#[command(name = "stockroom", about = "In-memory inventory manager", long_about = None)]
pub struct Config {
    /// YAML file with the products to start with (defaults to the bundled sample set)
    #[arg(short, long, env = "STOCKROOM_SEED", conflicts_with = "empty")]
    pub seed: Option<PathBuf>,

    /// Start with no products
    #[arg(long)]
    pub empty: bool,

    /// Disable ANSI colours
    #[arg(long)]
    pub no_color: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults() -> TestResult {
        let config = Config::try_parse_from(["stockroom"])?;

        assert!(config.seed.is_none());
        assert!(!config.empty);
        assert_eq!(config.log_format, LogFormat::Compact);

        Ok(())
    }

    #[test]
    fn seed_and_empty_conflict() {
        let result = Config::try_parse_from(["stockroom", "--seed", "a.yml", "--empty"]);

        assert!(result.is_err());
    }

    #[test]
    fn json_log_format() -> TestResult {
        let config = Config::try_parse_from(["stockroom", "--log-format", "json"])?;

        assert_eq!(config.log_format, LogFormat::Json);

        Ok(())
    }
}
