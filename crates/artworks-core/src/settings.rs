use clap::Parser;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Inspect the artwork dataset and load its paintings into SQLite
#[derive(Parser, Debug, Clone)]
#[command(
    name = "artworks",
    about = "Inspect the artwork dataset and load its paintings into SQLite",
    version
)]
pub struct Settings {
    /// Task to run
    #[arg(long, default_value = "count", value_parser = ["count", "classification", "tally", "ingest", "inspect", "dump"])]
    pub task: String,

    /// Input dataset (JSON array or newline-delimited JSON)
    #[arg(long, default_value = "Artworks.json")]
    pub input: PathBuf,

    /// SQLite database file
    #[arg(long, default_value = "paintings.db")]
    pub database: PathBuf,

    /// Classification label to count or ingest
    #[arg(long, default_value = "Painting")]
    pub classification: String,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path (logs go to stderr when absent)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments and apply the `--debug` override.
    pub fn load() -> Self {
        Self::resolve(Settings::parse())
    }

    /// Same as [`load`](Self::load) with an explicit argument list.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve(Settings::parse_from(args))
    }

    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
