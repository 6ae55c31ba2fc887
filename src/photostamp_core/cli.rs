use clap::{Parser, ValueEnum};
use simplelog::LevelFilter;
use std::path::PathBuf;

/// Restore capture times of photos and videos exported from a photo backup archive.
///
/// Every media file with a `<file>.json` metadata file next to it gets its
/// creation and modification times set to the `photoTakenTime` recorded in
/// that metadata file (converted to local time). The metadata file is
/// updated too. Directories are processed recursively. Where the platform
/// cannot set creation times, files are reported as failed unless
/// `--mtime-only` is given.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about)]
pub struct Cli {
    /// Files or directories to process
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Only require the modification time on platforms that cannot set creation times
    #[arg(long)]
    pub mtime_only: bool,

    /// Do not show the progress spinner
    #[arg(long)]
    pub no_progress: bool,

    /// Enable file logging to photostamp.log
    #[arg(long = "log")]
    pub log: bool,

    /// Log level for file logging (debug, info, warn, error)
    #[arg(long, default_value_t = LevelFilter::Debug)]
    pub log_level: LevelFilter,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Numbered table with a summary line
    Table,
    /// JSON array of result records
    Json,
}
