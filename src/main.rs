use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use photostamp::photostamp_core::{
    Cli, Pipeline, ResultRecord, RunObserver, Summary, format_report,
};
use simplelog::{CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, WriteLogger};
use std::fs::File;
use std::path::Path;
use std::process::ExitCode;

/// Shows the file currently being processed, like a status line.
struct SpinnerObserver {
    bar: ProgressBar,
}

impl SpinnerObserver {
    fn new(hidden: bool) -> Self {
        let bar = if hidden {
            ProgressBar::hidden()
        } else {
            ProgressBar::new_spinner()
        };
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {pos} records {wide_msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        // No steady tick: the ticker thread would stop `time` from reading the local offset.
        Self { bar }
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl RunObserver for SpinnerObserver {
    fn visiting(&mut self, path: &Path) {
        self.bar.set_message(path.display().to_string());
        self.bar.tick();
    }

    fn recorded(&mut self, _record: &ResultRecord) {
        self.bar.inc(1);
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize loggers. Terminal output goes to stderr so the report on stdout stays clean.
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        LevelFilter::Warn,
        Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )];

    if cli.log {
        loggers.push(WriteLogger::new(
            cli.log_level,
            Config::default(),
            File::create("photostamp.log")?,
        ));
    }

    CombinedLogger::init(loggers)?;

    log::info!("Processing {} input paths", cli.paths.len());

    let mut spinner = SpinnerObserver::new(cli.no_progress);
    let records =
        Pipeline::with_fs_writer(cli.mtime_only).run_with_observer(cli.paths.as_slice(), &mut spinner);
    spinner.finish();

    println!("{}", format_report(&records, &cli.output)?);

    let summary = Summary::from_records(&records);
    log::info!("{}", summary);

    if summary.has_failures() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
