// Finds which games on a Steam wishlist have a playable demo.
//
// The wishlist comes either from the store's `wishlistdata` pages (public
// profiles only) or from an Augmented Steam export. Demo IDs are looked up
// through the sale-event endpoint, 50 apps per request.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::process::ExitCode;

use clap::ArgMatches;
use config::Config;
use error::AppError;
use http::HttpTransport;
use log::{debug, error, info, LevelFilter};
use simplelog::{ColorChoice, CombinedLogger, SharedLogger, TermLogger, TerminalMode, WriteLogger};

mod cli;
mod config;
mod demo;
mod error;
mod export;
mod game;
mod http;
mod pipeline;
mod report;
mod wishlist;

fn main() -> ExitCode {
    let matches = cli::build_command().get_matches();
    init_logging(&matches);

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("ERROR: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(matches: &ArgMatches) {
    let level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    if let Some(path) = matches.get_one::<String>("log_file") {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => loggers.push(WriteLogger::new(level, simplelog::Config::default(), file)),
            Err(e) => eprintln!("WARNING: cannot open log file {path}: {e}"),
        }
    }

    // only fails if a logger is already installed
    let _ = CombinedLogger::init(loggers);
}

fn run(matches: &ArgMatches) -> Result<(), AppError> {
    let config = Config::from_matches(matches)?;
    let transport = HttpTransport::new().map_err(AppError::Client)?;

    let report = if let Some(user_id) = matches.get_one::<String>("user_id") {
        pipeline::run_pipeline(&transport, &config.endpoints, user_id.trim())?
    } else if let Some(export) = matches.get_one::<String>("export") {
        pipeline::run_export_pipeline(&transport, &config.endpoints, Path::new(export))?
    } else {
        unreachable!("clap requires one of --user-id or --export")
    };

    for row in report.demo_rows() {
        debug!("{}", row.game);
    }

    write_report(&config.output, &report.to_html(config.demos_only))?;

    info!(
        "Done: found {} games with demos out of {} total games",
        report.total_demos, report.total_games
    );
    info!("report written to {}", config.output.display());
    Ok(())
}

fn write_report(path: &Path, html: &str) -> Result<(), AppError> {
    fs::write(path, html).map_err(|source| AppError::Write {
        path: path.to_path_buf(),
        source,
    })
}
