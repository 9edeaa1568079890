//! Dumps horizontal or vertical dilution of precision from Optech PGPS files,
//! along the SBET or POS trajectory, as a track (.trk) file.
//! Homepage: <https://github.com/georust/rinex>
mod cli;
mod discovery;

use cli::Cli;
use discovery::DirectoryResolver;

use pgps::prelude::{
    CompanionResolver, Correlator, FixedCompanion, GpsReader, GpsWeekStart, Locator, NavReader,
    Report, TrackWriter,
};

use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use env_logger::{Builder, Target};

#[macro_use]
extern crate log;

use thiserror::Error;

#[derive(Debug, Error)]
enum Error {
    #[error("input file {0} is not a PGPS file")]
    NotPgps(String),
    #[error("{0}: {1}")]
    Input(String, pgps::Error),
    #[error("couldn't find an SBET or POS file for {0}")]
    MissingCompanion(String),
    #[error("{0}: {1}")]
    Output(String, std::io::Error),
    #[error(transparent)]
    Pgps(#[from] pgps::Error),
}

fn is_pgps(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("pgps"))
        .unwrap_or(false)
}

fn run(cli: &Cli) -> Result<(PathBuf, Report), Error> {
    let input = cli.input_path();
    let input_name = input.display().to_string();

    if !is_pgps(&input) {
        return Err(Error::NotPgps(input_name));
    }

    let mut gps = GpsReader::from_path(&input).map_err(|e| Error::Input(input_name.clone(), e))?;

    let file_name = input
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();

    let week = GpsWeekStart::from_filename(&file_name)?;
    info!("{}: GPS week starting {}", input_name, week.epoch());

    let resolver: Box<dyn CompanionResolver> = match cli.nav_path() {
        Some(nav) => Box::new(FixedCompanion(nav)),
        None => Box::new(DirectoryResolver),
    };

    let nav_path = resolver
        .resolve(&input)
        .ok_or_else(|| Error::MissingCompanion(input_name.clone()))?;

    let nav = NavReader::from_path(&nav_path, week)
        .map_err(|e| Error::Input(nav_path.display().to_string(), e))?;

    info!("navigation: {} ({})", nav_path.display(), nav.format());

    let config = cli.config();
    let mut locator = Locator::new(nav, config.policy);

    let output = cli.output_path();

    let fd = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(&output)
        .map_err(|e| Error::Output(output.display().to_string(), e))?;

    let mut track = TrackWriter::new(fd)?;

    let quiet = cli.quiet();

    let report = Correlator::new(week, config).run(&mut gps, &mut locator, &mut track, |percent| {
        if !quiet {
            eprint!("{:02}% processed \r", percent);
            let _ = std::io::stderr().flush();
        }
    });

    match report {
        Ok(report) => Ok((output, report)),
        Err(e) => {
            // an incomplete track is never left behind
            drop(track);
            let _ = fs::remove_file(&output);
            Err(e.into())
        },
    }
}

fn summary(report: &Report) {
    eprintln!("Number of records: {}", report.total_records);
    eprintln!("Minimum HDOP: {:.6}", report.stats.min_hdop);
    eprintln!("Maximum HDOP: {:.6}", report.stats.max_hdop);
    eprintln!("Minimum VDOP: {:.6}", report.stats.min_vdop);
    eprintln!("Maximum VDOP: {:.6}\n\n", report.stats.max_vdop);
}

pub fn main() {
    let mut builder = Builder::from_default_env();
    builder
        .target(Target::Stderr)
        .format_timestamp_secs()
        .format_module_path(false)
        .init();

    pgps::epoch::init();

    let cli = Cli::new();

    match run(&cli) {
        Ok((output, report)) => {
            if !cli.quiet() {
                eprintln!("100% processed");
            }
            info!(
                "{}: {} points ({} records without navigation)",
                output.display(),
                report.lines_written,
                report.unmatched
            );
            summary(&report);
        },
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("\n{}", Cli::command().render_usage());
            std::process::exit(1);
        },
    }
}
