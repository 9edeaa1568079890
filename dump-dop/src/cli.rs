use clap::{value_parser, Arg, ArgAction, ArgMatches, ColorChoice, Command};
use pgps::prelude::{CorrelationConfig, DopMode, Duration, MatchPolicy, TieBreak};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub struct Cli {
    /// arguments passed by user
    pub matches: ArgMatches,
}

impl Cli {
    pub fn new() -> Self {
        Self {
            matches: Self::command().get_matches(),
        }
    }
    pub fn command() -> Command {
        Command::new("dump-dop")
            .author("Guillaume W. Bres <guillaume.bressaix@gmail.com>")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Dumps PGPS vertical (default) or horizontal DOP along the SBET/POS trajectory")
            .arg_required_else_help(true)
            .disable_help_flag(true)
            .color(ColorChoice::Auto)
            .arg(
                Arg::new("help")
                    .long("help")
                    .action(ArgAction::Help)
                    .help("Print help"),
            )
            .arg(
                Arg::new("input")
                    .value_name("PGPS_FILENAME")
                    .help("Input PGPS file (..YYMMDD_HHMM.pgps)")
                    .required(true),
            )
            .arg(
                Arg::new("output")
                    .value_name("OUTPUT_FILENAME")
                    .help("Output track file, .trk is appended when missing")
                    .required(true),
            )
            .arg(
                Arg::new("hdop")
                    .short('h')
                    .long("hdop")
                    .action(ArgAction::SetTrue)
                    .help("Dump HDOP instead of VDOP"),
            )
            .arg(
                Arg::new("quiet")
                    .short('q')
                    .long("quiet")
                    .action(ArgAction::SetTrue)
                    .help("Do not report progress"),
            )
            .next_help_heading("Navigation")
            .arg(
                Arg::new("nav")
                    .long("nav")
                    .value_name("FILE")
                    .action(ArgAction::Set)
                    .help("SBET (.out) or POS (.pos) file to use.
Otherwise, it is searched next to the PGPS file (same directory, parent, ../pos and ../sbet)."),
            )
            .arg(
                Arg::new("max-gap")
                    .long("max-gap")
                    .value_name("SECONDS")
                    .value_parser(value_parser!(f64))
                    .action(ArgAction::Set)
                    .help("Reject navigation solutions further than this from the PGPS sample."),
            )
            .arg(
                Arg::new("tie")
                    .long("tie")
                    .value_parser(["earlier", "later"])
                    .action(ArgAction::Set)
                    .help("Navigation solution to retain when the PGPS sample sits exactly in between two. Default: earlier."),
            )
    }
    pub fn input_path(&self) -> PathBuf {
        Path::new(self.matches.get_one::<String>("input").unwrap()).to_path_buf()
    }
    /// Output path, with .trk extension
    pub fn output_path(&self) -> PathBuf {
        let output = self.matches.get_one::<String>("output").unwrap();
        if output.ends_with(".trk") {
            PathBuf::from(output)
        } else {
            PathBuf::from(format!("{}.trk", output))
        }
    }
    pub fn nav_path(&self) -> Option<PathBuf> {
        self.matches
            .get_one::<String>("nav")
            .map(|nav| Path::new(nav).to_path_buf())
    }
    pub fn quiet(&self) -> bool {
        self.matches.get_flag("quiet")
    }
    pub fn dop_mode(&self) -> DopMode {
        if self.matches.get_flag("hdop") {
            DopMode::Horizontal
        } else {
            DopMode::Vertical
        }
    }
    pub fn match_policy(&self) -> MatchPolicy {
        let mut policy = MatchPolicy::default();
        if let Some(tie) = self.matches.get_one::<String>("tie") {
            if let Ok(tie) = TieBreak::from_str(tie) {
                policy = policy.with_tie_break(tie);
            }
        }
        if let Some(gap) = self.matches.get_one::<f64>("max-gap") {
            policy = policy.with_max_gap(Duration::from_seconds(*gap));
        }
        policy
    }
    pub fn config(&self) -> CorrelationConfig {
        CorrelationConfig {
            mode: self.dop_mode(),
            policy: self.match_policy(),
        }
    }
}
