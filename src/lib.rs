//! Dilution of precision (DOP) extraction from Optech PGPS files,
//! correlated in time with SBET (post processed) or POS (real time)
//! navigation solutions.
//!
//! Homepage: <https://github.com/georust/rinex>
#![cfg_attr(docsrs, feature(doc_cfg))]
use thiserror::Error;

pub mod companion;
pub mod correlation;
pub mod epoch;
pub mod gps;
pub mod navigation;
pub mod track;

pub(crate) mod constants;
pub(crate) mod utils;

#[cfg(test)]
mod tests;

pub mod prelude {
    pub use crate::companion::{CompanionResolver, FixedCompanion};
    pub use crate::correlation::{CorrelationConfig, CorrelationStats, Correlator, DopMode, Report};
    pub use crate::epoch::GpsWeekStart;
    pub use crate::gps::{GpsReader, GpsRecord};
    pub use crate::navigation::{Locator, MatchPolicy, NavFormat, NavReader, NavRecord, TieBreak};
    pub use crate::track::TrackWriter;
    pub use crate::Error;
    // re-export
    pub use hifitime::{Duration, Epoch};
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("i/o error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("not enough bytes available")]
    NotEnoughBytes,
    #[error("malformed file name \"{0}\": expecting ..YYMMDD_HHMM.pgps")]
    MalformedFilename(String),
    #[error("invalid calendar date {0:04}-{1:02}-{2:02}")]
    InvalidDate(i32, u8, u8),
    #[error("unknown navigation file format \"{0}\"")]
    UnknownNavigationFormat(String),
}
