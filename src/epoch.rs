//! GPS week start resolution from the date embedded in PGPS file names.
//!
//! PGPS records only carry seconds of week. The week they refer to is deduced
//! from the acquisition date found in the file name (`..YYMMDD_HHMM.pgps`).
use hifitime::{Epoch, TimeScale};
use lazy_static::lazy_static;
use log::debug;

use crate::{constants::SECONDS_PER_DAY, Error};

/// Offset of the YYMMDD date token, counted from the end of the file name
const DATE_OFFSET_FROM_END: usize = 16;

lazy_static! {
    /// Calendar dates are always interpreted in UTC, whatever the host locale.
    /// hifitime has no notion of host timezone: this only pins the scale
    /// every date computation of the process goes through.
    static ref CALENDAR_TIMESCALE: TimeScale = {
        debug!("calendar computations locked to UTC");
        TimeScale::UTC
    };
}

/// Locks calendar computations to UTC. Calling this more than once has no
/// further effect. Date resolution calls it implicitly; applications
/// may call it at startup to make the setting explicit.
pub fn init() {
    lazy_static::initialize(&CALENDAR_TIMESCALE);
}

/// Start of the GPS week (Sunday 00:00:00 UTC, i.e. "Saturday midnight")
/// used to turn seconds of week into absolute time.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GpsWeekStart {
    /// Seconds since 1970-01-01T00:00:00 UTC
    unix_seconds: i64,
}

impl GpsWeekStart {
    /// Resolves the week start from a PGPS file name (final path component,
    /// or the full path: only the file name is considered).
    pub fn from_filename(name: &str) -> Result<Self, Error> {
        let name = name.rsplit(['/', '\\']).next().unwrap_or(name);

        let token = name
            .len()
            .checked_sub(DATE_OFFSET_FROM_END)
            .and_then(|start| name.get(start..start + 6))
            .ok_or_else(|| Error::MalformedFilename(name.to_string()))?;

        Self::from_yymmdd(token).map_err(|e| match e {
            Error::MalformedFilename(_) => Error::MalformedFilename(name.to_string()),
            e => e,
        })
    }

    /// Resolves the week start from a 6 digit `YYMMDD` token.
    /// Two digit years are always 20YY.
    pub fn from_yymmdd(token: &str) -> Result<Self, Error> {
        if token.len() != 6 || !token.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::MalformedFilename(token.to_string()));
        }

        let yy = token[0..2]
            .parse::<i32>()
            .map_err(|_| Error::MalformedFilename(token.to_string()))?;
        let mm = token[2..4]
            .parse::<u8>()
            .map_err(|_| Error::MalformedFilename(token.to_string()))?;
        let dd = token[4..6]
            .parse::<u8>()
            .map_err(|_| Error::MalformedFilename(token.to_string()))?;

        Self::from_date(2000 + yy, mm, dd)
    }

    /// Resolves the week start containing given calendar date (UTC).
    pub fn from_date(year: i32, month: u8, day: u8) -> Result<Self, Error> {
        init();

        let midnight = Epoch::maybe_from_gregorian(year, month, day, 0, 0, 0, 0, *CALENDAR_TIMESCALE)
            .map_err(|_| Error::InvalidDate(year, month, day))?;

        let unix_seconds = midnight.to_unix_seconds().round() as i64;

        // 1970-01-01 was a Thursday: 0=Sunday..6=Saturday
        let days = unix_seconds.div_euclid(SECONDS_PER_DAY);
        let weekday = (days + 4).rem_euclid(7);

        let week_start = Self {
            unix_seconds: unix_seconds - weekday * SECONDS_PER_DAY,
        };

        debug!(
            "{:04}-{:02}-{:02}: week starts {} ({} s)",
            year,
            month,
            day,
            week_start.epoch(),
            week_start.unix_seconds
        );

        Ok(week_start)
    }

    /// Builds directly from Unix seconds, which should describe a Sunday midnight.
    pub fn from_unix_seconds(unix_seconds: i64) -> Self {
        Self { unix_seconds }
    }

    /// Seconds since the Unix epoch
    pub fn unix_seconds(&self) -> i64 {
        self.unix_seconds
    }

    /// Week start expressed as [Epoch]
    pub fn epoch(&self) -> Epoch {
        Epoch::from_unix_seconds(self.unix_seconds as f64)
    }

    /// Converts seconds of week to absolute microseconds since the Unix epoch.
    /// This is the correlation key shared by GPS and navigation records.
    pub fn timestamp_us(&self, seconds_of_week: f64) -> i64 {
        ((self.unix_seconds as f64 + seconds_of_week) * 1_000_000.0) as i64
    }
}
