//! DOP / navigation time correlation
use log::{debug, info};
use std::io::{Read, Seek, Write};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::{DOP_MAX_SENTINEL, DOP_MIN_SENTINEL},
    epoch::GpsWeekStart,
    gps::{GpsReader, GpsRecord},
    navigation::{Locator, MatchPolicy},
    track::TrackWriter,
    Error,
};

/// Which DOP is reported in the track file
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DopMode {
    Horizontal,
    #[default]
    Vertical,
}

impl std::fmt::Display for DopMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Horizontal => f.write_str("HDOP"),
            Self::Vertical => f.write_str("VDOP"),
        }
    }
}

impl DopMode {
    /// Selects the DOP value this mode reports
    pub fn select(&self, record: &GpsRecord) -> f32 {
        match self {
            Self::Horizontal => record.hdop,
            Self::Vertical => record.vdop,
        }
    }
}

/// Running DOP extrema
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CorrelationStats {
    pub min_hdop: f32,
    pub max_hdop: f32,
    pub min_vdop: f32,
    pub max_vdop: f32,
    /// Number of samples accounted for
    pub samples: usize,
}

impl Default for CorrelationStats {
    fn default() -> Self {
        Self {
            min_hdop: DOP_MIN_SENTINEL,
            max_hdop: DOP_MAX_SENTINEL,
            min_vdop: DOP_MIN_SENTINEL,
            max_vdop: DOP_MAX_SENTINEL,
            samples: 0,
        }
    }
}

impl CorrelationStats {
    pub fn update(&mut self, record: &GpsRecord) {
        if record.hdop < self.min_hdop {
            self.min_hdop = record.hdop;
        }
        if record.hdop > self.max_hdop {
            self.max_hdop = record.hdop;
        }
        if record.vdop < self.min_vdop {
            self.min_vdop = record.vdop;
        }
        if record.vdop > self.max_vdop {
            self.max_vdop = record.vdop;
        }
        self.samples += 1;
    }

    /// (min, max) for given [DopMode], `None` until one sample was accounted for.
    pub fn range(&self, mode: DopMode) -> Option<(f32, f32)> {
        if self.samples == 0 {
            return None;
        }
        match mode {
            DopMode::Horizontal => Some((self.min_hdop, self.max_hdop)),
            DopMode::Vertical => Some((self.min_vdop, self.max_vdop)),
        }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CorrelationConfig {
    pub mode: DopMode,
    pub policy: MatchPolicy,
}

/// Correlation pass summary
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Report {
    /// Complete records announced by the PGPS stream size
    pub total_records: usize,
    /// Records actually decoded
    pub records_read: usize,
    /// Track lines emitted
    pub lines_written: usize,
    /// Records without navigation match
    pub unmatched: usize,
    pub stats: CorrelationStats,
}

/// Drives one correlation pass: every [GpsRecord] is dated, matched against
/// the navigation [Locator] and, when matched, written to the track.
pub struct Correlator {
    config: CorrelationConfig,
    week: GpsWeekStart,
}

impl Correlator {
    pub fn new(week: GpsWeekStart, config: CorrelationConfig) -> Self {
        Self { config, week }
    }

    pub fn config(&self) -> &CorrelationConfig {
        &self.config
    }

    /// Runs the correlation pass to completion.
    /// `progress` is notified of the percentage of PGPS bytes consumed,
    /// only when that percentage changes.
    pub fn run<G: Read, N: Read, W: Write + Seek, F: FnMut(u8)>(
        &self,
        gps: &mut GpsReader<G>,
        locator: &mut Locator<N>,
        track: &mut TrackWriter<W>,
        mut progress: F,
    ) -> Result<Report, Error> {
        let mode = self.config.mode;

        let mut report = Report {
            total_records: gps.total_records(),
            ..Default::default()
        };

        debug!(
            "correlating {} {} samples, week starting {}",
            report.total_records,
            mode,
            self.week.epoch()
        );

        let mut prev_percent = None;

        while let Some(record) = gps.next() {
            let record = record?;
            report.records_read += 1;
            report.stats.update(&record);

            let timestamp = self.week.timestamp_us(record.time_of_week);

            match locator.find(timestamp)? {
                Some(nav) => {
                    track.write_point(
                        nav.latitude.to_degrees(),
                        nav.longitude.to_degrees(),
                        mode.select(&record),
                    )?;
                    report.lines_written += 1;
                },
                None => {
                    report.unmatched += 1;
                },
            }

            let percent = percentage(gps.consumed(), gps.length());
            if prev_percent != Some(percent) {
                progress(percent);
                prev_percent = Some(percent);
            }
        }

        track.finalize(report.stats.range(mode))?;

        info!(
            "{} records: {} correlated, {} unmatched",
            report.records_read, report.lines_written, report.unmatched
        );

        Ok(report)
    }
}

fn percentage(consumed: u64, total: u64) -> u8 {
    if total == 0 {
        100
    } else {
        ((consumed as f32 / total as f32) * 100.0).min(100.0) as u8
    }
}
