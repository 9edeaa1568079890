//! Forward only navigation record search
use hifitime::Duration;
use log::{debug, trace};
use std::io::Read;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{NavReader, NavRecord};
use crate::Error;

/// Which bracketing record wins when the target sits exactly
/// halfway between two navigation records
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TieBreak {
    #[default]
    Earlier,
    Later,
}

impl std::str::FromStr for TieBreak {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "earlier" | "before" => Ok(Self::Earlier),
            "later" | "after" => Ok(Self::Later),
            _ => Err(format!("invalid tie break \"{}\"", s)),
        }
    }
}

/// [Locator] matching policy. A target is only matched when
/// the navigation coverage brackets it.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MatchPolicy {
    pub tie_break: TieBreak,
    /// Rejects matches further than this from the target
    pub max_gap: Option<Duration>,
}

impl MatchPolicy {
    /// Copies and returns [MatchPolicy] with given [TieBreak]
    pub fn with_tie_break(&self, tie_break: TieBreak) -> Self {
        let mut s = *self;
        s.tie_break = tie_break;
        s
    }

    /// Copies and returns [MatchPolicy] with a maximal time gap
    pub fn with_max_gap(&self, max_gap: Duration) -> Self {
        let mut s = *self;
        s.max_gap = Some(max_gap);
        s
    }

    fn max_gap_us(&self) -> Option<i64> {
        self.max_gap
            .map(|gap| (gap.to_seconds() * 1_000_000.0).round() as i64)
    }
}

/// Locates the navigation record matching each query timestamp.
/// Queries are expected in non decreasing order: the underlying stream is
/// only ever read forward, so a complete correlation pass is linear.
/// ```
/// use std::io::Cursor;
/// use pgps::prelude::{GpsWeekStart, Locator, MatchPolicy, NavFormat, NavReader};
/// use pgps::navigation::PosRecord;
///
/// let week = GpsWeekStart::from_unix_seconds(0);
///
/// let mut bytes = vec![0; 2 * PosRecord::SIZE];
/// for (i, chunk) in bytes.chunks_mut(PosRecord::SIZE).enumerate() {
///     let record = PosRecord {
///         time_of_week: i as f64,
///         latitude_deg: 45.0,
///         ..Default::default()
///     };
///     record.encode(chunk).unwrap();
/// }
///
/// let reader = NavReader::new(Cursor::new(bytes), NavFormat::Pos, week);
/// let mut locator = Locator::new(reader, MatchPolicy::default());
///
/// // 0.25s sits between both records, first one is closer
/// let found = locator.find(250_000).unwrap().unwrap();
/// assert_eq!(found.timestamp, 0);
///
/// // past the end of the stream
/// assert!(locator.find(2_000_000).unwrap().is_none());
/// ```
pub struct Locator<R: Read> {
    reader: NavReader<R>,
    policy: MatchPolicy,
    /// Latest record strictly before the previous target
    previous: Option<NavRecord>,
    /// Lookahead: first record at or after the previous target
    next: Option<NavRecord>,
    /// Records read so far
    consumed: usize,
    eos: bool,
}

impl<R: Read> Locator<R> {
    pub fn new(reader: NavReader<R>, policy: MatchPolicy) -> Self {
        Self {
            reader,
            policy,
            previous: None,
            next: None,
            consumed: 0,
            eos: false,
        }
    }

    /// Number of navigation records read so far. Never decreases.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// True once the navigation stream has been exhausted
    pub fn exhausted(&self) -> bool {
        self.eos && self.next.is_none()
    }

    /// Searches the record matching `target` (microseconds since the Unix epoch).
    /// Returns `None` when the navigation data does not cover this instant.
    pub fn find(&mut self, target: i64) -> Result<Option<NavRecord>, Error> {
        if self.exhausted() {
            return Ok(None);
        }

        // advance while lookahead is still before target
        loop {
            if self.next.is_none() {
                match self.reader.next() {
                    Some(record) => {
                        self.next = Some(record?);
                        self.consumed += 1;
                    },
                    None => {
                        debug!("navigation: end of stream after {} records", self.consumed);
                        self.eos = true;
                        return Ok(None);
                    },
                }
            }

            match self.next {
                Some(next) if next.timestamp < target => {
                    self.previous = self.next.take();
                },
                _ => break,
            }
        }

        let next = match self.next {
            Some(next) => next,
            None => return Ok(None),
        };

        let candidate = if next.timestamp == target {
            Some(next)
        } else {
            match self.previous {
                Some(previous) if previous.timestamp <= target => {
                    let before = target - previous.timestamp;
                    let after = next.timestamp - target;
                    if before < after {
                        Some(previous)
                    } else if after < before {
                        Some(next)
                    } else {
                        match self.policy.tie_break {
                            TieBreak::Earlier => Some(previous),
                            TieBreak::Later => Some(next),
                        }
                    }
                },
                _ => {
                    trace!("navigation: {} precedes coverage", target);
                    None
                },
            }
        };

        Ok(candidate.filter(|record| match self.policy.max_gap_us() {
            Some(max_gap) => (record.timestamp - target).abs() <= max_gap,
            None => true,
        }))
    }
}
