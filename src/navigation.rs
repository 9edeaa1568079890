//! Navigation solutions (SBET or POS) decoding
use log::{debug, trace, warn};
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod locator;
mod pos;
mod sbet;

pub use locator::{Locator, MatchPolicy, TieBreak};
pub use pos::PosRecord;
pub use sbet::SbetRecord;

use crate::{epoch::GpsWeekStart, utils::Utils, Error};

/// Navigation solution, as needed for correlation
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavRecord {
    /// Microseconds since the Unix epoch
    pub timestamp: i64,
    /// Latitude [rad]
    pub latitude: f64,
    /// Longitude [rad]
    pub longitude: f64,
}

/// Supported navigation file layouts
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NavFormat {
    /// Post processed SBET
    Sbet,
    /// Real time POS output
    Pos,
}

impl std::fmt::Display for NavFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Sbet => f.write_str("SBET"),
            Self::Pos => f.write_str("POS"),
        }
    }
}

impl NavFormat {
    /// Size of one record, in bytes
    pub fn record_size(&self) -> usize {
        match self {
            Self::Sbet => SbetRecord::SIZE,
            Self::Pos => PosRecord::SIZE,
        }
    }

    /// Identifies the layout from the file name, falling back to
    /// record size divisibility when the name is not conclusive.
    pub fn detect<P: AsRef<Path>>(path: P, length: u64) -> Result<Self, Error> {
        let path = path.as_ref();

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "out" => return Ok(Self::Sbet),
            "pos" => return Ok(Self::Pos),
            _ => {},
        }
        if name.contains("sbet") {
            return Ok(Self::Sbet);
        }

        for format in [Self::Sbet, Self::Pos] {
            if length > 0 && length % format.record_size() as u64 == 0 {
                debug!("{}: assuming {} layout", path.display(), format);
                return Ok(format);
            }
        }

        Err(Error::UnknownNavigationFormat(path.display().to_string()))
    }

    /// Decodes one record into its [NavRecord] form.
    pub fn decode(&self, week: &GpsWeekStart, buf: &[u8]) -> Result<NavRecord, Error> {
        match self {
            Self::Sbet => {
                let sbet = SbetRecord::decode(buf)?;
                Ok(NavRecord {
                    timestamp: week.timestamp_us(sbet.time_of_week),
                    latitude: sbet.latitude_rad,
                    longitude: sbet.longitude_rad,
                })
            },
            Self::Pos => {
                let pos = PosRecord::decode(buf)?;
                Ok(NavRecord {
                    timestamp: week.timestamp_us(pos.time_of_week),
                    latitude: pos.latitude_deg.to_radians(),
                    longitude: pos.longitude_deg.to_radians(),
                })
            },
        }
    }
}

/// Sequential [NavRecord] reader, whatever the underlying [NavFormat].
pub struct NavReader<R: Read> {
    reader: R,
    format: NavFormat,
    week: GpsWeekStart,
    buf: Vec<u8>,
    eos: bool,
}

impl NavReader<BufReader<File>> {
    /// Opens a navigation file, detecting its layout.
    pub fn from_path<P: AsRef<Path>>(path: P, week: GpsWeekStart) -> Result<Self, Error> {
        let path = path.as_ref();
        let fd = File::open(path)?;
        let format = NavFormat::detect(path, fd.metadata()?.len())?;
        debug!("{}: {} navigation file", path.display(), format);
        Ok(Self::new(BufReader::new(fd), format, week))
    }
}

impl<R: Read> NavReader<R> {
    pub fn new(reader: R, format: NavFormat, week: GpsWeekStart) -> Self {
        Self {
            reader,
            format,
            week,
            eos: false,
            buf: vec![0; format.record_size()],
        }
    }

    pub fn format(&self) -> NavFormat {
        self.format
    }
}

impl<R: Read> Iterator for NavReader<R> {
    type Item = Result<NavRecord, Error>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.eos {
            return None;
        }
        match Utils::read_record(&mut self.reader, &mut self.buf) {
            Ok(size) if size == self.buf.len() => {
                let record = self.format.decode(&self.week, &self.buf);
                trace!("{}: {:?}", self.format, record);
                Some(record)
            },
            Ok(0) => {
                self.eos = true;
                None
            },
            Ok(size) => {
                self.eos = true;
                warn!("{}: dropping truncated final record ({} bytes)", self.format, size);
                None
            },
            Err(e) => {
                self.eos = true;
                Some(Err(Error::IoError(e)))
            },
        }
    }
}
