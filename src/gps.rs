//! PGPS (processed GPS) record decoding
use log::{trace, warn};
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{constants::GPS_RECORD_SIZE, utils::Utils, Error};

/// One PGPS sample
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GpsRecord {
    /// GPS seconds of week
    pub time_of_week: f64,
    /// Horizontal dilution of precision
    pub hdop: f32,
    /// Vertical dilution of precision
    pub vdop: f32,
}

impl GpsRecord {
    /// Encoded size, in bytes
    pub const SIZE: usize = GPS_RECORD_SIZE;

    /// Decodes one record from little endian bytes.
    pub fn decode(buf: &[u8]) -> Result<Self, Error> {
        if buf.len() < Self::SIZE {
            return Err(Error::NotEnoughBytes);
        }
        Ok(Self {
            time_of_week: Utils::decode_f64(buf)?,
            hdop: Utils::decode_f32(&buf[8..])?,
            vdop: Utils::decode_f32(&buf[12..])?,
        })
    }

    /// Encodes this record, returns the number of bytes written.
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, Error> {
        if buf.len() < Self::SIZE {
            return Err(Error::NotEnoughBytes);
        }
        buf[..8].copy_from_slice(&self.time_of_week.to_le_bytes());
        buf[8..12].copy_from_slice(&self.hdop.to_le_bytes());
        buf[12..16].copy_from_slice(&self.vdop.to_le_bytes());
        Ok(Self::SIZE)
    }
}

/// Sequential [GpsRecord] reader.
/// ```
/// use std::io::Cursor;
/// use pgps::prelude::{GpsReader, GpsRecord};
///
/// let mut bytes = vec![0; 2 * GpsRecord::SIZE];
/// let record = GpsRecord {
///     time_of_week: 10.0,
///     hdop: 0.9,
///     vdop: 1.4,
/// };
/// record.encode(&mut bytes[GpsRecord::SIZE..]).unwrap();
///
/// let len = bytes.len() as u64;
/// let mut reader = GpsReader::new(Cursor::new(bytes), len);
/// assert_eq!(reader.total_records(), 2);
///
/// let first = reader.next().unwrap().unwrap();
/// assert_eq!(first.time_of_week, 0.0);
///
/// let second = reader.next().unwrap().unwrap();
/// assert_eq!(second, record);
///
/// assert!(reader.next().is_none());
/// ```
pub struct GpsReader<R: Read> {
    reader: R,
    /// Total stream length, in bytes
    length: u64,
    /// Bytes consumed so far
    consumed: u64,
    eos: bool,
}

impl GpsReader<BufReader<File>> {
    /// Opens a PGPS file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let fd = File::open(path)?;
        let length = fd.metadata()?.len();
        Ok(Self::new(BufReader::new(fd), length))
    }
}

impl<R: Read> GpsReader<R> {
    /// Creates a [GpsReader] from a readable stream of `length` bytes.
    pub fn new(reader: R, length: u64) -> Self {
        Self {
            reader,
            length,
            consumed: 0,
            eos: false,
        }
    }

    /// Number of complete records in this stream
    pub fn total_records(&self) -> usize {
        (self.length / GPS_RECORD_SIZE as u64) as usize
    }

    /// Stream length, in bytes
    pub fn length(&self) -> u64 {
        self.length
    }

    /// Bytes consumed so far
    pub fn consumed(&self) -> u64 {
        self.consumed
    }
}

impl<R: Read> Iterator for GpsReader<R> {
    type Item = Result<GpsRecord, Error>;
    /// Decodes next record. A truncated final record ends the stream.
    fn next(&mut self) -> Option<Self::Item> {
        if self.eos {
            return None;
        }

        let mut buf = [0; GPS_RECORD_SIZE];

        match Utils::read_record(&mut self.reader, &mut buf) {
            Ok(GPS_RECORD_SIZE) => {
                self.consumed += GPS_RECORD_SIZE as u64;
                let record = GpsRecord::decode(&buf);
                trace!("pgps: {:?}", record);
                Some(record)
            },
            Ok(0) => {
                self.eos = true;
                None
            },
            Ok(size) => {
                self.eos = true;
                self.consumed += size as u64;
                warn!("pgps: dropping truncated final record ({} bytes)", size);
                None
            },
            Err(e) => {
                self.eos = true;
                Some(Err(Error::IoError(e)))
            },
        }
    }
}
