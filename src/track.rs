//! Track (.trk) file production
use log::{debug, warn};
use std::io::{Seek, SeekFrom, Write};

use crate::{constants::HEADER_PLACEHOLDER, Error};

/// [TrackWriter] emits a fixed width `MINMAX` header right away,
/// one `0,0,0,lat,lon,dop` line per correlated sample, then rewrites
/// the header in place once the DOP range is known.
/// ```
/// use std::io::Cursor;
/// use pgps::prelude::TrackWriter;
///
/// let mut track = TrackWriter::new(Cursor::new(Vec::new())).unwrap();
/// track.write_point(30.5, -88.25, 1.25).unwrap();
/// track.finalize(Some((1.25, 1.25))).unwrap();
///
/// let content = String::from_utf8(track.into_inner().into_inner()).unwrap();
/// assert_eq!(
///     content,
///     "MINMAX 01.2500 01.2500\n0,0,0,30.500000,-88.250000,1.250000\n"
/// );
/// ```
pub struct TrackWriter<W: Write + Seek> {
    writer: W,
    lines: usize,
}

impl<W: Write + Seek> TrackWriter<W> {
    /// Creates a new [TrackWriter], writing the header placeholder
    pub fn new(mut writer: W) -> Result<Self, Error> {
        writer.write_all(HEADER_PLACEHOLDER.as_bytes())?;
        Ok(Self { writer, lines: 0 })
    }

    /// Appends one track point, coordinates in degrees
    pub fn write_point(&mut self, latitude: f64, longitude: f64, dop: f32) -> Result<(), Error> {
        writeln!(self.writer, "0,0,0,{:.6},{:.6},{:.6}", latitude, longitude, dop)?;
        self.lines += 1;
        Ok(())
    }

    /// Number of track points written so far
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Rewrites the header with the final DOP range.
    /// `None` (no sample at all) restores the placeholder values.
    /// Values the header fields cannot hold are clamped to
    /// [HEADER_MIN_VALUE] / [HEADER_MAX_VALUE]; data lines are never altered.
    pub fn finalize(&mut self, range: Option<(f32, f32)>) -> Result<(), Error> {
        let header = match range {
            Some((min, max)) => {
                let (clamped_min, clamped_max) = (clamp(min), clamp(max));
                if clamped_min != min || clamped_max != max {
                    warn!(
                        "track: DOP range [{}; {}] exceeds header width, clamped to [{:.4}; {:.4}]",
                        min, max, clamped_min, clamped_max
                    );
                }
                header(clamped_min, clamped_max)
            },
            None => HEADER_PLACEHOLDER.to_string(),
        };

        debug_assert_eq!(header.len(), HEADER_PLACEHOLDER.len());

        self.writer.seek(SeekFrom::Start(0))?;
        self.writer.write_all(header.as_bytes())?;
        self.writer.seek(SeekFrom::End(0))?;
        self.writer.flush()?;

        debug!("track: {} ({} points)", header.trim_end(), self.lines);
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Widest values the `{:07.4}` header fields can hold
pub const HEADER_MIN_VALUE: f32 = -9.9999;
pub const HEADER_MAX_VALUE: f32 = 99.9999;

fn clamp(value: f32) -> f32 {
    value.clamp(HEADER_MIN_VALUE, HEADER_MAX_VALUE)
}

fn header(min: f32, max: f32) -> String {
    format!("MINMAX {:07.4} {:07.4}\n", min, max)
}
