//! Smoothed Best Estimate of Trajectory (post processed navigation)
use crate::{constants::SBET_RECORD_SIZE, utils::Utils, Error};

/// SBET record. Only the fields needed for correlation are decoded,
/// the layout being 17 little endian f64:
/// time, latitude, longitude, altitude, x/y/z velocity, roll, pitch,
/// platform heading, wander angle, x/y/z force, x/y/z angular rate.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct SbetRecord {
    /// GPS seconds of week
    pub time_of_week: f64,
    /// Latitude [rad]
    pub latitude_rad: f64,
    /// Longitude [rad]
    pub longitude_rad: f64,
    /// Altitude [m]
    pub altitude_m: f64,
}

impl SbetRecord {
    pub const SIZE: usize = SBET_RECORD_SIZE;

    pub fn decode(buf: &[u8]) -> Result<Self, Error> {
        if buf.len() < Self::SIZE {
            return Err(Error::NotEnoughBytes);
        }
        Ok(Self {
            time_of_week: Utils::decode_f64(buf)?,
            latitude_rad: Utils::decode_f64(&buf[8..])?,
            longitude_rad: Utils::decode_f64(&buf[16..])?,
            altitude_m: Utils::decode_f64(&buf[24..])?,
        })
    }

    /// Encodes this record, fields we do not describe are zeroed.
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, Error> {
        if buf.len() < Self::SIZE {
            return Err(Error::NotEnoughBytes);
        }
        buf[..Self::SIZE].fill(0);
        buf[..8].copy_from_slice(&self.time_of_week.to_le_bytes());
        buf[8..16].copy_from_slice(&self.latitude_rad.to_le_bytes());
        buf[16..24].copy_from_slice(&self.longitude_rad.to_le_bytes());
        buf[24..32].copy_from_slice(&self.altitude_m.to_le_bytes());
        Ok(Self::SIZE)
    }
}
