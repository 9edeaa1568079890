//! Real time POS navigation output
use crate::{constants::POS_RECORD_SIZE, utils::Utils, Error};

/// Real time POS record (48 bytes, little endian):
/// time (f64 sow), longitude (f64 deg), latitude (f64 deg), height (f64 m),
/// roll, pitch, heading (f32 deg), status (u32).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PosRecord {
    /// GPS seconds of week
    pub time_of_week: f64,
    /// Longitude [deg]
    pub longitude_deg: f64,
    /// Latitude [deg]
    pub latitude_deg: f64,
    /// Ellipsoidal height [m]
    pub height_m: f64,
    pub roll_deg: f32,
    pub pitch_deg: f32,
    pub heading_deg: f32,
    /// Receiver status word
    pub status: u32,
}

impl PosRecord {
    pub const SIZE: usize = POS_RECORD_SIZE;

    pub fn decode(buf: &[u8]) -> Result<Self, Error> {
        if buf.len() < Self::SIZE {
            return Err(Error::NotEnoughBytes);
        }
        Ok(Self {
            time_of_week: Utils::decode_f64(buf)?,
            longitude_deg: Utils::decode_f64(&buf[8..])?,
            latitude_deg: Utils::decode_f64(&buf[16..])?,
            height_m: Utils::decode_f64(&buf[24..])?,
            roll_deg: Utils::decode_f32(&buf[32..])?,
            pitch_deg: Utils::decode_f32(&buf[36..])?,
            heading_deg: Utils::decode_f32(&buf[40..])?,
            status: Utils::decode_u32(&buf[44..])?,
        })
    }

    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, Error> {
        if buf.len() < Self::SIZE {
            return Err(Error::NotEnoughBytes);
        }
        buf[..8].copy_from_slice(&self.time_of_week.to_le_bytes());
        buf[8..16].copy_from_slice(&self.longitude_deg.to_le_bytes());
        buf[16..24].copy_from_slice(&self.latitude_deg.to_le_bytes());
        buf[24..32].copy_from_slice(&self.height_m.to_le_bytes());
        buf[32..36].copy_from_slice(&self.roll_deg.to_le_bytes());
        buf[36..40].copy_from_slice(&self.pitch_deg.to_le_bytes());
        buf[40..44].copy_from_slice(&self.heading_deg.to_le_bytes());
        buf[44..48].copy_from_slice(&self.status.to_le_bytes());
        Ok(Self::SIZE)
    }
}
