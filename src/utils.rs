use crate::Error;
use std::io::{ErrorKind, Read, Result as IoResult};

pub struct Utils;

impl Utils {
    /// Fills `buf` from `reader` and returns the number of bytes obtained,
    /// which is only less than `buf.len()` at end of stream.
    pub fn read_record<R: Read>(reader: &mut R, buf: &mut [u8]) -> IoResult<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }
    /// u32 decoding attempt (little endian)
    pub fn decode_u32(buf: &[u8]) -> Result<u32, Error> {
        if buf.len() < 4 {
            Err(Error::NotEnoughBytes)
        } else {
            Ok(u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]))
        }
    }
    /// f32 decoding attempt (little endian)
    pub fn decode_f32(buf: &[u8]) -> Result<f32, Error> {
        if buf.len() < 4 {
            Err(Error::NotEnoughBytes)
        } else {
            Ok(f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]))
        }
    }
    /// f64 decoding attempt (little endian)
    pub fn decode_f64(buf: &[u8]) -> Result<f64, Error> {
        if buf.len() < 8 {
            Err(Error::NotEnoughBytes)
        } else {
            Ok(f64::from_le_bytes([
                buf[0], buf[1], buf[2], buf[3], buf[4], buf[5], buf[6], buf[7],
            ]))
        }
    }
}
