//! Record sizes and other fixed values.

/// Size of one PGPS record: sow (f64), HDOP (f32), VDOP (f32)
pub const GPS_RECORD_SIZE: usize = 16;

/// Size of one SBET record: 17 × f64
pub const SBET_RECORD_SIZE: usize = 136;

/// Size of one real time POS record
pub const POS_RECORD_SIZE: usize = 48;

/// Seconds in one day
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Running minimum starts here
pub const DOP_MIN_SENTINEL: f32 = 999.0;

/// Running maximum starts here
pub const DOP_MAX_SENTINEL: f32 = -999.0;

/// Track header as written before any data
pub const HEADER_PLACEHOLDER: &str = "MINMAX 00.0000 00.0000\n";
