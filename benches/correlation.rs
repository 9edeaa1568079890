//! Benchmarking a complete correlation pass,
//! ten minutes of 1Hz PGPS data against 200Hz SBET data
extern crate criterion;
use criterion::{criterion_group, criterion_main, Criterion};

use pgps::navigation::SbetRecord;
use pgps::prelude::{
    CorrelationConfig, Correlator, GpsReader, GpsRecord, GpsWeekStart, Locator, NavFormat,
    NavReader, TrackWriter,
};
use std::io::Cursor;

fn pgps_stream() -> Vec<u8> {
    let mut bytes = vec![0; 600 * GpsRecord::SIZE];
    for (i, chunk) in bytes.chunks_mut(GpsRecord::SIZE).enumerate() {
        GpsRecord {
            time_of_week: i as f64,
            hdop: 0.9,
            vdop: 1.4,
        }
        .encode(chunk)
        .unwrap();
    }
    bytes
}

fn sbet_stream() -> Vec<u8> {
    let mut bytes = vec![0; 600 * 200 * SbetRecord::SIZE];
    for (i, chunk) in bytes.chunks_mut(SbetRecord::SIZE).enumerate() {
        SbetRecord {
            time_of_week: i as f64 / 200.0,
            latitude_rad: 0.52,
            longitude_rad: -1.54,
            altitude_m: 10.0,
        }
        .encode(chunk)
        .unwrap();
    }
    bytes
}

fn benchmark(c: &mut Criterion) {
    let week = GpsWeekStart::from_unix_seconds(1213488000);
    let pgps = pgps_stream();
    let sbet = sbet_stream();

    let mut grp = c.benchmark_group("correlation");

    grp.bench_function("pgps/sbet", |b| {
        b.iter(|| {
            let config = CorrelationConfig::default();
            let mut gps = GpsReader::new(Cursor::new(&pgps[..]), pgps.len() as u64);
            let nav = NavReader::new(Cursor::new(&sbet[..]), NavFormat::Sbet, week);
            let mut locator = Locator::new(nav, config.policy);
            let mut track = TrackWriter::new(Cursor::new(Vec::new())).unwrap();
            Correlator::new(week, config)
                .run(&mut gps, &mut locator, &mut track, |_| {})
                .unwrap()
        })
    });

    grp.finish();
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
