use assert_cmd::Command;
use predicates::prelude::*;
use std::{fs, path::Path};

use pgps::navigation::{PosRecord, SbetRecord};
use pgps::prelude::GpsRecord;

fn write_pgps(path: &Path, samples: &[(f64, f32, f32)]) {
    let mut bytes = vec![0; samples.len() * GpsRecord::SIZE];
    for (chunk, (time_of_week, hdop, vdop)) in bytes.chunks_mut(GpsRecord::SIZE).zip(samples) {
        GpsRecord {
            time_of_week: *time_of_week,
            hdop: *hdop,
            vdop: *vdop,
        }
        .encode(chunk)
        .unwrap();
    }
    fs::write(path, bytes).unwrap();
}

fn write_sbet(path: &Path, samples: &[(f64, f64, f64)]) {
    let mut bytes = vec![0; samples.len() * SbetRecord::SIZE];
    for (chunk, (time_of_week, lat, lon)) in bytes.chunks_mut(SbetRecord::SIZE).zip(samples) {
        SbetRecord {
            time_of_week: *time_of_week,
            latitude_rad: lat.to_radians(),
            longitude_rad: lon.to_radians(),
            altitude_m: 0.0,
        }
        .encode(chunk)
        .unwrap();
    }
    fs::write(path, bytes).unwrap();
}

fn write_pos(path: &Path, samples: &[(f64, f64, f64)]) {
    let mut bytes = vec![0; samples.len() * PosRecord::SIZE];
    for (chunk, (time_of_week, lat, lon)) in bytes.chunks_mut(PosRecord::SIZE).zip(samples) {
        PosRecord {
            time_of_week: *time_of_week,
            latitude_deg: *lat,
            longitude_deg: *lon,
            ..Default::default()
        }
        .encode(chunk)
        .unwrap();
    }
    fs::write(path, bytes).unwrap();
}

/// pgps/ + pos/ survey layout
fn survey() -> tempfile::TempDir {
    let root = tempfile::tempdir().unwrap();
    fs::create_dir(root.path().join("pgps")).unwrap();
    fs::create_dir(root.path().join("pos")).unwrap();

    write_pgps(
        &root.path().join("pgps").join("BH_080618_1432.pgps"),
        &[(0.0, 1.0, 2.0), (10.0, 1.5, 2.5), (20.0, 0.8, 1.2)],
    );
    write_sbet(
        &root.path().join("pos").join("sbet_080618.out"),
        &[(10.0, 30.0, -88.5)],
    );
    root
}

#[test]
fn vdop_track() {
    let root = survey();
    let output = root.path().join("out");

    Command::cargo_bin("dump-dop")
        .unwrap()
        .arg(root.path().join("pgps").join("BH_080618_1432.pgps"))
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("Number of records: 3"));

    let content = fs::read_to_string(root.path().join("out.trk")).unwrap();
    assert_eq!(
        content,
        "MINMAX 01.2000 02.5000\n0,0,0,30.000000,-88.500000,2.500000\n"
    );
}

#[test]
fn hdop_track() {
    let root = survey();
    let output = root.path().join("hdop.trk");

    Command::cargo_bin("dump-dop")
        .unwrap()
        .arg("-h")
        .arg("-q")
        .arg(root.path().join("pgps").join("BH_080618_1432.pgps"))
        .arg(&output)
        .assert()
        .success();

    let content = fs::read_to_string(&output).unwrap();
    assert_eq!(
        content,
        "MINMAX 00.8000 01.5000\n0,0,0,30.000000,-88.500000,1.500000\n"
    );
    assert!(!root.path().join("hdop.trk.trk").exists());
}

#[test]
fn explicit_pos_file() {
    let root = survey();
    let pos = root.path().join("realtime.pos");
    write_pos(&pos, &[(0.0, 1.0, 2.0), (20.0, 3.0, 4.0)]);

    let output = root.path().join("pos.trk");

    Command::cargo_bin("dump-dop")
        .unwrap()
        .arg("--nav")
        .arg(&pos)
        .arg("--max-gap")
        .arg("2.5")
        .arg(root.path().join("pgps").join("BH_080618_1432.pgps"))
        .arg(&output)
        .assert()
        .success();

    // 10s sits in between both solutions, further than max gap
    let content = fs::read_to_string(&output).unwrap();
    assert_eq!(
        content,
        "MINMAX 01.2000 02.5000\n0,0,0,1.000000,2.000000,2.000000\n0,0,0,3.000000,4.000000,1.200000\n"
    );
}

#[test]
fn malformed_filename() {
    let root = tempfile::tempdir().unwrap();
    let input = root.path().join("mission.pgps");
    write_pgps(&input, &[(0.0, 1.0, 1.0)]);
    write_sbet(&root.path().join("sbet_080618.out"), &[(0.0, 1.0, 1.0)]);

    let output = root.path().join("out.trk");

    Command::cargo_bin("dump-dop")
        .unwrap()
        .arg(&input)
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed file name"));

    assert!(!output.exists());
}

#[test]
fn missing_companion() {
    let root = tempfile::tempdir().unwrap();
    let input = root.path().join("BH_080618_1432.pgps");
    write_pgps(&input, &[(0.0, 1.0, 1.0)]);

    let output = root.path().join("out.trk");

    Command::cargo_bin("dump-dop")
        .unwrap()
        .arg(&input)
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("couldn't find an SBET or POS file"));

    assert!(!output.exists());
}

#[test]
fn not_a_pgps_file() {
    let root = tempfile::tempdir().unwrap();
    let input = root.path().join("BH_080618_1432.gps");
    fs::write(&input, b"").unwrap();

    Command::cargo_bin("dump-dop")
        .unwrap()
        .arg(&input)
        .arg(root.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a PGPS file"));
}

#[test]
fn missing_arguments() {
    Command::cargo_bin("dump-dop")
        .unwrap()
        .arg("BH_080618_1432.pgps")
        .assert()
        .failure();
}

#[test]
fn large_vdop_keeps_track() {
    let root = tempfile::tempdir().unwrap();
    let input = root.path().join("BH_080618_1432.pgps");
    write_pgps(&input, &[(0.0, 1.0, 2.0), (10.0, 1.0, 120.0)]);
    write_sbet(
        &root.path().join("sbet_080618.out"),
        &[(0.0, 30.0, -88.5), (10.0, 30.5, -88.0)],
    );

    let output = root.path().join("large.trk");

    Command::cargo_bin("dump-dop")
        .unwrap()
        .arg("-q")
        .arg(&input)
        .arg(&output)
        .assert()
        .success();

    let content = fs::read_to_string(&output).unwrap();
    assert_eq!(
        content,
        "MINMAX 02.0000 99.9999\n0,0,0,30.000000,-88.500000,2.000000\n0,0,0,30.500000,-88.000000,120.000000\n"
    );
}

#[test]
fn missing_input_file() {
    let root = survey();
    let input = root.path().join("pgps").join("BH_080619_1432.pgps");
    let output = root.path().join("out.trk");

    Command::cargo_bin("dump-dop")
        .unwrap()
        .arg(&input)
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("BH_080619_1432.pgps: i/o error"));

    assert!(!output.exists());
}

#[test]
fn unopenable_output() {
    let root = survey();
    let output = root.path().join("missing").join("out");

    Command::cargo_bin("dump-dop")
        .unwrap()
        .arg(root.path().join("pgps").join("BH_080618_1432.pgps"))
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("out.trk"));

    assert!(!root.path().join("missing").exists());
}
