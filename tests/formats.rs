//! End-to-end tests for reading and writing through the format dispatcher

use std::fs;
use std::path::Path;

use approx::assert_abs_diff_eq;
use specview::{available_extensions, read_dataset, write_dataset, Dataset, HeaderValue};
use tempfile::tempdir;

const SCENARIO_A: &str = "\
ORIGINATOR \"TestInstrument\"
MEAS_TYPE REFLECTIVE
SPECTRAL_BANDS 3
SPECTRAL_START_NM 400
SPECTRAL_END_NM 420
NUMBER_OF_SETS 2
BEGIN_DATA_FORMAT
END_DATA_FORMAT
BEGIN_DATA
0.1 0.2 0.3 0.4 0.5 0.6
END_DATA
";

const SCENARIO_B: &str =
    r#"{"spectral_data":{"units":"relative","index":{"main":["X"]},"data":{"main":{"500":[1.23]}}}}"#;

fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn assert_ascending(ds: &Dataset) {
    let keys: Vec<i32> = ds.data.keys().copied().collect();
    assert!(keys.windows(2).all(|w| w[0] < w[1]), "not ascending: {keys:?}");
}

fn assert_same_data(a: &Dataset, b: &Dataset) {
    let ka: Vec<&i32> = a.data.keys().collect();
    let kb: Vec<&i32> = b.data.keys().collect();
    assert_eq!(ka, kb);
    for (wl, row) in &a.data {
        let other = &b.data[wl];
        assert_eq!(row.len(), other.len(), "row length at {wl} nm");
        for (x, y) in row.iter().zip(other) {
            assert_abs_diff_eq!(*x, *y, epsilon = 1e-9);
        }
    }
}

fn rgb_dataset() -> Dataset {
    let mut ds = Dataset::unloaded();
    ds.name = "camera".into();
    ds.header.insert("manufacturer", "Acme");
    ds.units = "relative".into();
    ds.indices = vec!["R".into(), "G".into(), "B".into()];
    for (i, wl) in (380..=780).step_by(10).enumerate() {
        let t = i as f64 / 40.0;
        ds.data.insert(wl, vec![t, 1.0 - t, t * t / 3.0]);
    }
    ds
}

#[test]
fn scenario_a_tabular() {
    let dir = tempdir().unwrap();
    let path = write_file(dir.path(), "scenario.ti3", SCENARIO_A);

    let ds = read_dataset(&path);
    assert!(ds.loaded);
    assert_eq!(ds.name, "TestInstrument");
    assert_eq!(ds.units, "reflectance sensitivity");
    assert_eq!(ds.indices, vec!["Set 1", "Set 2"]);
    assert_eq!(ds.data.len(), 3);
    assert_eq!(ds.data[&400], vec![0.1, 0.4]);
    assert_eq!(ds.data[&410], vec![0.2, 0.5]);
    assert_eq!(ds.data[&420], vec![0.3, 0.6]);
}

#[test]
fn scenario_b_structured() {
    let dir = tempdir().unwrap();
    let path = write_file(dir.path(), "scenario.json", SCENARIO_B);

    let ds = read_dataset(&path);
    assert!(ds.loaded);
    assert_eq!(ds.units, "relative");
    assert_eq!(ds.indices, vec!["X"]);
    assert_eq!(ds.data.len(), 1);
    assert_eq!(ds.data[&500], vec![1.23]);
}

#[test]
fn grid_reconstruction() {
    let dir = tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "grid.sp",
        "SPECTRAL_BANDS 5\nSPECTRAL_START_NM 400\nSPECTRAL_END_NM 440\nBEGIN_DATA\n1 2 3 4 5\nEND_DATA\n",
    );
    let ds = read_dataset(&path);
    let keys: Vec<i32> = ds.data.keys().copied().collect();
    assert_eq!(keys, vec![400, 410, 420, 430, 440]);
    assert_ascending(&ds);
}

#[test]
fn missing_file_is_not_loaded() {
    let dir = tempdir().unwrap();
    for ext in available_extensions() {
        let ds = read_dataset(&dir.path().join(format!("absent.{ext}")));
        assert!(!ds.loaded, "{ext}");
        assert!(ds.data.is_empty());
    }
}

#[test]
fn malformed_json_is_not_loaded() {
    let dir = tempdir().unwrap();
    let broken = write_file(dir.path(), "broken.json", r#"{"spectral_data": {"units": "relative",}"#);
    let ds = read_dataset(&broken);
    assert!(!ds.loaded);
    assert!(ds.data.is_empty());
    assert!(ds.indices.is_empty());

    let array = write_file(dir.path(), "array.json", "[1, 2, 3]");
    assert!(!read_dataset(&array).loaded);
}

#[test]
fn empty_json_object_still_loads() {
    let dir = tempdir().unwrap();
    let path = write_file(dir.path(), "empty.json", "{}");
    let ds = read_dataset(&path);
    assert!(ds.loaded);
    assert!(ds.data.is_empty());
}

#[test]
fn partial_last_row_is_left_short() {
    let dir = tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "partial.cgats",
        "SPECTRAL_BANDS 4\nSPECTRAL_START_NM 400\nSPECTRAL_END_NM 430\nNUMBER_OF_SETS 2\n\
         BEGIN_DATA\n1 2 3 4\n5 6 7\nEND_DATA\n",
    );
    let ds = read_dataset(&path);
    assert!(ds.loaded);
    assert_eq!(ds.data[&400], vec![1.0, 5.0]);
    assert_eq!(ds.data[&420], vec![3.0, 7.0]);
    assert_eq!(ds.data[&430], vec![4.0]);
    assert_eq!(ds.value(430, 1), Some(0.0));
}

#[test]
fn unsorted_json_keys_iterate_ascending() {
    let dir = tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "unsorted.json",
        r#"{"spectral_data":{"data":{"main":{"700":[3],"400":[1],"550":[2],"1050":[4]}}}}"#,
    );
    let ds = read_dataset(&path);
    assert_ascending(&ds);
    assert_eq!(ds.wavelength_range(), Some((400, 1050)));
}

#[test]
fn tabular_round_trip_from_file() {
    let dir = tempdir().unwrap();
    let src = write_file(dir.path(), "scenario.ti3", SCENARIO_A);
    let original = read_dataset(&src);

    let out = dir.path().join("copy.sp");
    assert!(write_dataset(&original, &out));

    let again = read_dataset(&out);
    assert!(again.loaded);
    assert_same_data(&original, &again);
    assert_eq!(again.indices.len(), original.indices.len());
    assert_eq!(again.header.get("ORIGINATOR"), Some(&HeaderValue::from("TestInstrument")));
    assert_eq!(again.header.get("MEAS_TYPE"), Some(&HeaderValue::from("REFLECTIVE")));
}

#[test]
fn tabular_round_trip_hand_built() {
    let dir = tempdir().unwrap();
    let ds = rgb_dataset();

    let out = dir.path().join("camera.cgats");
    assert!(write_dataset(&ds, &out));

    let again = read_dataset(&out);
    assert!(again.loaded);
    assert_same_data(&ds, &again);
    assert_eq!(again.indices.len(), 3);
    assert_ascending(&again);
}

#[test]
fn structured_round_trip() {
    let dir = tempdir().unwrap();
    let ds = rgb_dataset();

    let out = dir.path().join("camera.json");
    assert!(write_dataset(&ds, &out));

    let again = read_dataset(&out);
    assert!(again.loaded);
    assert_same_data(&ds, &again);
    assert_eq!(again.indices, ds.indices);
    assert_eq!(again.units, "relative");
    assert_eq!(again.header, ds.header);
}

#[test]
fn structured_to_tabular_keeps_values() {
    let dir = tempdir().unwrap();
    let json = dir.path().join("camera.json");
    assert!(write_dataset(&rgb_dataset(), &json));

    let from_json = read_dataset(&json);
    let sp = dir.path().join("camera.sp");
    assert!(write_dataset(&from_json, &sp));

    let text = fs::read_to_string(&sp).unwrap();
    assert!(text.contains("manufacturer \"Acme\""));
    assert!(text.contains("BEGIN_DATA_FORMAT\nR G B\nEND_DATA_FORMAT"));

    let from_sp = read_dataset(&sp);
    assert_same_data(&from_json, &from_sp);
    assert_eq!(from_sp.indices, vec!["Set 1", "Set 2", "Set 3"]);
}

#[test]
fn write_failures_return_false() {
    let dir = tempdir().unwrap();

    assert!(!write_dataset(&Dataset::unloaded(), &dir.path().join("empty.sp")));
    assert!(!write_dataset(&Dataset::unloaded(), &dir.path().join("empty.json")));
    assert!(!write_dataset(&rgb_dataset(), &dir.path().join("plot.png")));
    assert!(!write_dataset(&rgb_dataset(), &dir.path().join("meter.csv")));
    assert!(!write_dataset(
        &rgb_dataset(),
        &dir.path().join("missing").join("camera.sp")
    ));
}

#[test]
fn unknown_extension_is_not_loaded() {
    let dir = tempdir().unwrap();
    let path = write_file(dir.path(), "scenario.dat", SCENARIO_A);
    assert!(!read_dataset(&path).loaded);
}

#[test]
fn extension_match_ignores_case() {
    let dir = tempdir().unwrap();
    let path = write_file(dir.path(), "SCENARIO.TI3", SCENARIO_A);
    assert!(read_dataset(&path).loaded);
}

#[test]
fn sekonic_export_loads() {
    let dir = tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "meter.csv",
        "Measuring Mode,Ambient\nIlluminance [lx],512\n\
         Spectral Data 380[nm],0.001\nSpectral Data 381[nm],0.002\n",
    );
    let ds = read_dataset(&path);
    assert!(ds.loaded);
    assert_eq!(ds.indices, vec!["Irradiance"]);
    assert_eq!(ds.data[&381], vec![0.002]);

    let sp = dir.path().join("meter.sp");
    assert!(write_dataset(&ds, &sp));
    assert_same_data(&ds, &read_dataset(&sp));
}
