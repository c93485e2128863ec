use std::fmt::Write as _;
use std::path::Path;

use log::{debug, warn};

use super::error::{Result, SpecError};
use super::model::{Dataset, HeaderValue};

/// Keywords copied into the header when they start a line.
const HEADER_KEYWORDS: &[&str] = &[
    "DESCRIPTOR",
    "ORIGINATOR",
    "CREATED",
    "MEAS_TYPE",
    "SPECTRAL_BANDS",
    "SPECTRAL_START_NM",
    "SPECTRAL_END_NM",
    "SPECTRAL_NORM",
    "NUMBER_OF_FIELDS",
    "NUMBER_OF_SETS",
];

/// Keys the writer derives from the data itself.
const GRID_KEYWORDS: &[&str] = &[
    "SPECTRAL_BANDS",
    "SPECTRAL_START_NM",
    "SPECTRAL_END_NM",
    "NUMBER_OF_SETS",
];

const FALLBACK_NAME: &str = "Argyll spectral reflectance/emission data";

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

/// Grid parameters picked out of the header while scanning.
#[derive(Debug, Default)]
struct Grid {
    bands: i64,
    sets: i64,
    start_nm: f64,
    end_nm: f64,
}

/// Read an Argyll / CGATS spectral file (`.sp`, `.ti3`, `.cgats`).
///
/// Only a failure to open the file is fatal; everything else is parsed
/// leniently.
pub fn read(path: &Path) -> Result<Dataset> {
    let bytes = std::fs::read(path).map_err(|e| SpecError::io(path, e))?;
    let dataset = parse(&String::from_utf8_lossy(&bytes));
    debug!(
        "Argyll: {} rows x {} sets from {}",
        dataset.len(),
        dataset.indices.len(),
        path.display()
    );
    Ok(dataset)
}

/// Parse tabular text into a loaded [`Dataset`].
///
/// The data block is one flat run of numbers laid out set by set: the value
/// for set `s` at band `i` sits at `s * bands + i`.
pub fn parse(text: &str) -> Dataset {
    let mut dataset = Dataset::unloaded();
    let mut grid = Grid::default();
    let mut values: Vec<f64> = Vec::new();

    let mut lines = text.lines().map(str::trim);
    while let Some(line) = lines.next() {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if HEADER_KEYWORDS.iter().any(|kw| line.starts_with(kw)) {
            let (key, rest) = line
                .split_once(char::is_whitespace)
                .unwrap_or((line, ""));
            let value = rest.trim().replace('"', "");
            grid.record(key, &value);
            dataset.header.insert(key, value);
        }

        if line.starts_with("BEGIN_DATA_FORMAT") {
            // Field names are not used to label channels.
            for format_line in lines.by_ref() {
                if format_line.starts_with("END_DATA_FORMAT") {
                    break;
                }
            }
            continue;
        }

        if line.starts_with("BEGIN_DATA") {
            for data_line in lines.by_ref() {
                if data_line.starts_with("END_DATA") {
                    break;
                }
                for token in data_line.split_whitespace() {
                    match token.parse::<f64>() {
                        Ok(v) => values.push(v),
                        Err(_) => warn!("Argyll: skipping non-numeric token '{token}'"),
                    }
                }
            }
        }
    }

    let sets = grid.set_count(values.len());
    dataset.indices = (1..=sets).map(|s| format!("Set {s}")).collect();

    if grid.bands > 0 && !values.is_empty() {
        let bands = grid.bands as usize;
        let step = if bands > 1 {
            (grid.end_nm - grid.start_nm) / (bands - 1) as f64
        } else {
            0.0
        };
        // Bands past the collected values can never hold data.
        for i in 0..bands.min(values.len()) {
            let wavelength = (grid.start_nm + i as f64 * step).round() as i32;
            let row: Vec<f64> = (0..sets)
                .filter_map(|s| s.checked_mul(bands)?.checked_add(i))
                .filter_map(|idx| values.get(idx).copied())
                .collect();
            dataset.data.insert(wavelength, row);
        }
    }

    dataset.name = match dataset.header.get("ORIGINATOR") {
        Some(originator) => originator.to_string(),
        None => FALLBACK_NAME.to_string(),
    };
    if let Some(meas_type) = dataset.header.get("MEAS_TYPE") {
        match meas_type.to_string().to_uppercase().as_str() {
            "AMBIENT" => dataset.units = "ambient illuminance".to_string(),
            "REFLECTIVE" => dataset.units = "reflectance sensitivity".to_string(),
            _ => {}
        }
    }

    dataset.loaded = true;
    dataset
}

impl Grid {
    /// Declared set count, or 1 when it is missing, non-positive or more
    /// than the data block could hold.
    fn set_count(&self, value_count: usize) -> usize {
        if self.sets <= 0 {
            return 1;
        }
        let limit = value_count.max(1) as i64;
        if self.sets > limit {
            warn!(
                "Argyll: NUMBER_OF_SETS {} exceeds the {value_count} data values, using 1",
                self.sets
            );
            return 1;
        }
        self.sets as usize
    }

    fn record(&mut self, key: &str, value: &str) {
        match key {
            "SPECTRAL_BANDS" => self.bands = parse_int(value),
            "SPECTRAL_START_NM" => self.start_nm = value.parse().unwrap_or(0.0),
            "SPECTRAL_END_NM" => self.end_nm = value.parse().unwrap_or(0.0),
            "NUMBER_OF_SETS" => self.sets = parse_int(value),
            _ => {}
        }
    }
}

/// Integer header value; a bare `5.0` is accepted as 5.
fn parse_int(value: &str) -> i64 {
    value
        .parse::<i64>()
        .ok()
        .or_else(|| value.parse::<f64>().ok().map(|v| v as i64))
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

/// Write `dataset` as an Argyll spectral file.
pub fn write(dataset: &Dataset, path: &Path) -> Result<()> {
    let text = render(dataset)?;
    std::fs::write(path, text).map_err(|e| SpecError::io(path, e))
}

/// Render the tabular text for `dataset`.
///
/// Each data line holds one set across every band, the layout [`parse`]
/// expects. This is not the line-per-wavelength layout some CGATS tools
/// write; the token order is what matters when the file is read back.
/// Short rows are padded with `0.0` up to the set count.
pub fn render(dataset: &Dataset) -> Result<String> {
    let (start_nm, end_nm) = dataset.wavelength_range().ok_or(SpecError::EmptyDataset)?;
    let bands = dataset.len();
    let sets = dataset.channel_count();

    if !is_uniform(dataset) {
        warn!("Argyll: wavelength grid is not evenly spaced; it is rebuilt from start/end on read");
    }

    let mut out = String::new();
    for (key, value) in dataset.header.iter() {
        if GRID_KEYWORDS.contains(&key) {
            continue;
        }
        let _ = writeln!(out, "{} {}", single_line(key), header_text(value));
    }

    let _ = writeln!(out, "SPECTRAL_BANDS {bands}");
    let _ = writeln!(out, "SPECTRAL_START_NM {start_nm}");
    let _ = writeln!(out, "SPECTRAL_END_NM {end_nm}");
    let _ = writeln!(out, "NUMBER_OF_SETS {sets}");

    out.push_str("BEGIN_DATA_FORMAT\n");
    let fields: Vec<String> = dataset
        .indices
        .iter()
        .map(|label| label.split_whitespace().collect::<Vec<_>>().join("_"))
        .collect();
    let _ = writeln!(out, "{}", fields.join(" "));
    out.push_str("END_DATA_FORMAT\n");

    out.push_str("BEGIN_DATA\n");
    for s in 0..sets {
        let line: Vec<String> = dataset
            .data
            .values()
            .map(|row| row.get(s).copied().unwrap_or(0.0).to_string())
            .collect();
        let _ = writeln!(out, "{}", line.join(" "));
    }
    out.push_str("END_DATA\n");

    Ok(out)
}

/// Strings that are not plain numbers are quoted, as CGATS expects.
fn header_text(value: &HeaderValue) -> String {
    match value {
        HeaderValue::String(s) if s.parse::<f64>().is_err() => format!("\"{}\"", single_line(s)),
        other => single_line(&other.to_string()),
    }
}

/// Line breaks would start a new keyword line on read.
fn single_line(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}

fn is_uniform(dataset: &Dataset) -> bool {
    let keys: Vec<i32> = dataset.data.keys().copied().collect();
    keys.windows(3)
        .all(|w| (w[1] - w[0]) == (w[2] - w[1]))
}
