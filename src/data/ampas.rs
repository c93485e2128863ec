use std::path::Path;

use log::{debug, warn};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use super::error::{Result, SpecError};
use super::model::{Dataset, HeaderValue};

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

/// Read an AMPAS spectral JSON file.
///
/// Expected layout, every section optional:
///
/// ```json
/// {
///   "header": { "manufacturer": "...", "model": "..." },
///   "spectral_data": {
///     "units": "relative",
///     "index": { "main": ["R", "G", "B"] },
///     "data": { "main": { "380": [0.01, 0.02, 0.03], ... } }
///   }
/// }
/// ```
pub fn read(path: &Path) -> Result<Dataset> {
    let bytes = std::fs::read(path).map_err(|e| SpecError::io(path, e))?;
    let dataset = parse(&bytes)?;
    debug!(
        "AMPAS: {} rows x {} channels from {}",
        dataset.len(),
        dataset.indices.len(),
        path.display()
    );
    Ok(dataset)
}

/// Parse an AMPAS document. Fails only on invalid JSON or a non-object root.
pub fn parse(bytes: &[u8]) -> Result<Dataset> {
    let root: JsonValue = serde_json::from_slice(bytes)?;
    let root = root
        .as_object()
        .ok_or_else(|| SpecError::InvalidFormat("expected a top-level JSON object".into()))?;

    let mut dataset = Dataset::unloaded();

    if let Some(header) = root.get("header").and_then(JsonValue::as_object) {
        for (key, val) in header {
            dataset.header.insert(key.as_str(), HeaderValue::from(val));
        }
    }

    if let Some(spectral) = root.get("spectral_data").and_then(JsonValue::as_object) {
        if let Some(units) = spectral.get("units").and_then(JsonValue::as_str) {
            dataset.units = units.to_string();
        }

        if let Some(labels) = section_main(spectral, "index").and_then(JsonValue::as_array) {
            dataset.indices = labels
                .iter()
                .map(|label| match label.as_str() {
                    Some(s) => s.to_string(),
                    None => {
                        warn!("AMPAS: non-string index label {label}");
                        String::new()
                    }
                })
                .collect();
        }

        if let Some(rows) = section_main(spectral, "data").and_then(JsonValue::as_object) {
            for (key, val) in rows {
                let Ok(wavelength) = key.trim().parse::<i32>() else {
                    warn!("AMPAS: invalid wavelength key: {key}");
                    continue;
                };
                let Some(values) = val.as_array() else {
                    warn!("AMPAS: values at {wavelength} nm are not an array");
                    continue;
                };
                let row: Vec<f64> = values
                    .iter()
                    .map(|v| {
                        v.as_f64().unwrap_or_else(|| {
                            warn!("AMPAS: non-numeric value {v} at {wavelength} nm, using 0");
                            0.0
                        })
                    })
                    .collect();
                dataset.data.insert(wavelength, row);
            }
        }
    }

    // AMPAS files carry no display name of their own.
    dataset.name = ["manufacturer", "model"]
        .iter()
        .filter_map(|key| dataset.header.get(key))
        .map(|v| v.to_string())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    dataset.loaded = true;
    Ok(dataset)
}

/// `spectral_data.<section>.main`
fn section_main<'a>(spectral: &'a Map<String, JsonValue>, section: &str) -> Option<&'a JsonValue> {
    spectral
        .get(section)
        .and_then(JsonValue::as_object)
        .and_then(|obj| obj.get("main"))
}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct Document<'a> {
    header: Map<String, JsonValue>,
    spectral_data: SpectralData<'a>,
}

#[derive(Serialize)]
struct SpectralData<'a> {
    units: &'a str,
    index: Main<&'a [String]>,
    data: Main<Map<String, JsonValue>>,
}

#[derive(Serialize)]
struct Main<T> {
    main: T,
}

/// Write `dataset` as AMPAS spectral JSON.
pub fn write(dataset: &Dataset, path: &Path) -> Result<()> {
    let text = render(dataset)?;
    std::fs::write(path, text).map_err(|e| SpecError::io(path, e))
}

/// Pretty-printed AMPAS JSON with wavelengths in ascending order.
pub fn render(dataset: &Dataset) -> Result<String> {
    if dataset.is_empty() {
        return Err(SpecError::EmptyDataset);
    }

    let header: Map<String, JsonValue> = dataset
        .header
        .iter()
        .map(|(key, val)| (key.to_string(), JsonValue::from(val)))
        .collect();

    let rows: Map<String, JsonValue> = dataset
        .data
        .iter()
        .map(|(wavelength, row)| (wavelength.to_string(), JsonValue::from(row.clone())))
        .collect();

    let document = Document {
        header,
        spectral_data: SpectralData {
            units: &dataset.units,
            index: Main {
                main: &dataset.indices,
            },
            data: Main { main: rows },
        },
    };

    let mut text = serde_json::to_string_pretty(&document)?;
    text.push('\n');
    Ok(text)
}
