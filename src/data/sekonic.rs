use std::path::Path;

use log::{debug, warn};

use super::error::{Result, SpecError};
use super::model::Dataset;

const FALLBACK_NAME: &str = "Sekonic spectral irradiance data";

/// Read a Sekonic spectrometer CSV export (`.csv`, `.txt`).
///
/// Layout: one `label,value` record per line, no header row. Records
/// labelled `Spectral Data <nm>[nm]` form the spectrum, everything else is
/// measurement metadata:
///
/// ```text
/// Date Saved,2024/05/01 10:12:44
/// Measuring Mode,Ambient
/// CCT [K],5412
/// Spectral Data 380[nm],0.0012
/// Spectral Data 381[nm],0.0013
/// ```
pub fn read(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).map_err(|e| SpecError::io(path, e))?;
    let dataset = parse(file)?;
    debug!("Sekonic: {} rows from {}", dataset.len(), path.display());
    Ok(dataset)
}

/// Parse Sekonic CSV from any reader.
pub fn parse<R: std::io::Read>(input: R) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let mut dataset = Dataset::unloaded();

    // Byte records: exports are often Latin-1 (e.g. "Viewing Angle [°]").
    for result in reader.byte_records() {
        let record = result?;
        let field = |i: usize| {
            record
                .get(i)
                .map(|b| String::from_utf8_lossy(b).into_owned())
                .unwrap_or_default()
        };
        let label = field(0);
        if label.is_empty() || record.len() < 2 {
            continue;
        }
        let value = field(1);

        match spectral_wavelength(&label) {
            Some(wavelength) => match value.parse::<f64>() {
                Ok(v) => {
                    dataset.data.insert(wavelength, vec![v]);
                }
                Err(_) => warn!("Sekonic: skipping non-numeric value '{value}' at {wavelength} nm"),
            },
            None => dataset.header.insert(label, value),
        }
    }

    if dataset.data.is_empty() {
        return Err(SpecError::InvalidFormat(
            "no 'Spectral Data' records found".into(),
        ));
    }

    dataset.indices = vec!["Irradiance".to_string()];
    dataset.units = "spectral irradiance".to_string();
    dataset.name = match dataset.header.get("Measuring Mode") {
        Some(mode) => format!("Sekonic {mode}"),
        None => FALLBACK_NAME.to_string(),
    };
    dataset.loaded = true;
    Ok(dataset)
}

/// `"Spectral Data 380[nm]"` → `Some(380)`.
fn spectral_wavelength(label: &str) -> Option<i32> {
    let lower = label.to_ascii_lowercase();
    let rest = lower.strip_prefix("spectral data")?.trim();
    let number = rest.strip_suffix("[nm]").unwrap_or(rest).trim();
    number.parse().ok()
}
