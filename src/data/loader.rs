use std::path::Path;

use log::{debug, warn};

use super::error::{Result, SpecError};
use super::model::Dataset;
use super::{ampas, argyll, sekonic};

// ---------------------------------------------------------------------------
// Format registry
// ---------------------------------------------------------------------------

/// Every supported spectral file format, in dispatch priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// AMPAS spectral JSON
    Ampas,
    /// Argyll / CGATS tabular text
    Argyll,
    /// Sekonic spectrometer CSV export
    Sekonic,
}

impl Format {
    /// Registration order. The first format claiming an extension wins.
    pub const ALL: [Format; 3] = [Format::Ampas, Format::Argyll, Format::Sekonic];

    pub fn name(self) -> &'static str {
        match self {
            Format::Ampas => "AMPAS JSON",
            Format::Argyll => "Argyll CGATS",
            Format::Sekonic => "Sekonic CSV",
        }
    }

    /// Lower-case extensions this format claims.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Format::Ampas => &["json"],
            Format::Argyll => &["agryll", "cgats", "sp", "ti3"],
            Format::Sekonic => &["csv", "txt"],
        }
    }

    pub fn can_write(self) -> bool {
        !matches!(self, Format::Sekonic)
    }

    /// Pick the format for `path` by its extension, case-insensitively.
    pub fn for_path(path: &Path) -> Result<Format> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        Format::ALL
            .into_iter()
            .find(|format| format.extensions().contains(&ext.as_str()))
            .ok_or(SpecError::UnsupportedExtension(ext))
    }

    pub fn read(self, path: &Path) -> Result<Dataset> {
        match self {
            Format::Ampas => ampas::read(path),
            Format::Argyll => argyll::read(path),
            Format::Sekonic => sekonic::read(path),
        }
    }

    pub fn write(self, dataset: &Dataset, path: &Path) -> Result<()> {
        match self {
            Format::Ampas => ampas::write(dataset, path),
            Format::Argyll => argyll::write(dataset, path),
            Format::Sekonic => Err(SpecError::ReadOnlyFormat(self.name())),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a spectral dataset from a file.  Dispatch by extension.
pub fn open(path: &Path) -> Result<Dataset> {
    let format = Format::for_path(path)?;
    debug!("reading {} as {}", path.display(), format.name());
    format.read(path)
}

/// Save `dataset` in the format implied by the extension of `path`.
pub fn save(dataset: &Dataset, path: &Path) -> Result<()> {
    let format = Format::for_path(path)?;
    debug!("writing {} as {}", path.display(), format.name());
    format.write(dataset, path)
}

/// Like [`open`], but reports any failure through `Dataset::loaded`.
pub fn read_dataset(path: &Path) -> Dataset {
    match open(path) {
        Ok(dataset) => dataset,
        Err(e) => {
            warn!("cannot load {}: {e}", path.display());
            Dataset::unloaded()
        }
    }
}

/// Like [`save`], but reports success as a flag.
pub fn write_dataset(dataset: &Dataset, path: &Path) -> bool {
    match save(dataset, path) {
        Ok(()) => true,
        Err(e) => {
            warn!("failed to export dataset to {}: {e}", path.display());
            false
        }
    }
}

/// Union of every registered extension, first registration first.
pub fn available_extensions() -> Vec<&'static str> {
    let mut exts: Vec<&'static str> = Vec::new();
    for format in Format::ALL {
        for ext in format.extensions() {
            if !exts.contains(ext) {
                exts.push(*ext);
            }
        }
    }
    exts
}

/// File-dialog style filter, e.g. `*.json *.agryll ...`.
pub fn extension_filter() -> String {
    available_extensions()
        .iter()
        .map(|ext| format!("*.{ext}"))
        .collect::<Vec<_>>()
        .join(" ")
}
