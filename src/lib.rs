//! Spectral dataset readers and writers.
//!
//! Camera sensitivity curves, illuminant spectra and meter readings from
//! several file formats are parsed into one [`Dataset`]: a header, a unit
//! description, channel labels and an ascending wavelength → values map.
//!
//! ```no_run
//! use std::path::Path;
//!
//! let ds = specview::read_dataset(Path::new("camera.json"));
//! if ds.loaded {
//!     specview::write_dataset(&ds, Path::new("camera.sp"));
//! }
//! ```

pub mod color;
pub mod data;
pub mod series;

pub use data::{
    available_extensions, open, read_dataset, save, write_dataset, Dataset, Format, Header,
    HeaderValue, SpecError,
};
