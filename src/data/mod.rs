/// Data layer: the common dataset model and the spectral file formats.
///
/// Architecture:
/// ```text
///  .json / .sp .ti3 .cgats .agryll / .csv .txt
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  extension → Format → read / write
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────────────┐
///   │ ampas / argyll / sekonic  │  parse file → Dataset
///   └──────────────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  header, units, channel labels, wavelength → values
///   └──────────┘
/// ```

pub mod ampas;
pub mod argyll;
pub mod error;
pub mod loader;
pub mod model;
pub mod sekonic;

pub use error::{Result, SpecError};
pub use loader::{available_extensions, open, read_dataset, save, write_dataset, Format};
pub use model::{Dataset, Header, HeaderValue};
