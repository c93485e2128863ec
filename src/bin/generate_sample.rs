use std::path::Path;

use anyhow::{Context, Result};

use specview::{save, Dataset};

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// 380 → 780 nm in 5 nm steps.
fn wavelengths() -> impl Iterator<Item = i32> {
    (380..=780).step_by(5)
}

/// Camera RGB sensitivities: one broad peak per channel.
fn camera() -> Dataset {
    let peaks = [(600.0, 40.0, 1.0), (540.0, 45.0, 0.9), (455.0, 30.0, 0.7)];

    let mut ds = Dataset::unloaded();
    ds.name = "Sample camera".to_string();
    ds.header.insert("schema_version", "1.0.0");
    ds.header.insert("manufacturer", "Sample");
    ds.header.insert("model", "Camera");
    ds.header.insert("document_creator", "generate_sample");
    ds.units = "relative".to_string();
    ds.indices = vec!["R".into(), "G".into(), "B".into()];
    for wl in wavelengths() {
        let row = peaks
            .iter()
            .map(|&(mu, sigma, amp)| gaussian(wl as f64, mu, sigma, amp))
            .collect();
        ds.data.insert(wl, row);
    }
    ds
}

/// Warm illuminant: a wide hump rising towards the red end.
fn illuminant() -> Dataset {
    let mut ds = Dataset::unloaded();
    ds.name = "Sample illuminant".to_string();
    ds.header.insert("DESCRIPTOR", "Sample warm illuminant");
    ds.header.insert("ORIGINATOR", "generate_sample");
    ds.header.insert("MEAS_TYPE", "AMBIENT");
    ds.header.insert("SPECTRAL_NORM", "1.0");
    ds.units = "ambient illuminance".to_string();
    ds.indices = vec!["Set 1".into()];
    for wl in wavelengths() {
        let v = 0.2 + gaussian(wl as f64, 700.0, 150.0, 0.8);
        ds.data.insert(wl, vec![v]);
    }
    ds
}

fn main() -> Result<()> {
    env_logger::init();

    let outputs = [
        ("sample_camera.json", camera()),
        ("sample_camera.ti3", camera()),
        ("sample_illuminant.sp", illuminant()),
    ];

    for (path, ds) in &outputs {
        save(ds, Path::new(path)).with_context(|| format!("writing {path}"))?;
        println!(
            "Wrote {} ({} bands x {} channels)",
            path,
            ds.len(),
            ds.channel_count()
        );
    }
    Ok(())
}
