use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use specview::color::color_name;
use specview::data::loader::{self, Format};
use specview::series::{channel_series, value_range};
use specview::Dataset;

/// Inspect and convert spectral measurement files.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print metadata and channels of a spectral file
    Info {
        file: PathBuf,
        /// Also print every wavelength row
        #[arg(long)]
        rows: bool,
    },
    /// Read a spectral file and export it in the format of OUTPUT
    Convert { input: PathBuf, output: PathBuf },
    /// List supported formats and their extensions
    Formats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Command::Info { file, rows } => info(&file, rows),
        Command::Convert { input, output } => convert(&input, &output),
        Command::Formats => {
            formats();
            Ok(())
        }
    }
}

fn load(path: &Path) -> Result<Dataset> {
    loader::open(path).with_context(|| format!("loading {}", path.display()))
}

fn info(path: &Path, rows: bool) -> Result<()> {
    let ds = load(path)?;

    println!("Name:     {}", ds.name);
    println!("Units:    {}", if ds.units.is_empty() { "-" } else { ds.units.as_str() });
    match ds.wavelength_range() {
        Some((lo, hi)) => println!("Range:    {lo}-{hi} nm ({} bands)", ds.len()),
        None => println!("Range:    no spectral data"),
    }

    let series = channel_series(&ds);
    if let Some((lo, hi)) = value_range(&series) {
        println!("Values:   {lo} .. {hi}");
    }

    if !ds.header.is_empty() {
        println!("Header:");
        for (key, value) in ds.header.iter() {
            println!("  {key}: {value}");
        }
    }

    println!("Channels:");
    for s in &series {
        let swatch = color_name(s.color).map(str::to_string).unwrap_or_else(|| s.color.to_string());
        println!("  {} ({swatch})", s.label);
    }

    if rows {
        println!("Data:");
        for (wavelength, row) in &ds.data {
            let values: Vec<String> = row.iter().map(f64::to_string).collect();
            println!("  {wavelength}\t{}", values.join("\t"));
        }
    }
    Ok(())
}

fn convert(input: &Path, output: &Path) -> Result<()> {
    let ds = load(input)?;
    let format = Format::for_path(output)
        .with_context(|| format!("choosing export format for {}", output.display()))?;
    if !format.can_write() {
        bail!("{} files can only be read", format.name());
    }
    format
        .write(&ds, output)
        .with_context(|| format!("exporting to {}", output.display()))?;
    println!(
        "Wrote {} rows x {} channels to {}",
        ds.len(),
        ds.channel_count(),
        output.display()
    );
    Ok(())
}

fn formats() {
    for format in Format::ALL {
        let mode = if format.can_write() { "read/write" } else { "read" };
        println!(
            "{:<14} {:<11} {}",
            format.name(),
            mode,
            format.extensions().join(", ")
        );
    }
    println!("Filter: {}", loader::extension_filter());
}
