use crate::color::{channel_color, Rgb};
use crate::data::model::Dataset;

/// One plottable channel of a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSeries {
    pub label: String,
    pub color: Rgb,
    /// `[wavelength_nm, value]`, ascending by wavelength.
    pub points: Vec<[f64; 2]>,
}

/// Split `dataset` into one series per channel label.
///
/// Rows shorter than the label list contribute `0.0` for the missing
/// channels.
pub fn channel_series(dataset: &Dataset) -> Vec<ChannelSeries> {
    dataset
        .indices
        .iter()
        .enumerate()
        .map(|(i, label)| ChannelSeries {
            label: label.clone(),
            color: channel_color(label, i),
            points: dataset
                .data
                .iter()
                .map(|(wl, row)| [*wl as f64, row.get(i).copied().unwrap_or(0.0)])
                .collect(),
        })
        .collect()
}

/// Smallest and largest value over every channel, for axis ranges.
pub fn value_range(series: &[ChannelSeries]) -> Option<(f64, f64)> {
    series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p[1]))
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
