use std::fmt;

use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Channel colours
// ---------------------------------------------------------------------------

/// An 8-bit sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
    pub const BLUE: Rgb = Rgb(0, 0, 255);
    pub const CYAN: Rgb = Rgb(0, 255, 255);
    pub const MAGENTA: Rgb = Rgb(255, 0, 255);
    pub const YELLOW: Rgb = Rgb(255, 255, 0);
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const GRAY: Rgb = Rgb(160, 160, 164);
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Colours offered when the user re-colours a channel.
pub const NAMED_COLORS: [(&str, Rgb); 8] = [
    ("Red", Rgb::RED),
    ("Green", Rgb::GREEN),
    ("Blue", Rgb::BLUE),
    ("Cyan", Rgb::CYAN),
    ("Magenta", Rgb::MAGENTA),
    ("Yellow", Rgb::YELLOW),
    ("Black", Rgb::BLACK),
    ("Gray", Rgb::GRAY),
];

/// Default colour for channel `index` labelled `label`.
///
/// `R`, `G` and `B` get their primaries; anything else steps around the hue
/// wheel by 0.15 turns per channel.
pub fn channel_color(label: &str, index: usize) -> Rgb {
    match label.to_uppercase().as_str() {
        "R" => Rgb::RED,
        "G" => Rgb::GREEN,
        "B" => Rgb::BLUE,
        _ => {
            let hue = (index as f32 * 0.15 * 360.0) % 360.0;
            let hsl = Hsl::new(hue, 0.7, 0.5);
            let rgb: Srgb = hsl.into_color();
            Rgb(
                (rgb.red * 255.0).round() as u8,
                (rgb.green * 255.0).round() as u8,
                (rgb.blue * 255.0).round() as u8,
            )
        }
    }
}

/// Name of the swatch in [`NAMED_COLORS`] matching `color`, if any.
pub fn color_name(color: Rgb) -> Option<&'static str> {
    NAMED_COLORS
        .iter()
        .find(|(_, c)| *c == color)
        .map(|(name, _)| *name)
}

// ---------------------------------------------------------------------------
// Line styles
// ---------------------------------------------------------------------------

/// Pen style applied to every channel of one dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Solid,
    Dash,
    Dot,
    DashDot,
    DashDotDot,
}

impl LineStyle {
    pub const ALL: [LineStyle; 5] = [
        LineStyle::Solid,
        LineStyle::Dash,
        LineStyle::Dot,
        LineStyle::DashDot,
        LineStyle::DashDotDot,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LineStyle::Solid => "Solid",
            LineStyle::Dash => "Dash",
            LineStyle::Dot => "Dot",
            LineStyle::DashDot => "Dash dot",
            LineStyle::DashDotDot => "Dash dot dot",
        }
    }
}
