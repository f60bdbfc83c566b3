pub mod barchart;
pub mod heatmap;

pub use barchart::{BarChartStyle, render_barchart};
pub use heatmap::{ColorbarLocation, ColorbarOptions, HeatmapStyle, render_heatmap};

use crate::error::{FigureError, Result};

use plotters::style::RGBColor;
use std::path::PathBuf;
use std::str::FromStr;

/// Raster/vector formats the `--format` flag accepts.
///
/// The bitmap formats go through the plotters bitmap backend, `svg` through
/// the vector backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    #[default]
    Png,
    Jpeg,
    Bmp,
    Svg,
}

impl FromStr for ImageFormat {
    type Err = FigureError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "bmp" => Ok(Self::Bmp),
            "svg" => Ok(Self::Svg),
            _ => Err(FigureError::Config(format!(
                "Unsupported output format '{s}'. Available: png, jpeg, bmp, svg"
            ))),
        }
    }
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Bmp => "bmp",
            Self::Svg => "svg",
        }
    }
}

/// Output parameters shared by both figure renderers.
///
/// Figure size is given in inches and multiplied by the DPI to get pixel
/// dimensions, so the matplotlib-style `--fig-size`/`--dpi` flags keep
/// their familiar meaning.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub output_dir: PathBuf,
    pub filename: String,
    pub format: ImageFormat,
    /// (width, height) in inches
    pub fig_size: (f64, f64),
    pub dpi: u32,
    /// whitespace around the figure, in inches
    pub pad_inches: f64,
    pub title: Option<String>,
}

impl OutputOptions {
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.fig_size.0 * self.dpi as f64).round().max(1.0) as u32,
            (self.fig_size.1 * self.dpi as f64).round().max(1.0) as u32,
        )
    }

    pub fn margin_px(&self) -> u32 {
        (self.pad_inches * self.dpi as f64).round().max(0.0) as u32
    }

    /// `<output>/<filename>.<format>`
    pub fn output_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", self.filename, self.format.extension()))
    }
}

/// Parses a named color or a `#rrggbb` hex triple.
pub fn parse_color(s: &str) -> Result<RGBColor> {
    let lower = s.to_ascii_lowercase();
    let named = match lower.as_str() {
        "black" => Some((0, 0, 0)),
        "white" => Some((255, 255, 255)),
        "grey" | "gray" => Some((128, 128, 128)),
        "red" => Some((255, 0, 0)),
        "green" => Some((0, 128, 0)),
        "blue" => Some((0, 0, 255)),
        "orange" => Some((255, 165, 0)),
        "yellow" => Some((255, 255, 0)),
        "cyan" => Some((0, 255, 255)),
        "magenta" => Some((255, 0, 255)),
        _ => None,
    };
    if let Some((r, g, b)) = named {
        return Ok(RGBColor(r, g, b));
    }

    let hex = lower
        .strip_prefix('#')
        .filter(|h| h.len() == 6)
        .ok_or_else(|| FigureError::Config(format!("Unknown color '{s}'")))?;
    let parse = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16)
            .map_err(|_| FigureError::Config(format!("Unknown color '{s}'")))
    };
    Ok(RGBColor(parse(0..2)?, parse(2..4)?, parse(4..6)?))
}

/// Parses a colorbar size such as `2%` or `0.02` into a fraction.
pub fn parse_fraction(s: &str) -> Result<f64> {
    let value = if let Some(percent) = s.trim().strip_suffix('%') {
        percent
            .trim()
            .parse::<f64>()
            .map(|p| p / 100.0)
            .map_err(|_| FigureError::Config(format!("Invalid size '{s}'")))?
    } else {
        s.trim()
            .parse::<f64>()
            .map_err(|_| FigureError::Config(format!("Invalid size '{s}'")))?
    };

    if !(0.0..=1.0).contains(&value) {
        return Err(FigureError::Config(format!(
            "Size '{s}' is outside the 0..100% range"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("png".parse::<ImageFormat>().unwrap(), ImageFormat::Png);
        assert_eq!("SVG".parse::<ImageFormat>().unwrap(), ImageFormat::Svg);
        assert_eq!("jpg".parse::<ImageFormat>().unwrap(), ImageFormat::Jpeg);
        assert!("tiff".parse::<ImageFormat>().is_err());
    }

    #[test]
    fn test_output_geometry() {
        let out = OutputOptions {
            output_dir: PathBuf::from("figs"),
            filename: "heatmap".to_string(),
            format: ImageFormat::Png,
            fig_size: (10.0, 6.0),
            dpi: 300,
            pad_inches: 0.1,
            title: None,
        };
        assert_eq!(out.pixel_size(), (3000, 1800));
        assert_eq!(out.margin_px(), 30);
        assert_eq!(out.output_path(), PathBuf::from("figs/heatmap.png"));
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("grey").unwrap(), RGBColor(128, 128, 128));
        assert_eq!(parse_color("#ff8000").unwrap(), RGBColor(255, 128, 0));
        assert!(parse_color("chartreuse-ish").is_err());
        assert!(parse_color("#12345").is_err());
    }

    #[test]
    fn test_parse_fraction() {
        assert_eq!(parse_fraction("2%").unwrap(), 0.02);
        assert_eq!(parse_fraction("0.05").unwrap(), 0.05);
        assert!(parse_fraction("150%").is_err());
        assert!(parse_fraction("wide").is_err());
    }
}
