use crate::error::{FigureError, Result};

use std::str::FromStr;

/// Colormaps available for the heatmap, selected by the `--cmap` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Colormap {
    #[default]
    Jet,
    Viridis,
    Plasma,
    Grayscale,
}

impl FromStr for Colormap {
    type Err = FigureError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "jet" => Ok(Self::Jet),
            "viridis" => Ok(Self::Viridis),
            "plasma" => Ok(Self::Plasma),
            "gray" | "grey" | "grayscale" => Ok(Self::Grayscale),
            _ => Err(FigureError::Config(format!(
                "Unknown colormap '{s}'. Available: jet, viridis, plasma, gray"
            ))),
        }
    }
}

impl Colormap {
    /// Maps a normalized value in [0, 1] to an RGB triple. Out-of-range
    /// input is clamped.
    pub fn rgb(&self, t: f64) -> (u8, u8, u8) {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Jet => jet(t),
            Self::Viridis => lut(&VIRIDIS_ANCHORS, t),
            Self::Plasma => lut(&PLASMA_ANCHORS, t),
            Self::Grayscale => {
                let v = to_u8(t);
                (v, v, v)
            }
        }
    }
}

fn to_u8(t: f64) -> u8 {
    (t * 255.0).round() as u8
}

/// Classic "jet": dark blue, cyan, green, yellow, red, dark red.
fn jet(t: f64) -> (u8, u8, u8) {
    let r = if t < 0.375 {
        0.0
    } else if t < 0.625 {
        (t - 0.375) / 0.25
    } else if t < 0.875 {
        1.0
    } else {
        1.0 - (t - 0.875) / 0.25
    };

    let g = if t < 0.125 {
        0.0
    } else if t < 0.375 {
        (t - 0.125) / 0.25
    } else if t < 0.625 {
        1.0
    } else if t < 0.875 {
        1.0 - (t - 0.625) / 0.25
    } else {
        0.0
    };

    let b = if t < 0.125 {
        0.5 + t / 0.25
    } else if t < 0.375 {
        1.0
    } else if t < 0.625 {
        1.0 - (t - 0.375) / 0.25
    } else {
        0.0
    };

    (to_u8(r.clamp(0.0, 1.0)), to_u8(g), to_u8(b.clamp(0.0, 1.0)))
}

const VIRIDIS_ANCHORS: [(u8, u8, u8); 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

const PLASMA_ANCHORS: [(u8, u8, u8); 5] = [
    (13, 8, 135),
    (126, 3, 168),
    (204, 71, 120),
    (248, 149, 64),
    (240, 249, 33),
];

/// Piecewise-linear interpolation through equally spaced anchor colors
fn lut(anchors: &[(u8, u8, u8)], t: f64) -> (u8, u8, u8) {
    let segments = (anchors.len() - 1) as f64;
    let pos = t * segments;
    let i = (pos as usize).min(anchors.len() - 2);
    let frac = pos - i as f64;

    let (r0, g0, b0) = anchors[i];
    let (r1, g1, b1) = anchors[i + 1];
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    (mix(r0, r1), mix(g0, g1), mix(b0, b1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsing() {
        assert_eq!("jet".parse::<Colormap>().unwrap(), Colormap::Jet);
        assert_eq!("Viridis".parse::<Colormap>().unwrap(), Colormap::Viridis);
        assert_eq!("grey".parse::<Colormap>().unwrap(), Colormap::Grayscale);
        assert!("turbo".parse::<Colormap>().is_err());
    }

    #[test]
    fn test_jet_endpoints() {
        // dark blue at the bottom, dark red at the top
        assert_eq!(Colormap::Jet.rgb(0.0), (0, 0, 128));
        assert_eq!(Colormap::Jet.rgb(1.0), (128, 0, 0));
        // pure green in the middle
        let (r, g, b) = Colormap::Jet.rgb(0.5);
        assert!(g == 255 && r < 140 && b < 140);
    }

    #[test]
    fn test_viridis_endpoints() {
        assert_eq!(Colormap::Viridis.rgb(0.0), (68, 1, 84));
        assert_eq!(Colormap::Viridis.rgb(1.0), (253, 231, 37));
    }

    #[test]
    fn test_grayscale_is_monotone() {
        let lo = Colormap::Grayscale.rgb(0.2);
        let hi = Colormap::Grayscale.rgb(0.8);
        assert!(lo.0 < hi.0);
        assert_eq!(lo.0, lo.1);
        assert_eq!(lo.1, lo.2);
    }

    #[test]
    fn test_out_of_range_clamps() {
        assert_eq!(Colormap::Jet.rgb(-3.0), Colormap::Jet.rgb(0.0));
        assert_eq!(Colormap::Plasma.rgb(7.0), Colormap::Plasma.rgb(1.0));
    }
}
