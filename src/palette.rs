//! Signed amplitude → RGB color mapping.
//!
//! Every theme is a pure function of (amplitude, gain). Bipolar themes pick
//! a hue branch from the sign of the raw amplitude; brightness always comes
//! from the clamped magnitude.

use crate::params::ColorTheme;
use crate::surface::Rgba;

/// Brightness 0-255 for an amplitude: floor(min(|a| · gain, 255))
pub fn intensity(amplitude: f32, gain: f32) -> f32 {
    (amplitude.abs() * gain).clamp(0.0, 255.0).floor()
}

/// Map an amplitude to an opaque RGBA color
pub fn map(theme: ColorTheme, amplitude: f32, gain: f32) -> Rgba {
    let i = intensity(amplitude, gain);
    let positive = amplitude > 0.0;

    let [r, g, b] = match theme {
        ColorTheme::LaserRed => {
            // Hot core bleeds toward orange-white
            let highlight = if i > 200.0 { (i - 200.0) * 2.0 } else { 0.0 };
            [i, highlight, 0.0]
        }
        ColorTheme::LaserGreen => {
            let highlight = if i > 200.0 { i - 200.0 } else { 0.0 };
            [highlight, i, highlight]
        }
        ColorTheme::CyanMagenta => {
            if positive {
                [0.0, i, i]
            } else {
                [i, 0.0, i]
            }
        }
        ColorTheme::GoldenFire => {
            if positive {
                [i, i * 0.8, 0.0]
            } else {
                [i * 0.8, 0.0, 0.0]
            }
        }
        ColorTheme::ElectricBlue => [i * 0.2, i * 0.6, i],
        ColorTheme::Sunset => {
            if positive {
                [i, i * 0.5, i * 0.2]
            } else {
                [i * 0.5, 0.0, i * 0.5]
            }
        }
        ColorTheme::Rainbow => rainbow(amplitude, i),
        ColorTheme::Grayscale => [i, i, i],
    };

    [channel(r), channel(g), channel(b), 255]
}

/// Hue from the signed amplitude, value from the intensity (saturation 1)
fn rainbow(amplitude: f32, intensity: f32) -> [f32; 3] {
    let hue = (amplitude + 1.0) * 180.0;
    let chroma = intensity / 255.0;
    let x = chroma * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());

    let [r, g, b] = if hue < 60.0 {
        [chroma, x, 0.0]
    } else if hue < 120.0 {
        [x, chroma, 0.0]
    } else if hue < 180.0 {
        [0.0, chroma, x]
    } else if hue < 240.0 {
        [0.0, x, chroma]
    } else if hue < 300.0 {
        [x, 0.0, chroma]
    } else {
        [chroma, 0.0, x]
    };

    [r * 255.0, g * 255.0, b * 255.0]
}

fn channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
