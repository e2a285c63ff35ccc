// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

use crate::error::ColorParseError;
use serde::{Deserialize, Serialize};

/// HSL colour. Hue is kept in [0, 360), saturation and lightness in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
}

impl Hsl {
    pub fn new(hue: f64, saturation: f64, lightness: f64) -> Self {
        Self {
            hue: normalise_hue(hue),
            saturation: saturation.clamp(0.0, 100.0),
            lightness: lightness.clamp(0.0, 100.0),
            alpha: None,
        }
    }
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha.clamp(0.0, 1.0));
        self
    }
    pub fn shifted(&self, degrees: f64) -> Self {
        Self::new(self.hue + degrees, self.saturation, self.lightness)
    }
    pub fn to_rgb(&self) -> Rgb {
        let s = self.saturation / 100.0;
        let l = self.lightness / 100.0;
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let h_prime = self.hue / 60.0;
        let x = c * (1.0 - (h_prime.rem_euclid(2.0) - 1.0).abs());
        let (r1, g1, b1) = match h_prime {
            h if h < 1.0 => (c, x, 0.0),
            h if h < 2.0 => (x, c, 0.0),
            h if h < 3.0 => (0.0, c, x),
            h if h < 4.0 => (0.0, x, c),
            h if h < 5.0 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        Rgb {
            r: ((r1 + m) * 255.0).round().clamp(0.0, 255.0) as u8,
            g: ((g1 + m) * 255.0).round().clamp(0.0, 255.0) as u8,
            b: ((b1 + m) * 255.0).round().clamp(0.0, 255.0) as u8,
        }
    }
    pub fn to_hex(&self) -> String {
        self.to_rgb().to_hex()
    }
    pub fn from_rgb(rgb: Rgb) -> Self {
        let r = f64::from(rgb.r) / 255.0;
        let g = f64::from(rgb.g) / 255.0;
        let b = f64::from(rgb.b) / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        let l = (max + min) / 2.0;
        if delta == 0.0 {
            return Self::new(0.0, 0.0, l * 100.0);
        }
        let s = delta / (1.0 - (2.0 * l - 1.0).abs());
        let hue = if max == r {
            60.0 * ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };
        Self::new(hue, s * 100.0, l * 100.0)
    }
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        Ok(Self::from_rgb(Rgb::from_hex(hex)?))
    }
}

/// 8-bit RGB triple, the interchange form for hex strings and contrast math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => {
                return Err(ColorParseError::InvalidHexLength {
                    value: hex.to_string(),
                })
            }
        };
        let parse = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&expanded[range], 16).map_err(|_| ColorParseError::InvalidHexDigit {
                value: hex.to_string(),
            })
        };
        Ok(Self {
            r: parse(0..2)?,
            g: parse(2..4)?,
            b: parse(4..6)?,
        })
    }
    /// WCAG relative luminance over linearised sRGB.
    pub fn relative_luminance(&self) -> f64 {
        fn linearise(channel: u8) -> f64 {
            let c = f64::from(channel) / 255.0;
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * linearise(self.r) + 0.7152 * linearise(self.g) + 0.0722 * linearise(self.b)
    }
}

/// WCAG contrast ratio between two colours, always >= 1.
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = a.relative_luminance();
    let lb = b.relative_luminance();
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

pub fn normalise_hue(hue: f64) -> f64 {
    hue.rem_euclid(360.0)
}

/// Shortest angular distance between two hues, in [0, 180].
pub fn circular_hue_distance(a: f64, b: f64) -> f64 {
    let diff = (normalise_hue(a) - normalise_hue(b)).abs();
    diff.min(360.0 - diff)
}

/// Simplified perceptual distance in HSL space (not CIE Delta-E): the hue
/// component is the circular difference in degrees.
pub fn color_distance(a: &Hsl, b: &Hsl) -> f64 {
    let dh = circular_hue_distance(a.hue, b.hue);
    let ds = a.saturation - b.saturation;
    let dl = a.lightness - b.lightness;
    (dh * dh + ds * ds + dl * dl).sqrt()
}

/// Largest circular gap between adjacent hues, returned as (gap, midpoint).
/// An empty slice yields the full circle starting at 0.
pub fn largest_hue_gap(hues: &[f64]) -> (f64, f64) {
    if hues.is_empty() {
        return (360.0, 0.0);
    }
    let mut sorted: Vec<f64> = hues.iter().map(|h| normalise_hue(*h)).collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mut best_gap = 0.0;
    let mut best_start = sorted[0];
    for i in 0..sorted.len() {
        let next = if i + 1 < sorted.len() {
            sorted[i + 1]
        } else {
            sorted[0] + 360.0
        };
        let gap = next - sorted[i];
        if gap > best_gap {
            best_gap = gap;
            best_start = sorted[i];
        }
    }
    (best_gap, normalise_hue(best_start + best_gap / 2.0))
}

/// Span of a hue set on the circle: 360 minus the largest empty gap.
pub fn hue_span(hues: &[f64]) -> f64 {
    if hues.len() < 2 {
        return 0.0;
    }
    360.0 - largest_hue_gap(hues).0
}

/// Red/green confusability check used by the accessibility bonus: a reddish
/// hue ([330, 360) or [0, 30]) paired with a greenish hue ([90, 150]) at a
/// lightness difference under 20 cannot be told apart by dichromats.
pub fn has_problematic_red_green_pair(colors: &[Hsl]) -> bool {
    let is_red = |h: f64| h >= 330.0 || h <= 30.0;
    let is_green = |h: f64| (90.0..=150.0).contains(&h);
    for (i, a) in colors.iter().enumerate() {
        for b in colors.iter().skip(i + 1) {
            let red_green = (is_red(a.hue) && is_green(b.hue)) || (is_green(a.hue) && is_red(b.hue));
            if red_green && (a.lightness - b.lightness).abs() < 20.0 {
                return true;
            }
        }
    }
    false
}
