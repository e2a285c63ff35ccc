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

use crate::color::{
    color_distance, contrast_ratio, has_problematic_red_green_pair, largest_hue_gap, Hsl, Rgb,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A colour in all three interchange forms; the forms are always derived
/// from the same HSL value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteColor {
    pub hsl: Hsl,
    pub rgb: Rgb,
    pub hex: String,
}

impl From<Hsl> for PaletteColor {
    fn from(hsl: Hsl) -> Self {
        let rgb = hsl.to_rgb();
        Self {
            hsl,
            hex: rgb.to_hex(),
            rgb,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequentialRamp {
    pub colors: Vec<PaletteColor>,
    pub perceptual_uniformity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DivergingRamp {
    pub negative: PaletteColor,
    pub midpoint: PaletteColor,
    pub positive: PaletteColor,
    pub colors: Vec<PaletteColor>,
    pub semantic_endpoints: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialColors {
    pub alert: PaletteColor,
    pub highlight: PaletteColor,
    pub neutral: PaletteColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Temperature {
    Warm,
    Cool,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorPsychology {
    pub temperature: Temperature,
    pub associations: Vec<String>,
}

impl ColorPsychology {
    fn from_base(base: &Hsl) -> Self {
        let hue = base.hue;
        let temperature = if !(90.0..330.0).contains(&hue) {
            Temperature::Warm
        } else if hue < 270.0 {
            Temperature::Cool
        } else {
            Temperature::Neutral
        };
        let associations = match hue {
            h if h < 15.0 || h >= 345.0 => vec!["energy", "urgency"],
            h if h < 45.0 => vec!["warmth", "creativity"],
            h if h < 75.0 => vec!["optimism", "attention"],
            h if h < 165.0 => vec!["growth", "nature"],
            h if h < 255.0 => vec!["trust", "stability"],
            h if h < 315.0 => vec!["luxury", "imagination"],
            _ => vec!["playfulness", "youth"],
        };
        Self {
            temperature,
            associations: associations.into_iter().map(String::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteAccessibility {
    pub min_contrast_vs_white: f64,
    pub min_contrast_vs_black: f64,
    pub colorblind_safe: bool,
}

/// The full deliverable: categorical, ramp and special-purpose collections,
/// each entry hex/HSL/RGB-consistent by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub categorical: Vec<PaletteColor>,
    pub sequential: SequentialRamp,
    pub diverging: DivergingRamp,
    pub qualitative: Vec<PaletteColor>,
    pub special: SpecialColors,
    pub psychology: ColorPsychology,
    pub accessibility: PaletteAccessibility,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteRequest {
    pub categorical_size: usize,
    pub needs_diverging: bool,
}

impl Default for PaletteRequest {
    fn default() -> Self {
        Self {
            categorical_size: 8,
            needs_diverging: false,
        }
    }
}

/// Midpoint of the largest empty arc among the existing hues; with no
/// existing hues the search starts at 0.
pub fn find_optimal_hue(existing: &[f64]) -> f64 {
    largest_hue_gap(existing).1
}

/// Mean pairwise distance over a colour set, 0 for fewer than two colours.
pub fn average_pairwise_distance(colors: &[Hsl]) -> f64 {
    if colors.len() < 2 {
        return 0.0;
    }
    let mut total = 0.0;
    let mut pairs = 0usize;
    for (i, a) in colors.iter().enumerate() {
        for b in colors.iter().skip(i + 1) {
            total += color_distance(a, b);
            pairs += 1;
        }
    }
    total / pairs as f64
}

fn gap_fill_saturation_lightness() -> (f64, f64) {
    (65.0, 55.0)
}

/// Greedy largest-gap fill: each new hue lands at the midpoint of the
/// widest unoccupied arc, at a fixed mid-range saturation/lightness.
fn build_categorical(harmony: &[Hsl], size: usize) -> Vec<Hsl> {
    let mut colors: Vec<Hsl> = harmony.iter().take(size).copied().collect();
    let (saturation, lightness) = gap_fill_saturation_lightness();
    while colors.len() < size {
        let hues: Vec<f64> = colors.iter().map(|c| c.hue).collect();
        let hue = find_optimal_hue(&hues);
        colors.push(Hsl::new(hue, saturation, lightness));
    }
    colors
}

/// Ranks candidates by how distinguishable each is from the rest of the
/// set (mean distance to the others), most discriminable first.
fn rank_by_discriminability(colors: &[Hsl]) -> Vec<Hsl> {
    let scored: Vec<(f64, Hsl)> = colors
        .par_iter()
        .enumerate()
        .map(|(i, color)| {
            let score: f64 = colors
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, other)| color_distance(color, other))
                .sum::<f64>()
                / (colors.len().max(2) - 1) as f64;
            (score, *color)
        })
        .collect();
    let mut scored = scored;
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored.into_iter().map(|(_, c)| c).collect()
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

const SEQUENTIAL_STEPS: usize = 9;

fn build_sequential(start: &Hsl) -> SequentialRamp {
    let end = Hsl::new(
        start.hue,
        (start.saturation + 20.0).min(90.0),
        (start.lightness - 40.0).max(20.0),
    );
    let colors = (0..SEQUENTIAL_STEPS)
        .map(|i| {
            let t = i as f64 / (SEQUENTIAL_STEPS - 1) as f64;
            Hsl::new(
                lerp(start.hue, end.hue, t),
                lerp(start.saturation, end.saturation, t),
                lerp(start.lightness, end.lightness, t),
            )
            .into()
        })
        .collect();
    let hue_diff = crate::color::circular_hue_distance(start.hue, end.hue);
    let sat_diff = (start.saturation - end.saturation).abs();
    let light_diff = (start.lightness - end.lightness).abs();
    let perceptual_uniformity =
        (100.0 - (hue_diff / 4.0).max(sat_diff).max(light_diff)).clamp(50.0, 100.0);
    SequentialRamp {
        colors,
        perceptual_uniformity,
    }
}

fn ramp_between(from: &Hsl, to: &Hsl, steps: usize) -> Vec<PaletteColor> {
    (0..steps)
        .map(|i| {
            let t = i as f64 / (steps - 1).max(1) as f64;
            Hsl::new(
                lerp(from.hue, to.hue, t),
                lerp(from.saturation, to.saturation, t),
                lerp(from.lightness, to.lightness, t),
            )
            .into()
        })
        .collect()
}

fn build_diverging(categorical: &[Hsl], needs_diverging: bool) -> DivergingRamp {
    let midpoint = Hsl::new(0.0, 0.0, 92.0);
    let (negative, positive, semantic) = if needs_diverging {
        // fixed semantic endpoints: red for negative, green for positive
        (Hsl::new(0.0, 75.0, 45.0), Hsl::new(120.0, 60.0, 40.0), true)
    } else {
        let negative = categorical.first().copied().unwrap_or(midpoint);
        let positive = categorical.get(1).copied().unwrap_or(negative.shifted(180.0));
        (negative, positive, false)
    };
    let mut colors = ramp_between(&negative, &midpoint, 5);
    colors.extend(ramp_between(&midpoint, &positive, 5).into_iter().skip(1));
    DivergingRamp {
        negative: negative.into(),
        midpoint: midpoint.into(),
        positive: positive.into(),
        colors,
        semantic_endpoints: semantic,
    }
}

fn build_special(base: &Hsl) -> SpecialColors {
    SpecialColors {
        alert: Hsl::new(0.0, 85.0, 55.0).into(),
        highlight: Hsl::new(base.hue + 180.0, 90.0, 60.0).into(),
        neutral: Hsl::new(0.0, 0.0, 60.0).into(),
    }
}

fn build_accessibility(categorical: &[Hsl]) -> PaletteAccessibility {
    let white = Rgb { r: 255, g: 255, b: 255 };
    let black = Rgb { r: 0, g: 0, b: 0 };
    let mut min_vs_white = f64::INFINITY;
    let mut min_vs_black = f64::INFINITY;
    for color in categorical {
        let rgb = color.to_rgb();
        min_vs_white = min_vs_white.min(contrast_ratio(rgb, white));
        min_vs_black = min_vs_black.min(contrast_ratio(rgb, black));
    }
    if categorical.is_empty() {
        min_vs_white = 1.0;
        min_vs_black = 1.0;
    }
    PaletteAccessibility {
        min_contrast_vs_white: min_vs_white,
        min_contrast_vs_black: min_vs_black,
        colorblind_safe: !has_problematic_red_green_pair(categorical),
    }
}

/// Builds every palette family from an expanded harmony.
pub fn build_palette(harmony: &[Hsl], request: &PaletteRequest) -> Palette {
    let size = request.categorical_size.max(1);
    let categorical = build_categorical(harmony, size);
    debug!(requested = size, produced = categorical.len(), "categorical palette built");
    let qualitative = rank_by_discriminability(&categorical);
    let base = harmony.first().copied().unwrap_or(Hsl::new(0.0, 0.0, 50.0));
    Palette {
        sequential: build_sequential(&base),
        diverging: build_diverging(&categorical, request.needs_diverging),
        special: build_special(&base),
        psychology: ColorPsychology::from_base(&base),
        accessibility: build_accessibility(&categorical),
        qualitative: qualitative.into_iter().map(PaletteColor::from).collect(),
        categorical: categorical.into_iter().map(PaletteColor::from).collect(),
    }
}
