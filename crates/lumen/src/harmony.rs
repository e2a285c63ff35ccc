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

use crate::color::Hsl;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Colour-theory pattern defining the hue relationships of a palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HarmonyScheme {
    Monochromatic,
    Analogous,
    Complementary,
    SplitComplementary,
    Triadic,
    Tetradic,
}

impl HarmonyScheme {
    /// Hue offsets from the base colour, in degrees.
    pub fn offsets(&self) -> &'static [f64] {
        match self {
            HarmonyScheme::Monochromatic => &[],
            HarmonyScheme::Analogous => &[30.0, -30.0],
            HarmonyScheme::Complementary => &[180.0],
            HarmonyScheme::SplitComplementary => &[150.0, 210.0],
            HarmonyScheme::Triadic => &[120.0, 240.0],
            HarmonyScheme::Tetradic => &[90.0, 180.0, 270.0],
        }
    }
}

/// Domain handed over by the upstream classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Education,
    Healthcare,
    Finance,
    Marketing,
    Technology,
    Environment,
    Social,
    General,
}

impl Domain {
    /// Conventional base colour per domain.
    pub fn base_color(&self) -> Hsl {
        match self {
            Domain::Education => Hsl::new(215.0, 75.0, 50.0),
            Domain::Healthcare => Hsl::new(174.0, 65.0, 45.0),
            Domain::Finance => Hsl::new(150.0, 60.0, 40.0),
            Domain::Marketing => Hsl::new(25.0, 85.0, 55.0),
            Domain::Technology => Hsl::new(250.0, 70.0, 55.0),
            Domain::Environment => Hsl::new(120.0, 55.0, 40.0),
            Domain::Social => Hsl::new(340.0, 70.0, 55.0),
            Domain::General => Hsl::new(210.0, 60.0, 50.0),
        }
    }
}

/// Pre-computed shape of the dataset, supplied by the statistics layer. The
/// engine reads only these fields; structural validation happens upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataCharacteristics {
    pub field_names: Vec<String>,
    pub record_count: usize,
    pub categorical_count: usize,
    pub numeric_count: usize,
}

impl DataCharacteristics {
    pub fn field_count(&self) -> usize {
        self.field_names.len()
    }
    /// Normalised complexity in [0, 1]: field count, record count and typed
    /// field count each against a fixed cap, averaged.
    pub fn complexity_score(&self) -> f64 {
        let field_factor = (self.field_count() as f64 / 20.0).min(1.0);
        let record_factor = (self.record_count as f64 / 10_000.0).min(1.0);
        let typed_factor =
            ((self.categorical_count + self.numeric_count) as f64 / 10.0).min(1.0);
        (field_factor + record_factor + typed_factor) / 3.0
    }
}

/// Optional styling context from the domain-classification collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualContext {
    pub domain: Option<Domain>,
    pub brand_colors: Vec<String>,
    pub culture: Option<String>,
}

const POSITIVE_KEYWORDS: [&str; 8] = [
    "growth", "profit", "success", "improve", "gain", "win", "increase", "revenue",
];
const NEGATIVE_KEYWORDS: [&str; 8] = [
    "loss", "decline", "error", "fail", "drop", "risk", "decrease", "churn",
];

fn sentiment_balance(field_names: &[String]) -> i32 {
    let mut balance = 0;
    for name in field_names {
        let lower = name.to_lowercase();
        if POSITIVE_KEYWORDS.iter().any(|k| lower.contains(k)) {
            balance += 1;
        }
        if NEGATIVE_KEYWORDS.iter().any(|k| lower.contains(k)) {
            balance -= 1;
        }
    }
    balance
}

/// Picks the base colour: brand colour first, then the domain table, then
/// sentiment and complexity adjustments on top.
pub fn select_base_color(characteristics: &DataCharacteristics, context: &VisualContext) -> Hsl {
    let mut base = context
        .brand_colors
        .iter()
        .find_map(|hex| match Hsl::from_hex(hex) {
            Ok(color) => Some(color),
            Err(err) => {
                warn!(brand = %hex, %err, "skipping unparseable brand colour");
                None
            }
        })
        .unwrap_or_else(|| {
            context
                .domain
                .unwrap_or(Domain::General)
                .base_color()
        });

    let balance = sentiment_balance(&characteristics.field_names);
    if balance > 0 {
        base.saturation = (base.saturation + 15.0).min(90.0);
        base.lightness = (base.lightness + 10.0).min(70.0);
    } else if balance < 0 {
        base.saturation = (base.saturation - 15.0).max(30.0);
        base.lightness = (base.lightness - 10.0).max(30.0);
    }

    // dense datasets get a calmer base to cap cognitive load
    if characteristics.complexity_score() > 0.7 {
        base.saturation = (base.saturation - 15.0).max(40.0);
    }
    base
}

/// Lightness/saturation variation used to pad a harmony out to full size.
fn variation(base: &Hsl, index: usize) -> Hsl {
    let lightness = if index % 2 == 0 {
        base.lightness + 15.0
    } else {
        base.lightness - 15.0
    };
    let saturation = if index % 3 == 0 {
        base.saturation + 10.0
    } else {
        base.saturation - 5.0
    };
    Hsl::new(
        base.hue,
        saturation.clamp(10.0, 90.0),
        lightness.clamp(10.0, 90.0),
    )
}

pub const HARMONY_SIZE: usize = 8;

/// Expands the base colour into a full harmony: the scheme's hue offsets
/// first, then base variations until `HARMONY_SIZE` colours exist.
pub fn expand_harmony(base: &Hsl, scheme: HarmonyScheme) -> Vec<Hsl> {
    let mut colors = vec![*base];
    for offset in scheme.offsets() {
        colors.push(base.shifted(*offset));
    }
    let mut index = colors.len();
    while colors.len() < HARMONY_SIZE {
        colors.push(variation(base, index));
        index += 1;
    }
    colors
}
