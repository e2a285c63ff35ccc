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

//! Visual encoding and colour harmony optimisation engine: ranks
//! data-to-channel assignments by perceptual effectiveness, derives
//! redundant encodings and a visual hierarchy, and produces a scored
//! colour palette. Every operation is a pure function of its inputs.

pub mod channels;
pub mod color;
pub mod encoding;
pub mod error;
pub mod harmony;
pub mod hierarchy;
pub mod palette;
pub mod scoring;

pub use channels::{interaction_complexity, Channel, DataKind};
pub use color::{circular_hue_distance, color_distance, Hsl, Rgb};
pub use encoding::{
    annotate_dimensions, AnnotatedDimension, ChannelOptimization, EncodingDimension,
    EncodingMetrics,
};
pub use error::{CompositionError, ConfigError, Result};
pub use harmony::{
    expand_harmony, select_base_color, DataCharacteristics, Domain, HarmonyScheme, VisualContext,
};
pub use hierarchy::{
    build_hierarchy, build_redundant_encodings, RedundantEncoding, VisualHierarchy,
};
pub use palette::{build_palette, find_optimal_hue, Palette, PaletteRequest};
pub use scoring::{
    assess_quality, harmony_score, optimize_color_encoding, EncodingOptimization, ImprovementArea,
    QualityMetrics, QualityWeights,
};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A generated harmony with its finished palette and score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorHarmony {
    pub scheme: HarmonyScheme,
    pub base: Hsl,
    pub colors: Vec<Hsl>,
    pub palette: Palette,
    pub score: f64,
}

/// The engine's full structured output, consumed by the rendering and
/// accessibility-reporting collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionProfile {
    pub dimensions: Vec<AnnotatedDimension>,
    pub metrics: EncodingMetrics,
    pub redundant_encodings: Vec<RedundantEncoding>,
    pub hierarchy: VisualHierarchy,
    pub harmony: ColorHarmony,
    pub palette_optimization: EncodingOptimization,
    pub quality: QualityMetrics,
}

pub const MAX_PALETTE_SIZE: usize = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct CompositionConfig {
    pub palette_size: usize,
    pub enable_redundancy: bool,
    pub scheme: Option<HarmonyScheme>,
    pub needs_diverging: bool,
    pub weights: QualityWeights,
}

impl Default for CompositionConfig {
    fn default() -> Self {
        Self {
            palette_size: 8,
            enable_redundancy: true,
            scheme: None,
            needs_diverging: false,
            weights: QualityWeights::default(),
        }
    }
}

impl CompositionConfig {
    pub fn validate(&self) -> error::ConfigResult<()> {
        if self.palette_size == 0 || self.palette_size > MAX_PALETTE_SIZE {
            return Err(ConfigError::InvalidPaletteSize {
                size: self.palette_size,
                max: MAX_PALETTE_SIZE,
            });
        }
        if !self.weights.is_valid() {
            return Err(ConfigError::InvalidWeights {
                reason: "weights must be finite, non-negative and sum above zero".to_string(),
            });
        }
        Ok(())
    }
    pub fn for_presentation() -> Self {
        Self {
            palette_size: 6,
            scheme: Some(HarmonyScheme::Analogous),
            ..Default::default()
        }
    }
    pub fn for_accessibility() -> Self {
        Self {
            enable_redundancy: true,
            weights: QualityWeights {
                accessibility: 2.0,
                ..Default::default()
            },
            ..Default::default()
        }
    }
    pub fn for_exploration() -> Self {
        Self {
            palette_size: 12,
            ..Default::default()
        }
    }
}

/// Stateless facade wiring the components together. Holds only validated
/// configuration; every `compose` call is independent.
pub struct CompositionEngine {
    config: CompositionConfig,
}

impl CompositionEngine {
    pub fn new() -> Self {
        Self {
            config: CompositionConfig::default(),
        }
    }
    pub fn with_config(config: CompositionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }
    pub fn config(&self) -> &CompositionConfig {
        &self.config
    }

    fn auto_scheme(dimensions: &[AnnotatedDimension]) -> HarmonyScheme {
        if dimensions.len() <= 1 {
            return HarmonyScheme::Monochromatic;
        }
        let nominal = dimensions
            .iter()
            .filter(|d| d.dimension.data_kind == DataKind::Nominal)
            .count();
        let quantitative = dimensions
            .iter()
            .filter(|d| d.dimension.data_kind == DataKind::Quantitative)
            .count();
        if nominal > quantitative {
            HarmonyScheme::Triadic
        } else {
            HarmonyScheme::Analogous
        }
    }

    /// Runs the full pipeline: annotate, build redundancy and hierarchy,
    /// pick and expand a harmony, build the palette, then score everything.
    pub fn compose(
        &self,
        dimensions: &[EncodingDimension],
        chart_type: &str,
        characteristics: &DataCharacteristics,
        context: &VisualContext,
    ) -> CompositionProfile {
        let annotated = annotate_dimensions(dimensions);
        let metrics = EncodingMetrics::from_annotated(&annotated, chart_type);
        debug!(
            dimensions = annotated.len(),
            chart_type,
            efficiency = metrics.efficiency,
            "annotated encoding dimensions"
        );

        let redundant_encodings = if self.config.enable_redundancy {
            build_redundant_encodings(&annotated)
        } else {
            Vec::new()
        };
        let hierarchy = build_hierarchy(&annotated);

        let base = select_base_color(characteristics, context);
        let scheme = self.config.scheme.unwrap_or_else(|| Self::auto_scheme(&annotated));
        let colors = expand_harmony(&base, scheme);
        let palette = build_palette(
            &colors,
            &PaletteRequest {
                categorical_size: self.config.palette_size,
                needs_diverging: self.config.needs_diverging,
            },
        );
        let score = harmony_score(&colors, scheme);
        debug!(?scheme, score, "harmony generated");

        let categorical: Vec<Hsl> = palette.categorical.iter().map(|c| c.hsl).collect();
        let palette_optimization =
            optimize_color_encoding(&categorical, self.config.palette_size);

        let harmony = ColorHarmony {
            scheme,
            base,
            colors,
            palette,
            score,
        };
        let quality = assess_quality(
            &scoring::QualityInputs {
                dimensions: &annotated,
                metrics: &metrics,
                redundant: &redundant_encodings,
                hierarchy: &hierarchy,
                harmony_score: score,
                palette_colors: &categorical,
                palette_optimization: &palette_optimization,
            },
            &self.config.weights,
        );

        CompositionProfile {
            dimensions: annotated,
            metrics,
            redundant_encodings,
            hierarchy,
            harmony,
            palette_optimization,
            quality,
        }
    }
}

impl Default for CompositionEngine {
    fn default() -> Self {
        Self::new()
    }
}
