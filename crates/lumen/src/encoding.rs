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

use crate::channels::{interaction_complexity, Channel, DataKind};
use serde::{Deserialize, Serialize};

/// Threshold separating primary from secondary encodings. The boundary is
/// exclusive: a strength of exactly 0.7 is secondary.
pub const PRIMARY_STRENGTH_THRESHOLD: f64 = 0.7;

/// A data field together with the channel the caller assigned to it. The
/// engine scores the assignment; it never moves a field to a better channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodingDimension {
    pub channel: Channel,
    pub data_field: String,
    pub data_kind: DataKind,
    pub encoding_strength: f64,
}

impl EncodingDimension {
    pub fn new(channel: Channel, data_field: &str, data_kind: DataKind, strength: f64) -> Self {
        Self {
            channel,
            data_field: data_field.to_string(),
            data_kind,
            encoding_strength: strength,
        }
    }
    pub fn is_primary(&self) -> bool {
        self.encoding_strength > PRIMARY_STRENGTH_THRESHOLD
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalingKind {
    Linear,
    Ordinal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DomainHandling {
    pub include_zero: bool,
    pub clip_outliers: bool,
    pub padding: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeHandling {
    pub min: f64,
    pub max: f64,
    pub unit_resolution: f64,
}

/// Fixed engine-wide correction defaults. These are not fitted to the data:
/// gamma 2.2 is the sRGB display assumption and the compensation factors are
/// the standard dichromacy severity weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerceptualCorrection {
    pub gamma: f64,
    pub protanopia_compensation: f64,
    pub deuteranopia_compensation: f64,
    pub tritanopia_compensation: f64,
}

impl Default for PerceptualCorrection {
    fn default() -> Self {
        Self {
            gamma: 2.2,
            protanopia_compensation: 0.9,
            deuteranopia_compensation: 0.85,
            tritanopia_compensation: 0.95,
        }
    }
}

/// How a renderer should scale values onto the assigned channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelOptimization {
    pub scaling: ScalingKind,
    pub domain: DomainHandling,
    pub range: RangeHandling,
    pub correction: PerceptualCorrection,
}

impl ChannelOptimization {
    fn for_kind(kind: DataKind) -> Self {
        let quantitative = matches!(kind, DataKind::Quantitative);
        Self {
            scaling: if quantitative {
                ScalingKind::Linear
            } else {
                ScalingKind::Ordinal
            },
            domain: DomainHandling {
                include_zero: quantitative,
                clip_outliers: true,
                padding: 0.1,
            },
            range: RangeHandling {
                min: 0.0,
                max: 100.0,
                unit_resolution: 1.0,
            },
            correction: PerceptualCorrection::default(),
        }
    }
}

/// An `EncodingDimension` with its perceptual scores attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedDimension {
    pub dimension: EncodingDimension,
    pub perceptual_accuracy: f64,
    pub discriminability: f64,
    pub ordering_preservation: f64,
    pub optimization: ChannelOptimization,
}

impl AnnotatedDimension {
    pub fn is_primary(&self) -> bool {
        self.dimension.is_primary()
    }
}

/// Sorts dimensions by descending strength and attaches the perceptual
/// scores. The sort is stable, so dimensions with equal strength keep the
/// caller's order (upstream does not specify a tie-break).
pub fn annotate_dimensions(dimensions: &[EncodingDimension]) -> Vec<AnnotatedDimension> {
    let mut sorted: Vec<&EncodingDimension> = dimensions.iter().collect();
    sorted.sort_by(|a, b| {
        b.encoding_strength
            .partial_cmp(&a.encoding_strength)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    sorted
        .into_iter()
        .map(|dim| {
            let effectiveness = dim.channel.effectiveness();
            AnnotatedDimension {
                perceptual_accuracy: effectiveness,
                discriminability: effectiveness * 0.9,
                ordering_preservation: if dim.data_kind.is_ordered() {
                    effectiveness
                } else {
                    0.5
                },
                optimization: ChannelOptimization::for_kind(dim.data_kind),
                dimension: dim.clone(),
            }
        })
        .collect()
}

/// Aggregate metrics over an annotated dimension set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EncodingMetrics {
    pub efficiency: f64,
    pub cognitive_load: f64,
    pub information_density: f64,
}

impl EncodingMetrics {
    pub fn from_annotated(dimensions: &[AnnotatedDimension], chart_type: &str) -> Self {
        let n = dimensions.len();
        let strength_sum: f64 = dimensions
            .iter()
            .map(|d| d.dimension.encoding_strength)
            .sum();
        let redundancy = ((n as f64 - 3.0) * 0.1).max(0.0);
        let efficiency =
            ((strength_sum / n.max(1) as f64) * 100.0 * (1.0 - redundancy)).clamp(0.0, 100.0);

        let accuracy_penalty: f64 = dimensions
            .iter()
            .map(|d| (1.0 - d.perceptual_accuracy) * 10.0)
            .sum();
        let cognitive_load = (10.0 * n as f64
            + 5.0 * interaction_complexity(chart_type)
            + accuracy_penalty)
            .clamp(0.0, 100.0);

        let information: f64 = dimensions
            .iter()
            .map(|d| d.dimension.data_kind.bits() * d.dimension.encoding_strength)
            .sum();
        let information_density = (5.0 * information).clamp(0.0, 100.0);

        Self {
            efficiency,
            cognitive_load,
            information_density,
        }
    }
}
