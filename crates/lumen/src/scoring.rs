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

use crate::color::{has_problematic_red_green_pair, hue_span, largest_hue_gap, Hsl};
use crate::encoding::{AnnotatedDimension, EncodingMetrics};
use crate::harmony::HarmonyScheme;
use crate::hierarchy::{RedundancyPurpose, RedundantEncoding, VisualHierarchy};
use crate::palette::average_pairwise_distance;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

mod factors {
    /// Each harmony factor contributes at most this many points.
    pub const FACTOR_MAX: f64 = 25.0;
    pub const ANALOGOUS_IDEAL_MIN: f64 = 15.0;
    pub const ANALOGOUS_IDEAL_MAX: f64 = 60.0;
    pub const ANALOGOUS_LOOSE_MAX: f64 = 90.0;
    pub const COMPLEMENT_TOLERANCE: f64 = 30.0;
    pub const TRIADIC_TOLERANCE: f64 = 30.0;
    pub const TETRADIC_TOLERANCE: f64 = 30.0;
    pub const ACCESSIBILITY_BONUS_CAP: f64 = 10.0;
    pub const CULTURAL_BONUS_CAP: f64 = 5.0;
}

fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
}

fn hue_spread_factor(hues: &[f64]) -> f64 {
    let (gap, _) = largest_hue_gap(hues);
    (gap / 360.0 * 100.0).min(factors::FACTOR_MAX)
}

fn saturation_consistency_factor(colors: &[Hsl]) -> f64 {
    let saturations: Vec<f64> = colors.iter().map(|c| c.saturation).collect();
    (factors::FACTOR_MAX - variance(&saturations) / 100.0).max(0.0)
}

fn lightness_range(colors: &[Hsl]) -> f64 {
    let min = colors.iter().map(|c| c.lightness).fold(f64::INFINITY, f64::min);
    let max = colors
        .iter()
        .map(|c| c.lightness)
        .fold(f64::NEG_INFINITY, f64::max);
    if colors.is_empty() {
        0.0
    } else {
        max - min
    }
}

fn lightness_range_factor(colors: &[Hsl]) -> f64 {
    (lightness_range(colors) / 80.0 * factors::FACTOR_MAX).min(factors::FACTOR_MAX)
}

fn pair_distances(colors: &[Hsl]) -> Vec<f64> {
    colors
        .iter()
        .tuple_combinations()
        .map(|(a, b)| crate::color::circular_hue_distance(a.hue, b.hue))
        .collect()
}

fn check_analogous(colors: &[Hsl]) -> f64 {
    let distances = pair_distances(colors);
    if distances.is_empty() {
        return factors::FACTOR_MAX;
    }
    let total: f64 = distances
        .iter()
        .map(|d| {
            if (factors::ANALOGOUS_IDEAL_MIN..=factors::ANALOGOUS_IDEAL_MAX).contains(d) {
                25.0
            } else if *d <= factors::ANALOGOUS_LOOSE_MAX {
                15.0
            } else {
                5.0
            }
        })
        .sum();
    total / distances.len() as f64
}

fn check_complementary(colors: &[Hsl]) -> f64 {
    let hit = pair_distances(colors)
        .iter()
        .any(|d| (d - 180.0).abs() <= factors::COMPLEMENT_TOLERANCE);
    if hit {
        factors::FACTOR_MAX
    } else {
        10.0
    }
}

fn check_split_complementary(colors: &[Hsl]) -> f64 {
    // the two split hues sit 150 degrees from the base on either side
    let hits = pair_distances(colors)
        .iter()
        .filter(|d| (**d - 150.0).abs() <= factors::COMPLEMENT_TOLERANCE)
        .count();
    if hits >= 2 {
        factors::FACTOR_MAX
    } else {
        10.0
    }
}

pub(crate) fn check_triadic(colors: &[Hsl]) -> f64 {
    let spaced = colors.iter().tuple_combinations().any(|(a, b, c)| {
        [(a, b), (a, c), (b, c)].iter().all(|(x, y)| {
            let d = crate::color::circular_hue_distance(x.hue, y.hue);
            (d - 120.0).abs() <= factors::TRIADIC_TOLERANCE
        })
    });
    if spaced {
        factors::FACTOR_MAX
    } else {
        8.0
    }
}

fn check_tetradic(colors: &[Hsl]) -> f64 {
    if colors.len() < 2 {
        return 12.0;
    }
    let mut hues: Vec<f64> = colors.iter().map(|c| c.hue).collect();
    hues.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let spacing: f64 = hues.windows(2).map(|w| w[1] - w[0]).sum::<f64>() / (hues.len() - 1) as f64;
    if (spacing - 90.0).abs() <= factors::TETRADIC_TOLERANCE {
        factors::FACTOR_MAX
    } else {
        12.0
    }
}

fn check_monochromatic(colors: &[Hsl]) -> f64 {
    let span = hue_span(&colors.iter().map(|c| c.hue).collect::<Vec<_>>());
    match span {
        s if s <= 15.0 => 25.0,
        s if s <= 30.0 => 18.0,
        s if s <= 45.0 => 10.0,
        _ => 5.0,
    }
}

fn theory_compliance(colors: &[Hsl], scheme: HarmonyScheme) -> f64 {
    match scheme {
        HarmonyScheme::Analogous => check_analogous(colors),
        HarmonyScheme::Complementary => check_complementary(colors),
        HarmonyScheme::SplitComplementary => check_split_complementary(colors),
        HarmonyScheme::Triadic => check_triadic(colors),
        HarmonyScheme::Tetradic => check_tetradic(colors),
        HarmonyScheme::Monochromatic => check_monochromatic(colors),
    }
}

fn accessibility_bonus(colors: &[Hsl]) -> f64 {
    let range = lightness_range(colors);
    let mut bonus: f64 = 0.0;
    if range >= 50.0 {
        bonus += 5.0;
    }
    if range >= 70.0 {
        bonus += 3.0;
    }
    if !has_problematic_red_green_pair(colors) {
        bonus += 2.0;
    }
    bonus.min(factors::ACCESSIBILITY_BONUS_CAP)
}

fn cultural_bonus(colors: &[Hsl]) -> f64 {
    let mut bonus: f64 = 5.0;
    let oversaturated = colors.iter().filter(|c| c.saturation > 85.0).count();
    if oversaturated * 2 < colors.len() {
        bonus += 2.0;
    }
    bonus.min(factors::CULTURAL_BONUS_CAP)
}

/// Scores a harmony in [0, 100]: four 25-point factors (hue spread,
/// saturation consistency, lightness range, theory compliance) plus the
/// capped accessibility and cultural bonuses. Pure over its inputs, so
/// repeated calls on the same harmony always agree.
pub fn harmony_score(colors: &[Hsl], scheme: HarmonyScheme) -> f64 {
    if colors.is_empty() {
        return 0.0;
    }
    let hues: Vec<f64> = colors.iter().map(|c| c.hue).collect();
    let base = hue_spread_factor(&hues)
        + saturation_consistency_factor(colors)
        + lightness_range_factor(colors)
        + theory_compliance(colors, scheme);
    (base + accessibility_bonus(colors) + cultural_bonus(colors)).clamp(0.0, 100.0)
}

/// How well a finished colour set works as an encoding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EncodingOptimization {
    pub discriminability_score: f64,
    pub order_preservation: f64,
    pub bandwidth_efficiency: f64,
    pub cognitive_load: f64,
}

fn monotonic<F: Fn(&Hsl) -> f64>(colors: &[Hsl], key: F, non_decreasing: bool) -> bool {
    colors.windows(2).all(|w| {
        let (a, b) = (key(&w[0]), key(&w[1]));
        if non_decreasing {
            a <= b
        } else {
            a >= b
        }
    })
}

pub fn optimize_color_encoding(colors: &[Hsl], max_needed: usize) -> EncodingOptimization {
    let discriminability_score = average_pairwise_distance(colors).min(100.0);

    let ascending = monotonic(colors, |c| c.hue, true) || monotonic(colors, |c| c.lightness, true);
    let descending =
        monotonic(colors, |c| c.hue, false) || monotonic(colors, |c| c.lightness, false);
    let order_preservation = if ascending {
        90.0
    } else if descending {
        75.0
    } else {
        50.0
    };

    let bandwidth_efficiency = (colors.len() as f64 / max_needed.max(1) as f64 * 100.0).min(100.0);

    // 7+/-2 working-memory banding
    let cognitive_load = match colors.len() {
        0..=7 => 20.0,
        8..=12 => 40.0,
        13..=20 => 60.0,
        _ => 80.0,
    };

    EncodingOptimization {
        discriminability_score,
        order_preservation,
        bandwidth_efficiency,
        cognitive_load,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityWeights {
    pub aesthetic: f64,
    pub functional: f64,
    pub accessibility: f64,
    pub usability: f64,
    pub originality: f64,
}

impl Default for QualityWeights {
    fn default() -> Self {
        Self {
            aesthetic: 1.0,
            functional: 1.0,
            accessibility: 1.0,
            usability: 1.0,
            originality: 1.0,
        }
    }
}

impl QualityWeights {
    pub fn sum(&self) -> f64 {
        self.aesthetic + self.functional + self.accessibility + self.usability + self.originality
    }
    pub fn is_valid(&self) -> bool {
        let all = [
            self.aesthetic,
            self.functional,
            self.accessibility,
            self.usability,
            self.originality,
        ];
        all.iter().all(|w| w.is_finite() && *w >= 0.0) && self.sum() > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityArea {
    Aesthetic,
    Functional,
    Accessibility,
    Usability,
    Originality,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementArea {
    pub area: QualityArea,
    pub current_score: f64,
    pub recommendation: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub aesthetic_score: f64,
    pub functional_score: f64,
    pub accessibility_score: f64,
    pub usability_score: f64,
    pub originality_score: f64,
    pub overall_quality: f64,
    pub improvement_areas: Vec<ImprovementArea>,
}

/// Everything the aggregate assessment reads, borrowed from the profile
/// under construction.
pub struct QualityInputs<'a> {
    pub dimensions: &'a [AnnotatedDimension],
    pub metrics: &'a EncodingMetrics,
    pub redundant: &'a [RedundantEncoding],
    pub hierarchy: &'a VisualHierarchy,
    pub harmony_score: f64,
    pub palette_colors: &'a [Hsl],
    pub palette_optimization: &'a EncodingOptimization,
}

const IMPROVEMENT_THRESHOLD: f64 = 75.0;

fn originality_score(inputs: &QualityInputs) -> f64 {
    let mut score = 50.0;
    let distinct_channels: HashSet<&str> = inputs
        .dimensions
        .iter()
        .map(|d| d.dimension.channel.as_str())
        .collect();
    if distinct_channels.len() >= 4 {
        score += 20.0;
        if distinct_channels.len() >= 6 {
            score += 10.0;
        }
    }
    if !inputs.redundant.is_empty() {
        let avg_effectiveness = inputs
            .redundant
            .iter()
            .map(|r| r.effectiveness)
            .sum::<f64>()
            / inputs.redundant.len() as f64;
        score += avg_effectiveness / 100.0 * 15.0;
    }
    if inputs.hierarchy.levels.len() >= 3 {
        score += 10.0;
    }
    let load = inputs.metrics.cognitive_load;
    if load > 80.0 {
        score -= 20.0;
        if load > 90.0 {
            score -= 10.0;
        }
    }
    if inputs.metrics.information_density > 70.0 && load < 60.0 {
        score += 15.0;
    }
    score.clamp(0.0, 100.0)
}

fn accessibility_score(inputs: &QualityInputs) -> f64 {
    let mut score = 40.0;
    if inputs
        .redundant
        .iter()
        .any(|r| r.purpose == RedundancyPurpose::Accessibility)
    {
        score += 20.0;
    }
    if !has_problematic_red_green_pair(inputs.palette_colors) {
        score += 20.0;
    }
    score += (lightness_range(inputs.palette_colors) / 80.0 * 20.0).min(20.0);
    score.clamp(0.0, 100.0)
}

fn improvement(area: QualityArea, score: f64) -> ImprovementArea {
    let (recommendation, critical_below, high_below) = match area {
        QualityArea::Aesthetic => (
            "Rework the colour harmony: widen the lightness range and align hues with the chosen scheme",
            40.0,
            60.0,
        ),
        QualityArea::Functional => (
            "Reassign weak fields to higher-ranked channels and trim low-value encodings",
            35.0,
            55.0,
        ),
        QualityArea::Accessibility => (
            "Add redundant shape/texture encodings and separate red/green hues by lightness",
            50.0,
            65.0,
        ),
        QualityArea::Usability => (
            "Reduce the number of simultaneous encodings to lower cognitive load",
            40.0,
            60.0,
        ),
        QualityArea::Originality => (
            "Vary the channel mix and deepen the visual hierarchy",
            f64::NEG_INFINITY,
            50.0,
        ),
    };
    let priority = if score < critical_below {
        Priority::Critical
    } else if score < high_below {
        Priority::High
    } else {
        Priority::Medium
    };
    ImprovementArea {
        area,
        current_score: score,
        recommendation: recommendation.to_string(),
        priority,
    }
}

/// Aggregates the five subscores into the overall figure (weighted mean;
/// the default weights make it the plain arithmetic mean) and lists every
/// subscore under 75 as an improvement area.
pub fn assess_quality(inputs: &QualityInputs, weights: &QualityWeights) -> QualityMetrics {
    let aesthetic_score = inputs.harmony_score.clamp(0.0, 100.0);
    let functional_score = ((inputs.metrics.efficiency
        + inputs.palette_optimization.discriminability_score
        + inputs.palette_optimization.bandwidth_efficiency)
        / 3.0)
        .clamp(0.0, 100.0);
    let accessibility_score = accessibility_score(inputs);
    let usability_score = ((100.0 - inputs.metrics.cognitive_load) * 0.6
        + inputs.metrics.information_density * 0.4)
        .clamp(0.0, 100.0);
    let originality_score = originality_score(inputs);

    let overall_quality = (aesthetic_score * weights.aesthetic
        + functional_score * weights.functional
        + accessibility_score * weights.accessibility
        + usability_score * weights.usability
        + originality_score * weights.originality)
        / weights.sum();

    let mut improvement_areas = Vec::new();
    for (area, score) in [
        (QualityArea::Aesthetic, aesthetic_score),
        (QualityArea::Functional, functional_score),
        (QualityArea::Accessibility, accessibility_score),
        (QualityArea::Usability, usability_score),
        (QualityArea::Originality, originality_score),
    ] {
        if score < IMPROVEMENT_THRESHOLD {
            improvement_areas.push(improvement(area, score));
        }
    }

    QualityMetrics {
        aesthetic_score,
        functional_score,
        accessibility_score,
        usability_score,
        originality_score,
        overall_quality: overall_quality.clamp(0.0, 100.0),
        improvement_areas,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channels::{Channel, DataKind};
    use crate::encoding::{annotate_dimensions, EncodingDimension};
    use crate::harmony::{expand_harmony, HarmonyScheme};
    use crate::hierarchy::{build_hierarchy, build_redundant_encodings};

    fn hsl(h: f64, s: f64, l: f64) -> Hsl {
        Hsl::new(h, s, l)
    }

    #[test]
    fn monochromatic_compliance_max_for_tight_range() {
        let colors = vec![hsl(10.0, 60.0, 50.0), hsl(20.0, 60.0, 50.0), hsl(25.0, 60.0, 50.0)];
        assert_eq!(check_monochromatic(&colors), 25.0);
        let loose = vec![hsl(10.0, 60.0, 50.0), hsl(38.0, 60.0, 50.0)];
        assert_eq!(check_monochromatic(&loose), 18.0);
    }

    #[test]
    fn triadic_compliance_for_even_spacing() {
        let colors = vec![hsl(0.0, 70.0, 50.0), hsl(120.0, 70.0, 50.0), hsl(240.0, 70.0, 50.0)];
        assert_eq!(check_triadic(&colors), 25.0);
        let uneven = vec![hsl(0.0, 70.0, 50.0), hsl(30.0, 70.0, 50.0), hsl(60.0, 70.0, 50.0)];
        assert_eq!(check_triadic(&uneven), 8.0);
    }

    #[test]
    fn complementary_compliance_tolerates_thirty_degrees() {
        let near = vec![hsl(0.0, 70.0, 50.0), hsl(155.0, 70.0, 50.0)];
        assert_eq!(check_complementary(&near), 25.0);
        let off = vec![hsl(0.0, 70.0, 50.0), hsl(60.0, 70.0, 50.0)];
        assert_eq!(check_complementary(&off), 10.0);
    }

    #[test]
    fn split_complementary_needs_both_splits() {
        let full = expand_harmony(&hsl(60.0, 70.0, 50.0), HarmonyScheme::SplitComplementary);
        assert_eq!(check_split_complementary(&full[..3]), 25.0);
        let half = vec![hsl(60.0, 70.0, 50.0), hsl(210.0, 70.0, 50.0)];
        assert_eq!(check_split_complementary(&half), 10.0);
    }

    #[test]
    fn bonuses_respect_their_caps() {
        // wide lightness range and no red/green clash would earn 5+3+2
        let colors = vec![hsl(200.0, 60.0, 10.0), hsl(220.0, 60.0, 85.0)];
        assert_eq!(accessibility_bonus(&colors), 10.0);
        assert!(cultural_bonus(&colors) <= 5.0);
        let clash = vec![hsl(0.0, 90.0, 50.0), hsl(120.0, 90.0, 52.0)];
        assert_eq!(accessibility_bonus(&clash), 0.0);
    }

    #[test]
    fn harmony_score_is_bounded_and_idempotent() {
        for scheme in [
            HarmonyScheme::Monochromatic,
            HarmonyScheme::Analogous,
            HarmonyScheme::Complementary,
            HarmonyScheme::SplitComplementary,
            HarmonyScheme::Triadic,
            HarmonyScheme::Tetradic,
        ] {
            let colors = expand_harmony(&hsl(200.0, 70.0, 50.0), scheme);
            let first = harmony_score(&colors, scheme);
            let second = harmony_score(&colors, scheme);
            assert!((0.0..=100.0).contains(&first), "{scheme:?}: {first}");
            assert_eq!(first, second, "{scheme:?} not idempotent");
        }
        assert_eq!(harmony_score(&[], HarmonyScheme::Analogous), 0.0);
    }

    #[test]
    fn order_preservation_bands() {
        let ascending = vec![hsl(10.0, 60.0, 30.0), hsl(40.0, 60.0, 50.0), hsl(80.0, 60.0, 70.0)];
        assert_eq!(optimize_color_encoding(&ascending, 3).order_preservation, 90.0);
        let descending = vec![hsl(80.0, 60.0, 70.0), hsl(40.0, 60.0, 50.0), hsl(10.0, 60.0, 30.0)];
        assert_eq!(optimize_color_encoding(&descending, 3).order_preservation, 75.0);
        let jumbled = vec![hsl(40.0, 60.0, 50.0), hsl(10.0, 60.0, 70.0), hsl(80.0, 60.0, 30.0)];
        assert_eq!(optimize_color_encoding(&jumbled, 3).order_preservation, 50.0);
    }

    #[test]
    fn cognitive_load_bands_follow_working_memory() {
        let colors: Vec<Hsl> = (0..6).map(|i| hsl(i as f64 * 60.0, 60.0, 50.0)).collect();
        assert_eq!(optimize_color_encoding(&colors, 6).cognitive_load, 20.0);
        let many: Vec<Hsl> = (0..15).map(|i| hsl(i as f64 * 24.0, 60.0, 50.0)).collect();
        assert_eq!(optimize_color_encoding(&many, 15).cognitive_load, 60.0);
    }

    #[test]
    fn bandwidth_guards_division_by_zero() {
        let colors = vec![hsl(0.0, 60.0, 50.0)];
        let result = optimize_color_encoding(&colors, 0);
        assert!((0.0..=100.0).contains(&result.bandwidth_efficiency));
    }

    fn sample_inputs(
        dims: &[EncodingDimension],
        chart: &str,
    ) -> (
        Vec<AnnotatedDimension>,
        EncodingMetrics,
        Vec<RedundantEncoding>,
        crate::hierarchy::VisualHierarchy,
    ) {
        let annotated = annotate_dimensions(dims);
        let metrics = EncodingMetrics::from_annotated(&annotated, chart);
        let redundant = build_redundant_encodings(&annotated);
        let hierarchy = build_hierarchy(&annotated);
        (annotated, metrics, redundant, hierarchy)
    }

    #[test]
    fn quality_overall_is_the_mean_with_default_weights() {
        let dims = vec![
            EncodingDimension::new(Channel::PositionX, "x", DataKind::Quantitative, 0.9),
            EncodingDimension::new(Channel::PositionY, "y", DataKind::Quantitative, 0.85),
            EncodingDimension::new(Channel::ColorHue, "cat", DataKind::Nominal, 0.75),
            EncodingDimension::new(Channel::SizeArea, "size", DataKind::Quantitative, 0.5),
        ];
        let (annotated, metrics, redundant, hierarchy) = sample_inputs(&dims, "scatter_plot");
        let colors = expand_harmony(&hsl(210.0, 65.0, 50.0), HarmonyScheme::Triadic);
        let optimization = optimize_color_encoding(&colors, 8);
        let inputs = QualityInputs {
            dimensions: &annotated,
            metrics: &metrics,
            redundant: &redundant,
            hierarchy: &hierarchy,
            harmony_score: harmony_score(&colors, HarmonyScheme::Triadic),
            palette_colors: &colors,
            palette_optimization: &optimization,
        };
        let quality = assess_quality(&inputs, &QualityWeights::default());
        let mean = (quality.aesthetic_score
            + quality.functional_score
            + quality.accessibility_score
            + quality.usability_score
            + quality.originality_score)
            / 5.0;
        assert!((quality.overall_quality - mean).abs() < 1e-9);
        for score in [
            quality.aesthetic_score,
            quality.functional_score,
            quality.accessibility_score,
            quality.usability_score,
            quality.originality_score,
            quality.overall_quality,
        ] {
            assert!((0.0..=100.0).contains(&score));
        }
    }

    #[test]
    fn originality_rewards_channel_variety() {
        let varied: Vec<EncodingDimension> = [
            Channel::PositionX,
            Channel::PositionY,
            Channel::ColorHue,
            Channel::SizeArea,
            Channel::Shape,
            Channel::Texture,
        ]
        .into_iter()
        .enumerate()
        .map(|(i, ch)| {
            EncodingDimension::new(ch, &format!("f{i}"), DataKind::Quantitative, 0.6)
        })
        .collect();
        let (annotated, metrics, redundant, hierarchy) = sample_inputs(&varied, "scatter_plot");
        let colors = vec![hsl(0.0, 60.0, 50.0)];
        let optimization = optimize_color_encoding(&colors, 8);
        let varied_inputs = QualityInputs {
            dimensions: &annotated,
            metrics: &metrics,
            redundant: &redundant,
            hierarchy: &hierarchy,
            harmony_score: 80.0,
            palette_colors: &colors,
            palette_optimization: &optimization,
        };
        let varied_score = originality_score(&varied_inputs);

        let narrow = vec![EncodingDimension::new(
            Channel::PositionX,
            "only",
            DataKind::Quantitative,
            0.6,
        )];
        let (annotated, metrics, redundant, hierarchy) = sample_inputs(&narrow, "scatter_plot");
        let narrow_inputs = QualityInputs {
            dimensions: &annotated,
            metrics: &metrics,
            redundant: &redundant,
            hierarchy: &hierarchy,
            harmony_score: 80.0,
            palette_colors: &colors,
            palette_optimization: &optimization,
        };
        assert!(varied_score > originality_score(&narrow_inputs));
    }

    #[test]
    fn low_subscores_emit_prioritised_improvements() {
        let dims = vec![EncodingDimension::new(
            Channel::Motion,
            "blink",
            DataKind::Nominal,
            0.2,
        )];
        let (annotated, metrics, redundant, hierarchy) = sample_inputs(&dims, "sankey");
        let colors = vec![hsl(0.0, 90.0, 50.0), hsl(120.0, 90.0, 52.0)];
        let optimization = optimize_color_encoding(&colors, 8);
        let inputs = QualityInputs {
            dimensions: &annotated,
            metrics: &metrics,
            redundant: &redundant,
            hierarchy: &hierarchy,
            harmony_score: 20.0,
            palette_colors: &colors,
            palette_optimization: &optimization,
        };
        let quality = assess_quality(&inputs, &QualityWeights::default());
        assert!(!quality.improvement_areas.is_empty());
        let aesthetic = quality
            .improvement_areas
            .iter()
            .find(|a| a.area == QualityArea::Aesthetic)
            .expect("aesthetic flagged");
        assert_eq!(aesthetic.priority, Priority::Critical);
        // every flagged area is genuinely under the threshold
        for area in &quality.improvement_areas {
            assert!(area.current_score < 75.0);
        }
    }
}
