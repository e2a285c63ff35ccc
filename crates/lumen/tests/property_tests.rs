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

use lumen::harmony::expand_harmony;
use lumen::scoring::harmony_score;
use lumen::{
    Channel, CompositionEngine, DataCharacteristics, DataKind, EncodingDimension, HarmonyScheme,
    Hsl, VisualContext,
};
use proptest::prelude::*;

fn channel_strategy() -> impl Strategy<Value = Channel> {
    prop_oneof![
        Just(Channel::PositionX),
        Just(Channel::PositionY),
        Just(Channel::Length),
        Just(Channel::SizeArea),
        Just(Channel::ColorHue),
        Just(Channel::ColorSaturation),
        Just(Channel::Shape),
        Just(Channel::Texture),
        Just(Channel::Motion),
        "[a-z]{3,12}".prop_map(Channel::Other),
    ]
}

fn kind_strategy() -> impl Strategy<Value = DataKind> {
    prop_oneof![
        Just(DataKind::Quantitative),
        Just(DataKind::Ordinal),
        Just(DataKind::Nominal),
        Just(DataKind::Temporal),
        Just(DataKind::Spatial),
    ]
}

fn dimension_strategy() -> impl Strategy<Value = EncodingDimension> {
    (
        channel_strategy(),
        "[a-z_]{1,16}",
        kind_strategy(),
        // deliberately wider than the documented [0,1] input range
        -2.0..3.0f64,
    )
        .prop_map(|(channel, field, kind, strength)| {
            EncodingDimension::new(channel, &field, kind, strength)
        })
}

fn scheme_strategy() -> impl Strategy<Value = HarmonyScheme> {
    prop_oneof![
        Just(HarmonyScheme::Monochromatic),
        Just(HarmonyScheme::Analogous),
        Just(HarmonyScheme::Complementary),
        Just(HarmonyScheme::SplitComplementary),
        Just(HarmonyScheme::Triadic),
        Just(HarmonyScheme::Tetradic),
    ]
}

fn hsl_strategy() -> impl Strategy<Value = Hsl> {
    (0.0..360.0f64, 0.0..=100.0f64, 0.0..=100.0f64)
        .prop_map(|(h, s, l)| Hsl::new(h, s, l))
}

proptest! {
    #[test]
    fn all_scores_stay_bounded_for_any_input(
        dims in proptest::collection::vec(dimension_strategy(), 0..10),
        chart in "[a-z_]{1,20}",
    ) {
        let profile = CompositionEngine::new().compose(
            &dims,
            &chart,
            &DataCharacteristics::default(),
            &VisualContext::default(),
        );
        let scores = [
            profile.metrics.efficiency,
            profile.metrics.cognitive_load,
            profile.metrics.information_density,
            profile.harmony.score,
            profile.quality.aesthetic_score,
            profile.quality.functional_score,
            profile.quality.accessibility_score,
            profile.quality.usability_score,
            profile.quality.originality_score,
            profile.quality.overall_quality,
        ];
        for score in scores {
            prop_assert!((0.0..=100.0).contains(&score), "out of bounds: {score}");
        }
    }

    #[test]
    fn complementary_expansion_is_exactly_opposite(hue in 0.0..360.0f64) {
        let base = Hsl::new(hue, 70.0, 50.0);
        let colors = expand_harmony(&base, HarmonyScheme::Complementary);
        let expected = (base.hue + 180.0).rem_euclid(360.0);
        prop_assert!((colors[1].hue - expected).abs() < 1e-9);
    }

    #[test]
    fn hex_round_trip_within_one_unit(
        hue in 0u32..360,
        saturation in 50u32..=90,
        lightness in 35u32..=65,
    ) {
        let original = Hsl::new(f64::from(hue), f64::from(saturation), f64::from(lightness));
        let back = Hsl::from_hex(&original.to_hex()).unwrap();
        prop_assert!((original.hue - back.hue).abs() <= 1.0);
        prop_assert!((original.saturation - back.saturation).abs() <= 1.0);
        prop_assert!((original.lightness - back.lightness).abs() <= 1.0);
    }

    #[test]
    fn harmony_scoring_is_bounded_and_repeatable(
        colors in proptest::collection::vec(hsl_strategy(), 0..12),
        scheme in scheme_strategy(),
    ) {
        let first = harmony_score(&colors, scheme);
        let second = harmony_score(&colors, scheme);
        prop_assert!((0.0..=100.0).contains(&first));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn expansion_hues_are_always_normalised(
        hue in -720.0..720.0f64,
        scheme in scheme_strategy(),
    ) {
        let base = Hsl::new(hue, 60.0, 50.0);
        for color in expand_harmony(&base, scheme) {
            prop_assert!((0.0..360.0).contains(&color.hue));
            prop_assert!((0.0..=100.0).contains(&color.saturation));
            prop_assert!((0.0..=100.0).contains(&color.lightness));
        }
    }
}
