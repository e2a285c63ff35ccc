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

use serde::{Deserialize, Serialize};

/// Perceptual channel a data field can be mapped onto.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    PositionX,
    PositionY,
    Length,
    Angle,
    Slope,
    SizeArea,
    Volume,
    ColorSaturation,
    ColorHue,
    ColorLightness,
    Shape,
    Texture,
    Motion,
    #[serde(untagged)]
    Other(String),
}

impl Channel {
    /// Effectiveness on the Cleveland-McGill hierarchy, in [0, 1]. Channels
    /// the table does not know default to the bottom of the hierarchy.
    pub fn effectiveness(&self) -> f64 {
        match self {
            Channel::PositionX | Channel::PositionY => 1.0,
            Channel::Length => 0.9,
            Channel::Angle => 0.8,
            Channel::Slope => 0.75,
            Channel::SizeArea => 0.7,
            Channel::Volume => 0.55,
            Channel::ColorSaturation => 0.5,
            Channel::ColorHue => 0.45,
            Channel::ColorLightness => 0.4,
            Channel::Shape => 0.3,
            Channel::Texture => 0.2,
            Channel::Motion | Channel::Other(_) => 0.1,
        }
    }
    pub fn as_str(&self) -> &str {
        match self {
            Channel::PositionX => "position_x",
            Channel::PositionY => "position_y",
            Channel::Length => "length",
            Channel::Angle => "angle",
            Channel::Slope => "slope",
            Channel::SizeArea => "size_area",
            Channel::Volume => "volume",
            Channel::ColorSaturation => "color_saturation",
            Channel::ColorHue => "color_hue",
            Channel::ColorLightness => "color_lightness",
            Channel::Shape => "shape",
            Channel::Texture => "texture",
            Channel::Motion => "motion",
            Channel::Other(name) => name,
        }
    }
    pub fn is_color(&self) -> bool {
        matches!(self, Channel::ColorHue | Channel::ColorSaturation)
    }
    pub fn is_position(&self) -> bool {
        matches!(self, Channel::PositionX | Channel::PositionY)
    }
}

/// Statistical kind of the encoded field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataKind {
    Quantitative,
    Ordinal,
    Nominal,
    Temporal,
    Spatial,
}

impl DataKind {
    /// Information carried per encoded value, used by the density metric.
    pub fn bits(&self) -> f64 {
        match self {
            DataKind::Quantitative => 8.0,
            DataKind::Ordinal => 4.0,
            DataKind::Nominal => 2.0,
            DataKind::Temporal | DataKind::Spatial => 1.0,
        }
    }
    pub fn is_ordered(&self) -> bool {
        matches!(self, DataKind::Quantitative | DataKind::Ordinal)
    }
}

/// Interaction complexity per chart type; unknown types score the default 2.
pub fn interaction_complexity(chart_type: &str) -> f64 {
    match chart_type {
        "line" | "line_chart" | "bar" | "bar_chart" => 1.0,
        "scatter" | "scatter_plot" => 2.0,
        "heatmap" => 3.0,
        "parallel_coordinates" | "sankey" => 4.0,
        _ => 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effectiveness_follows_the_hierarchy() {
        assert_eq!(Channel::PositionX.effectiveness(), 1.0);
        assert!(Channel::Length.effectiveness() > Channel::ColorHue.effectiveness());
        assert!(Channel::ColorHue.effectiveness() > Channel::Shape.effectiveness());
        assert_eq!(Channel::Motion.effectiveness(), 0.1);
    }

    #[test]
    fn unknown_channel_defaults_to_floor() {
        let custom = Channel::Other("glyph_rotation".to_string());
        assert_eq!(custom.effectiveness(), 0.1);
        assert_eq!(custom.as_str(), "glyph_rotation");
    }

    #[test]
    fn complexity_lookup() {
        assert_eq!(interaction_complexity("scatter_plot"), 2.0);
        assert_eq!(interaction_complexity("sankey"), 4.0);
        assert_eq!(interaction_complexity("never_heard_of_it"), 2.0);
    }

    #[test]
    fn serde_names_are_snake_case() {
        let json = serde_json::to_string(&Channel::ColorHue).unwrap();
        assert_eq!(json, "\"color_hue\"");
        let back: Channel = serde_json::from_str("\"position_y\"").unwrap();
        assert_eq!(back, Channel::PositionY);
    }
}
