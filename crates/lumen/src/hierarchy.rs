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

use crate::channels::{Channel, DataKind};
use crate::encoding::AnnotatedDimension;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedundancyPurpose {
    Accessibility,
    Emphasis,
}

/// A secondary channel reinforcing a primary one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedundantEncoding {
    pub primary: Channel,
    pub redundant: Channel,
    pub level: f64,
    pub purpose: RedundancyPurpose,
    pub effectiveness: f64,
}

/// Rule set for redundant encodings. Colour channels always gain a shape
/// backup so colour-blind readers keep the distinction; strong nominal colour
/// encodings additionally gain texture, and strong quantitative y-positions
/// gain an area echo for emphasis.
pub fn build_redundant_encodings(dimensions: &[AnnotatedDimension]) -> Vec<RedundantEncoding> {
    let mut encodings = Vec::new();
    for annotated in dimensions {
        let dim = &annotated.dimension;
        if dim.channel.is_color() {
            encodings.push(RedundantEncoding {
                primary: dim.channel.clone(),
                redundant: Channel::Shape,
                level: 85.0,
                purpose: RedundancyPurpose::Accessibility,
                effectiveness: 90.0,
            });
            if dim.data_kind == DataKind::Nominal && dim.encoding_strength > 0.7 {
                encodings.push(RedundantEncoding {
                    primary: dim.channel.clone(),
                    redundant: Channel::Texture,
                    level: 70.0,
                    purpose: RedundancyPurpose::Emphasis,
                    effectiveness: 75.0,
                });
            }
        }
        if dim.channel == Channel::PositionY
            && dim.data_kind == DataKind::Quantitative
            && dim.encoding_strength > 0.8
        {
            encodings.push(RedundantEncoding {
                primary: dim.channel.clone(),
                redundant: Channel::SizeArea,
                level: 60.0,
                purpose: RedundancyPurpose::Emphasis,
                effectiveness: 80.0,
            });
        }
    }
    encodings
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyLevel {
    pub level: u32,
    pub fields: Vec<String>,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusPoint {
    pub field: String,
    pub channel: Channel,
    pub attention_weight: f64,
    pub techniques: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowTechnique {
    ColorGradient,
    SizeProgression,
    PositionFlow,
    LineConnection,
}

impl FlowTechnique {
    fn for_channel(channel: &Channel) -> Self {
        let name = channel.as_str();
        if name.contains("color") {
            FlowTechnique::ColorGradient
        } else if name.contains("size") {
            FlowTechnique::SizeProgression
        } else if name.contains("position") {
            FlowTechnique::PositionFlow
        } else {
            FlowTechnique::LineConnection
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowEdge {
    pub from: String,
    pub to: String,
    pub strength: f64,
    pub technique: FlowTechnique,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuideKind {
    Contrast,
    Grouping,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttentionGuide {
    pub kind: GuideKind,
    pub target: String,
    pub description: String,
}

/// Layered importance structure derived from the sorted dimension set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualHierarchy {
    pub levels: Vec<HierarchyLevel>,
    pub focus_points: Vec<FocusPoint>,
    pub visual_flow: Vec<FlowEdge>,
    pub attention_guides: Vec<AttentionGuide>,
}

/// Builds the hierarchy from dimensions already sorted by descending
/// strength (the annotator's output order). Level 1 holds the single most
/// important field, level 2 the next two, level 3 the remainder; empty
/// levels are omitted.
pub fn build_hierarchy(sorted: &[AnnotatedDimension]) -> VisualHierarchy {
    let field = |d: &AnnotatedDimension| d.dimension.data_field.clone();

    let mut levels = Vec::new();
    if !sorted.is_empty() {
        levels.push(HierarchyLevel {
            level: 1,
            fields: vec![field(&sorted[0])],
            weight: 100.0,
        });
    }
    let second: Vec<String> = sorted.iter().skip(1).take(2).map(field).collect();
    if !second.is_empty() {
        levels.push(HierarchyLevel {
            level: 2,
            fields: second,
            weight: 75.0,
        });
    }
    let rest: Vec<String> = sorted.iter().skip(3).map(field).collect();
    if !rest.is_empty() {
        levels.push(HierarchyLevel {
            level: 3,
            fields: rest,
            weight: 50.0,
        });
    }

    let focus_points = sorted
        .iter()
        .take(2)
        .enumerate()
        .map(|(rank, d)| FocusPoint {
            field: d.dimension.data_field.clone(),
            channel: d.dimension.channel.clone(),
            attention_weight: 100.0 - 25.0 * rank as f64,
            techniques: match rank {
                0 => vec![
                    "high_contrast".to_string(),
                    "central_position".to_string(),
                    "size_emphasis".to_string(),
                ],
                _ => vec![
                    "color_emphasis".to_string(),
                    "secondary_position".to_string(),
                ],
            },
        })
        .collect();

    let visual_flow = sorted
        .windows(2)
        .filter_map(|pair| {
            let diff = pair[0].dimension.encoding_strength - pair[1].dimension.encoding_strength;
            if diff > 0.2 {
                Some(FlowEdge {
                    from: pair[0].dimension.data_field.clone(),
                    to: pair[1].dimension.data_field.clone(),
                    strength: (diff * 100.0).min(100.0),
                    technique: FlowTechnique::for_channel(&pair[0].dimension.channel),
                })
            } else {
                None
            }
        })
        .collect();

    let mut attention_guides = Vec::new();
    if let Some(first) = sorted.first() {
        attention_guides.push(AttentionGuide {
            kind: GuideKind::Contrast,
            target: first.dimension.data_field.clone(),
            description: "Isolate the focal field with the strongest value contrast".to_string(),
        });
    }
    if sorted.len() > 3 {
        attention_guides.push(AttentionGuide {
            kind: GuideKind::Grouping,
            target: "context_fields".to_string(),
            description: "Group the remaining fields with muted, related styling".to_string(),
        });
    }

    VisualHierarchy {
        levels,
        focus_points,
        visual_flow,
        attention_guides,
    }
}
