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

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompositionError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Colour parsing error: {0}")]
    Color(#[from] ColorParseError),
    #[error("Serialisation error: {0}")]
    Serialisation(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid palette size {size}: must be between 1 and {max}")]
    InvalidPaletteSize { size: usize, max: usize },
    #[error("Invalid quality weights: {reason}")]
    InvalidWeights { reason: String },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("Invalid hex colour '{value}': expected 3 or 6 hex digits")]
    InvalidHexLength { value: String },
    #[error("Invalid hex colour '{value}': non-hex digit")]
    InvalidHexDigit { value: String },
}

pub type Result<T> = std::result::Result<T, CompositionError>;
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

impl CompositionError {
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CompositionError::Color(_))
    }
    pub fn category(&self) -> &'static str {
        match self {
            CompositionError::Config(_) => "Configuration",
            CompositionError::Color(_) => "Colour",
            CompositionError::Serialisation(_) => "Serialisation",
        }
    }
}
