/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Topic pattern model and validation.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub(crate) const LEVEL_SEPARATOR: &str = "/";
pub(crate) const SINGLE_LEVEL_WILDCARD: &str = "+";
pub(crate) const MULTI_LEVEL_WILDCARD: &str = "#";

/// A topic pattern is invalid when a level is empty or the multi-level
/// wildcard appears anywhere but the final level.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InvalidPatternError {
    EmptyPattern,
    EmptyLevel { pattern: String },
    MidPatternMultiLevelWildcard { pattern: String },
}

impl Display for InvalidPatternError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidPatternError::EmptyPattern => write!(f, "topic pattern is empty"),
            InvalidPatternError::EmptyLevel { pattern } => {
                write!(f, "topic pattern [{pattern}] contains an empty level")
            }
            InvalidPatternError::MidPatternMultiLevelWildcard { pattern } => {
                write!(
                    f,
                    "topic pattern [{pattern}] uses the multi-level wildcard outside the final level"
                )
            }
        }
    }
}

impl Error for InvalidPatternError {}

/// An MQTT-style topic filter: ordered non-empty levels separated by `/`.
///
/// `+` matches exactly one level; `#` matches all remaining levels and is
/// only legal as the final level. Construction goes through [`TopicPattern::parse`]
/// so every held instance is structurally valid.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct TopicPattern {
    levels: Vec<String>,
}

impl TopicPattern {
    /// Parses a topic string into a validated pattern.
    pub fn parse(topic: &str) -> Result<Self, InvalidPatternError> {
        if topic.is_empty() {
            return Err(InvalidPatternError::EmptyPattern);
        }

        let levels: Vec<String> = topic.split(LEVEL_SEPARATOR).map(str::to_string).collect();

        for (index, level) in levels.iter().enumerate() {
            if level.is_empty() {
                return Err(InvalidPatternError::EmptyLevel {
                    pattern: topic.to_string(),
                });
            }

            if level == MULTI_LEVEL_WILDCARD && index != levels.len() - 1 {
                return Err(InvalidPatternError::MidPatternMultiLevelWildcard {
                    pattern: topic.to_string(),
                });
            }
        }

        Ok(Self { levels })
    }

    /// Builds a pattern from already-validated levels. Internal use only;
    /// callers must uphold the `#`-is-final invariant.
    pub(crate) fn from_levels(levels: Vec<String>) -> Self {
        Self { levels }
    }

    pub(crate) fn levels(&self) -> &[String] {
        &self.levels
    }
}

impl Display for TopicPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.levels.join(LEVEL_SEPARATOR))
    }
}

impl Serialize for TopicPattern {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TopicPattern {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let topic = String::deserialize(deserializer)?;
        TopicPattern::parse(&topic).map_err(serde::de::Error::custom)
    }
}
