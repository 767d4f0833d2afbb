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

//! Declared topic interests handed in by the configuration layer.
//!
//! The configuration loader (external to this crate) produces one binding per
//! compute function and per device: the topics it publishes and subscribes,
//! its explicit cloud topic lists, and the device shadows it connects to.
//! Bindings are plain data; the resolver in [`crate::routing`] turns them
//! into routing edges.

use crate::endpoint::Endpoint;
use serde::{Deserialize, Serialize};

/// Topic interests of one compute function, keyed by its function ARN.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct FunctionBinding {
    pub function_arn: String,
    #[serde(default)]
    pub input_topics: Vec<String>,
    #[serde(default)]
    pub output_topics: Vec<String>,
    #[serde(default)]
    pub from_cloud_topics: Vec<String>,
    #[serde(default)]
    pub to_cloud_topics: Vec<String>,
    #[serde(default)]
    pub connected_shadows: Vec<String>,
}

/// Topic interests of one physical device, keyed by its thing ARN.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct DeviceBinding {
    pub thing_arn: String,
    #[serde(default)]
    pub input_topics: Vec<String>,
    #[serde(default)]
    pub output_topics: Vec<String>,
    #[serde(default)]
    pub from_cloud_topics: Vec<String>,
    #[serde(default)]
    pub to_cloud_topics: Vec<String>,
    #[serde(default)]
    pub connected_shadows: Vec<String>,
}

impl FunctionBinding {
    pub fn new(function_arn: impl Into<String>) -> Self {
        Self {
            function_arn: function_arn.into(),
            ..Default::default()
        }
    }

    pub fn with_input_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.input_topics = topics.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_output_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output_topics = topics.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_from_cloud_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.from_cloud_topics = topics.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_to_cloud_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.to_cloud_topics = topics.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_connected_shadows<I, S>(mut self, shadows: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.connected_shadows = shadows.into_iter().map(Into::into).collect();
        self
    }

    pub(crate) fn endpoint(&self) -> Endpoint {
        Endpoint::Function(self.function_arn.clone())
    }
}

impl DeviceBinding {
    pub fn new(thing_arn: impl Into<String>) -> Self {
        Self {
            thing_arn: thing_arn.into(),
            ..Default::default()
        }
    }

    pub fn with_input_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.input_topics = topics.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_output_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output_topics = topics.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_from_cloud_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.from_cloud_topics = topics.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_to_cloud_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.to_cloud_topics = topics.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_connected_shadows<I, S>(mut self, shadows: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.connected_shadows = shadows.into_iter().map(Into::into).collect();
        self
    }

    pub(crate) fn endpoint(&self) -> Endpoint {
        Endpoint::Device(self.thing_arn.clone())
    }
}
