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

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Address of the cloud endpoint in subscription definitions.
pub const CLOUD_ADDRESS: &str = "cloud";

/// Address of the local shadow service endpoint in subscription definitions.
pub const SHADOW_SERVICE_ADDRESS: &str = "GGShadowService";

///
/// [`Endpoint`] is one party of a routing edge: a compute function or a
/// physical device identified by its ARN, the cloud endpoint, or the local
/// shadow service. Identity is by ARN/sentinel equality.
///
/// # Examples
///
/// ```
/// use group_provisioner::Endpoint;
///
/// let function = Endpoint::function("arn:aws:lambda:us-east-1:123456789012:function:monitor");
/// let device = Endpoint::device("arn:aws:iot:us-east-1:123456789012:thing/room1");
///
/// assert_ne!(function, device);
/// assert_eq!(Endpoint::Cloud.address(), "cloud");
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Endpoint {
    Function(String),
    Device(String),
    Cloud,
    ShadowService,
}

impl Endpoint {
    pub fn function(arn: impl Into<String>) -> Self {
        Endpoint::Function(arn.into())
    }

    pub fn device(arn: impl Into<String>) -> Self {
        Endpoint::Device(arn.into())
    }

    /// The address this endpoint carries on the wire: an ARN for functions
    /// and devices, a fixed sentinel for the cloud and the shadow service.
    pub fn address(&self) -> &str {
        match self {
            Endpoint::Function(arn) | Endpoint::Device(arn) => arn,
            Endpoint::Cloud => CLOUD_ADDRESS,
            Endpoint::ShadowService => SHADOW_SERVICE_ADDRESS,
        }
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.address())
    }
}
