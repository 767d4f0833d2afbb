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

//! # group-provisioner
//!
//! Provisions pub/sub device groups against a fleet control plane: it infers
//! the subscription graph from the topics each function and device declares,
//! publishes that graph as a subscription definition, composes an immutable
//! group version that inherits unchanged definitions from its predecessor,
//! and supervises the resulting deployment through transient control-plane
//! failures.
//!
//! The routing layer is pure and usable on its own:
//!
//! ```
//! use group_provisioner::{resolve_subscriptions, Endpoint, FunctionBinding};
//!
//! let sensor = FunctionBinding::new("arn:fn:sensor")
//!     .with_output_topics(["telemetry/room1/temp"]);
//! let monitor = FunctionBinding::new("arn:fn:monitor")
//!     .with_input_topics(["telemetry/+/temp"]);
//!
//! let edges = resolve_subscriptions(&[sensor, monitor], &[]).unwrap();
//!
//! assert_eq!(edges.len(), 1);
//! assert_eq!(edges[0].source, Endpoint::function("arn:fn:sensor"));
//! assert_eq!(edges[0].target, Endpoint::function("arn:fn:monitor"));
//! assert_eq!(edges[0].topic_filter.to_string(), "telemetry/room1/temp");
//! ```
//!
//! Everything that talks to the control plane goes through the
//! [`ControlPlaneClient`] and [`RoleAssociationClient`] traits, and time goes
//! through [`Clock`], so the whole pipeline runs under test with scripted
//! clients and a simulated clock.

mod bindings;
mod control_plane;
mod endpoint;
mod observability;
mod provisioner;
mod routing;
mod runtime;

pub use bindings::{DeviceBinding, FunctionBinding};
pub use control_plane::client::{
    ClientError, ControlPlaneClient, RawDeploymentStatus, RoleAssociationClient,
};
pub use control_plane::deployment_coordinator::{
    CoordinatorTimings, DeploymentAttempt, DeploymentCoordinator, DeploymentError, RecoveryRoles,
};
pub use control_plane::deployment_status::DeploymentStatus;
pub use control_plane::group_version::GroupVersionDescriptor;
pub use control_plane::subscription_definition::SubscriptionDefinitionEntry;
pub use endpoint::{Endpoint, CLOUD_ADDRESS, SHADOW_SERVICE_ADDRESS};
pub use provisioner::{GroupProvisioner, ProvisionError, ProvisionOutcome, ProvisionRequest};
pub use routing::pattern_match::{match_patterns, match_topic_strings};
pub use routing::subscription_edge::{shadow_topic_filter, SubscriptionEdge};
pub use routing::subscription_resolver::resolve_subscriptions;
pub use routing::topic_pattern::{InvalidPatternError, TopicPattern};
pub use runtime::clock::{Clock, TokioClock};
