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

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use tracing::info;

use crate::bindings::{DeviceBinding, FunctionBinding};
use crate::control_plane::client::{ClientError, ControlPlaneClient, RoleAssociationClient};
use crate::control_plane::deployment_coordinator::{
    CoordinatorTimings, DeploymentCoordinator, DeploymentError, RecoveryRoles,
};
use crate::control_plane::group_version::GroupVersionDescriptor;
use crate::observability::events;
use crate::routing::subscription_resolver::resolve_subscriptions;
use crate::routing::topic_pattern::InvalidPatternError;
use crate::runtime::clock::{Clock, TokioClock};

const COMPONENT: &str = "provisioner";

/// Everything one provisioning run needs: the group, the declared function
/// and device bindings to resolve routing from, the definition references to
/// compose the new group version with, and optionally the roles that enable
/// deployment recovery.
#[derive(Clone, Debug, Default)]
pub struct ProvisionRequest {
    pub group_id: String,
    pub functions: Vec<FunctionBinding>,
    pub devices: Vec<DeviceBinding>,
    pub definitions: GroupVersionDescriptor,
    pub recovery_roles: Option<RecoveryRoles>,
}

impl ProvisionRequest {
    pub fn new(group_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            ..Default::default()
        }
    }
}

/// Result of one successful provisioning run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProvisionOutcome {
    pub group_version_id: String,
    pub deployment_id: String,
    pub subscription_count: usize,
}

/// Failures of one provisioning run, in declaration order of the pipeline:
/// invalid topic declarations abort before any control-plane call, client
/// failures abort mid-pipeline, deployment failures are terminal outcomes of
/// an otherwise submitted group version.
#[derive(Debug)]
pub enum ProvisionError {
    InvalidPattern(InvalidPatternError),
    Client(ClientError),
    Deployment(DeploymentError),
}

impl Display for ProvisionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ProvisionError::InvalidPattern(err) => {
                write!(f, "provisioning aborted on invalid topic declaration: {err}")
            }
            ProvisionError::Client(err) => write!(f, "provisioning aborted: {err}"),
            ProvisionError::Deployment(err) => write!(f, "provisioning failed: {err}"),
        }
    }
}

impl Error for ProvisionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ProvisionError::InvalidPattern(err) => Some(err),
            ProvisionError::Client(err) => Some(err),
            ProvisionError::Deployment(err) => Some(err),
        }
    }
}

impl From<InvalidPatternError> for ProvisionError {
    fn from(err: InvalidPatternError) -> Self {
        ProvisionError::InvalidPattern(err)
    }
}

impl From<ClientError> for ProvisionError {
    fn from(err: ClientError) -> Self {
        ProvisionError::Client(err)
    }
}

impl From<DeploymentError> for ProvisionError {
    fn from(err: DeploymentError) -> Self {
        ProvisionError::Deployment(err)
    }
}

/// Runs the end-to-end provisioning pipeline for one device group:
/// resolve the subscription graph from the declared bindings, publish it as a
/// subscription definition, compose a group version that inherits whatever
/// the request leaves unset, then deploy and supervise to a terminal state.
///
/// All state lives in the instance; independent groups can be provisioned by
/// independent `GroupProvisioner` values concurrently.
pub struct GroupProvisioner {
    control_plane: Arc<dyn ControlPlaneClient>,
    role_client: Arc<dyn RoleAssociationClient>,
    clock: Arc<dyn Clock>,
    timings: CoordinatorTimings,
}

impl GroupProvisioner {
    pub fn new(
        control_plane: Arc<dyn ControlPlaneClient>,
        role_client: Arc<dyn RoleAssociationClient>,
    ) -> Self {
        Self {
            control_plane,
            role_client,
            clock: Arc::new(TokioClock),
            timings: CoordinatorTimings::default(),
        }
    }

    /// Replaces the wall clock, so tests drive deadlines and pauses through
    /// simulated time.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_timings(mut self, timings: CoordinatorTimings) -> Self {
        self.timings = timings;
        self
    }

    pub async fn provision(
        &self,
        request: &ProvisionRequest,
    ) -> Result<ProvisionOutcome, ProvisionError> {
        let edges = resolve_subscriptions(&request.functions, &request.devices)?;

        let subscription_definition_version_arn = self
            .control_plane
            .create_subscription_definition(&edges)
            .await?;
        info!(
            event = events::SUBSCRIPTION_DEFINITION_CREATED,
            component = COMPONENT,
            group_id = request.group_id,
            subscription_count = edges.len(),
            arn = subscription_definition_version_arn,
            "subscription definition created"
        );

        let mut descriptor = request.definitions.clone();
        descriptor.subscription_definition_version_arn = Some(subscription_definition_version_arn);

        if let Some(previous) = self
            .control_plane
            .latest_group_version(&request.group_id)
            .await?
        {
            descriptor = descriptor.merged_with(&previous);
            info!(
                event = events::GROUP_VERSION_MERGED,
                component = COMPONENT,
                group_id = request.group_id,
                "unset definition references inherited from the previous group version"
            );
        }

        let group_version_id = self
            .control_plane
            .create_group_version(&request.group_id, &descriptor)
            .await?;
        info!(
            event = events::GROUP_VERSION_CREATED,
            component = COMPONENT,
            group_id = request.group_id,
            group_version_id,
            "group version created"
        );

        let coordinator = DeploymentCoordinator::new(
            self.control_plane.clone(),
            self.role_client.clone(),
        )
        .with_clock(self.clock.clone())
        .with_timings(self.timings);

        let attempt = coordinator
            .run_deployment(
                &request.group_id,
                &group_version_id,
                request.recovery_roles.as_ref(),
            )
            .await?;

        Ok(ProvisionOutcome {
            group_version_id,
            deployment_id: attempt.deployment_id,
            subscription_count: edges.len(),
        })
    }
}
