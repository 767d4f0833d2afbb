//! Client traits the control-plane layer is driven through.
//!
//! Concrete implementations wrap the vendor API; this crate only depends on
//! the operations below and stays free of request/response wire shapes.

use crate::control_plane::group_version::GroupVersionDescriptor;
use crate::routing::subscription_edge::SubscriptionEdge;
use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Transport- or API-level failure reported by a client implementation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientError {
    message: String,
}

impl ClientError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for ClientError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "control plane client error: {}", self.message)
    }
}

impl Error for ClientError {}

/// Raw deployment status as reported by the control plane, before
/// classification into a terminal-state decision.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RawDeploymentStatus {
    pub status: String,
    pub error_message: Option<String>,
}

impl RawDeploymentStatus {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            error_message: None,
        }
    }

    pub fn with_error_message(mut self, error_message: impl Into<String>) -> Self {
        self.error_message = Some(error_message.into());
        self
    }
}

/// Group, deployment, and definition operations of the remote control plane.
#[async_trait]
pub trait ControlPlaneClient: Send + Sync {
    /// Submits a deployment for one group version and returns its deployment id.
    async fn create_deployment(
        &self,
        group_id: &str,
        group_version_id: &str,
    ) -> Result<String, ClientError>;

    /// Fetches the raw status of one in-flight deployment.
    async fn deployment_status(
        &self,
        group_id: &str,
        deployment_id: &str,
    ) -> Result<RawDeploymentStatus, ClientError>;

    /// Creates a new immutable group version and returns its id.
    async fn create_group_version(
        &self,
        group_id: &str,
        descriptor: &GroupVersionDescriptor,
    ) -> Result<String, ClientError>;

    /// Returns the latest group version descriptor, or `None` when the group
    /// does not exist yet or has no versions.
    async fn latest_group_version(
        &self,
        group_id: &str,
    ) -> Result<Option<GroupVersionDescriptor>, ClientError>;

    /// Creates a subscription definition version from the resolved edges and
    /// returns its version ARN.
    async fn create_subscription_definition(
        &self,
        edges: &[SubscriptionEdge],
    ) -> Result<String, ClientError>;
}

/// Role association operations used only during deployment recovery.
#[async_trait]
pub trait RoleAssociationClient: Send + Sync {
    async fn associate_service_role(&self, role_arn: &str) -> Result<(), ClientError>;

    async fn disassociate_service_role(&self) -> Result<(), ClientError>;

    async fn associate_group_role(
        &self,
        group_id: &str,
        role_arn: &str,
    ) -> Result<(), ClientError>;

    async fn disassociate_group_role(&self, group_id: &str) -> Result<(), ClientError>;
}

#[cfg(test)]
mod tests {
    use super::{ClientError, RawDeploymentStatus};

    #[test]
    fn client_error_display_carries_the_message() {
        let error = ClientError::new("connection reset");
        assert_eq!(
            error.to_string(),
            "control plane client error: connection reset"
        );
    }

    #[test]
    fn raw_status_builder_attaches_an_error_message() {
        let raw = RawDeploymentStatus::new("Failure").with_error_message("group config is invalid");
        assert_eq!(raw.status, "Failure");
        assert_eq!(raw.error_message.as_deref(), Some("group config is invalid"));
    }
}
