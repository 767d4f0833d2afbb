//! Control-plane integration layer.
//!
//! Defines the client traits the provisioner calls the fleet control plane
//! through, the group-version and subscription-definition payload shapes, and
//! the [`deployment_coordinator::DeploymentCoordinator`] that drives one
//! submitted deployment to a terminal state.
//!
//! Nothing in this module talks to a network itself. Callers supply
//! implementations of [`client::ControlPlaneClient`] and
//! [`client::RoleAssociationClient`]; tests supply scripted mocks.

pub(crate) mod client;
pub(crate) mod deployment_coordinator;
pub(crate) mod deployment_status;
pub(crate) mod group_version;
pub(crate) mod subscription_definition;
