//! Deployment status classification from raw control-plane reports.

use crate::control_plane::client::RawDeploymentStatus;

pub(crate) const RAW_IN_PROGRESS: &str = "InProgress";
pub(crate) const RAW_SUCCESS: &str = "Success";
pub(crate) const RAW_BUILDING: &str = "Building";
pub(crate) const RAW_FAILURE: &str = "Failure";

/// Failure signatures that cannot succeed on retry: a broken group
/// definition, an unreachable model artifact, exhausted artifact downloads,
/// or missing read permission on a referenced model.
const PERMANENT_FAILURE_SIGNATURES: [&str; 5] = [
    "group config is invalid",
    "group definition is invalid or corrupted",
    "Artifact download retry exceeded the max retries",
    "does not have permission to read the object",
    "nonexistent S3 object",
];

/// Classified deployment state.
///
/// `NeedsRetry` marks transient control-plane failures (eventual-consistency
/// races around freshly associated roles, invalid security tokens, generic
/// service hiccups) that a role recovery cycle can clear; everything the
/// control plane reports that is neither recognizably transient nor an
/// expected in-flight state maps to `Failed`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DeploymentStatus {
    Building,
    Successful,
    Failed,
    NeedsRetry,
}

impl DeploymentStatus {
    /// Maps one raw status report onto a terminal-state decision.
    pub fn classify(raw: &RawDeploymentStatus) -> DeploymentStatus {
        match raw.status.as_str() {
            RAW_IN_PROGRESS | RAW_SUCCESS => DeploymentStatus::Successful,
            RAW_BUILDING => DeploymentStatus::Building,
            RAW_FAILURE => classify_failure(raw.error_message.as_deref()),
            _ => DeploymentStatus::Failed,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, DeploymentStatus::Successful | DeploymentStatus::Failed)
    }
}

fn classify_failure(error_message: Option<&str>) -> DeploymentStatus {
    let Some(message) = error_message else {
        // Failure without detail: assume transient, same as an unrecognized message.
        return DeploymentStatus::NeedsRetry;
    };

    if PERMANENT_FAILURE_SIGNATURES
        .iter()
        .any(|signature| message.contains(signature))
    {
        return DeploymentStatus::Failed;
    }

    DeploymentStatus::NeedsRetry
}
