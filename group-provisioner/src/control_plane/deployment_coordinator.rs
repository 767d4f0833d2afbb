//! Deployment supervision and the role-recovery protocol.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::control_plane::client::{ClientError, ControlPlaneClient, RoleAssociationClient};
use crate::control_plane::deployment_status::DeploymentStatus;
use crate::observability::events;
use crate::runtime::clock::{Clock, TokioClock};

const COMPONENT: &str = "deployment_coordinator";

/// Overall wall-clock budget for one supervised deployment.
const DEPLOYMENT_DEADLINE: Duration = Duration::from_secs(300);
/// Re-poll interval while the control plane reports `Building`.
const BUILDING_POLL_INTERVAL: Duration = Duration::from_secs(5);
/// Pause that lets role associations settle during a recovery cycle.
const ROLE_SETTLE_PAUSE: Duration = Duration::from_secs(30);

/// Timing knobs of one coordinator instance. Held per instance, never
/// process-wide, so coordinators for different groups can run side by side.
#[derive(Clone, Copy, Debug)]
pub struct CoordinatorTimings {
    pub deadline: Duration,
    pub building_poll_interval: Duration,
    pub role_settle_pause: Duration,
}

impl Default for CoordinatorTimings {
    fn default() -> Self {
        Self {
            deadline: DEPLOYMENT_DEADLINE,
            building_poll_interval: BUILDING_POLL_INTERVAL,
            role_settle_pause: ROLE_SETTLE_PAUSE,
        }
    }
}

/// Role identities needed to run the disassociate/reassociate recovery cycle.
/// Without both, a transient failure cannot be recovered and becomes terminal.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecoveryRoles {
    pub service_role_arn: String,
    pub group_role_arn: String,
}

impl RecoveryRoles {
    pub fn new(service_role_arn: impl Into<String>, group_role_arn: impl Into<String>) -> Self {
        Self {
            service_role_arn: service_role_arn.into(),
            group_role_arn: group_role_arn.into(),
        }
    }
}

/// One supervised deployment submission and its terminal outcome.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DeploymentAttempt {
    pub deployment_id: String,
    pub group_id: String,
    pub group_version_id: String,
    pub status: DeploymentStatus,
}

/// Terminal failures of a supervised deployment.
#[derive(Debug)]
pub enum DeploymentError {
    /// Permanent control-plane rejection, or a transient failure with no
    /// recovery roles available.
    Failed { message: String },
    /// The overall supervising deadline elapsed before a terminal state.
    DeadlineExceeded,
    /// The control plane or role client could not be reached at all.
    Client(ClientError),
}

impl Display for DeploymentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DeploymentError::Failed { message } => write!(f, "deployment failed: {message}"),
            DeploymentError::DeadlineExceeded => {
                write!(f, "deployment did not reach a terminal state before the deadline")
            }
            DeploymentError::Client(err) => write!(f, "deployment aborted: {err}"),
        }
    }
}

impl Error for DeploymentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DeploymentError::Client(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ClientError> for DeploymentError {
    fn from(err: ClientError) -> Self {
        DeploymentError::Client(err)
    }
}

/// Supervises one deployment to a terminal state.
///
/// Submits the group version, polls the control plane, and on transient
/// failures runs the role recovery cycle (disassociate both roles, let the
/// control plane settle, reassociate, resubmit). Recovery cycles are
/// unbounded in count; the only bound is the overall deadline, checked at
/// each loop iteration against the injected clock.
pub struct DeploymentCoordinator {
    control_plane: Arc<dyn ControlPlaneClient>,
    role_client: Arc<dyn RoleAssociationClient>,
    clock: Arc<dyn Clock>,
    timings: CoordinatorTimings,
}

impl DeploymentCoordinator {
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

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_timings(mut self, timings: CoordinatorTimings) -> Self {
        self.timings = timings;
        self
    }

    /// Submits a deployment for `(group_id, group_version_id)` and drives it
    /// to a terminal state, returning the successful attempt or the terminal
    /// failure. A caller must not run two coordinators against the same
    /// group concurrently.
    pub async fn run_deployment(
        &self,
        group_id: &str,
        group_version_id: &str,
        roles: Option<&RecoveryRoles>,
    ) -> Result<DeploymentAttempt, DeploymentError> {
        let deadline = self.clock.now() + self.timings.deadline;
        let mut retry_cycles: u32 = 0;

        let mut deployment_id = self.submit(group_id, group_version_id).await?;

        loop {
            if self.clock.now() >= deadline {
                error!(
                    event = events::DEPLOYMENT_DEADLINE_EXCEEDED,
                    component = COMPONENT,
                    group_id,
                    deployment_id,
                    retry_cycles,
                    "deployment did not reach a terminal state in time"
                );
                return Err(DeploymentError::DeadlineExceeded);
            }

            let raw = self
                .control_plane
                .deployment_status(group_id, &deployment_id)
                .await?;
            debug!(
                event = events::DEPLOYMENT_POLL,
                component = COMPONENT,
                group_id,
                deployment_id,
                raw_status = %raw.status,
                "checking deployment status"
            );

            match DeploymentStatus::classify(&raw) {
                DeploymentStatus::Successful => {
                    info!(
                        event = events::DEPLOYMENT_SUCCESSFUL,
                        component = COMPONENT,
                        group_id,
                        deployment_id,
                        retry_cycles,
                        "deployment successful"
                    );
                    return Ok(DeploymentAttempt {
                        deployment_id,
                        group_id: group_id.to_string(),
                        group_version_id: group_version_id.to_string(),
                        status: DeploymentStatus::Successful,
                    });
                }
                DeploymentStatus::Building => {
                    debug!(
                        event = events::DEPLOYMENT_BUILDING,
                        component = COMPONENT,
                        group_id,
                        deployment_id,
                        "deployment is being built"
                    );
                    self.clock.sleep(self.timings.building_poll_interval).await;
                }
                DeploymentStatus::Failed => {
                    let message = raw
                        .error_message
                        .unwrap_or_else(|| format!("unexpected deployment status [{}]", raw.status));
                    error!(
                        event = events::DEPLOYMENT_FAILED,
                        component = COMPONENT,
                        group_id,
                        deployment_id,
                        message,
                        "deployment failed permanently"
                    );
                    return Err(DeploymentError::Failed { message });
                }
                DeploymentStatus::NeedsRetry => {
                    let message = raw.error_message.unwrap_or_default();
                    let Some(roles) = roles else {
                        error!(
                            event = events::ROLE_RECOVERY_UNAVAILABLE,
                            component = COMPONENT,
                            group_id,
                            deployment_id,
                            message,
                            "transient failure but no recovery roles available"
                        );
                        return Err(DeploymentError::Failed {
                            message: format!(
                                "transient deployment failure with no recovery roles available: {message}"
                            ),
                        });
                    };

                    warn!(
                        event = events::DEPLOYMENT_NEEDS_RETRY,
                        component = COMPONENT,
                        group_id,
                        deployment_id,
                        message,
                        retry_cycles,
                        "transient failure, starting role recovery cycle"
                    );
                    deployment_id = self
                        .recover_and_resubmit(group_id, group_version_id, roles)
                        .await?;
                    retry_cycles += 1;
                }
            }
        }
    }

    async fn submit(
        &self,
        group_id: &str,
        group_version_id: &str,
    ) -> Result<String, ClientError> {
        let deployment_id = self
            .control_plane
            .create_deployment(group_id, group_version_id)
            .await?;
        info!(
            event = events::DEPLOYMENT_SUBMITTED,
            component = COMPONENT,
            group_id,
            group_version_id,
            deployment_id,
            "deployment created"
        );
        Ok(deployment_id)
    }

    /// The recovery cycle for eventually-consistent role visibility: drop
    /// both role associations, let the control plane settle, reassociate,
    /// settle again, then submit a fresh deployment for the same version.
    async fn recover_and_resubmit(
        &self,
        group_id: &str,
        group_version_id: &str,
        roles: &RecoveryRoles,
    ) -> Result<String, ClientError> {
        warn!(
            event = events::ROLE_RECOVERY_START,
            component = COMPONENT,
            group_id,
            "disassociating service and group roles"
        );
        self.role_client.disassociate_service_role().await?;
        self.role_client.disassociate_group_role(group_id).await?;

        warn!(
            event = events::ROLE_RECOVERY_SETTLE,
            component = COMPONENT,
            group_id,
            pause_secs = self.timings.role_settle_pause.as_secs(),
            "letting role state settle"
        );
        self.clock.sleep(self.timings.role_settle_pause).await;

        self.role_client
            .associate_service_role(&roles.service_role_arn)
            .await?;
        self.role_client
            .associate_group_role(group_id, &roles.group_role_arn)
            .await?;

        warn!(
            event = events::ROLE_RECOVERY_SETTLE,
            component = COMPONENT,
            group_id,
            pause_secs = self.timings.role_settle_pause.as_secs(),
            "letting role state settle"
        );
        self.clock.sleep(self.timings.role_settle_pause).await;

        let deployment_id = self.submit(group_id, group_version_id).await?;
        warn!(
            event = events::ROLE_RECOVERY_COMPLETE,
            component = COMPONENT,
            group_id,
            deployment_id,
            "trying another deployment"
        );
        Ok(deployment_id)
    }
}
