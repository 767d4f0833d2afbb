//! Deployment supervision tests: polling, role recovery, and the deadline.

mod support;

use std::sync::Arc;
use std::time::Duration;

use group_provisioner::{
    DeploymentCoordinator, DeploymentError, DeploymentStatus, RawDeploymentStatus, RecoveryRoles,
};
use support::{init_logging, RecordingRoleClient, ScriptedControlPlane, SimClock};

const GROUP: &str = "plant-floor";
const VERSION: &str = "group-version-1";

fn coordinator(
    control_plane: &Arc<ScriptedControlPlane>,
    roles: &Arc<RecordingRoleClient>,
    clock: &Arc<SimClock>,
) -> DeploymentCoordinator {
    DeploymentCoordinator::new(control_plane.clone(), roles.clone()).with_clock(clock.clone())
}

fn recovery_roles() -> RecoveryRoles {
    RecoveryRoles::new("arn:role:service", "arn:role:group")
}

#[tokio::test]
async fn building_reports_poll_on_the_building_interval() {
    init_logging();
    let control_plane = Arc::new(ScriptedControlPlane::new());
    let roles = Arc::new(RecordingRoleClient::new());
    let clock = Arc::new(SimClock::new());
    control_plane.script_status(RawDeploymentStatus::new("Building"));
    control_plane.script_status(RawDeploymentStatus::new("Building"));
    control_plane.script_status(RawDeploymentStatus::new("InProgress"));

    let attempt = coordinator(&control_plane, &roles, &clock)
        .run_deployment(GROUP, VERSION, None)
        .await
        .expect("deployment should succeed");

    assert_eq!(attempt.status, DeploymentStatus::Successful);
    assert_eq!(attempt.deployment_id, "deployment-1");
    assert_eq!(
        clock.recorded_sleeps(),
        vec![Duration::from_secs(5), Duration::from_secs(5)]
    );
    assert_eq!(control_plane.created_deployment_count(), 1);
}

#[tokio::test]
async fn transient_failure_runs_one_recovery_cycle_then_succeeds() {
    init_logging();
    let control_plane = Arc::new(ScriptedControlPlane::new());
    let roles = Arc::new(RecordingRoleClient::new());
    let clock = Arc::new(SimClock::new());
    control_plane.script_status(
        RawDeploymentStatus::new("Failure")
            .with_error_message("The security token included in the request is invalid."),
    );
    control_plane.script_status(RawDeploymentStatus::new("Success"));

    let attempt = coordinator(&control_plane, &roles, &clock)
        .run_deployment(GROUP, VERSION, Some(&recovery_roles()))
        .await
        .expect("deployment should recover");

    // The resubmission after recovery is what succeeded.
    assert_eq!(attempt.deployment_id, "deployment-2");
    assert_eq!(control_plane.created_deployment_count(), 2);

    // Both roles are dropped before either is reassociated.
    assert_eq!(
        roles.recorded_calls(),
        vec![
            "disassociate_service_role".to_string(),
            format!("disassociate_group_role:{GROUP}"),
            "associate_service_role:arn:role:service".to_string(),
            format!("associate_group_role:{GROUP}:arn:role:group"),
        ]
    );

    // One settle pause after dropping the roles, one after reassociating.
    assert_eq!(
        clock.recorded_sleeps(),
        vec![Duration::from_secs(30), Duration::from_secs(30)]
    );
}

#[tokio::test]
async fn transient_failure_without_roles_is_terminal_and_touches_no_roles() {
    init_logging();
    let control_plane = Arc::new(ScriptedControlPlane::new());
    let roles = Arc::new(RecordingRoleClient::new());
    let clock = Arc::new(SimClock::new());
    control_plane.script_status(
        RawDeploymentStatus::new("Failure")
            .with_error_message("We're having a problem right now.  Please try again in a few minutes."),
    );

    let error = coordinator(&control_plane, &roles, &clock)
        .run_deployment(GROUP, VERSION, None)
        .await
        .expect_err("deployment should fail");

    assert!(matches!(error, DeploymentError::Failed { .. }));
    assert!(roles.recorded_calls().is_empty());
    assert!(clock.recorded_sleeps().is_empty());
    assert_eq!(control_plane.created_deployment_count(), 1);
}

#[tokio::test]
async fn permanent_failures_never_trigger_recovery() {
    init_logging();
    let control_plane = Arc::new(ScriptedControlPlane::new());
    let roles = Arc::new(RecordingRoleClient::new());
    let clock = Arc::new(SimClock::new());
    control_plane.script_status(
        RawDeploymentStatus::new("Failure").with_error_message("group config is invalid"),
    );

    let error = coordinator(&control_plane, &roles, &clock)
        .run_deployment(GROUP, VERSION, Some(&recovery_roles()))
        .await
        .expect_err("deployment should fail");

    match error {
        DeploymentError::Failed { message } => {
            assert!(message.contains("group config is invalid"));
        }
        other => panic!("expected a permanent failure, got {other:?}"),
    }
    assert!(roles.recorded_calls().is_empty());
    assert_eq!(control_plane.created_deployment_count(), 1);
}

#[tokio::test]
async fn a_deployment_that_never_terminates_hits_the_deadline() {
    init_logging();
    let control_plane = Arc::new(ScriptedControlPlane::new());
    let roles = Arc::new(RecordingRoleClient::new());
    let clock = Arc::new(SimClock::new());
    // No scripted statuses: every poll reports Building.

    let error = coordinator(&control_plane, &roles, &clock)
        .run_deployment(GROUP, VERSION, Some(&recovery_roles()))
        .await
        .expect_err("deployment should time out");

    assert!(matches!(error, DeploymentError::DeadlineExceeded));
    // 300s deadline at a 5s poll interval.
    assert_eq!(clock.recorded_sleeps().len(), 60);
    assert!(roles.recorded_calls().is_empty());
}
