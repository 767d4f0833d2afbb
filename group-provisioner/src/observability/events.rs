//! Canonical structured event names used across `group-provisioner`.

// Subscription resolution events.
pub const CONNECTION_INFERRED: &str = "connection_inferred";
pub const CLOUD_SUBSCRIPTION_CREATED: &str = "cloud_subscription_created";
pub const SHADOW_SUBSCRIPTION_CREATED: &str = "shadow_subscription_created";
pub const RESOLUTION_ABORTED: &str = "resolution_aborted";

// Group version composition events.
pub const GROUP_VERSION_MERGED: &str = "group_version_merged";
pub const GROUP_VERSION_CREATED: &str = "group_version_created";
pub const SUBSCRIPTION_DEFINITION_CREATED: &str = "subscription_definition_created";

// Deployment lifecycle events.
pub const DEPLOYMENT_SUBMITTED: &str = "deployment_submitted";
pub const DEPLOYMENT_POLL: &str = "deployment_poll";
pub const DEPLOYMENT_BUILDING: &str = "deployment_building";
pub const DEPLOYMENT_SUCCESSFUL: &str = "deployment_successful";
pub const DEPLOYMENT_FAILED: &str = "deployment_failed";
pub const DEPLOYMENT_NEEDS_RETRY: &str = "deployment_needs_retry";
pub const DEPLOYMENT_DEADLINE_EXCEEDED: &str = "deployment_deadline_exceeded";

// Role recovery cycle events.
pub const ROLE_RECOVERY_START: &str = "role_recovery_start";
pub const ROLE_RECOVERY_SETTLE: &str = "role_recovery_settle";
pub const ROLE_RECOVERY_COMPLETE: &str = "role_recovery_complete";
pub const ROLE_RECOVERY_UNAVAILABLE: &str = "role_recovery_unavailable";
