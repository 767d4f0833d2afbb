//! Shared scripted clients and a simulated clock for integration tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use group_provisioner::{
    ClientError, Clock, ControlPlaneClient, GroupVersionDescriptor, RawDeploymentStatus,
    RoleAssociationClient, SubscriptionEdge,
};

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Simulated time: `sleep` records the requested duration and advances the
/// clock instantly, so deadline and backoff behavior is observable without
/// real waiting.
pub struct SimClock {
    base: Instant,
    elapsed_ms: AtomicU64,
    sleeps: Mutex<Vec<Duration>>,
}

impl SimClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            elapsed_ms: AtomicU64::new(0),
            sleeps: Mutex::new(Vec::new()),
        }
    }

    pub fn recorded_sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Clock for SimClock {
    fn now(&self) -> Instant {
        self.base + Duration::from_millis(self.elapsed_ms.load(Ordering::SeqCst))
    }

    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
        self.elapsed_ms
            .fetch_add(duration.as_millis() as u64, Ordering::SeqCst);
    }
}

/// Scripted control plane: status queries consume a queue of raw reports and
/// fall back to `Building` once the queue is drained; every mutating call is
/// recorded for assertions.
#[derive(Default)]
pub struct ScriptedControlPlane {
    status_script: Mutex<VecDeque<RawDeploymentStatus>>,
    deployment_counter: AtomicU64,
    latest_version: Mutex<Option<GroupVersionDescriptor>>,
    pub created_deployments: Mutex<Vec<(String, String)>>,
    pub created_group_versions: Mutex<Vec<(String, GroupVersionDescriptor)>>,
    pub created_subscription_definitions: Mutex<Vec<Vec<SubscriptionEdge>>>,
}

impl ScriptedControlPlane {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script_status(&self, status: RawDeploymentStatus) {
        self.status_script.lock().unwrap().push_back(status);
    }

    pub fn set_latest_version(&self, descriptor: GroupVersionDescriptor) {
        *self.latest_version.lock().unwrap() = Some(descriptor);
    }

    pub fn created_deployment_count(&self) -> usize {
        self.created_deployments.lock().unwrap().len()
    }
}

#[async_trait]
impl ControlPlaneClient for ScriptedControlPlane {
    async fn create_deployment(
        &self,
        group_id: &str,
        group_version_id: &str,
    ) -> Result<String, ClientError> {
        self.created_deployments
            .lock()
            .unwrap()
            .push((group_id.to_string(), group_version_id.to_string()));
        let n = self.deployment_counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("deployment-{n}"))
    }

    async fn deployment_status(
        &self,
        _group_id: &str,
        _deployment_id: &str,
    ) -> Result<RawDeploymentStatus, ClientError> {
        Ok(self
            .status_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| RawDeploymentStatus::new("Building")))
    }

    async fn create_group_version(
        &self,
        group_id: &str,
        descriptor: &GroupVersionDescriptor,
    ) -> Result<String, ClientError> {
        let mut versions = self.created_group_versions.lock().unwrap();
        versions.push((group_id.to_string(), descriptor.clone()));
        Ok(format!("group-version-{}", versions.len()))
    }

    async fn latest_group_version(
        &self,
        _group_id: &str,
    ) -> Result<Option<GroupVersionDescriptor>, ClientError> {
        Ok(self.latest_version.lock().unwrap().clone())
    }

    async fn create_subscription_definition(
        &self,
        edges: &[SubscriptionEdge],
    ) -> Result<String, ClientError> {
        self.created_subscription_definitions
            .lock()
            .unwrap()
            .push(edges.to_vec());
        Ok("arn:subscriptions:v-test".to_string())
    }
}

/// Records role association calls in invocation order as `name[:args]` labels.
#[derive(Default)]
pub struct RecordingRoleClient {
    pub calls: Mutex<Vec<String>>,
}

impl RecordingRoleClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recorded_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl RoleAssociationClient for RecordingRoleClient {
    async fn associate_service_role(&self, role_arn: &str) -> Result<(), ClientError> {
        self.record(format!("associate_service_role:{role_arn}"));
        Ok(())
    }

    async fn disassociate_service_role(&self) -> Result<(), ClientError> {
        self.record("disassociate_service_role".to_string());
        Ok(())
    }

    async fn associate_group_role(
        &self,
        group_id: &str,
        role_arn: &str,
    ) -> Result<(), ClientError> {
        self.record(format!("associate_group_role:{group_id}:{role_arn}"));
        Ok(())
    }

    async fn disassociate_group_role(&self, group_id: &str) -> Result<(), ClientError> {
        self.record(format!("disassociate_group_role:{group_id}"));
        Ok(())
    }
}
