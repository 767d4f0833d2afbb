//! Group version composition and merge-with-previous semantics.

use serde::{Deserialize, Serialize};

/// References to the named sub-definitions one group version is composed of.
///
/// Each field is either a freshly created definition-version ARN or `None`,
/// in which case the reference is inherited unchanged from the previous group
/// version at submission time. A descriptor is immutable once submitted.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GroupVersionDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub core_definition_version_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_definition_version_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_definition_version_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_definition_version_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logger_definition_version_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_definition_version_arn: Option<String>,
}

impl GroupVersionDescriptor {
    /// Fills every unset reference from the previous version so updates can
    /// supply only the definitions that changed.
    pub fn merged_with(&self, previous: &GroupVersionDescriptor) -> GroupVersionDescriptor {
        GroupVersionDescriptor {
            core_definition_version_arn: self
                .core_definition_version_arn
                .clone()
                .or_else(|| previous.core_definition_version_arn.clone()),
            function_definition_version_arn: self
                .function_definition_version_arn
                .clone()
                .or_else(|| previous.function_definition_version_arn.clone()),
            subscription_definition_version_arn: self
                .subscription_definition_version_arn
                .clone()
                .or_else(|| previous.subscription_definition_version_arn.clone()),
            device_definition_version_arn: self
                .device_definition_version_arn
                .clone()
                .or_else(|| previous.device_definition_version_arn.clone()),
            logger_definition_version_arn: self
                .logger_definition_version_arn
                .clone()
                .or_else(|| previous.logger_definition_version_arn.clone()),
            resource_definition_version_arn: self
                .resource_definition_version_arn
                .clone()
                .or_else(|| previous.resource_definition_version_arn.clone()),
        }
    }
}
