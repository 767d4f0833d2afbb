//! Wire shape for subscription definition entries submitted to the control plane.

use serde::{Deserialize, Serialize};

use crate::routing::subscription_edge::SubscriptionEdge;

/// One routing rule as the control plane accepts it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SubscriptionDefinitionEntry {
    pub id: String,
    pub source: String,
    pub subject: String,
    pub target: String,
}

impl From<&SubscriptionEdge> for SubscriptionDefinitionEntry {
    fn from(edge: &SubscriptionEdge) -> Self {
        SubscriptionDefinitionEntry {
            id: edge.id.to_string(),
            source: edge.source.address().to_string(),
            subject: edge.topic_filter.to_string(),
            target: edge.target.address().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SubscriptionDefinitionEntry;
    use crate::endpoint::Endpoint;
    use crate::routing::subscription_edge::SubscriptionEdge;
    use crate::routing::topic_pattern::TopicPattern;

    #[test]
    fn entries_serialize_endpoint_addresses_and_the_joined_filter() {
        let edge = SubscriptionEdge::new(
            Endpoint::function("arn:fn:sensor"),
            Endpoint::Cloud,
            TopicPattern::parse("telemetry/+/reading").expect("pattern should parse"),
        );

        let entry = SubscriptionDefinitionEntry::from(&edge);
        assert_eq!(entry.id, edge.id.to_string());
        assert_eq!(entry.source, "arn:fn:sensor");
        assert_eq!(entry.subject, "telemetry/+/reading");
        assert_eq!(entry.target, "cloud");

        let json = serde_json::to_value(&entry).expect("entry should serialize");
        assert_eq!(json["Source"], "arn:fn:sensor");
        assert_eq!(json["Subject"], "telemetry/+/reading");
        assert_eq!(json["Target"], "cloud");
    }
}
