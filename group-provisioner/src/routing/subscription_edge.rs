//! Routing-edge data model.

use crate::endpoint::Endpoint;
use crate::routing::topic_pattern::{InvalidPatternError, TopicPattern};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One directed routing rule: `source` publishes, `target` subscribes, over
/// `topic_filter`.
///
/// Edges are not deduplicated: overlapping topic declarations across multiple
/// publishers and subscribers can legitimately produce duplicate edges, and
/// consumers that need uniqueness deduplicate by `(source, target,
/// topic_filter)` at their own boundary.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionEdge {
    pub id: Uuid,
    pub source: Endpoint,
    pub target: Endpoint,
    pub topic_filter: TopicPattern,
}

impl SubscriptionEdge {
    /// Creates an edge with a fresh unique id.
    pub fn new(source: Endpoint, target: Endpoint, topic_filter: TopicPattern) -> Self {
        Self {
            id: Uuid::new_v4(),
            source,
            target,
            topic_filter,
        }
    }

    /// The `(source, target, topic_filter)` identity of this edge, ignoring
    /// the generated id. Boundary-level dedupe keys on this.
    pub fn routing_identity(&self) -> (&Endpoint, &Endpoint, &TopicPattern) {
        (&self.source, &self.target, &self.topic_filter)
    }
}

/// The fixed shadow topic filter for one named device:
/// `$aws/things/<name>/shadow/#`.
///
/// The thing name goes through full pattern validation, so a name that would
/// produce an empty level or a misplaced multi-level wildcard is rejected.
pub fn shadow_topic_filter(device_thing_name: &str) -> Result<TopicPattern, InvalidPatternError> {
    TopicPattern::parse(&format!("$aws/things/{device_thing_name}/shadow/#"))
}
