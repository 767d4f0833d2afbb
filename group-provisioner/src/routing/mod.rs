//! Routing and subscription-resolution layer.
//!
//! Owns the topic pattern model, the wildcard matching policy that decides
//! which publisher/subscriber pairs can be connected, and the resolver that
//! turns declared topic interests into a concrete edge set.
//!
//! ```
//! use group_provisioner::{match_topic_strings, resolve_subscriptions, FunctionBinding, DeviceBinding};
//!
//! // The matcher derives the most specific filter both sides agree on.
//! let filter = match_topic_strings("dev/+/temp", "dev/room1/temp").unwrap().unwrap();
//! assert_eq!(filter.to_string(), "dev/room1/temp");
//!
//! // The resolver applies it across every declared output/input topic pair.
//! let function = FunctionBinding::new("arn:aws:lambda:us-east-1:123456789012:function:monitor")
//!     .with_output_topics(["dev/+/temp"]);
//! let device = DeviceBinding::new("arn:aws:iot:us-east-1:123456789012:thing/room1")
//!     .with_input_topics(["dev/room1/temp"]);
//!
//! let edges = resolve_subscriptions(&[function], &[device]).unwrap();
//! assert_eq!(edges.len(), 1);
//! ```

pub(crate) mod pattern_match;
pub(crate) mod subscription_edge;
pub(crate) mod subscription_resolver;
pub(crate) mod topic_pattern;
