//! Resolves declared topic interests into the full set of routing edges.

use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::bindings::{DeviceBinding, FunctionBinding};
use crate::endpoint::Endpoint;
use crate::observability::events;
use crate::routing::pattern_match::match_topic_strings;
use crate::routing::subscription_edge::{shadow_topic_filter, SubscriptionEdge};
use crate::routing::topic_pattern::{InvalidPatternError, TopicPattern};

const COMPONENT: &str = "subscription_resolver";

/// Per-endpoint view of the explicit cloud and shadow bindings, shared
/// between function and device inputs.
struct ExplicitBindings<'a> {
    endpoint: Endpoint,
    to_cloud_topics: &'a [String],
    from_cloud_topics: &'a [String],
    connected_shadows: &'a [String],
}

/// Computes every routing edge for one group configuration.
///
/// Publisher/subscriber pairs are inferred by matching every declared output
/// topic against every declared input topic; explicit cloud bindings become
/// verbatim edges to/from the cloud endpoint; shadow bindings become a
/// bidirectional edge pair through the shadow service. Every declared topic
/// is validated when registered, so the first invalid declaration aborts the
/// whole resolution with no partial result, whether or not the topic ever
/// reaches the matcher.
///
/// Duplicate edges are preserved when overlapping topic declarations produce
/// them; dedupe is left to consumers that require uniqueness.
pub fn resolve_subscriptions(
    functions: &[FunctionBinding],
    devices: &[DeviceBinding],
) -> Result<Vec<SubscriptionEdge>, InvalidPatternError> {
    let mut outputs_by_topic: BTreeMap<String, Vec<Endpoint>> = BTreeMap::new();
    let mut inputs_by_topic: BTreeMap<String, Vec<Endpoint>> = BTreeMap::new();

    for function in functions {
        register_topics(&mut outputs_by_topic, &function.output_topics, function.endpoint())?;
        register_topics(&mut inputs_by_topic, &function.input_topics, function.endpoint())?;
    }

    for device in devices {
        register_topics(&mut outputs_by_topic, &device.output_topics, device.endpoint())?;
        register_topics(&mut inputs_by_topic, &device.input_topics, device.endpoint())?;
    }

    let mut edges = Vec::new();

    connect_publishers_and_subscribers(&outputs_by_topic, &inputs_by_topic, &mut edges)?;

    for bindings in explicit_bindings(functions, devices) {
        connect_to_cloud(&bindings, &mut edges)?;
        connect_to_shadows(&bindings, &mut edges)?;
    }

    Ok(edges)
}

/// Validates each declared topic before registering it, so malformed
/// declarations are rejected even when no counterpart ever subscribes.
fn register_topics(
    topic_map: &mut BTreeMap<String, Vec<Endpoint>>,
    topics: &[String],
    endpoint: Endpoint,
) -> Result<(), InvalidPatternError> {
    for topic in topics {
        if let Err(err) = TopicPattern::parse(topic) {
            warn!(
                event = events::RESOLUTION_ABORTED,
                component = COMPONENT,
                topic,
                endpoint = %endpoint,
                err = %err,
                "invalid topic declaration, rejecting the whole group configuration"
            );
            return Err(err);
        }
        topic_map
            .entry(topic.clone())
            .or_default()
            .push(endpoint.clone());
    }

    Ok(())
}

fn explicit_bindings<'a>(
    functions: &'a [FunctionBinding],
    devices: &'a [DeviceBinding],
) -> impl Iterator<Item = ExplicitBindings<'a>> {
    let function_bindings = functions.iter().map(|function| ExplicitBindings {
        endpoint: function.endpoint(),
        to_cloud_topics: &function.to_cloud_topics,
        from_cloud_topics: &function.from_cloud_topics,
        connected_shadows: &function.connected_shadows,
    });
    let device_bindings = devices.iter().map(|device| ExplicitBindings {
        endpoint: device.endpoint(),
        to_cloud_topics: &device.to_cloud_topics,
        from_cloud_topics: &device.from_cloud_topics,
        connected_shadows: &device.connected_shadows,
    });

    function_bindings.chain(device_bindings)
}

/// Cross-products every output topic against every input topic through the
/// pattern matcher and emits one edge per `(publisher, subscriber)` pair
/// where a joined filter exists.
fn connect_publishers_and_subscribers(
    outputs_by_topic: &BTreeMap<String, Vec<Endpoint>>,
    inputs_by_topic: &BTreeMap<String, Vec<Endpoint>>,
    edges: &mut Vec<SubscriptionEdge>,
) -> Result<(), InvalidPatternError> {
    for (output_topic, publishers) in outputs_by_topic {
        for (input_topic, subscribers) in inputs_by_topic {
            // Both sides were validated at registration.
            let Some(topic_filter) = match_topic_strings(output_topic, input_topic)? else {
                continue;
            };

            for publisher in publishers {
                for subscriber in subscribers {
                    info!(
                        event = events::CONNECTION_INFERRED,
                        component = COMPONENT,
                        source = %publisher,
                        target = %subscriber,
                        topic_filter = %topic_filter,
                        "connecting publisher to subscriber"
                    );
                    edges.push(SubscriptionEdge::new(
                        publisher.clone(),
                        subscriber.clone(),
                        topic_filter.clone(),
                    ));
                }
            }
        }
    }

    Ok(())
}

/// Explicit cloud bindings use the endpoint's declared topic strings as-is;
/// these are exact subscriptions, never inferred through the matcher.
fn connect_to_cloud(
    bindings: &ExplicitBindings<'_>,
    edges: &mut Vec<SubscriptionEdge>,
) -> Result<(), InvalidPatternError> {
    for topic in bindings.to_cloud_topics {
        let topic_filter = TopicPattern::parse(topic)?;
        info!(
            event = events::CLOUD_SUBSCRIPTION_CREATED,
            component = COMPONENT,
            source = %bindings.endpoint,
            target = %Endpoint::Cloud,
            topic_filter = %topic_filter,
            "creating subscription to cloud"
        );
        edges.push(SubscriptionEdge::new(
            bindings.endpoint.clone(),
            Endpoint::Cloud,
            topic_filter,
        ));
    }

    for topic in bindings.from_cloud_topics {
        let topic_filter = TopicPattern::parse(topic)?;
        info!(
            event = events::CLOUD_SUBSCRIPTION_CREATED,
            component = COMPONENT,
            source = %Endpoint::Cloud,
            target = %bindings.endpoint,
            topic_filter = %topic_filter,
            "creating subscription from cloud"
        );
        edges.push(SubscriptionEdge::new(
            Endpoint::Cloud,
            bindings.endpoint.clone(),
            topic_filter,
        ));
    }

    Ok(())
}

/// Each connected shadow yields one edge pair through the shadow service,
/// both directions using the fixed per-device shadow topic filter.
fn connect_to_shadows(
    bindings: &ExplicitBindings<'_>,
    edges: &mut Vec<SubscriptionEdge>,
) -> Result<(), InvalidPatternError> {
    for shadow_thing_name in bindings.connected_shadows {
        let topic_filter = shadow_topic_filter(shadow_thing_name)?;
        info!(
            event = events::SHADOW_SUBSCRIPTION_CREATED,
            component = COMPONENT,
            endpoint = %bindings.endpoint,
            shadow_thing_name,
            topic_filter = %topic_filter,
            "connecting endpoint to device shadow"
        );
        edges.push(SubscriptionEdge::new(
            bindings.endpoint.clone(),
            Endpoint::ShadowService,
            topic_filter.clone(),
        ));
        edges.push(SubscriptionEdge::new(
            Endpoint::ShadowService,
            bindings.endpoint.clone(),
            topic_filter,
        ));
    }

    Ok(())
}
