//! Built-in attribute descriptions for the JCA resources the console edits.
//!
//! A connected console would fetch these from the server; the demo and the
//! end-to-end tests use this fixed set.

use super::templates::{
    TRACER_TEMPLATE, WORKMANAGER_LRT_TEMPLATE, WORKMANAGER_SRT_TEMPLATE, WORKMANAGER_TEMPLATE,
};
use mgmt_framework::{AddressTemplate, AttributeDescription, Metadata, StaticMetadataRegistry};
use serde_json::json;

fn attribute(description: &str) -> AttributeDescription {
    AttributeDescription {
        description: description.to_string(),
        ..Default::default()
    }
}

pub fn thread_pool_metadata() -> Metadata {
    Metadata::default()
        .with_attribute(
            "max-threads",
            AttributeDescription {
                required: true,
                nillable: false,
                ..attribute("The maximum thread pool size.")
            },
        )
        .with_attribute(
            "queue-length",
            AttributeDescription {
                required: true,
                nillable: false,
                ..attribute("The queue length.")
            },
        )
        .with_attribute(
            "thread-factory",
            attribute("Specifies the name of a specific thread factory to use to create worker threads."),
        )
        .with_attribute(
            "allow-core-timeout",
            AttributeDescription {
                default: Some(json!(false)),
                ..attribute("Whether core threads may time out.")
            },
        )
        .with_attribute(
            "core-threads",
            attribute("The core thread pool size which is smaller than the maximum pool size."),
        )
        .with_attribute(
            "keepalive-time",
            AttributeDescription {
                default: Some(json!({"time": 10, "unit": "SECONDS"})),
                ..attribute("Used to specify the amount of time that pool threads should be kept running when idle.")
            },
        )
}

pub fn workmanager_metadata() -> Metadata {
    Metadata::default()
        .with_attribute(
            "name",
            AttributeDescription {
                required: true,
                nillable: false,
                ..attribute("The name of the work manager.")
            },
        )
        .with_attribute(
            "elytron-enabled",
            AttributeDescription {
                default: Some(json!(false)),
                ..attribute("Enables Elytron security for this work manager.")
            },
        )
}

pub fn tracer_metadata() -> Metadata {
    Metadata::default().with_attribute(
        "enabled",
        AttributeDescription {
            default: Some(json!(false)),
            ..attribute("Enables the tracer.")
        },
    )
}

/// Registry with every description above.
pub fn jca_registry() -> StaticMetadataRegistry {
    StaticMetadataRegistry::new()
        .register(&AddressTemplate::of(WORKMANAGER_TEMPLATE), workmanager_metadata())
        .register(&AddressTemplate::of(WORKMANAGER_LRT_TEMPLATE), thread_pool_metadata())
        .register(&AddressTemplate::of(WORKMANAGER_SRT_TEMPLATE), thread_pool_metadata())
        .register(&AddressTemplate::of(TRACER_TEMPLATE), tracer_metadata())
}
