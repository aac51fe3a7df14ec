//! Metric instrument factories for eventbot.
//!
//! Uses the OTel Meter API with the globally-registered `MeterProvider`.
//! Without a provider the instruments are no-ops.

use opentelemetry::metrics::{Counter, Histogram, Meter};

fn meter() -> Meter {
    opentelemetry::global::meter("eventbot")
}

/// Counter: questions resolved.
/// Labels: `outcome` ("answered" | "active_listing" | "clarify" | "silent" | "error").
pub fn queries_resolved() -> Counter<u64> {
    meter()
        .u64_counter("eventbot.query.resolved")
        .with_description("Number of questions resolved, by outcome")
        .build()
}

/// Counter: answered questions by intent.
/// Labels: `intent`.
pub fn intents_answered() -> Counter<u64> {
    meter()
        .u64_counter("eventbot.query.intents")
        .with_description("Number of answered questions, by intent")
        .build()
}

/// Counter: catalog mutations.
/// Labels: `operation` ("add" | "update" | "remove").
pub fn catalog_operations() -> Counter<u64> {
    meter()
        .u64_counter("eventbot.catalog.operations")
        .with_description("Number of event catalog mutations")
        .build()
}

/// Histogram: resolution duration in microseconds.
pub fn resolve_duration_us() -> Histogram<f64> {
    meter()
        .f64_histogram("eventbot.query.duration_us")
        .with_description("Question resolution duration in microseconds")
        .with_unit("us")
        .build()
}
