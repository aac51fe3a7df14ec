//! Query resolution span helpers.
//!
//! One span per incoming question. The outcome is recorded once the
//! resolver reaches a terminal state.

use tracing::Span;

/// Start a span for resolving one question.
///
/// `query.outcome`, `query.event` and `query.intent` are declared empty and
/// filled in by [`record_outcome`] and [`record_match`].
pub fn start_query_span(question_chars: usize) -> Span {
    tracing::info_span!(
        "query.resolve",
        "query.chars" = question_chars,
        "query.outcome" = tracing::field::Empty,
        "query.event" = tracing::field::Empty,
        "query.intent" = tracing::field::Empty,
    )
}

/// Record which event and intent a question resolved to.
pub fn record_match(span: &Span, event: &str, intent: Option<&str>) {
    span.record("query.event", event);
    if let Some(intent) = intent {
        span.record("query.intent", intent);
    }
}

/// Record the terminal outcome on the span and emit a debug event in it.
pub fn record_outcome(span: &Span, outcome: &str) {
    span.record("query.outcome", outcome);
    span.in_scope(|| {
        tracing::debug!(outcome = outcome, "query_resolved");
    });
}
