//! Query resolution: one question in, one reply (or silence) out.
//!
//! The resolver is stateless. Each call receives a snapshot of the event
//! collection and reads the clock at most once.

use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDateTime;
use opentelemetry::KeyValue;

use crate::error::Result;
use crate::model::{Event, IntentKind};
use crate::ports::{ClockPort, RandomPort, SystemClock, SystemRandom};
use crate::telemetry::{metrics, query};

use super::activity::is_active;
use super::alias::find_event;
use super::compose::{
    ACTIVE_LISTING_HEADER, CLARIFY_REPLY, NO_ACTIVE_REPLY, answer_for, compose,
};
use super::intent::detect_intent;
use super::normalize::normalize;

/// Phrase that turns any question into the global "what's running" listing.
pub const ACTIVE_LISTING_TRIGGER: &str = "今やってる";

/// Terminal state of one resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// An event and an intent matched.
    Answered {
        event: &'a Event,
        intent: IntentKind,
        answer: String,
        reply: String,
    },
    /// The global listing of running events.
    ActiveListing { names: Vec<&'a str>, reply: String },
    /// An event matched but the question named no known aspect of it.
    Clarify { event: &'a Event, reply: String },
    /// Nothing in the question refers to a known event.
    Silent,
}

impl Resolution<'_> {
    /// The text to send back, if any.
    pub fn reply(&self) -> Option<&str> {
        match self {
            Resolution::Answered { reply, .. }
            | Resolution::ActiveListing { reply, .. }
            | Resolution::Clarify { reply, .. } => Some(reply),
            Resolution::Silent => None,
        }
    }

    /// Short label used in spans and metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            Resolution::Answered { .. } => "answered",
            Resolution::ActiveListing { .. } => "active_listing",
            Resolution::Clarify { .. } => "clarify",
            Resolution::Silent => "silent",
        }
    }
}

/// Resolves questions against an event snapshot.
#[derive(Clone)]
pub struct Resolver {
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock::new()), Arc::new(SystemRandom::new()))
    }
}

impl Resolver {
    pub fn new(clock: Arc<dyn ClockPort>, random: Arc<dyn RandomPort>) -> Self {
        Self { clock, random }
    }

    /// Resolve `text` using the injected clock for "now".
    pub fn resolve<'a>(&self, text: &str, events: &'a [Event]) -> Result<Resolution<'a>> {
        self.resolve_at(text, events, self.clock.now())
    }

    /// Resolve `text` as of `now`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::MalformedDate`] when a date window has
    /// to be evaluated and an event's `start` or `end` does not parse.
    pub fn resolve_at<'a>(
        &self,
        text: &str,
        events: &'a [Event],
        now: NaiveDateTime,
    ) -> Result<Resolution<'a>> {
        let span = query::start_query_span(text.chars().count());
        let started = Instant::now();

        let result = span.in_scope(|| self.run(&span, text, events, now));

        let outcome = match &result {
            Ok(resolution) => resolution.outcome(),
            Err(e) => {
                span.in_scope(|| tracing::warn!(error = %e, "query resolution failed"));
                "error"
            }
        };
        query::record_outcome(&span, outcome);
        metrics::queries_resolved().add(1, &[KeyValue::new("outcome", outcome)]);
        metrics::resolve_duration_us().record(started.elapsed().as_secs_f64() * 1e6, &[]);

        result
    }

    fn run<'a>(
        &self,
        span: &tracing::Span,
        text: &str,
        events: &'a [Event],
        now: NaiveDateTime,
    ) -> Result<Resolution<'a>> {
        let question = normalize(text);

        if question.contains(ACTIVE_LISTING_TRIGGER) {
            return active_listing(events, now);
        }

        let Some(event) = find_event(&question, events) else {
            return Ok(Resolution::Silent);
        };

        let Some(intent) = detect_intent(&question) else {
            query::record_match(span, &event.name, None);
            return Ok(Resolution::Clarify {
                event,
                reply: CLARIFY_REPLY.to_string(),
            });
        };
        query::record_match(span, &event.name, Some(intent.to_string().as_str()));

        let answer = answer_for(event, intent, now)?;
        let reply = compose(event, intent, &answer, self.random.as_ref());
        metrics::intents_answered().add(1, &[KeyValue::new("intent", intent.to_string())]);

        Ok(Resolution::Answered {
            event,
            intent,
            answer,
            reply,
        })
    }
}

/// Names of every event running at `now`, in collection order.
pub fn active_names(events: &[Event], now: NaiveDateTime) -> Result<Vec<&str>> {
    let mut names = Vec::new();
    for event in events {
        if is_active(event, now)? {
            names.push(event.name.as_str());
        }
    }
    Ok(names)
}

fn active_listing(events: &[Event], now: NaiveDateTime) -> Result<Resolution<'_>> {
    let names = active_names(events, now)?;
    let reply = if names.is_empty() {
        NO_ACTIVE_REPLY.to_string()
    } else {
        format!("{ACTIVE_LISTING_HEADER}\n{}", names.join("\n"))
    };
    Ok(Resolution::ActiveListing { names, reply })
}
