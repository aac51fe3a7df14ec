//! Query resolution engine.
//!
//! Leaf-first: [`normalize`] canonicalizes text, [`alias`] finds the event,
//! [`intent`] classifies the question, [`activity`] evaluates date windows,
//! [`compose`] fills reply templates, and [`resolver`] sequences them.

pub mod activity;
pub mod alias;
pub mod compose;
pub mod intent;
pub mod normalize;
pub mod resolver;

pub use activity::is_active;
pub use alias::find_event;
pub use compose::compose;
pub use intent::detect_intent;
pub use normalize::normalize;
pub use resolver::{Resolution, Resolver};
