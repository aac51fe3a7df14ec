//! # eventbot
//!
//! Answers chat questions about time-bounded events ("when does the spring
//! fest end?") by alias lookup and keyword intent matching, and serves a
//! small admin surface for managing the event list.
//!
//! The query engine lives in [`engine`]; persistence, chat and HTTP are thin
//! wrappers around it.

pub mod admin;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod ports;
pub mod service;
pub mod storage;
pub mod telemetry;
