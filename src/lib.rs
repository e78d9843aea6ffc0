//! Meetup intake - multi-step form engine for the community site
//!
//! Declarative form schemas, per-field validation, a session controller with
//! a submission state machine, and the gateways that deliver submissions.

pub mod calendar;
pub mod catalog;
pub mod config;
pub mod forms;
pub mod gateway;
