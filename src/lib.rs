//! Guards the order of Scrum ceremonies.
//!
//! A [`ceremony::Scrum`] controller accepts planning, sprint, review and
//! retrospective proposals only in that cyclic order, and rejects any sprint
//! whose length differs from the first one accepted.

pub mod backlog;
pub mod ceremony;
pub mod config;
pub mod error;
pub mod script;
pub mod telemetry;
