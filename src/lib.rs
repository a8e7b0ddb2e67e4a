//! Storyline: a small blog desk over a hosted PostgREST table.
//!
//! The crate is split the usual way: `domain` holds pure post logic,
//! `application` the repository and view state machines, `infra` the HTTP
//! store and terminal adapters, and `presentation` the text views.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
