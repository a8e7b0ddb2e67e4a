//! Presentation layer: text views rendered from repository state.

pub mod views;
