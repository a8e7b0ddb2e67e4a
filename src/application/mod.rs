//! Application layer: post repository, form and view state.

pub mod error;
pub mod form;
pub mod notify;
pub mod posts;
pub mod repos;
pub mod views;
