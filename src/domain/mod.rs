//! Domain types for blog posts and their submission rules.

pub mod entities;
pub mod error;
pub mod posts;
pub mod validation;
