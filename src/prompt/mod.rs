//! Prompt transformation helpers.
pub mod transformer;
