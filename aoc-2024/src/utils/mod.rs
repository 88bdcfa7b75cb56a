//! Helpers shared between days

pub mod grid;
pub mod parse;
