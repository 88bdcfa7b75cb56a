//! Advent of Code 2024 puzzle solutions with automatic registration
//!
//! Each day lives in [`solutions::year_2024`] and registers itself with the
//! solver framework through the `AutoRegisterSolver` derive macro. Link this
//! crate (`use aoc_2024 as _;`) to make the solvers visible to
//! `SolverRegistryBuilder::register_all_plugins`.

pub mod solutions;
pub mod utils;
