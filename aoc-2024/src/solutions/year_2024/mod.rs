//! Advent of Code 2024

pub mod day_1;
pub mod day_2;
pub mod day_4;
pub mod day_5;
pub mod day_6;
pub mod day_7;
