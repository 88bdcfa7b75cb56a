//! Line-oriented parsing with line numbers in error messages
//!
//! Day parsers build errors with `anyhow` and convert them into
//! [`ParseError::InvalidFormat`] once, at the `AocParser` boundary.

use anyhow::{anyhow, Context};
use aoc_solver::ParseError;
use std::str::FromStr;

/// Trimmed, non-blank lines with their 1-based line numbers
pub fn numbered_lines(input: &str) -> impl Iterator<Item = (usize, &str)> {
    input
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

/// Blank-line separated sections of trimmed, numbered lines
///
/// Runs of blank lines count as one separator; leading and trailing blank
/// lines produce no empty sections.
pub fn sections(input: &str) -> Vec<Vec<(usize, &str)>> {
    let mut result = Vec::new();
    let mut current = Vec::new();
    for (idx, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            if !current.is_empty() {
                result.push(std::mem::take(&mut current));
            }
        } else {
            current.push((idx + 1, line));
        }
    }
    if !current.is_empty() {
        result.push(current);
    }
    result
}

/// Parse every non-blank line, failing on the first bad line
pub fn parse_lines<T, F>(input: &str, parse_line: F) -> Result<Vec<T>, ParseError>
where
    F: FnMut(&str) -> anyhow::Result<T>,
{
    parse_numbered(numbered_lines(input), parse_line)
}

/// Parse already numbered lines, failing on the first bad line
pub fn parse_numbered<'a, T, F>(
    lines: impl IntoIterator<Item = (usize, &'a str)>,
    mut parse_line: F,
) -> Result<Vec<T>, ParseError>
where
    F: FnMut(&str) -> anyhow::Result<T>,
{
    lines
        .into_iter()
        .map(|(line_no, line)| parse_line(line).map_err(|e| anyhow!("(line {}) {:#}", line_no, e)))
        .collect::<anyhow::Result<Vec<_>>>()
        .map_err(to_parse_error)
}

/// Parse one numeric token
pub fn number<T>(token: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let token = token.trim();
    token
        .parse::<T>()
        .with_context(|| format!("invalid number {:?}", token))
}

/// Parse a sequence of numeric tokens
pub fn numbers<'a, T>(tokens: impl IntoIterator<Item = &'a str>) -> anyhow::Result<Vec<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    tokens.into_iter().map(number).collect()
}

pub fn to_parse_error(error: anyhow::Error) -> ParseError {
    ParseError::InvalidFormat(format!("{:#}", error))
}
