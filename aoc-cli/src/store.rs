//! Local puzzle inputs and expected answers

use crate::error::StoreError;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File-based store for puzzle inputs
///
/// Directory structure: `{input_dir}/{year}_day{day:02}.txt`, with known
/// answers in `{input_dir}/{year}_day{day:02}.answers` as `part: answer` lines.
#[derive(Debug, Clone)]
pub struct InputStore {
    input_dir: PathBuf,
}

impl InputStore {
    pub fn new(input_dir: PathBuf) -> Self {
        Self { input_dir }
    }

    /// Get the input path for a specific year/day
    pub fn input_path(&self, year: u16, day: u8) -> PathBuf {
        self.input_dir.join(format!("{}_day{:02}.txt", year, day))
    }

    /// Get the expected-answers path for a specific year/day
    pub fn answers_path(&self, year: u16, day: u8) -> PathBuf {
        self.input_dir.join(format!("{}_day{:02}.answers", year, day))
    }

    /// Check if an input exists
    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.input_path(year, day).is_file()
    }

    pub fn read_input(&self, year: u16, day: u8) -> Result<String, StoreError> {
        read(&self.input_path(year, day))?.ok_or_else(|| StoreError::Missing(self.input_path(year, day)))
    }

    /// Known answers by part; empty when there is no answers file
    pub fn expected_answers(&self, year: u16, day: u8) -> Result<BTreeMap<u8, String>, StoreError> {
        let path = self.answers_path(year, day);
        match read(&path)? {
            Some(content) => parse_answers(&path, &content),
            None => Ok(BTreeMap::new()),
        }
    }
}

/// `Ok(None)` when the file does not exist
fn read(path: &Path) -> Result<Option<String>, StoreError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Parse `part: answer` lines; blank lines and `#` comments are skipped
fn parse_answers(path: &Path, content: &str) -> Result<BTreeMap<u8, String>, StoreError> {
    let mut answers = BTreeMap::new();
    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let error = |message: String| StoreError::Answers {
            path: path.to_path_buf(),
            line: idx + 1,
            message,
        };
        let (part, answer) = line
            .split_once(':')
            .ok_or_else(|| error(format!("expected `part: answer`, got {:?}", line)))?;
        let part: u8 = part
            .trim()
            .parse()
            .map_err(|_| error(format!("invalid part {:?}", part.trim())))?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(error(format!("empty answer for part {}", part)));
        }
        if answers.insert(part, answer.to_string()).is_some() {
            return Err(error(format!("part {} listed twice", part)));
        }
    }
    Ok(answers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_path_format() {
        let store = InputStore::new(PathBuf::from("inputs"));
        assert_eq!(store.input_path(2024, 1), PathBuf::from("inputs/2024_day01.txt"));
        assert_eq!(store.answers_path(2024, 25), PathBuf::from("inputs/2024_day25.answers"));
    }

    #[test]
    fn test_read_input() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf());

        assert!(!store.contains(2024, 1));
        assert!(matches!(store.read_input(2024, 1), Err(StoreError::Missing(_))));

        let input = "3   4\n4   3\n";
        fs::write(store.input_path(2024, 1), input).unwrap();
        assert!(store.contains(2024, 1));
        assert_eq!(store.read_input(2024, 1).unwrap(), input);
    }

    #[test]
    fn test_expected_answers() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf());
        assert!(store.expected_answers(2024, 7).unwrap().is_empty());

        fs::write(store.answers_path(2024, 7), "# real input\n1: 3749\n\n 2 : 11387 \n").unwrap();
        let answers = store.expected_answers(2024, 7).unwrap();
        assert_eq!(answers.get(&1).map(String::as_str), Some("3749"));
        assert_eq!(answers.get(&2).map(String::as_str), Some("11387"));
    }

    #[test]
    fn test_malformed_answers() {
        let path = Path::new("x.answers");
        for content in ["3749", "one: 3749", "1:", "1: 2\n1: 3"] {
            assert!(
                matches!(parse_answers(path, content), Err(StoreError::Answers { .. })),
                "{content:?}"
            );
        }

        match parse_answers(path, "1: 2\nbad") {
            Err(StoreError::Answers { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected {other:?}"),
        }
    }
}
