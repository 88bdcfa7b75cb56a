//! Puts streamed solver results back into (year, day, part) order
//!
//! Parallel execution delivers parts in any order. A result is printed once
//! every key before it has been printed; later ones wait in `pending`.

use crate::executor::SolverResult;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Clone, Copy)]
pub struct ResultKey {
    pub year: u16,
    pub day: u8,
    pub part: u8,
}

impl From<&SolverResult> for ResultKey {
    fn from(r: &SolverResult) -> Self {
        Self {
            year: r.year,
            day: r.day,
            part: r.part,
        }
    }
}

pub struct ResultAggregator {
    /// Keys not yet emitted
    expected: BTreeSet<ResultKey>,
    /// Arrived early, waiting for an earlier key
    pending: BTreeMap<ResultKey, SolverResult>,
}

impl ResultAggregator {
    pub fn new(expected_keys: Vec<ResultKey>) -> Self {
        Self {
            expected: expected_keys.into_iter().collect(),
            pending: BTreeMap::new(),
        }
    }

    /// Accept one result; returns the run of results that can now be emitted
    pub fn add(&mut self, result: SolverResult) -> Vec<SolverResult> {
        self.pending.insert(ResultKey::from(&result), result);

        let mut ready = Vec::new();
        while let Some(&next) = self.expected.first() {
            let Some(result) = self.pending.remove(&next) else {
                break;
            };
            self.expected.remove(&next);
            ready.push(result);
        }
        ready
    }

    /// Everything still waiting, in key order
    pub fn drain(&mut self) -> Vec<SolverResult> {
        std::mem::take(&mut self.pending).into_values().collect()
    }

    pub fn is_complete(&self) -> bool {
        self.expected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn make_result(year: u16, day: u8, part: u8) -> SolverResult {
        SolverResult {
            year,
            day,
            part,
            answer: Ok(format!("{}_{}_{}", year, day, part)),
            parse_duration: Some(TimeDelta::milliseconds(5)),
            solve_duration: TimeDelta::milliseconds(10),
            verdict: None,
        }
    }

    #[test]
    fn test_in_order_results() {
        let keys = vec![
            ResultKey {
                year: 2024,
                day: 1,
                part: 1,
            },
            ResultKey {
                year: 2024,
                day: 1,
                part: 2,
            },
        ];
        let mut agg = ResultAggregator::new(keys);

        // Add in order
        let ready = agg.add(make_result(2024, 1, 1));
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].part, 1);

        let ready = agg.add(make_result(2024, 1, 2));
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].part, 2);

        assert!(agg.is_complete());
    }

    #[test]
    fn test_out_of_order_results() {
        let keys = vec![
            ResultKey {
                year: 2024,
                day: 1,
                part: 1,
            },
            ResultKey {
                year: 2024,
                day: 1,
                part: 2,
            },
            ResultKey {
                year: 2024,
                day: 2,
                part: 1,
            },
        ];
        let mut agg = ResultAggregator::new(keys);

        // Add out of order - part 2 before part 1
        let ready = agg.add(make_result(2024, 1, 2));
        assert!(ready.is_empty()); // Waiting for part 1

        let ready = agg.add(make_result(2024, 2, 1));
        assert!(ready.is_empty()); // Still waiting for 2024/1/1

        // Now add the missing one
        let ready = agg.add(make_result(2024, 1, 1));
        assert_eq!(ready.len(), 3); // All three should be ready now
        assert_eq!(ready[0].part, 1);
        assert_eq!(ready[0].day, 1);
        assert_eq!(ready[1].part, 2);
        assert_eq!(ready[1].day, 1);
        assert_eq!(ready[2].part, 1);
        assert_eq!(ready[2].day, 2);
    }

    #[test]
    fn test_drain_remaining() {
        let keys = vec![
            ResultKey {
                year: 2024,
                day: 1,
                part: 1,
            },
            ResultKey {
                year: 2024,
                day: 1,
                part: 2,
            },
        ];
        let mut agg = ResultAggregator::new(keys);

        // Add only part 2 (out of order)
        agg.add(make_result(2024, 1, 2));

        // Drain should return it
        let remaining = agg.drain();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].part, 2);
    }

    #[test]
    fn test_missing_key_blocks_later_results() {
        let keys = vec![
            ResultKey {
                year: 2024,
                day: 1,
                part: 1,
            },
            ResultKey {
                year: 2024,
                day: 2,
                part: 1,
            },
        ];
        let mut agg = ResultAggregator::new(keys);

        assert!(agg.add(make_result(2024, 2, 1)).is_empty());
        assert!(!agg.is_complete());
        assert_eq!(agg.drain().len(), 1);
    }
}
