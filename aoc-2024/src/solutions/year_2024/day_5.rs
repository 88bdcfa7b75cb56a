use crate::utils::parse::{number, numbers, parse_numbered, sections};
use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::{HashMap, HashSet};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 5, tags = ["2024", "day05", "ordering"])]
pub struct Solver;

/// Page -> pages it must be printed before
type Rules = HashMap<u32, HashSet<u32>>;

#[derive(Debug)]
pub struct SharedData {
    rules: Rules,
    updates: Vec<Vec<u32>>,
    /// Per update: already correctly ordered? Filled by whichever part runs first.
    ordered: Option<Vec<bool>>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut sections = sections(input).into_iter();
        let (Some(rule_lines), Some(update_lines)) = (sections.next(), sections.next()) else {
            return Err(ParseError::MissingData(
                "expected a rules section and an updates section separated by a blank line"
                    .to_string(),
            ));
        };
        if sections.next().is_some() {
            return Err(ParseError::InvalidFormat(
                "unexpected third section after updates".to_string(),
            ));
        }

        let pairs = parse_numbered(rule_lines, |line| {
            let (before, after) = line
                .split_once('|')
                .ok_or_else(|| anyhow!("expected a rule like 47|53, got {:?}", line))?;
            Ok((number::<u32>(before)?, number::<u32>(after)?))
        })?;

        let mut rules = Rules::new();
        for (before, after) in pairs {
            rules.entry(before).or_default().insert(after);
        }

        let updates = parse_numbered(update_lines, |line| {
            let pages = numbers::<u32>(line.split(','))?;
            if pages.is_empty() {
                return Err(anyhow!("empty update"));
            }
            Ok(pages)
        })?;

        Ok(SharedData {
            rules,
            updates,
            ordered: None,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let ordered = classify(shared).to_vec();
        let total: u64 = shared
            .updates
            .iter()
            .zip(ordered)
            .filter(|(_, ordered)| *ordered)
            .map(|(update, _)| middle_page(update))
            .sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let ordered = classify(shared).to_vec();
        let mut total = 0u64;
        for (update, _) in shared.updates.iter().zip(ordered).filter(|(_, ordered)| !ordered) {
            let fixed = reorder(&shared.rules, update)?;
            total += middle_page(&fixed);
        }
        Ok(total.to_string())
    }
}

fn classify(shared: &mut SharedData) -> &[bool] {
    shared.ordered.get_or_insert_with(|| {
        shared
            .updates
            .iter()
            .map(|update| is_ordered(&shared.rules, update))
            .collect()
    })
}

fn must_precede(rules: &Rules, before: u32, after: u32) -> bool {
    rules.get(&before).is_some_and(|pages| pages.contains(&after))
}

/// No page appears after a page it must precede
fn is_ordered(rules: &Rules, update: &[u32]) -> bool {
    update.iter().enumerate().all(|(i, &page)| {
        update[..i]
            .iter()
            .all(|&earlier| !must_precede(rules, page, earlier))
    })
}

/// Reorder `update` so every applicable rule holds
///
/// Topological sort restricted to the update's pages; among pages that are
/// free to go next, the one that appeared first in `update` wins.
fn reorder(rules: &Rules, update: &[u32]) -> Result<Vec<u32>, SolveError> {
    let n = update.len();
    let mut blockers: Vec<usize> = (0..n)
        .map(|j| {
            (0..n)
                .filter(|&i| i != j && must_precede(rules, update[i], update[j]))
                .count()
        })
        .collect();
    let mut placed = vec![false; n];
    let mut result = Vec::with_capacity(n);

    while result.len() < n {
        let next = (0..n)
            .find(|&j| !placed[j] && blockers[j] == 0)
            .ok_or_else(|| {
                SolveError::SolveFailed(
                    format!("ordering rules form a cycle within update {:?}", update).into(),
                )
            })?;

        placed[next] = true;
        result.push(update[next]);
        for j in 0..n {
            if !placed[j] && j != next && must_precede(rules, update[next], update[j]) {
                blockers[j] -= 1;
            }
        }
    }

    Ok(result)
}

fn middle_page(update: &[u32]) -> u64 {
    u64::from(update[update.len() / 2])
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SAMPLE: &str = "
        47|53
        97|13
        97|61
        97|47
        75|29
        61|13
        75|53
        29|13
        97|29
        53|29
        61|53
        97|53
        61|29
        47|13
        75|47
        97|75
        47|61
        75|61
        47|29
        75|13
        53|13

        75,47,61,53,29
        97,61,53,29,13
        75,29,13
        75,97,47,61,53
        61,13,29
        97,13,75,29,47
    ";

    fn solve(input: &str, part: u8) -> Result<String, SolveError> {
        let mut shared = Solver::parse(input).unwrap();
        Solver::solve_part(&mut shared, part)
    }

    #[test]
    fn test_sample_part1() {
        assert_eq!(solve(SAMPLE, 1).unwrap(), "143");
    }

    #[test]
    fn test_sample_part2() {
        assert_eq!(solve(SAMPLE, 2).unwrap(), "123");
    }

    #[test]
    fn test_sample_reorderings() {
        let shared = Solver::parse(SAMPLE).unwrap();
        let fixed: Vec<_> = shared
            .updates
            .iter()
            .filter(|u| !is_ordered(&shared.rules, u))
            .map(|u| reorder(&shared.rules, u).unwrap())
            .collect();
        assert_eq!(
            fixed,
            vec![
                vec![97, 75, 47, 61, 53],
                vec![61, 29, 13],
                vec![97, 75, 47, 29, 13],
            ]
        );
    }

    #[test]
    fn test_parts_share_classification() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert!(shared.ordered.is_none());
        Solver::solve_part(&mut shared, 2).unwrap();
        assert_eq!(
            shared.ordered.as_deref(),
            Some(&[true, true, true, false, false, false][..])
        );
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "143");
    }

    #[test]
    fn test_unconstrained_pages_keep_their_order() {
        let shared = Solver::parse("3|1\n\n1,2,3").unwrap();
        assert_eq!(reorder(&shared.rules, &[1, 2, 3]).unwrap(), vec![2, 3, 1]);
    }

    #[test]
    fn test_cycle_is_an_error() {
        let result = solve("1|2\n2|1\n\n1,2\n", 2);
        assert!(matches!(result, Err(SolveError::SolveFailed(_))));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Solver::parse("1|2\n3|4\n"), Err(ParseError::MissingData(_))));
        assert!(matches!(Solver::parse("1-2\n\n1,2"), Err(ParseError::InvalidFormat(_))));
        assert!(matches!(Solver::parse("1|2\n\n1,x"), Err(ParseError::InvalidFormat(_))));
        assert!(matches!(Solver::parse("1|2\n\n1,2\n\n3|4"), Err(ParseError::InvalidFormat(_))));
    }
}
