//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use crate::store::InputStore;
use aoc_solver::{DynSolver, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;

/// Outcome of comparing an answer with the known answer for that part
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Matches,
    Mismatch { expected: String },
}

impl Verdict {
    fn check(answer: &str, expected: &str) -> Self {
        if answer == expected {
            Verdict::Matches
        } else {
            Verdict::Mismatch {
                expected: expected.to_string(),
            }
        }
    }
}

/// Result from a single solver execution
#[derive(Debug)]
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, ArcExecutorError>,
    /// `None` when the input never reached the parser
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: TimeDelta,
    /// `None` when no answer is known for this part
    pub verdict: Option<Verdict>,
}

impl SolverResult {
    fn failed(year: u16, day: u8, part: u8, error: ArcExecutorError) -> Self {
        Self {
            year,
            day,
            part,
            answer: Err(error),
            parse_duration: None,
            solve_duration: TimeDelta::zero(),
            verdict: None,
        }
    }

    pub fn is_mismatch(&self) -> bool {
        matches!(self.verdict, Some(Verdict::Mismatch { .. }))
    }
}

/// Work item representing a solver to execute
#[derive(Debug, Clone)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Input text and known answers for one work item
struct DayInput {
    text: String,
    expected: BTreeMap<u8, String>,
}

/// Parallel executor for running solvers
pub struct Executor {
    sync_executor_config: SyncExecutorConfig,
    thread_pool: rayon::ThreadPool,
}

pub struct SyncExecutorConfig {
    registry: SolverRegistry,
    store: InputStore,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            sync_executor_config: SyncExecutorConfig {
                registry,
                store: InputStore::new(config.input_dir.clone()),
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    pub fn store(&self) -> &InputStore {
        &self.sync_executor_config.store
    }

    /// Collect work items by filtering from registry metadata
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let cfg = &self.sync_executor_config;
        cfg.registry
            .storage()
            .iter_info()
            .filter(|info| cfg.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| cfg.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: self.filter_parts(info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Filter parts based on config.part_filter and solver's max parts
    #[allow(clippy::reversed_empty_ranges)]
    fn filter_parts(&self, max_parts: u8) -> RangeInclusive<u8> {
        match self.sync_executor_config.part_filter {
            Some(p) if p <= max_parts => p..=p,
            Some(_) => 1..=0,
            None => 1..=max_parts,
        }
    }

    /// Execute all work items and send results to channel
    ///
    /// Per-part failures travel as error results; the returned error only
    /// covers failures of the executor itself.
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();
        tracing::debug!(
            count = work_items.len(),
            mode = ?self.sync_executor_config.parallelize_by,
            "executing work items"
        );

        match self.sync_executor_config.parallelize_by {
            ParallelizeBy::Sequential => {
                let mut collected_error: Option<ArcExecutorError> = None;
                for work in work_items {
                    if let Err(e) = run_work_item(&work, &tx, &self.sync_executor_config) {
                        collected_error = Some(ArcExecutorError::combine_opt(collected_error, e));
                    }
                }
                collected_error.map_or(Ok(()), Err)
            }
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();

                self.execute_parallel_grouped(by_year, &tx)
            }
            // Part additionally splits each work item in run_work_item
            ParallelizeBy::Day | ParallelizeBy::Part => self.execute_parallel(work_items, &tx),
        }
    }

    /// Execute work items in parallel, collecting errors
    fn execute_parallel(
        &self,
        work_items: Vec<WorkItem>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let sync_executor_config = &self.sync_executor_config;

        self.thread_pool.install(|| {
            work_items
                .into_par_iter()
                .map(|work| run_work_item(&work, tx, sync_executor_config).err())
                .reduce_with(merge_errors)
                .unwrap_or_default()
                .map_or(Ok(()), Err)
        })
    }

    /// Execute grouped work items in parallel (for year-level parallelism)
    fn execute_parallel_grouped(
        &self,
        groups: Vec<Vec<WorkItem>>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let sync_executor_config = &self.sync_executor_config;

        self.thread_pool.install(|| {
            groups
                .into_par_iter()
                .map(|items| {
                    let mut err = None;
                    for work in items {
                        if let Err(e) = run_work_item(&work, tx, sync_executor_config) {
                            err = Some(ArcExecutorError::combine_opt(err, e))
                        }
                    }
                    err
                })
                .reduce_with(merge_errors)
                .unwrap_or_default()
                .map_or(Ok(()), Err)
        })
    }
}

fn merge_errors(
    first: Option<ArcExecutorError>,
    second: Option<ArcExecutorError>,
) -> Option<ArcExecutorError> {
    match (first, second) {
        (Some(first), Some(second)) => Some(ArcExecutorError::combine(first, second)),
        (first, second) => first.or(second),
    }
}

/// Load the input and run every part of one work item
fn run_work_item(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    sync_executor_config: &SyncExecutorConfig,
) -> Result<(), ArcExecutorError> {
    let input = match load_input(work, &sync_executor_config.store) {
        Ok(input) => input,
        Err(e) => {
            tracing::warn!(year = work.year, day = work.day, "{}", e);
            let error = ArcExecutorError::from(e);
            for part in work.parts.clone() {
                send(tx, SolverResult::failed(work.year, work.day, part, error.clone()))?;
            }
            return Ok(());
        }
    };

    if matches!(sync_executor_config.parallelize_by, ParallelizeBy::Part) {
        run_parts_parallel(work, &input, tx, &sync_executor_config.registry)
    } else {
        run_parts_sequential(work, &input, tx, &sync_executor_config.registry)
    }
}

fn load_input(work: &WorkItem, store: &InputStore) -> Result<DayInput, ExecutorError> {
    let (year, day) = (work.year, work.day);
    let wrap = |source| ExecutorError::Input { year, day, source };

    let text = store.read_input(year, day).map_err(wrap)?;
    let expected = store.expected_answers(year, day).map_err(wrap)?;
    tracing::debug!(
        year,
        day,
        bytes = text.len(),
        known_answers = expected.len(),
        "loaded input"
    );
    Ok(DayInput { text, expected })
}

/// Solve parts in parallel, each on its own parse, emitting results in part order
fn run_parts_parallel(
    work: &WorkItem,
    input: &DayInput,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let (result_tx, result_rx) = std::sync::mpsc::channel();
    let (year, day) = (work.year, work.day);

    work.parts
        .clone()
        .into_par_iter()
        .for_each_with(result_tx, |rtx, part| {
            let result = match registry.create_solver(year, day, &input.text) {
                Ok(mut solver) => solve_part(year, day, part, &mut *solver, &input.expected),
                Err(e) => SolverResult::failed(year, day, part, ExecutorError::from(e).into()),
            };
            rtx.send(result).ok();
        });

    let mut buffer: Vec<Option<SolverResult>> =
        std::iter::repeat_with(|| None).take(work.parts.len()).collect();
    let start_part = *work.parts.start();
    let mut next_part = start_part;

    for result in result_rx {
        let idx = (result.part - start_part) as usize;
        if idx < buffer.len() {
            buffer[idx] = Some(result);
        }
        while let Some(result) = buffer
            .get_mut((next_part - start_part) as usize)
            .and_then(Option::take)
        {
            send(tx, result)?;
            next_part += 1;
        }
    }
    Ok(())
}

/// Parse once and solve parts in order on a scoped thread, forwarding results as they arrive
fn run_parts_sequential(
    work: &WorkItem,
    input: &DayInput,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let (solve_tx, solve_rx) = std::sync::mpsc::channel();
    let (year, day) = (work.year, work.day);
    let parts = work.parts.clone();

    std::thread::scope(|s| {
        s.spawn(move || {
            let mut solver = match registry.create_solver(year, day, &input.text) {
                Ok(solver) => solver,
                Err(e) => {
                    let error = ArcExecutorError::from(ExecutorError::from(e));
                    for part in parts {
                        if solve_tx
                            .send(SolverResult::failed(year, day, part, error.clone()))
                            .is_err()
                        {
                            break;
                        }
                    }
                    return;
                }
            };
            for part in parts {
                if solve_tx
                    .send(solve_part(year, day, part, &mut *solver, &input.expected))
                    .is_err()
                {
                    break;
                }
            }
        });

        for result in solve_rx {
            send(tx, result)?;
        }
        Ok(())
    })
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ExecutorError::ChannelSend.into())
}

/// Solve a single part and check it against the known answer
fn solve_part(
    year: u16,
    day: u8,
    part: u8,
    solver: &mut dyn DynSolver,
    expected: &BTreeMap<u8, String>,
) -> SolverResult {
    tracing::debug!(year, day, part, "solving");

    let (answer, solve_duration) = match solver.solve(part) {
        Ok(solved) => {
            let duration = solved.duration();
            (Ok(solved.answer), duration)
        }
        Err(e) => {
            tracing::warn!(year, day, part, error = %e, "solve failed");
            (
                Err(ExecutorError::from(aoc_solver::SolverError::from(e)).into()),
                TimeDelta::zero(),
            )
        }
    };

    let verdict = match (&answer, expected.get(&part)) {
        (Ok(answer), Some(expected)) => Some(Verdict::check(answer, expected)),
        _ => None,
    };
    if let Some(Verdict::Mismatch { expected }) = &verdict {
        tracing::warn!(year, day, part, %expected, "answer does not match the expected answer");
    }

    SolverResult {
        year,
        day,
        part,
        answer,
        parse_duration: Some(solver.parse_duration()),
        solve_duration,
        verdict,
    }
}
