//! Parts that share parsed data and intermediate results
//!
//! Part 1 sorts the readings once and caches them; part 2 reuses the cache
//! when part 1 already ran, and builds it itself otherwise.
//!
//! Run with: cargo run -p aoc-solver --example shared_parts

use aoc_solver::{
    AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError,
    SolverRegistryBuilder,
};

#[derive(Debug)]
pub struct Readings<'a> {
    /// Raw lines, borrowed from the input
    lines: Vec<&'a str>,
    sorted: Option<Vec<i64>>,
}

impl Readings<'_> {
    fn sorted(&mut self) -> Result<&[i64], SolveError> {
        if self.sorted.is_none() {
            let mut values = self
                .lines
                .iter()
                .map(|line| line.parse::<i64>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| SolveError::SolveFailed(Box::new(e)))?;
            values.sort_unstable();
            self.sorted = Some(values);
        }
        Ok(self.sorted.as_deref().unwrap_or_default())
    }
}

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2015, day = 1, tags = ["demo"])]
pub struct Thermometer;

impl AocParser for Thermometer {
    type SharedData<'a> = Readings<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let lines: Vec<&str> = input.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        if lines.is_empty() {
            return Err(ParseError::MissingData("no readings".to_string()));
        }
        Ok(Readings {
            lines,
            sorted: None,
        })
    }
}

/// Spread between the coldest and warmest reading
impl PartSolver<1> for Thermometer {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sorted = shared.sorted()?;
        match (sorted.first(), sorted.last()) {
            (Some(low), Some(high)) => Ok((high - low).to_string()),
            _ => Err(SolveError::SolveFailed("no readings".into())),
        }
    }
}

/// Median reading
impl PartSolver<2> for Thermometer {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sorted = shared.sorted()?;
        Ok(sorted[sorted.len() / 2].to_string())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"demo"))?
        .build();

    let input = "12\n-3\n7\n21\n4\n";
    let mut solver = registry.create_solver(2015, 1, input)?;
    println!("parsed in {}", solver.parse_duration());

    for part in 1..=solver.parts() {
        let result = solver.solve(part)?;
        println!("part {}: {} ({})", part, result.answer, result.duration());
    }
    Ok(())
}
