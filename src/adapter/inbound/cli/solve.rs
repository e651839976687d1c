//! Handler for the `solve` command.

use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracing::info;

use super::command::SolveArgs;
use super::{output, plot};
use crate::domain::{ChannelSet, Constraint, PowerBudget, Solution, WaterFillingProblem};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::factory::solver::build_solver;

const PLOT_HEIGHT: usize = 10;

#[derive(Tabled)]
struct ChannelRow {
    #[tabled(rename = "Channel")]
    index: usize,
    #[tabled(rename = "Floor")]
    floor: String,
    #[tabled(rename = "Power")]
    power: String,
    #[tabled(rename = "Level")]
    level: String,
}

/// Build the problem described by the command-line arguments.
///
/// # Errors
///
/// Returns a domain error for invalid floors, budget, channel count, or side
/// constraints.
pub fn build_problem(args: &SolveArgs) -> Result<WaterFillingProblem> {
    let channels = match args.channels {
        Some(count) => ChannelSet::with_count(count, args.floors.clone())?,
        None => ChannelSet::try_new(args.floors.clone())?,
    };
    let n = channels.len();
    let mut problem = WaterFillingProblem::new(channels, PowerBudget::try_new(args.power)?);
    for &total in &args.sum_equals {
        problem = problem.with_constraint(Constraint::total_equals(n, total))?;
    }
    Ok(problem)
}

/// Execute the solve command.
///
/// Returns whether the solve reached optimality so the caller can pick the
/// process exit code.
pub fn execute(config: &Config, args: &SolveArgs) -> Result<bool> {
    let mut solver_config = config.solver.clone();
    if let Some(backend) = args.solver {
        solver_config.backend = backend;
    }

    let problem = build_problem(args)?;
    let solver = build_solver(&solver_config);
    info!(
        backend = solver.backend_name(),
        channels = problem.num_channels(),
        "Solving"
    );

    let solution = solver.solve(&problem)?;

    if output::is_json() {
        output::json_output(solution_json(&problem, &solution));
    } else {
        render(&problem, &solution, !args.no_plot);
    }

    Ok(solution.is_optimal())
}

/// JSON document describing a solve.
///
/// Non-optimal solves carry `null` for every numeric field.
#[must_use]
pub fn solution_json(problem: &WaterFillingProblem, solution: &Solution) -> serde_json::Value {
    match solution {
        Solution::Optimal(optimal) => json!({
            "status": solution.status(),
            "backend": optimal.backend,
            "objective": optimal.objective,
            "allocation": optimal.allocation,
            "water_level": optimal.water_level,
            "iterations": optimal.iterations,
            "floors": problem.channels(),
            "total_power": problem.budget(),
        }),
        Solution::Failed(failed) => json!({
            "status": failed.status,
            "backend": failed.backend,
            "objective": null,
            "allocation": null,
            "water_level": null,
            "reason": failed.reason,
            "floors": problem.channels(),
            "total_power": problem.budget(),
        }),
    }
}

fn render(problem: &WaterFillingProblem, solution: &Solution, show_plot: bool) {
    if output::is_quiet() {
        // Only a failed solve is worth a line in quiet mode.
        if let Solution::Failed(failed) = solution {
            output::warning(&format!("Solve finished with status {}", failed.status));
        }
        return;
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Problem");
    output::field("Channels", problem.num_channels());
    output::field("Total power", format!("{:.3}", problem.budget().value()));
    output::field("Backend", solution.backend());
    if problem.has_side_constraints() {
        output::field("Constraints", problem.constraints().len());
    }

    output::section("Result");
    output::field("Status", output::highlight(solution.status()));

    let optimal = match solution {
        Solution::Optimal(optimal) => optimal,
        Solution::Failed(failed) => {
            if let Some(reason) = &failed.reason {
                output::note(reason);
            }
            output::warning("No allocation available");
            return;
        }
    };

    output::field("Optimal value", format!("{:.3}", optimal.objective));
    match optimal.water_level {
        Some(level) => output::field("Water level", format!("{level:.3}")),
        None => output::field("Water level", output::muted("n/a")),
    }
    if output::verbosity() > 0 {
        output::field("Iterations", optimal.iterations);
    }

    let floors = problem.channels().floors();
    let powers = optimal.allocation.powers();
    let levels = optimal.allocation.levels(problem.channels());
    let rows: Vec<ChannelRow> = (0..floors.len())
        .map(|i| ChannelRow {
            index: i,
            floor: format!("{:.3}", floors[i]),
            power: format!("{:.3}", powers[i]),
            level: format!("{:.3}", levels[i]),
        })
        .collect();

    output::section("Allocation");
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    output::block(&table.to_string());

    if show_plot {
        output::section("Water filling");
        output::block(&plot::render(floors, powers, PLOT_HEIGHT));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::inbound::cli::command::{Cli, Commands};
    use crate::domain::{DomainError, FailedSolve, SolveStatus};
    use crate::error::Error;
    use clap::Parser;

    fn args(argv: &[&str]) -> SolveArgs {
        let mut full = vec!["waterfill", "solve"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Commands::Solve(args) => args,
            other => panic!("expected solve, got {other:?}"),
        }
    }

    #[test]
    fn test_builds_problem_with_side_constraints() {
        let problem =
            build_problem(&args(&["--floors", "1,2", "--sum-equals", "2"])).unwrap();
        assert_eq!(problem.num_channels(), 2);
        assert_eq!(problem.constraints().len(), 1);
    }

    #[test]
    fn test_rejects_channel_count_mismatch() {
        let result = build_problem(&args(&["--floors", "1,2", "-n", "3"]));
        assert!(matches!(
            result,
            Err(Error::Domain(DomainError::ChannelCountMismatch { .. }))
        ));
    }

    #[test]
    fn test_rejects_negative_power() {
        let result = build_problem(&args(&["--floors", "1", "--power", "-1"]));
        assert!(matches!(
            result,
            Err(Error::Domain(DomainError::InvalidBudget { .. }))
        ));
    }

    #[test]
    fn test_failed_solution_json_has_null_numbers() {
        let problem = WaterFillingProblem::from_floors(vec![1.0], 1.0).unwrap();
        let solution = Solution::Failed(FailedSolve {
            status: SolveStatus::Infeasible,
            backend: "highs",
            reason: None,
        });

        let value = solution_json(&problem, &solution);

        assert_eq!(value["status"], "infeasible");
        assert!(value["objective"].is_null());
        assert!(value["allocation"].is_null());
        assert_eq!(value["floors"], json!([1.0]));
    }
}
