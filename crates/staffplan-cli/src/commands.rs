//! Command handlers.

use std::path::Path;

use owo_colors::OwoColorize;
use serde::Serialize;
use staffplan::{
    current_department_counts, current_department_location_counts, greedy_assign,
    DepartmentWeights, Employee, OptimalAssigner, Planner, SkillMatchMatrix, StaffplanConfig,
};

use crate::cli::{Cli, Command, Format, ModeArg, SolverArgs};
use crate::error::CliError;
use crate::render::{bar_chart, crosstab, nest, stats_line, PlanReport};
use crate::roster::{load_roster, synthetic_roster};

/// Proposal titles in mode order.
const PROPOSAL_NAMES: [&str; 3] = [
    "Proposal A (skill and evaluation)",
    "Proposal B (desire and distance)",
    "Proposal C (custom weights)",
];

/// Runs one parsed command line.
pub fn run(cli: Cli) -> Result<(), CliError> {
    let config = resolve_config(&cli)?;
    if cli.format == Format::Table && !cli.quiet {
        staffplan::console::init();
    }

    match &cli.command {
        Command::Propose { mode } => propose(&cli, &config, *mode),
        Command::Optimize { mode, solver } => optimize(&cli, &apply_solver(config, solver), *mode),
        Command::Compare { solver } => compare(&cli, &apply_solver(config, solver)),
        Command::SkillMatch {
            weights,
            capacity,
            solver,
        } => skill_match(&cli, &apply_solver(config, solver), weights, *capacity),
    }
}

/// Loads the configuration file, if any, and applies command-line overrides.
pub fn resolve_config(cli: &Cli) -> Result<StaffplanConfig, CliError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => StaffplanConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if let Some(count) = cli.employees {
        config = config.with_employee_count(count);
    }
    config.weights = cli.weights.apply(config.weights);
    config.validate()?;
    Ok(config)
}

fn load_config(path: &Path) -> Result<StaffplanConfig, CliError> {
    let yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
    let config = if yaml {
        StaffplanConfig::from_yaml_file(path)?
    } else {
        StaffplanConfig::load(path)?
    };
    Ok(config)
}

fn apply_solver(mut config: StaffplanConfig, solver: &SolverArgs) -> StaffplanConfig {
    if let Some(backend) = solver.backend {
        config = config.with_backend(backend.into());
    }
    if let Some(ms) = solver.time_limit_ms {
        config = config.with_time_limit_ms(ms);
    }
    config
}

fn roster(cli: &Cli, config: &StaffplanConfig) -> Result<Vec<Employee>, CliError> {
    match &cli.roster {
        Some(path) => load_roster(path),
        None => Ok(synthetic_roster(
            config.roster.employee_count,
            config.roster.seed,
            &config.taxonomy.departments,
            &config.taxonomy.locations,
        )?),
    }
}

fn mode_index(mode: ModeArg) -> usize {
    match mode {
        ModeArg::A => 0,
        ModeArg::B => 1,
        ModeArg::C => 2,
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn propose(cli: &Cli, config: &StaffplanConfig, mode: Option<ModeArg>) -> Result<(), CliError> {
    let planner = Planner::from_config(config)?;
    let employees = roster(cli, config)?;
    let proposals = planner.propose(&employees)?;

    let selected: Vec<usize> = match mode {
        Some(m) => vec![mode_index(m)],
        None => (0..proposals.len()).collect(),
    };
    let reports = selected
        .iter()
        .map(|&i| {
            PlanReport::new(
                PROPOSAL_NAMES[i],
                &proposals[i].plan,
                planner.positions(),
                Some(employees.as_slice()),
            )
        })
        .collect::<staffplan::Result<Vec<_>>>()?;

    if cli.format == Format::Json {
        return print_json(&reports);
    }

    let current = current_department_counts(&employees);
    let current_grid = nest(current_department_location_counts(&employees));
    println!("{}", crosstab("Current department x location", &current_grid));
    for report in &reports {
        println!("{}", report.to_table());
        println!(
            "{}",
            bar_chart(
                "Head count by department",
                &[("current", &current), ("proposed", &report.department_counts)]
            )
        );
        println!(
            "{}",
            crosstab(
                &format!("{} department x location", report.name),
                &report.department_location_counts
            )
        );
    }
    Ok(())
}

fn optimize(cli: &Cli, config: &StaffplanConfig, mode: ModeArg) -> Result<(), CliError> {
    let planner = Planner::from_config(config)?;
    let employees = roster(cli, config)?;
    let outcome = planner.optimize(&employees, mode.resolve(config.weights))?;

    let name = format!("Optimal plan ({})", outcome.mode);
    let report = PlanReport::new(name, &outcome.plan, planner.positions(), Some(employees.as_slice()))?;
    if cli.format == Format::Json {
        return print_json(&report);
    }

    println!("{}", report.to_table());
    println!("{}", stats_line(outcome.backend.name(), &outcome.stats));
    Ok(())
}

#[derive(Debug, Serialize)]
struct CompareReport {
    proposals: Vec<PlanReport>,
    optimal: Option<PlanReport>,
    optimal_error: Option<String>,
    current_department_counts: staffplan::CountTable<String>,
}

fn compare(cli: &Cli, config: &StaffplanConfig) -> Result<(), CliError> {
    let planner = Planner::from_config(config)?;
    let employees = roster(cli, config)?;
    let comparison = planner.compare(&employees)?;
    let positions = planner.positions();

    let proposals = comparison
        .proposals
        .iter()
        .zip(PROPOSAL_NAMES)
        .map(|(p, name)| PlanReport::new(name, &p.plan, positions, Some(employees.as_slice())))
        .collect::<staffplan::Result<Vec<_>>>()?;
    let optimal = match &comparison.optimal {
        Ok(outcome) => Some(PlanReport::new(
            "Optimal plan (custom weights, capacity-respecting)",
            &outcome.plan,
            positions,
            Some(employees.as_slice()),
        )?),
        Err(_) => None,
    };
    let current = current_department_counts(&employees);

    if cli.format == Format::Json {
        return print_json(&CompareReport {
            proposals,
            optimal,
            optimal_error: comparison.optimal.as_ref().err().map(ToString::to_string),
            current_department_counts: current,
        });
    }

    for report in &proposals {
        println!("{}", report.to_table());
        println!(
            "{}",
            crosstab(
                &format!("{} department x location", report.name),
                &report.department_location_counts
            )
        );
    }

    let mut series: Vec<(&str, &staffplan::CountTable<String>)> = vec![("current", &current)];
    series.extend(
        ["A", "B", "C"]
            .into_iter()
            .zip(&proposals)
            .map(|(label, r)| (label, &r.department_counts)),
    );
    if let Some(report) = &optimal {
        series.push(("optimal", &report.department_counts));
    }
    println!("{}", bar_chart("Head count by department", &series));

    let current_grid = nest(current_department_location_counts(&employees));
    println!("{}", crosstab("Current department x location", &current_grid));

    match (&comparison.optimal, &optimal) {
        (Ok(outcome), Some(report)) => {
            println!("{}", report.to_table());
            println!("{}", stats_line(outcome.backend.name(), &outcome.stats));
            println!(
                "{}",
                crosstab("Optimal department x location", &report.department_location_counts)
            );
        }
        (Err(e), _) => println!("{} {}", "Optimal plan unavailable:".bright_red().bold(), e),
        _ => {}
    }
    Ok(())
}

fn skill_match(
    cli: &Cli,
    config: &StaffplanConfig,
    weights: &[(String, f64)],
    capacity: u32,
) -> Result<(), CliError> {
    let matrix = SkillMatchMatrix::reference_team()?;
    let mut department_weights = DepartmentWeights::new();
    for (department, weight) in weights {
        department_weights.set(department.as_str(), *weight)?;
    }

    let positions: Vec<_> = matrix
        .positions()
        .into_iter()
        .map(|p| p.with_capacity(capacity))
        .collect();
    let table = matrix.score_table(&department_weights)?;
    let employees: Vec<_> = matrix.employees().cloned().collect();

    let greedy = greedy_assign(table.records())?;
    let greedy_report = PlanReport::new("Skill match (greedy)", &greedy, &positions, None)?;
    let optimal = OptimalAssigner::from_config(&config.solver).solve_with_stats(
        &employees,
        &positions,
        table.records(),
    );

    if cli.format == Format::Json {
        let optimal_report = match &optimal {
            Ok((plan, _)) => Some(PlanReport::new("Skill match (optimal)", plan, &positions, None)?),
            Err(_) => None,
        };
        return print_json(&CompareReport {
            proposals: vec![greedy_report],
            optimal: optimal_report,
            optimal_error: optimal.as_ref().err().map(ToString::to_string),
            current_department_counts: Default::default(),
        });
    }

    println!("{}", greedy_report.to_table());
    match optimal {
        Ok((plan, stats)) => {
            let report = PlanReport::new("Skill match (optimal)", &plan, &positions, None)?;
            println!("{}", report.to_table());
            println!("{}", stats_line(config.solver.backend.name(), &stats));
        }
        Err(e) => println!("{} {}", "Optimal plan unavailable:".bright_red().bold(), e),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;
    use staffplan::BackendKind;

    use super::*;

    #[test]
    fn test_cli_overrides_config_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(b"roster:\n  seed: 5\n  employee_count: 8\nweights:\n  skill: 2.0\n")
            .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let cli = Cli::try_parse_from(["staffplan", "propose", "--config", &path, "--seed", "9"]).unwrap();
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.roster.seed, 9);
        assert_eq!(config.roster.employee_count, 8);
        assert_eq!(config.weights.skill, 2.0);
    }

    #[test]
    fn test_invalid_weight_override_rejected() {
        let cli = Cli::try_parse_from(["staffplan", "propose", "--w-skill", "inf"]).unwrap();
        assert!(matches!(resolve_config(&cli), Err(CliError::Config(_))));
    }

    #[test]
    fn test_solver_flags_override_config() {
        let solver = SolverArgs {
            backend: Some(crate::cli::BackendArg::MinCostFlow),
            time_limit_ms: Some(50),
        };
        let config = apply_solver(StaffplanConfig::default(), &solver);
        assert_eq!(config.solver.backend, BackendKind::MinCostFlow);
        assert_eq!(config.solver.time_limit_ms, Some(50));
    }

    #[test]
    fn test_default_roster_fits_default_positions() {
        let cli = Cli::try_parse_from(["staffplan", "compare"]).unwrap();
        let config = resolve_config(&cli).unwrap();
        let employees = roster(&cli, &config).unwrap();
        let comparison = Planner::from_config(&config)
            .unwrap()
            .compare(&employees)
            .unwrap();
        assert_eq!(employees.len(), 20);
        assert!(comparison.optimal.is_ok());
    }

    #[test]
    fn test_skill_match_rejects_unknown_department_weight() {
        let cli = Cli::try_parse_from(["staffplan", "skill-match", "-w", "Salse=7"]).unwrap();
        let config = resolve_config(&cli).unwrap();
        let err = skill_match(&cli, &config, &[("Salse".to_string(), 7.0)], 1).unwrap_err();
        assert!(matches!(
            err,
            CliError::Plan(staffplan::StaffplanError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_skill_match_team_is_infeasible_with_single_seats() {
        let matrix = SkillMatchMatrix::reference_team().unwrap();
        let employees: Vec<_> = matrix.employees().cloned().collect();
        let table = matrix.score_table(&DepartmentWeights::new()).unwrap();
        let err = OptimalAssigner::new()
            .solve(&employees, &matrix.positions(), table.records())
            .unwrap_err();
        assert!(matches!(err, staffplan::StaffplanError::Infeasible(_)));
    }
}
