//! Text and JSON rendering of plans.
//!
//! Scores are rounded to two decimals here and only here; selection always
//! works on full precision.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt::Write;

use owo_colors::OwoColorize;
use serde::Serialize;
use staffplan::{
    round_for_display, AssignmentPlan, CountTable, Employee, EmployeeId, Position, Result,
    ScoreComponents, SolveStats,
};

const BAR_GLYPH: &str = "█";

/// Head counts by department, then location.
pub type Crosstab = BTreeMap<String, CountTable<String>>;

/// One display row of a plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanRow {
    pub employee: String,
    /// Current `department/location`, when the roster is known.
    pub current: Option<String>,
    pub proposed: String,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<ScoreComponents>,
}

/// A plan ready for output.
#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    pub name: String,
    pub total_score: f64,
    pub rows: Vec<PlanRow>,
    pub department_counts: CountTable<String>,
    pub department_location_counts: Crosstab,
}

impl PlanReport {
    pub fn new(
        name: impl Into<String>,
        plan: &AssignmentPlan,
        positions: &[Position],
        roster: Option<&[Employee]>,
    ) -> Result<Self> {
        let current: HashMap<&EmployeeId, String> = roster
            .unwrap_or_default()
            .iter()
            .map(|e| (&e.id, format!("{}/{}", e.current_department, e.current_location)))
            .collect();

        let rows = plan
            .iter()
            .map(|a| {
                let proposed = positions
                    .get(a.position.index())
                    .map(Position::label)
                    .unwrap_or_else(|| a.position.to_string());
                PlanRow {
                    employee: a.employee.to_string(),
                    current: current.get(&a.employee).cloned(),
                    proposed,
                    score: round_for_display(a.score),
                    components: a.components.map(|c| c.rounded()),
                }
            })
            .collect();

        Ok(Self {
            name: name.into(),
            total_score: round_for_display(plan.total_score()),
            rows,
            department_counts: plan.department_counts(positions)?,
            department_location_counts: with_location_label(
                plan.department_location_counts(positions)?,
            ),
        })
    }

    /// Aligned table with a total line.
    pub fn to_table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.name.bright_cyan().bold());

        let employee_w = column_width("Employee", self.rows.iter().map(|r| r.employee.len()));
        let current_w = column_width(
            "Current",
            self.rows.iter().map(|r| r.current.as_deref().map_or(1, str::len)),
        );
        let proposed_w = column_width("Proposed", self.rows.iter().map(|r| r.proposed.len()));

        let _ = writeln!(
            out,
            "  {:<employee_w$}  {:<current_w$}  {:<proposed_w$}  {:>8}",
            "Employee", "Current", "Proposed", "Score"
        );
        for row in &self.rows {
            let current = row.current.as_deref().unwrap_or("-");
            let moved = row.current.as_deref().is_some_and(|c| c != row.proposed);
            let proposed = format!("{:<proposed_w$}", row.proposed);
            let proposed = if moved {
                proposed.yellow().to_string()
            } else {
                proposed
            };
            let _ = writeln!(
                out,
                "  {:<employee_w$}  {:<current_w$}  {}  {:>8.2}",
                row.employee, current, proposed, row.score
            );
        }
        let _ = writeln!(
            out,
            "  {} {}",
            "Total score:".white().bold(),
            format!("{:.2}", self.total_score).bright_green()
        );
        out
    }
}

fn column_width(header: &str, values: impl Iterator<Item = usize>) -> usize {
    values.fold(header.len(), usize::max)
}

/// Horizontal bars comparing head counts per key.
///
/// Each series is drawn under every key present in any series.
pub fn bar_chart(title: &str, series: &[(&str, &CountTable<String>)]) -> String {
    let keys: BTreeSet<&String> = series.iter().flat_map(|(_, counts)| counts.keys()).collect();
    let key_w = column_width("", keys.iter().map(|k| k.chars().count()));
    let label_w = column_width("", series.iter().map(|(label, _)| label.len()));

    let mut out = String::new();
    let _ = writeln!(out, "{}", title.bright_cyan().bold());
    for key in keys {
        for (i, (label, counts)) in series.iter().enumerate() {
            let count = counts.get(key).copied().unwrap_or(0);
            let name = if i == 0 { key.as_str() } else { "" };
            let bar = BAR_GLYPH.repeat(count);
            let bar = if i == 0 {
                bar.bright_blue().to_string()
            } else {
                bar.bright_green().to_string()
            };
            let _ = writeln!(
                out,
                "  {:<key_w$}  {:<label_w$} {} {}",
                name, label, bar, count
            );
        }
    }
    out
}

/// Department x location grid of head counts.
pub fn crosstab(title: &str, counts: &Crosstab) -> String {
    let locations: BTreeSet<&String> = counts.values().flat_map(|row| row.keys()).collect();
    let dept_w = column_width("", counts.keys().map(|d| d.chars().count()));
    let cell_w = column_width("", locations.iter().map(|l| l.chars().count())).max(3);

    let mut out = String::new();
    let _ = writeln!(out, "{}", title.bright_cyan().bold());
    let _ = write!(out, "  {:<dept_w$}", "");
    for location in &locations {
        let _ = write!(out, "  {:>cell_w$}", location);
    }
    let _ = writeln!(out);
    for (department, row) in counts {
        let _ = write!(out, "  {:<dept_w$}", department);
        for location in &locations {
            let n = row.get(*location).copied().unwrap_or(0);
            let _ = write!(out, "  {:>cell_w$}", n);
        }
        let _ = writeln!(out);
    }
    out
}

/// Groups `(department, location)` counts by department.
pub fn nest(counts: impl IntoIterator<Item = ((String, String), usize)>) -> Crosstab {
    let mut grid = Crosstab::new();
    for ((department, location), n) in counts {
        *grid.entry(department).or_default().entry(location).or_default() += n;
    }
    grid
}

/// Plan aggregates keyed by optional location, with `-` for none.
pub fn with_location_label(counts: CountTable<(String, Option<String>)>) -> Crosstab {
    nest(
        counts
            .into_iter()
            .map(|((d, l), n)| ((d, l.unwrap_or_else(|| "-".to_string())), n)),
    )
}

/// One-line solve summary.
pub fn stats_line(backend: &str, stats: &SolveStats) -> String {
    format!(
        "{} backend {}, {} employees x {} positions, {} admissible pairs, {} augmentations, {} ms",
        "Solved:".white().bold(),
        backend.bright_cyan(),
        stats.rows,
        stats.columns,
        stats.admissible_edges,
        stats.augmentations,
        stats.elapsed().as_millis()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use staffplan::{Assignment, PositionId};

    fn plan() -> AssignmentPlan {
        AssignmentPlan::from_assignments(vec![
            Assignment {
                employee: "A".into(),
                position: PositionId(1),
                score: 3.14159,
                components: None,
            },
            Assignment {
                employee: "B".into(),
                position: PositionId(0),
                score: 2.0,
                components: None,
            },
        ])
        .unwrap()
    }

    fn positions() -> Vec<Position> {
        vec![Position::new("Sales", "Tokyo"), Position::new("HR", "Osaka")]
    }

    #[test]
    fn test_report_rounds_for_display() {
        let roster = vec![Employee::new("A", "Sales", "Tokyo")];
        let report = PlanReport::new("Proposal", &plan(), &positions(), Some(roster.as_slice())).unwrap();
        assert_eq!(report.rows[0].score, 3.14);
        assert_eq!(report.rows[0].current.as_deref(), Some("Sales/Tokyo"));
        assert_eq!(report.rows[0].proposed, "HR/Osaka");
        assert_eq!(report.rows[1].current, None);
        assert_eq!(report.total_score, 5.14);
        assert_eq!(report.department_counts.get("HR"), Some(&1));
    }

    #[test]
    fn test_table_lists_every_employee() {
        let report = PlanReport::new("Proposal", &plan(), &positions(), None).unwrap();
        let table = report.to_table();
        assert!(table.contains("HR/Osaka"));
        assert!(table.contains("Sales/Tokyo"));
        assert!(table.contains("3.14"));
        assert!(table.contains("5.14"));
    }

    #[test]
    fn test_bar_chart_includes_all_keys() {
        let current: CountTable<String> = [("Sales".to_string(), 2)].into_iter().collect();
        let proposed: CountTable<String> = [("HR".to_string(), 3)].into_iter().collect();
        let chart = bar_chart("Departments", &[("current", &current), ("proposed", &proposed)]);
        assert!(chart.contains("Sales"));
        assert!(chart.contains("HR"));
        assert!(chart.contains(&BAR_GLYPH.repeat(3)));
    }

    #[test]
    fn test_crosstab_fills_missing_cells() {
        let counts = nest([
            (("HR".to_string(), "Osaka".to_string()), 2),
            (("Sales".to_string(), "Tokyo".to_string()), 1),
        ]);
        let grid = crosstab("Grid", &counts);
        let hr_line = grid.lines().find(|l| l.trim_start().starts_with("HR")).unwrap();
        let cells: Vec<&str> = hr_line.split_whitespace().collect();
        assert_eq!(cells, vec!["HR", "2", "0"]);
    }

    #[test]
    fn test_proposed_crosstab_follows_plan() {
        let report = PlanReport::new("Proposal", &plan(), &positions(), None).unwrap();
        let counts = &report.department_location_counts;
        assert_eq!(counts["HR"].get("Osaka"), Some(&1));
        assert_eq!(counts["Sales"].get("Tokyo"), Some(&1));
        assert_eq!(counts["HR"].get("Tokyo"), None);

        let grid = crosstab("Proposed department x location", counts);
        let sales_line = grid.lines().find(|l| l.trim_start().starts_with("Sales")).unwrap();
        let cells: Vec<&str> = sales_line.split_whitespace().collect();
        assert_eq!(cells, vec!["Sales", "0", "1"]);
    }

    #[test]
    fn test_location_less_positions_use_dash() {
        let positions = vec![Position::department_only("Sales"), Position::new("HR", "Osaka")];
        let report = PlanReport::new("Proposal", &plan(), &positions, None).unwrap();
        assert_eq!(report.department_location_counts["Sales"].get("-"), Some(&1));
    }

    #[test]
    fn test_json_shape() {
        let report = PlanReport::new("C", &plan(), &positions(), None).unwrap();
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["name"], "C");
        assert_eq!(value["rows"].as_array().map(Vec::len), Some(2));
        assert!(value["rows"][0].get("components").is_none());
        assert_eq!(value["department_location_counts"]["HR"]["Osaka"], 1);
    }
}
