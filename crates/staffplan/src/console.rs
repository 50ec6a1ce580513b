//! Colorful console output for planning runs.
//!
//! Provides a custom `tracing` layer that formats solver events with colors.
//! Enabled with the `console` feature.

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{filter::Directive, EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect.
/// `RUST_LOG` directives are honoured on top of `staffplan_solver=info`.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = "staffplan_solver=info".parse::<Directive>() {
            filter = filter.add_directive(directive);
        }

        // Another subscriber may already be installed by the host program.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SolverConsoleLayer)
            .try_init();
    });
}

fn print_banner() {
    let banner = format!("staffplan v{} - reassignment planner", env!("CARGO_PKG_VERSION"));
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats solver events with colors.
pub struct SolverConsoleLayer;

impl<S: Subscriber> Layer<S> for SolverConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("staffplan_solver") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_solver_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    backend: Option<String>,
    employees: Option<u64>,
    positions: Option<u64>,
    admissible_edges: Option<u64>,
    augmentations: Option<u64>,
    elapsed_ms: Option<u64>,
    total_score: Option<f64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        match field.name() {
            "event" => self.event = Some(s.trim_matches('"').to_string()),
            "backend" => self.backend = Some(s.trim_matches('"').to_string()),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "backend" => self.backend = Some(value.to_string()),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "employees" => self.employees = Some(value),
            "positions" => self.positions = Some(value),
            "admissible_edges" => self.admissible_edges = Some(value),
            "augmentations" => self.augmentations = Some(value),
            "elapsed_ms" => self.elapsed_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if field.name() == "total_score" {
            self.total_score = Some(value);
        }
    }
}

fn format_solver_event(v: &EventVisitor) -> String {
    match v.event.as_deref() {
        Some("solve_start") => format_solve_start(v),
        Some("solve_end") => format_solve_end(v),
        Some("greedy_end") => format_greedy_end(v),
        _ => String::new(),
    }
}

fn format_solve_start(v: &EventVisitor) -> String {
    let employees = v.employees.unwrap_or(0);
    let positions = v.positions.unwrap_or(0);
    let edges = v.admissible_edges.unwrap_or(0);

    format!(
        "{} {} {} employees ({}), positions ({}), admissible pairs ({})",
        "INFO".bright_green(),
        format!("[{}]", v.backend.as_deref().unwrap_or("solver")).bright_cyan(),
        "Solving started:".white().bold(),
        employees.to_formatted_string(&Locale::en).bright_yellow(),
        positions.to_formatted_string(&Locale::en).bright_yellow(),
        edges.to_formatted_string(&Locale::en).bright_yellow(),
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    format!(
        "{} {} {} total score ({}), augmentations ({}), time spent ({})",
        "INFO".bright_green(),
        format!("[{}]", v.backend.as_deref().unwrap_or("solver")).bright_cyan(),
        "Solving ended:".white().bold(),
        format_score(v.total_score),
        v.augmentations
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .white(),
        format_duration_ms(v.elapsed_ms.unwrap_or(0)).yellow(),
    )
}

fn format_greedy_end(v: &EventVisitor) -> String {
    format!(
        "{} {} {} employees ({}), total score ({})",
        "INFO".bright_green(),
        "[greedy]".bright_cyan(),
        "Selection ended:".white().bold(),
        v.employees
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .bright_yellow(),
        format_score(v.total_score),
    )
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        format!("{}m {}s", ms / 60_000, (ms % 60_000) / 1000)
    }
}

fn format_score(score: Option<f64>) -> String {
    match score {
        Some(s) if s < 0.0 => format!("{:.2}", s).bright_red().to_string(),
        Some(s) if s > 0.0 => format!("{:.2}", s).bright_green().to_string(),
        Some(s) => format!("{:.2}", s).white().to_string(),
        None => "N/A".white().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_formatting() {
        assert_eq!(format_duration_ms(12), "12ms");
        assert_eq!(format_duration_ms(1500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_unknown_events_are_silent() {
        let v = EventVisitor {
            event: Some("something_else".into()),
            ..EventVisitor::default()
        };
        assert!(format_solver_event(&v).is_empty());
        assert!(format_solver_event(&EventVisitor::default()).is_empty());
    }

    #[test]
    fn test_solve_end_mentions_score() {
        let v = EventVisitor {
            event: Some("solve_end".into()),
            backend: Some("hungarian".into()),
            total_score: Some(12.5),
            ..EventVisitor::default()
        };
        let line = format_solver_event(&v);
        assert!(line.contains("hungarian"));
        assert!(line.contains("12.50"));
    }
}
