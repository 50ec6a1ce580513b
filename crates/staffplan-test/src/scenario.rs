//! Hand-written scenarios.

use staffplan_core::{Employee, Position, WeightVector};

/// Reference departments.
pub const DEPARTMENTS: [&str; 4] = ["Sales", "Engineering", "HR", "Accounting"];

/// Reference locations, in distance order.
pub const LOCATIONS: [&str; 4] = ["Tokyo", "Osaka", "Nagoya", "Fukuoka"];

/// One employee, two positions, unit weights.
///
/// Expected scores: 26 at (X, L1) and 14 at (Y, L2).
#[derive(Debug, Clone)]
pub struct ReferenceExample {
    pub employees: Vec<Employee>,
    pub positions: Vec<Position>,
    pub weights: WeightVector,
    /// Directional distances `(from, to, distance)`.
    pub distances: Vec<(&'static str, &'static str, f64)>,
}

pub fn reference_example() -> ReferenceExample {
    ReferenceExample {
        employees: vec![Employee::new("A", "Y", "L1")
            .with_desire("X", "L1")
            .with_skill(8.0)
            .with_evaluation(5.0)
            .with_tenure(3.0)
            .with_age(35)],
        positions: vec![Position::new("X", "L1"), Position::new("Y", "L2")],
        weights: WeightVector::uniform(1.0),
        distances: vec![
            ("L1", "L1", 0.0),
            ("L1", "L2", 200.0),
            ("L2", "L1", 200.0),
            ("L2", "L2", 0.0),
        ],
    }
}

/// Six employees over the reference taxonomy.
pub fn small_roster() -> Vec<Employee> {
    vec![
        Employee::new("E01", "Sales", "Tokyo")
            .with_desire("Engineering", "Tokyo")
            .with_skill(7.0)
            .with_evaluation(4.0)
            .with_tenure(5.0)
            .with_age(31),
        Employee::new("E02", "HR", "Osaka")
            .with_desire("HR", "Osaka")
            .with_skill(3.0)
            .with_evaluation(2.0)
            .with_tenure(12.0)
            .with_age(45),
        Employee::new("E03", "Engineering", "Nagoya")
            .with_desire("Engineering", "Tokyo")
            .with_skill(10.0)
            .with_evaluation(5.0)
            .with_tenure(2.0)
            .with_age(26),
        Employee::new("E04", "Accounting", "Fukuoka")
            .with_desire("Sales", "Fukuoka")
            .with_skill(5.0)
            .with_evaluation(3.0)
            .with_tenure(18.0)
            .with_age(58),
        Employee::new("E05", "Sales", "Osaka")
            .with_desire("Accounting", "Nagoya")
            .with_skill(6.0)
            .with_evaluation(1.0)
            .with_tenure(9.0)
            .with_age(39),
        Employee::new("E06", "Engineering", "Tokyo")
            .with_desire("Engineering", "Tokyo")
            .with_skill(9.0)
            .with_evaluation(4.0)
            .with_tenure(7.0)
            .with_age(33),
    ]
}
