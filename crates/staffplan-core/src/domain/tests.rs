//! Tests for domain types.

use super::*;

#[test]
fn test_employee_defaults_to_staying() {
    let e = Employee::new("E01", "Sales", "Tokyo");
    assert_eq!(e.desired_department, "Sales");
    assert_eq!(e.desired_location, "Tokyo");
    assert_eq!(e.id, EmployeeId::from("E01"));
}

#[test]
fn test_employee_validate_rejects_nan() {
    let e = Employee::new("E01", "Sales", "Tokyo").with_skill(f64::NAN);
    assert!(e.validate().is_err());

    let e = Employee::new("E02", "Sales", "Tokyo").with_tenure(f64::INFINITY);
    assert!(e.validate().is_err());
}

#[test]
fn test_cross_product_is_department_major() {
    let positions = Position::cross_product(&["Sales", "HR"], &["Tokyo", "Osaka", "Nagoya"]);
    let labels: Vec<_> = positions.iter().map(Position::label).collect();
    assert_eq!(
        labels,
        vec![
            "Sales/Tokyo",
            "Sales/Osaka",
            "Sales/Nagoya",
            "HR/Tokyo",
            "HR/Osaka",
            "HR/Nagoya",
        ]
    );
    assert!(positions.iter().all(|p| p.capacity == 1));
}

#[test]
fn test_department_only_positions() {
    let positions = Position::departments(&["Sales", "HR"]);
    assert_eq!(positions.len(), 2);
    assert_eq!(positions[0].location, None);
    assert_eq!(positions[1].label(), "HR");
}

#[test]
fn test_total_capacity() {
    let positions = vec![
        Position::new("X", "L1").with_capacity(2),
        Position::new("Y", "L2").with_capacity(0),
        Position::department_only("Z"),
    ];
    assert_eq!(total_capacity(&positions), 3);
}

#[test]
fn test_position_id_display() {
    assert_eq!(PositionId(3).to_string(), "#3");
    assert_eq!(PositionId(3).index(), 3);
}
