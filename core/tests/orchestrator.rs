//! Full-escalation tests: ordering, failure propagation and skipping.

mod common;

use common::{at, build, day_shift, departments, step};
use phonetree_core::{directory::Attendee, EscalationError, InMemoryDirectory};

fn directory() -> InMemoryDirectory {
    InMemoryDirectory::new()
        .with_department("10", "Security")
        .with_department("11", "Arcade")
        .with_department("12", "Merch")
        .with_jobs("10", vec![day_shift("Security Lead").with_attendee(Attendee::new("Pat", "111"))])
        .with_attendee(Attendee::new("Alex Doe", "555-0101").staffing())
}

#[test]
fn plan_follows_configuration_order() {
    let depts = departments(vec![
        ("Security", vec![step(&[], &["lead"], &[]), step(&[], &[], &["Alex Doe"])]),
        ("Merch", vec![step(&["(555) 300"], &[], &[])]),
        ("Ghost", vec![step(&["1"], &[], &[])]),
        ("Arcade", Vec::new()),
    ]);
    let mut resolver = build(directory(), depts, at(12, 7, 0));

    let plan = resolver.full_escalation().unwrap();

    let names: Vec<&str> = plan.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["Security", "Merch", "Ghost", "Arcade"]);
    assert_eq!(plan["Merch"], vec![vec!["555300"]]);
    assert_eq!(plan["Security"], vec![vec!["111"], vec!["5550101"]]);
    assert!(plan["Ghost"].is_empty());
    assert!(plan["Arcade"].is_empty());
}

#[test]
fn directory_failure_aborts_full_escalation() {
    let depts = departments(vec![("Security", vec![step(&["111"], &[], &[])])]);
    let mut resolver = build(directory(), depts, at(12, 7, 0));
    resolver.directory().set_unavailable(true);

    let err = resolver.full_escalation().unwrap_err();
    assert!(
        matches!(err, EscalationError::HttpStatus { ref method, status: 503 } if method == "dept.list"),
        "{err}"
    );
}

/// A cached person needs no directory; an unseen name fails the resolve.
#[test]
fn person_search_failure_fails_resolve() {
    let depts = departments(vec![
        ("Security", vec![step(&[], &[], &["Alex Doe"])]),
        ("Merch", vec![step(&["333"], &[], &["Nobody Known"])]),
    ]);
    let mut resolver = build(directory(), depts, at(12, 7, 0));

    assert_eq!(resolver.resolve("Security").unwrap(), vec![vec!["5550101"]]);
    resolver.directory().set_unavailable(true);
    assert_eq!(resolver.resolve("Security").unwrap(), vec![vec!["5550101"]]);

    let err = resolver.resolve("Merch").unwrap_err();
    assert!(
        matches!(err, EscalationError::HttpStatus { ref method, .. } if method == "attendee.search"),
        "{err}"
    );
}

/// With skipping, departments served from cache still resolve and the
/// failing one is left out.
#[test]
fn skipping_failures_keeps_resolvable_departments() {
    let depts = departments(vec![
        ("Security", vec![step(&["111"], &["Lead"], &[])]),
        ("Arcade", vec![step(&[], &[], &["Nobody Known"])]),
        ("Merch", vec![step(&["333"], &[], &[])]),
    ]);
    let mut resolver = build(directory(), depts, at(12, 7, 0));

    resolver.resolve("Security").unwrap();
    resolver.directory().set_unavailable(true);

    let plan = resolver.full_escalation_skipping_failures();
    let names: Vec<&str> = plan.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["Security", "Merch"]);
    assert_eq!(plan["Security"], vec![vec!["111", "111"]]);
    assert_eq!(plan["Merch"], vec![vec!["333"]]);
}

#[test]
fn plan_serializes_as_ordered_json_object() {
    let depts = departments(vec![
        ("Security", vec![step(&["555-123-4567"], &[], &[])]),
        ("Arcade", Vec::new()),
    ]);
    let mut resolver = build(directory(), depts, at(12, 7, 0));

    let plan = resolver.full_escalation().unwrap();
    assert_eq!(
        serde_json::to_string(&plan).unwrap(),
        r#"{"Security":[["5551234567"]],"Arcade":[]}"#
    );
}

/// The shipped example config and fixture resolve end to end.
#[test]
fn example_config_resolves_against_example_fixture() {
    let config = phonetree_core::PhonetreeConfig::from_json(include_str!(
        "../../config/phonetree.example.json"
    ))
    .unwrap();
    let directory =
        InMemoryDirectory::from_json(include_str!("../../config/fixture.example.json")).unwrap();
    let mut resolver = build(directory, config.depts, at(12, 7, 0));

    let plan = resolver.full_escalation().unwrap();
    assert_eq!(plan["Security"], vec![vec!["5550001111"], vec!["5550100199", "5550002222"]]);
    assert!(plan["Arcade"].is_empty());
    assert_eq!(resolver.take_warnings().len(), 2);
}
