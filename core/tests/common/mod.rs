//! Shared fixtures for the resolver tests.
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use indexmap::IndexMap;
use phonetree_core::{
    directory::Job, DepartmentConfig, EscalationResolver, EscalationStep, InMemoryDirectory,
    ManualClock,
};

pub type TestResolver = EscalationResolver<InMemoryDirectory, ManualClock>;

/// 2024-08-01 at the given UTC time.
pub fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 8, 1, h, m, s).unwrap()
}

/// A job running 09:00–17:00.
pub fn day_shift(name: &str) -> Job {
    Job::new(name, at(9, 0, 0), at(17, 0, 0))
}

pub fn step(phones: &[&str], shifts: &[&str], people: &[&str]) -> EscalationStep {
    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }
    EscalationStep { phones: owned(phones), shifts: owned(shifts), people: owned(people) }
}

pub fn departments(entries: Vec<(&str, Vec<EscalationStep>)>) -> IndexMap<String, DepartmentConfig> {
    entries
        .into_iter()
        .map(|(name, escalation)| (name.to_string(), DepartmentConfig { escalation }))
        .collect()
}

pub fn build(
    directory: InMemoryDirectory,
    depts: IndexMap<String, DepartmentConfig>,
    now: DateTime<Utc>,
) -> TestResolver {
    let _ = env_logger::builder().is_test(true).try_init();
    EscalationResolver::new(directory, depts, ManualClock::new(now))
}
