//! The staffing directory: the contract the resolver calls, and the
//! records it returns.
//!
//! RULE: Only implementations of `RemoteDirectory` talk to the directory.
//! A failed call fails the whole operation; nothing here retries.

pub mod http;
pub mod memory;

use crate::{
    error::EscalationResult,
    phone,
    time_window::shift_is_active,
    types::{DepartmentId, DepartmentName, PhoneNumber},
};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Ribbon label that marks an attendee as a volunteer.
pub const VOLUNTEER_LABEL: &str = "Volunteer";

pub trait RemoteDirectory {
    /// All departments, keyed by id.
    fn list_departments(&self) -> EscalationResult<BTreeMap<DepartmentId, DepartmentName>>;

    /// Jobs for one department, optionally limited to those overlapping `range`.
    fn lookup_shifts(
        &self,
        department_id: &str,
        range: Option<&ShiftRange>,
    ) -> EscalationResult<Vec<Job>>;

    /// Attendees matching `query`. `full` asks for complete records.
    fn search_attendees(&self, query: &str, full: bool) -> EscalationResult<Vec<Attendee>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ShiftRange {
    pub fn overlaps(&self, job: &Job) -> bool {
        job.start_time < self.end && self.start < job.end_time
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendee {
    pub full_name: String,
    #[serde(default)]
    pub cellphone: Option<String>,
    #[serde(default)]
    pub staffing: bool,
    #[serde(default)]
    pub ribbon_labels: Vec<String>,
}

impl Attendee {
    pub fn new(full_name: impl Into<String>, cellphone: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            cellphone: Some(cellphone.into()),
            staffing: false,
            ribbon_labels: Vec::new(),
        }
    }

    pub fn staffing(mut self) -> Self {
        self.staffing = true;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.ribbon_labels.push(label.into());
        self
    }

    /// Normalized phone, or `None` when the record has no usable digits.
    pub fn phone(&self) -> Option<PhoneNumber> {
        self.cellphone
            .as_deref()
            .map(phone::normalize)
            .filter(|number| !number.is_empty())
    }

    pub fn is_volunteer(&self) -> bool {
        self.ribbon_labels.iter().any(|label| label == VOLUNTEER_LABEL)
    }

    /// Staff and volunteers may be escalated to; other attendees may not.
    pub fn is_escalation_contact(&self) -> bool {
        self.staffing || self.is_volunteer()
    }
}

/// One time slot of a job, possibly filled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShiftSlot {
    #[serde(default)]
    pub attendee: Option<Attendee>,
}

/// A shift: a named job with a time window and its slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub name: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub start_time: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub shifts: Vec<ShiftSlot>,
}

impl Job {
    pub fn new(name: impl Into<String>, start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self { name: name.into(), start_time, end_time, shifts: Vec::new() }
    }

    pub fn with_attendee(mut self, attendee: Attendee) -> Self {
        self.shifts.push(ShiftSlot { attendee: Some(attendee) });
        self
    }

    pub fn with_open_slot(mut self) -> Self {
        self.shifts.push(ShiftSlot::default());
        self
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        shift_is_active(self.start_time, self.end_time, now)
    }

    /// Case-insensitive substring match on the job name.
    pub fn matches(&self, pattern: &str) -> bool {
        self.name.to_lowercase().contains(&pattern.to_lowercase())
    }

    /// Phones of filled slots, in slot order.
    pub fn attendee_phones(&self) -> impl Iterator<Item = PhoneNumber> + '_ {
        self.shifts
            .iter()
            .filter_map(|slot| slot.attendee.as_ref())
            .filter_map(Attendee::phone)
    }
}

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a directory timestamp. Offsets are honoured; naive times are local.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        .map(|local| local.with_timezone(&Utc))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'")))
}
