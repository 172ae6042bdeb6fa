//! The three resolver caches.
//!
//! Invalidation rules:
//!   - Department ids: filled in one bulk call the first time they are
//!     needed while empty, then kept for the cache's lifetime.
//!   - Active shifts: one expiry shared by every department, set to the
//!     next quarter-hour mark on refresh. A refresh only rewrites the
//!     entry of the department being asked about; entries for other
//!     departments are neither refreshed nor evicted.
//!   - People: one search per unseen name; hits are kept forever, misses
//!     are not remembered.
//!
//! Single-threaded: the caches are mutated in place on every lookup.

use crate::{
    directory::{Job, RemoteDirectory},
    error::EscalationResult,
    time_window::next_quarter_hour,
    types::{DepartmentId, DepartmentName, PhoneNumber},
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Department name → directory id.
#[derive(Debug, Default)]
pub struct DepartmentIdCache {
    ids: HashMap<DepartmentName, DepartmentId>,
}

impl DepartmentIdCache {
    /// Unknown names resolve to `None`, not an error.
    pub fn get<D: RemoteDirectory>(
        &mut self,
        directory: &D,
        department: &str,
    ) -> EscalationResult<Option<DepartmentId>> {
        if self.ids.is_empty() {
            let listing = directory.list_departments()?;
            log::debug!("department cache: loaded {} department(s)", listing.len());
            self.ids.extend(listing.into_iter().map(|(id, name)| (name, id)));
        }
        Ok(self.ids.get(department).cloned())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Department name → shifts that were active at the last refresh.
#[derive(Debug)]
pub struct ShiftCache {
    active: HashMap<DepartmentName, Vec<Job>>,
    expires_at: DateTime<Utc>,
}

impl ShiftCache {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { active: HashMap::new(), expires_at: now }
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Validity is judged for the cache as a whole, not per department.
    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        self.active.is_empty() || self.expires_at <= now
    }

    pub fn contains(&self, department: &str) -> bool {
        self.active.contains_key(department)
    }

    /// Active shifts for `department`, refreshing first if the cache has
    /// expired. A department with no entry in a still-valid cache gets an
    /// empty slice and no fetch is made.
    pub fn active_shifts<D: RemoteDirectory>(
        &mut self,
        directory: &D,
        department: &str,
        department_id: &str,
        now: DateTime<Utc>,
    ) -> EscalationResult<&[Job]> {
        if self.needs_refresh(now) {
            let jobs = directory.lookup_shifts(department_id, None)?;
            let fetched = jobs.len();
            let active: Vec<Job> = jobs.into_iter().filter(|job| job.is_active(now)).collect();
            self.expires_at = next_quarter_hour(now);
            log::info!(
                "shift cache: refreshed '{department}' ({} of {fetched} active), expires {}",
                active.len(),
                self.expires_at,
            );
            self.active.insert(department.to_string(), active);
        } else if !self.contains(department) {
            log::debug!("shift cache: no entry for '{department}' before {}", self.expires_at);
        }
        Ok(self.active.get(department).map(Vec::as_slice).unwrap_or_default())
    }
}

/// Full name → normalized phone.
#[derive(Debug, Default)]
pub struct PersonCache {
    numbers: HashMap<String, PhoneNumber>,
}

impl PersonCache {
    /// Only exact full-name matches with a usable phone who are staff or
    /// volunteers are kept.
    pub fn lookup<D: RemoteDirectory>(
        &mut self,
        directory: &D,
        name: &str,
    ) -> EscalationResult<Option<PhoneNumber>> {
        if !self.numbers.contains_key(name) {
            let results = directory.search_attendees(name, false)?;
            log::debug!("person cache: search '{name}' returned {} record(s)", results.len());
            for attendee in results {
                if attendee.full_name != name || !attendee.is_escalation_contact() {
                    continue;
                }
                if let Some(number) = attendee.phone() {
                    self.numbers.insert(attendee.full_name, number);
                }
            }
        }
        Ok(self.numbers.get(name).cloned())
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}
