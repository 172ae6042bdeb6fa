//! A scripted, in-process directory.
//!
//! Holds departments, jobs and attendees in memory and counts every call
//! it serves, so cache behaviour can be observed from the outside. Also
//! loadable from a JSON fixture for dry runs without a live directory.

use super::{Attendee, Job, RemoteDirectory, ShiftRange};
use crate::{
    error::{EscalationError, EscalationResult},
    types::{DepartmentId, DepartmentName},
};
use serde::Deserialize;
use std::{
    cell::{Cell, RefCell},
    collections::{BTreeMap, HashMap},
};

/// Calls served so far, per operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub list_departments: usize,
    pub lookup_shifts: usize,
    pub search_attendees: usize,
}

#[derive(Debug, Default, Deserialize)]
pub struct InMemoryDirectory {
    #[serde(default)]
    departments: BTreeMap<DepartmentId, DepartmentName>,
    #[serde(default)]
    shifts: RefCell<HashMap<DepartmentId, Vec<Job>>>,
    #[serde(default)]
    attendees: Vec<Attendee>,
    #[serde(skip)]
    calls: Cell<CallCounts>,
    #[serde(skip)]
    unavailable: Cell<bool>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let directory = Self::from_json(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse fixture {path}: {e}"))?;
        Ok(directory)
    }

    pub fn from_json(content: &str) -> EscalationResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn with_department(mut self, id: impl Into<DepartmentId>, name: impl Into<DepartmentName>) -> Self {
        self.departments.insert(id.into(), name.into());
        self
    }

    pub fn with_jobs(self, department_id: impl Into<DepartmentId>, jobs: Vec<Job>) -> Self {
        self.replace_jobs(department_id, jobs);
        self
    }

    pub fn with_attendee(mut self, attendee: Attendee) -> Self {
        self.attendees.push(attendee);
        self
    }

    /// Swap a department's roster in place; later lookups see the new jobs.
    pub fn replace_jobs(&self, department_id: impl Into<DepartmentId>, jobs: Vec<Job>) {
        self.shifts.borrow_mut().insert(department_id.into(), jobs);
    }

    /// While set, every call fails with HTTP 503.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.set(unavailable);
    }

    pub fn calls(&self) -> CallCounts {
        self.calls.get()
    }

    fn record(&self, method: &str, bump: impl FnOnce(&mut CallCounts)) -> EscalationResult<()> {
        let mut counts = self.calls.get();
        bump(&mut counts);
        self.calls.set(counts);

        if self.unavailable.get() {
            return Err(EscalationError::HttpStatus { method: method.to_string(), status: 503 });
        }
        Ok(())
    }
}

impl RemoteDirectory for InMemoryDirectory {
    fn list_departments(&self) -> EscalationResult<BTreeMap<DepartmentId, DepartmentName>> {
        self.record("dept.list", |c| c.list_departments += 1)?;
        Ok(self.departments.clone())
    }

    fn lookup_shifts(
        &self,
        department_id: &str,
        range: Option<&ShiftRange>,
    ) -> EscalationResult<Vec<Job>> {
        self.record("shifts.lookup", |c| c.lookup_shifts += 1)?;
        let shifts = self.shifts.borrow();
        let jobs = shifts.get(department_id).map(Vec::as_slice).unwrap_or_default();
        Ok(jobs
            .iter()
            .filter(|job| range.map_or(true, |r| r.overlaps(job)))
            .cloned()
            .collect())
    }

    /// Case-insensitive substring search on full names, like a name box.
    fn search_attendees(&self, query: &str, _full: bool) -> EscalationResult<Vec<Attendee>> {
        self.record("attendee.search", |c| c.search_attendees += 1)?;
        let needle = query.to_lowercase();
        Ok(self
            .attendees
            .iter()
            .filter(|a| a.full_name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}
