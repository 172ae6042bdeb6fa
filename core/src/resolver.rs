//! The escalation resolver: turns one department's configured steps into
//! phone groups.
//!
//! Per step, numbers are collected in this order:
//!   1. Literal phones, as listed.
//!   2. For each shift pattern: every active job whose name contains the
//!      pattern (case-insensitive), each filled slot's phone in slot order.
//!   3. For each person: their directory phone, if found.
//!
//! A step that yields no numbers produces no group.

use crate::{
    cache::{DepartmentIdCache, PersonCache, ShiftCache},
    clock::{Clock, SystemClock},
    config::{DepartmentConfig, PhonetreeConfig},
    directory::{http::HttpDirectory, RemoteDirectory},
    error::EscalationResult,
    phone,
    types::{DepartmentName, EscalationGroup},
};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Non-fatal problems found while resolving. Also logged at warn level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResolutionWarning {
    NoMatchingShifts {
        department: DepartmentName,
        pattern: String,
    },
}

impl fmt::Display for ResolutionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMatchingShifts { department, pattern } => write!(
                f,
                "No current shifts found matching '{pattern}' (department '{department}')"
            ),
        }
    }
}

pub struct EscalationResolver<D, C = SystemClock> {
    directory: D,
    clock: C,
    departments: IndexMap<DepartmentName, DepartmentConfig>,
    department_ids: DepartmentIdCache,
    shifts: ShiftCache,
    people: PersonCache,
    warnings: Vec<ResolutionWarning>,
}

impl EscalationResolver<HttpDirectory, SystemClock> {
    /// Wire a resolver to the live directory described by `config`.
    pub fn from_config(config: PhonetreeConfig) -> EscalationResult<Self> {
        let directory = HttpDirectory::new(&config.directory)?;
        Ok(Self::new(directory, config.depts, SystemClock))
    }
}

impl<D: RemoteDirectory, C: Clock> EscalationResolver<D, C> {
    /// All caches start empty.
    pub fn new(
        directory: D,
        departments: IndexMap<DepartmentName, DepartmentConfig>,
        clock: C,
    ) -> Self {
        let shifts = ShiftCache::new(clock.now());
        Self {
            directory,
            clock,
            departments,
            department_ids: DepartmentIdCache::default(),
            shifts,
            people: PersonCache::default(),
            warnings: Vec::new(),
        }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Configured department names, in declaration order.
    pub fn department_names(&self) -> impl Iterator<Item = &DepartmentName> {
        self.departments.keys()
    }

    pub fn shift_cache(&self) -> &ShiftCache {
        &self.shifts
    }

    pub fn warnings(&self) -> &[ResolutionWarning] {
        &self.warnings
    }

    /// Drain the warnings recorded so far.
    pub fn take_warnings(&mut self) -> Vec<ResolutionWarning> {
        std::mem::take(&mut self.warnings)
    }

    /// Escalation groups for one department.
    ///
    /// Unconfigured departments and departments the directory does not
    /// know resolve to no groups. Directory failures are returned as-is.
    pub fn resolve(&mut self, department: &str) -> EscalationResult<Vec<EscalationGroup>> {
        let Some(config) = self.departments.get(department) else {
            log::debug!("resolve '{department}': not configured");
            return Ok(Vec::new());
        };
        let Some(department_id) = self.department_ids.get(&self.directory, department)? else {
            log::debug!("resolve '{department}': unknown to the directory");
            return Ok(Vec::new());
        };

        let now = self.clock.now();
        let active = self
            .shifts
            .active_shifts(&self.directory, department, &department_id, now)?;

        let mut groups = Vec::new();
        for step in &config.escalation {
            let mut numbers: EscalationGroup = step.phones.iter().map(|p| phone::normalize(p)).collect();

            for pattern in &step.shifts {
                let mut matched = false;
                for job in active.iter().filter(|job| job.matches(pattern)) {
                    matched = true;
                    numbers.extend(job.attendee_phones());
                }
                if !matched {
                    let warning = ResolutionWarning::NoMatchingShifts {
                        department: department.to_string(),
                        pattern: pattern.clone(),
                    };
                    log::warn!("{warning}");
                    self.warnings.push(warning);
                }
            }

            for person in &step.people {
                if let Some(number) = self.people.lookup(&self.directory, person)? {
                    numbers.push(number);
                }
            }

            if !numbers.is_empty() {
                groups.push(numbers);
            }
        }

        log::debug!("resolve '{department}': {} group(s)", groups.len());
        Ok(groups)
    }
}
