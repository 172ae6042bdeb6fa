//! Full escalation: every configured department, one after another,
//! through a single resolver and its shared caches.

use crate::{
    clock::Clock,
    directory::RemoteDirectory,
    error::EscalationResult,
    resolver::EscalationResolver,
    types::{DepartmentName, EscalationGroup},
};
use indexmap::IndexMap;

/// Department name → escalation groups, in configuration order.
pub type EscalationPlan = IndexMap<DepartmentName, Vec<EscalationGroup>>;

impl<D: RemoteDirectory, C: Clock> EscalationResolver<D, C> {
    /// Resolve every configured department. The first directory failure
    /// aborts the run; no partial plan is returned.
    pub fn full_escalation(&mut self) -> EscalationResult<EscalationPlan> {
        let names: Vec<DepartmentName> = self.department_names().cloned().collect();
        let mut plan = EscalationPlan::with_capacity(names.len());
        for name in names {
            let groups = self.resolve(&name)?;
            plan.insert(name, groups);
        }
        Ok(plan)
    }

    /// Like `full_escalation`, but a department whose resolution fails is
    /// logged and left out instead of aborting the run.
    pub fn full_escalation_skipping_failures(&mut self) -> EscalationPlan {
        let names: Vec<DepartmentName> = self.department_names().cloned().collect();
        let mut plan = EscalationPlan::with_capacity(names.len());
        for name in names {
            match self.resolve(&name) {
                Ok(groups) => {
                    plan.insert(name, groups);
                }
                Err(e) => log::error!("resolve '{name}': skipped: {e}"),
            }
        }
        plan
    }
}
