use crate::clock::Clock;
use crate::domain::Domain;
use crate::types::measurement::Facility;
use crate::types::report::Finding;

pub fn lint_findings(facilities: &[&Facility], clock: &dyn Clock, domains: &[Domain]) -> Vec<Finding> {
    super::analyze(facilities, clock, domains).findings
}
