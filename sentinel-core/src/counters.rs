use crate::incident::{Incident, Severity};
use serde::Serialize;

/// Severity tallies shown in the KPI cards and fed to the health chart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Counters {
    pub crit: usize,
    pub warn: usize,
    pub total: usize,
}

impl Counters {
    pub fn healthy(&self) -> usize {
        self.total.saturating_sub(self.crit + self.warn)
    }
}

pub fn compute_counters(incidents: &[Incident]) -> Counters {
    let mut counters = Counters {
        total: incidents.len(),
        ..Counters::default()
    };
    for incident in incidents {
        match incident.severity {
            Severity::Crit => counters.crit += 1,
            Severity::Warn => counters.warn += 1,
            _ => {}
        }
    }
    counters
}
