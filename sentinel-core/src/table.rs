//! Incident table body model.
//!
//! The table body is rebuilt from scratch on every refresh. Rows carry the
//! API text verbatim; the view places it in text nodes, never in markup.

use crate::incident::{Incident, Severity};
use std::collections::HashSet;

pub const COLUMN_COUNT: usize = 5;
pub const EMPTY_MESSAGE: &str = "No incidents found.";

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TableRow {
    /// Identifier the row's explain action is bound to.
    pub id: String,
    pub badge_class: &'static str,
    pub badge_label: String,
    pub service: String,
    pub summary: String,
}

impl TableRow {
    fn from_incident(incident: &Incident) -> Self {
        Self {
            id: incident.id.clone(),
            badge_class: incident.severity.badge_class(),
            badge_label: incident.severity.as_str().to_uppercase(),
            service: incident.service.clone(),
            summary: incident.summary.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IncidentTable {
    /// Single full-width "no incidents" row.
    Placeholder,
    Rows(Vec<TableRow>),
}

impl Default for IncidentTable {
    fn default() -> Self {
        IncidentTable::Rows(Vec::new())
    }
}

impl IncidentTable {
    pub fn row_count(&self) -> usize {
        match self {
            IncidentTable::Placeholder => 1,
            IncidentTable::Rows(rows) => rows.len(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, IncidentTable::Placeholder)
    }

    /// Data rows paired with their position, empty for the placeholder.
    pub fn rows(&self) -> Vec<(usize, TableRow)> {
        match self {
            IncidentTable::Placeholder => Vec::new(),
            IncidentTable::Rows(rows) => rows.iter().cloned().enumerate().collect(),
        }
    }
}

pub fn render_table(incidents: &[Incident]) -> IncidentTable {
    if incidents.is_empty() {
        return IncidentTable::Placeholder;
    }
    IncidentTable::Rows(incidents.iter().map(TableRow::from_incident).collect())
}

/// Unrecognised severity values already reported in this page session.
#[derive(Debug, Default)]
pub struct UnknownSeverities {
    seen: HashSet<String>,
}

impl UnknownSeverities {
    /// Raw values in `incidents` not reported before, in first-seen order.
    pub fn first_sightings(&mut self, incidents: &[Incident]) -> Vec<String> {
        let mut fresh = Vec::new();
        for incident in incidents {
            if let Severity::Unknown(raw) = &incident.severity {
                if self.seen.insert(raw.clone()) {
                    fresh.push(raw.clone());
                }
            }
        }
        fresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incident(id: &str, sev: &str, service: &str, summary: &str) -> Incident {
        Incident {
            id: id.into(),
            severity: Severity::from_wire(sev),
            service: service.into(),
            summary: summary.into(),
        }
    }

    #[test]
    fn empty_list_renders_one_placeholder_row() {
        let table = render_table(&[]);
        assert_eq!(table, IncidentTable::Placeholder);
        assert!(table.is_placeholder());
        assert_eq!(table.row_count(), 1);
        assert!(table.rows().is_empty());
    }

    #[test]
    fn renders_one_row_per_incident_in_order() {
        let list = vec![
            incident("INC-1002", "crit", "api", "timeouts"),
            incident("INC-1001", "warn", "db", "slow queries"),
            incident("INC-1000", "ok", "cdn", "recovered"),
        ];
        let table = render_table(&list);
        assert_eq!(table.row_count(), 3);

        let ids: Vec<_> = table.rows().into_iter().map(|(_, row)| row.id).collect();
        assert_eq!(ids, ["INC-1002", "INC-1001", "INC-1000"]);
    }

    #[test]
    fn row_carries_badge_and_action_id() {
        let table = render_table(&[incident("INC-7", "warn", "billing", "retry storm")]);
        let (pos, row) = table.rows().remove(0);
        assert_eq!(pos, 0);
        assert_eq!(row.id, "INC-7");
        assert_eq!(row.badge_class, "warn");
        assert_eq!(row.badge_label, "WARN");
        assert_eq!(row.service, "billing");
        assert_eq!(row.summary, "retry storm");
    }

    #[test]
    fn api_text_is_kept_verbatim_for_text_nodes() {
        let table = render_table(&[incident(r#"x" onclick="boom"#, "crit", "<script>", "a & b")]);
        let (_, row) = table.rows().remove(0);
        assert_eq!(row.id, r#"x" onclick="boom"#);
        assert_eq!(row.service, "<script>");
        assert_eq!(row.summary, "a & b");
    }

    #[test]
    fn unknown_severity_uses_explicit_badge() {
        let (_, row) = render_table(&[incident("1", "sev9", "s", "t")]).rows().remove(0);
        assert_eq!(row.badge_class, "unknown");
        assert_eq!(row.badge_label, "SEV9");
    }

    #[test]
    fn unknown_severity_is_reported_once_per_value() {
        let mut seen = UnknownSeverities::default();
        let list = vec![
            incident("1", "sev9", "s", "t"),
            incident("2", "crit", "s", "t"),
            incident("3", "sev9", "s", "t"),
            incident("4", "P1", "s", "t"),
        ];
        assert_eq!(seen.first_sightings(&list), ["sev9", "P1"]);
        assert!(seen.first_sightings(&list).is_empty());

        let later = vec![incident("5", "P1", "s", "t"), incident("6", "", "s", "t")];
        assert_eq!(seen.first_sightings(&later), [""]);
    }
}
