use crate::counters::Counters;
use crate::table::IncidentTable;

/// Backend reachability as last observed by a refresh.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Connectivity {
    #[default]
    Connecting,
    Online,
    Offline,
}

impl Connectivity {
    pub fn label(&self) -> &'static str {
        match self {
            Connectivity::Connecting => "CONNECTING",
            Connectivity::Online => "ONLINE",
            Connectivity::Offline => "OFFLINE",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Connectivity::Connecting => "var(--muted)",
            Connectivity::Online => "var(--a-lime)",
            Connectivity::Offline => "var(--a-mag)",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: String,
    pub message: String,
}

impl Toast {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

pub const EXPLAIN_LOADING: &str = "Asking the assistant... please wait.";
pub const EXPLAIN_EMPTY: &str = "No explanation returned.";
pub const EXPLAIN_FAILED: &str = "Could not fetch an explanation (check the API key on the backend).";

/// Contents of the explanation panel. Text is plain text, never markup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExplanationPanel {
    Loading { incident_id: String },
    Ready { incident_id: String, text: String },
    Failed { incident_id: String },
}

impl ExplanationPanel {
    pub fn incident_id(&self) -> &str {
        match self {
            ExplanationPanel::Loading { incident_id }
            | ExplanationPanel::Ready { incident_id, .. }
            | ExplanationPanel::Failed { incident_id } => incident_id,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            ExplanationPanel::Loading { .. } => EXPLAIN_LOADING,
            ExplanationPanel::Ready { text, .. } => text,
            ExplanationPanel::Failed { .. } => EXPLAIN_FAILED,
        }
    }
}

/// Page surface the pipeline writes derived state into.
pub trait DashboardView {
    fn set_connectivity(&self, status: Connectivity);
    fn render_table(&self, table: &IncidentTable);
    fn render_counters(&self, counters: &Counters);
    fn notify(&self, toast: Toast);
    /// Reveal the explanation panel (if hidden) and show `panel`.
    fn show_explanation(&self, panel: ExplanationPanel);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connectivity_labels() {
        assert_eq!(Connectivity::default(), Connectivity::Connecting);
        assert_eq!(Connectivity::Online.label(), "ONLINE");
        assert_eq!(Connectivity::Offline.color(), "var(--a-mag)");
    }

    #[test]
    fn panel_text_uses_fixed_strings() {
        let id = "INC-1".to_string();
        assert_eq!(
            ExplanationPanel::Loading { incident_id: id.clone() }.text(),
            EXPLAIN_LOADING
        );
        assert_eq!(
            ExplanationPanel::Failed { incident_id: id.clone() }.text(),
            EXPLAIN_FAILED
        );
        let ready = ExplanationPanel::Ready {
            incident_id: id,
            text: "<b>disk</b>".into(),
        };
        assert_eq!(ready.text(), "<b>disk</b>");
        assert_eq!(ready.incident_id(), "INC-1");
    }
}
