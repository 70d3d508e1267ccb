use leptos::*;
use sentinel_core::{Connectivity, Counters, DashboardView, ExplanationPanel, IncidentTable, Toast};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToastEntry {
    pub id: u64,
    pub toast: Toast,
}

/// Reactive page state written by the refresh pipeline.
#[derive(Clone, Copy)]
pub struct SignalView {
    pub connectivity: RwSignal<Connectivity>,
    pub table: RwSignal<IncidentTable>,
    pub counters: RwSignal<Counters>,
    pub toasts: RwSignal<Vec<ToastEntry>>,
    pub explanation: RwSignal<Option<ExplanationPanel>>,
    next_toast: StoredValue<u64>,
    toast_ttl: Duration,
}

impl SignalView {
    pub fn new(toast_ttl: Duration) -> Self {
        Self {
            connectivity: create_rw_signal(Connectivity::default()),
            table: create_rw_signal(IncidentTable::default()),
            counters: create_rw_signal(Counters::default()),
            toasts: create_rw_signal(Vec::new()),
            explanation: create_rw_signal(None),
            next_toast: store_value(0),
            toast_ttl,
        }
    }
}

impl DashboardView for SignalView {
    fn set_connectivity(&self, status: Connectivity) {
        self.connectivity.set(status);
    }

    fn render_table(&self, table: &IncidentTable) {
        self.table.set(table.clone());
    }

    fn render_counters(&self, counters: &Counters) {
        self.counters.set(*counters);
    }

    fn notify(&self, toast: Toast) {
        let id = self.next_toast.get_value();
        self.next_toast.set_value(id + 1);
        self.toasts.update(|list| list.push(ToastEntry { id, toast }));

        let toasts = self.toasts;
        set_timeout(
            move || toasts.update(|list| list.retain(|entry| entry.id != id)),
            self.toast_ttl,
        );
    }

    fn show_explanation(&self, panel: ExplanationPanel) {
        self.explanation.set(Some(panel));
    }
}
