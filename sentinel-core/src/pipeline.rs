use crate::api::{ApiError, IncidentApi};
use crate::chart::{ChartDataset, ChartRenderer, HealthChart};
use crate::counters::{compute_counters, Counters};
use crate::incident::{Explanation, Incident, NewIncident};
use crate::sequence::RequestSequence;
use crate::table::{render_table, UnknownSeverities};
use crate::view::{Connectivity, DashboardView, ExplanationPanel, Toast, EXPLAIN_EMPTY};
use std::cell::{Ref, RefCell};

/// What a single `load_incidents` call ended up doing to the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Fresh data replaced the table, counters and chart.
    Applied(Counters),
    /// The fetch failed; the indicator went offline and the old view stays.
    Failed,
    /// A newer refresh already landed, so this one was dropped.
    Stale,
}

/// Polling, fetch, render and chart update for the incident dashboard.
///
/// Constructed once per page session. Handlers share it by reference; every
/// method takes `&self` and keeps its mutable state in cells.
pub struct RefreshPipeline<A, V, R: ChartRenderer> {
    api: A,
    view: V,
    chart: RefCell<HealthChart<R>>,
    refreshes: RequestSequence,
    explanations: RequestSequence,
    unknown_severities: RefCell<UnknownSeverities>,
}

impl<A, V, R> RefreshPipeline<A, V, R>
where
    A: IncidentApi,
    V: DashboardView,
    R: ChartRenderer,
{
    pub fn new(api: A, view: V, renderer: R) -> Self {
        Self {
            api,
            view,
            chart: RefCell::new(HealthChart::new(renderer)),
            refreshes: RequestSequence::new(),
            explanations: RequestSequence::new(),
            unknown_severities: RefCell::new(UnknownSeverities::default()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn chart_dataset(&self) -> Option<ChartDataset> {
        self.chart.borrow().dataset()
    }

    pub fn chart_initialized(&self) -> bool {
        self.chart.borrow().is_initialized()
    }

    pub fn renderer(&self) -> Ref<'_, R> {
        Ref::map(self.chart.borrow(), |chart| chart.renderer())
    }

    /// Fetch the incident collection and rebuild every derived view from it.
    ///
    /// Overlapping calls are allowed. Whichever was started last wins: an
    /// outcome older than the last applied one is discarded.
    pub async fn load_incidents(&self) -> RefreshOutcome {
        let token = self.refreshes.begin();
        let result = self.api.list_incidents().await;

        if !self.refreshes.try_apply(token) {
            tracing::debug!(
                event = "dashboard.refresh.stale_discarded",
                seq = token.get(),
                applied = self.refreshes.last_applied(),
            );
            return RefreshOutcome::Stale;
        }

        match result {
            Ok(incidents) => {
                self.view.set_connectivity(Connectivity::Online);
                let counters = self.apply(&incidents);
                tracing::info!(
                    event = "dashboard.refresh.completed",
                    seq = token.get(),
                    total = counters.total,
                    crit = counters.crit,
                    warn = counters.warn,
                );
                RefreshOutcome::Applied(counters)
            }
            Err(e) => {
                tracing::error!(
                    event = "dashboard.refresh.failed",
                    seq = token.get(),
                    error = %e,
                );
                self.view.set_connectivity(Connectivity::Offline);
                RefreshOutcome::Failed
            }
        }
    }

    /// Post a simulated incident. Only a confirmed write is reported as a
    /// success, and only then is the list reloaded.
    pub async fn create_incident(&self, critical: bool) -> Result<(), ApiError> {
        let incident = NewIncident::simulated(critical);
        match self.api.create_incident(&incident).await {
            Ok(()) => {
                tracing::info!(
                    event = "dashboard.incident.created",
                    severity = %incident.severity,
                );
                self.view
                    .notify(Toast::success("Success", "Incident created on the backend."));
                self.load_incidents().await;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(event = "dashboard.incident.create_failed", error = %e);
                self.view
                    .notify(Toast::error("Error", "Could not create the incident."));
                Err(e)
            }
        }
    }

    /// Fetch the narrative for one incident into the explanation panel.
    ///
    /// Only the most recently requested explanation is ever shown.
    pub async fn explain_incident(&self, incident_id: &str) {
        let token = self.explanations.begin();
        self.view.show_explanation(ExplanationPanel::Loading {
            incident_id: incident_id.to_string(),
        });

        let result = self.api.explain_incident(incident_id).await;
        if !self.explanations.is_latest(token) {
            tracing::debug!(
                event = "dashboard.explain.superseded",
                incident_id,
                seq = token.get(),
            );
            return;
        }

        let incident_id = incident_id.to_string();
        let panel = match result {
            Ok(Explanation {
                explanation: Some(text),
            }) if !text.is_empty() => ExplanationPanel::Ready { incident_id, text },
            Ok(_) => ExplanationPanel::Ready {
                incident_id,
                text: EXPLAIN_EMPTY.into(),
            },
            Err(e) => {
                tracing::warn!(
                    event = "dashboard.explain.failed",
                    incident_id = %incident_id,
                    error = %e,
                );
                ExplanationPanel::Failed { incident_id }
            }
        };
        self.view.show_explanation(panel);
    }

    // One synchronous pass: nothing is carried over from the previous fetch.
    fn apply(&self, incidents: &[Incident]) -> Counters {
        let fresh = self.unknown_severities.borrow_mut().first_sightings(incidents);
        for raw in fresh {
            tracing::warn!(
                event = "dashboard.severity.unrecognized",
                severity = %raw,
                "incident API returned a severity outside crit/warn/info/ok"
            );
        }
        self.view.render_table(&render_table(incidents));

        let counters = compute_counters(incidents);
        self.view.render_counters(&counters);

        if let Err(e) = self.chart.borrow_mut().update(&counters) {
            tracing::warn!(event = "dashboard.chart.unavailable", error = %e);
        }
        counters
    }
}
