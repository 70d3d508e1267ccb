//! Platform-neutral core of the SentinelOneOps incident dashboard.
//!
//! Everything that decides *what* the page shows lives here; the browser
//! crate only supplies the transport, the chart backend and the DOM.

pub mod api;
pub mod chart;
pub mod config;
pub mod counters;
pub mod incident;
pub mod pipeline;
pub mod sequence;
pub mod table;
pub mod view;

pub use api::{ApiError, IncidentApi};
pub use chart::{ChartDataset, ChartError, ChartRenderer, HealthChart};
pub use config::DashboardConfig;
pub use counters::{compute_counters, Counters};
pub use incident::{Explanation, Incident, NewIncident, Severity};
pub use pipeline::{RefreshOutcome, RefreshPipeline};
pub use table::{render_table, IncidentTable, TableRow};
pub use view::{Connectivity, DashboardView, ExplanationPanel, Toast, ToastKind};
