use crate::incident::{Explanation, Incident, NewIncident};
use std::future::Future;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{url} answered HTTP {status}")]
    Status { status: u16, url: String },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("could not encode request body: {0}")]
    Encode(String),
}

/// Read/write access to the remote incident API.
///
/// Futures are not required to be `Send`: the browser transport resolves
/// JS promises on the page's single thread.
pub trait IncidentApi {
    /// `GET /api/incidents`. Non-2xx is an error.
    fn list_incidents(&self) -> impl Future<Output = Result<Vec<Incident>, ApiError>>;

    /// `POST /api/incidents`. Non-2xx is an error; the body is ignored.
    fn create_incident(&self, incident: &NewIncident)
        -> impl Future<Output = Result<(), ApiError>>;

    /// `GET /api/incidents/{id}/explain`. Non-2xx is an error.
    fn explain_incident(&self, id: &str) -> impl Future<Output = Result<Explanation, ApiError>>;
}
