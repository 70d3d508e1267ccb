//! Incident API transport over `window.fetch`.

use sentinel_core::{ApiError, DashboardConfig, Explanation, Incident, IncidentApi, NewIncident};
use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, RequestInit, Response};

pub struct FetchApi {
    config: DashboardConfig,
}

impl FetchApi {
    pub fn new(config: DashboardConfig) -> Self {
        Self { config }
    }
}

impl IncidentApi for FetchApi {
    async fn list_incidents(&self) -> Result<Vec<Incident>, ApiError> {
        let url = self.config.incidents_url();
        let response = send(&url, &get()).await?;
        read_json(&response).await
    }

    async fn create_incident(&self, incident: &NewIncident) -> Result<(), ApiError> {
        let url = self.config.incidents_url();
        let body = serde_json::to_string(incident).map_err(|e| ApiError::Encode(e.to_string()))?;
        let init = post_json(&body)?;
        send(&url, &init).await?;
        Ok(())
    }

    async fn explain_incident(&self, id: &str) -> Result<Explanation, ApiError> {
        let url = self.config.explain_url(id);
        let response = send(&url, &get()).await?;
        read_json(&response).await
    }
}

fn get() -> RequestInit {
    let init = RequestInit::new();
    init.set_method("GET");
    init
}

fn post_json(body: &str) -> Result<RequestInit, ApiError> {
    let headers = Headers::new().map_err(|e| ApiError::Transport(format!("headers: {e:?}")))?;
    headers
        .set("Content-Type", "application/json")
        .map_err(|e| ApiError::Transport(format!("headers: {e:?}")))?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_headers(&headers);
    init.set_body(&JsValue::from_str(body));
    Ok(init)
}

/// Issue the request and reject anything outside 2xx.
async fn send(url: &str, init: &RequestInit) -> Result<Response, ApiError> {
    let window = web_sys::window().ok_or_else(|| ApiError::Transport("window not available".into()))?;
    tracing::debug!(event = "dashboard.http.request", url);

    let value = JsFuture::from(window.fetch_with_str_and_init(url, init))
        .await
        .map_err(|e| ApiError::Transport(format!("fetch rejected: {e:?}")))?;
    let response: Response = value
        .dyn_into()
        .map_err(|_| ApiError::Transport("fetch did not resolve to a Response".into()))?;

    if !response.ok() {
        return Err(ApiError::Status {
            status: response.status(),
            url: url.to_string(),
        });
    }
    Ok(response)
}

async fn read_json<R: DeserializeOwned>(response: &Response) -> Result<R, ApiError> {
    let promise = response
        .json()
        .map_err(|e| ApiError::Decode(format!("{e:?}")))?;
    let value = JsFuture::from(promise)
        .await
        .map_err(|e| ApiError::Decode(format!("{e:?}")))?;
    serde_wasm_bindgen::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}
