use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::time::Duration;

/// Deployment the dashboard talks to. There is no runtime override.
pub const DEFAULT_API_BASE: &str = "https://sentineloneops-660011594323.southamerica-east1.run.app";
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(5);
pub const TOAST_TTL: Duration = Duration::from_secs(4);

// Everything that could end or split a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardConfig {
    pub api_base: String,
    pub refresh_interval: Duration,
    pub toast_ttl: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.into(),
            refresh_interval: REFRESH_INTERVAL,
            toast_ttl: TOAST_TTL,
        }
    }
}

impl DashboardConfig {
    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            ..Self::default()
        }
    }

    fn base(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }

    pub fn incidents_url(&self) -> String {
        format!("{}/api/incidents", self.base())
    }

    /// The id is opaque, so it is encoded as exactly one path segment.
    pub fn explain_url(&self, incident_id: &str) -> String {
        format!(
            "{}/api/incidents/{}/explain",
            self.base(),
            utf8_percent_encode(incident_id, PATH_SEGMENT)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_deployment() {
        let cfg = DashboardConfig::default();
        assert_eq!(cfg.api_base, DEFAULT_API_BASE);
        assert_eq!(cfg.refresh_interval, Duration::from_secs(5));
        assert_eq!(cfg.toast_ttl, Duration::from_secs(4));
    }

    #[test]
    fn builds_endpoint_urls() {
        let cfg = DashboardConfig::with_api_base("http://localhost:8000/");
        assert_eq!(cfg.incidents_url(), "http://localhost:8000/api/incidents");
        assert_eq!(
            cfg.explain_url("INC-1003"),
            "http://localhost:8000/api/incidents/INC-1003/explain"
        );
    }

    #[test]
    fn explain_url_keeps_reserved_characters_inside_one_segment() {
        let cfg = DashboardConfig::with_api_base("http://h");
        assert_eq!(
            cfg.explain_url("INC 7/x?y#z"),
            "http://h/api/incidents/INC%207%2Fx%3Fy%23z/explain"
        );
        assert_eq!(
            cfg.explain_url("50%"),
            "http://h/api/incidents/50%25/explain"
        );
        assert_eq!(
            cfg.explain_url("ñandú"),
            "http://h/api/incidents/%C3%B1and%C3%BA/explain"
        );
    }
}
