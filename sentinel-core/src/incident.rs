use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Incident severity as reported by the incident API.
///
/// The wire form is the lowercase name. Anything else is kept verbatim in
/// `Unknown` so it can be rendered (and flagged) instead of silently mapped.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Crit,
    Warn,
    Info,
    Ok,
    Unknown(String),
}

impl Severity {
    pub fn from_wire(value: &str) -> Self {
        match value {
            "crit" => Severity::Crit,
            "warn" => Severity::Warn,
            "info" => Severity::Info,
            "ok" => Severity::Ok,
            other => Severity::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Severity::Crit => "crit",
            Severity::Warn => "warn",
            Severity::Info => "info",
            Severity::Ok => "ok",
            Severity::Unknown(raw) => raw,
        }
    }

    /// CSS class of the severity badge.
    pub fn badge_class(&self) -> &'static str {
        match self {
            Severity::Crit => "crit",
            Severity::Warn => "warn",
            Severity::Info => "info",
            Severity::Ok => "ok",
            Severity::Unknown(_) => "unknown",
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Unknown(String::new())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        lenient_text(deserializer).map(|raw| Severity::from_wire(&raw))
    }
}

/// One row of the incident collection. Owned by the API; never mutated here.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incident {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: String,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default, deserialize_with = "lenient_text")]
    pub service: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub summary: String,
}

/// Body of `POST /api/incidents`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewIncident {
    pub severity: Severity,
    pub service: String,
    pub summary: String,
}

pub const SIMULATED_SERVICE: &str = "frontend-app";
pub const SIMULATED_SUMMARY: &str = "Intermittent connection failure (simulated)";

impl NewIncident {
    /// Synthetic incident used by the "simulate" action. `coin` picks
    /// critical over warning.
    pub fn simulated(coin: bool) -> Self {
        Self {
            severity: if coin { Severity::Crit } else { Severity::Warn },
            service: SIMULATED_SERVICE.into(),
            summary: SIMULATED_SUMMARY.into(),
        }
    }
}

/// Response of `GET /api/incidents/{id}/explain`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Explanation {
    #[serde(default)]
    pub explanation: Option<String>,
}

// The API is not schema-checked: null and missing become "", other scalars
// keep their JSON text.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_severities() {
        assert_eq!(Severity::from_wire("crit"), Severity::Crit);
        assert_eq!(Severity::from_wire("warn"), Severity::Warn);
        assert_eq!(Severity::from_wire("info"), Severity::Info);
        assert_eq!(Severity::from_wire("ok"), Severity::Ok);
    }

    #[test]
    fn keeps_unrecognized_severity_verbatim() {
        let sev = Severity::from_wire("CRIT");
        assert_eq!(sev, Severity::Unknown("CRIT".into()));
        assert_eq!(sev.badge_class(), "unknown");
        assert_eq!(sev.as_str(), "CRIT");
    }

    #[test]
    fn decodes_incident_list_leniently() {
        let raw = r#"[
          {"id":"INC-1000","severity":"crit","service":"db","summary":"down","acknowledged":false},
          {"id":42,"severity":"sev9","service":null},
          {}
        ]"#;
        let list: Vec<Incident> = serde_json::from_str(raw).expect("decode");
        assert_eq!(list.len(), 3);
        assert_eq!(list[0].severity, Severity::Crit);
        assert_eq!(list[1].id, "42");
        assert_eq!(list[1].severity, Severity::Unknown("sev9".into()));
        assert_eq!(list[1].service, "");
        assert_eq!(list[1].summary, "");
        assert_eq!(list[2], Incident::default());
    }

    #[test]
    fn simulated_incident_serializes_wire_severity() {
        let body = serde_json::to_value(NewIncident::simulated(true)).expect("json");
        assert_eq!(body["severity"], "crit");
        assert_eq!(body["service"], SIMULATED_SERVICE);

        let body = serde_json::to_value(NewIncident::simulated(false)).expect("json");
        assert_eq!(body["severity"], "warn");
    }

    #[test]
    fn explanation_field_is_optional() {
        let e: Explanation = serde_json::from_str(r#"{"detail":"not found"}"#).expect("decode");
        assert_eq!(e.explanation, None);
        let e: Explanation = serde_json::from_str(r#"{"explanation":"disk full"}"#).expect("decode");
        assert_eq!(e.explanation.as_deref(), Some("disk full"));
    }
}
