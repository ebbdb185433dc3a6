//! Data model for mission records and the values that accompany them on
//! the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

/// A mission as returned by the service. The identifier is server-assigned
/// and immutable; title, operator, and launch date are the only fields the
/// client may change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub id: String,
    pub title: String,
    pub operator: String,
    pub launch: Launch,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Launch {
    pub date: DateTime<Utc>,
}

/// Validated user input for create and edit. Holding a parsed date here
/// means a missing launch date can never reach the transport layer.
#[derive(Debug, Clone, PartialEq)]
pub struct MissionInput {
    pub title: String,
    pub operator: String,
    pub date: DateTime<Utc>,
}

/// Sort field accepted by the `Missions` query. The serialized variant name
/// is the server-side enum value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum SortField {
    Title,
    Date,
    Operator,
}

impl SortField {
    pub const ALL: [SortField; 3] = [SortField::Title, SortField::Date, SortField::Operator];

    /// The next field in display order; used by the sort selector.
    pub fn next(self) -> Self {
        match self {
            SortField::Title => SortField::Date,
            SortField::Date => SortField::Operator,
            SortField::Operator => SortField::Title,
        }
    }
}

/// Fixed sub-objects accompanying every create request: launch vehicle and
/// site, orbit parameters, payload capacity. The service requires them but
/// the client exposes no controls for them, so they live in configuration
/// rather than in the request-building code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchDefaults {
    pub vehicle: String,
    pub site_name: String,
    pub longitude: f64,
    pub latitude: f64,
    pub periapsis: u32,
    pub apoapsis: u32,
    pub inclination: u32,
    pub payload_capacity: u32,
    pub payload_available: u32,
}

impl Default for LaunchDefaults {
    fn default() -> Self {
        Self {
            vehicle: "Epsilon IV".to_string(),
            site_name: "Vandenberg SLC-6".to_string(),
            longitude: -120.6266,
            latitude: -34.5813,
            periapsis: 700,
            apoapsis: 422,
            inclination: 90,
            payload_capacity: 28_000,
            payload_available: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sort_field_cycles_through_all_variants() {
        let mut field = SortField::Title;
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(field);
            field = field.next();
        }
        assert_eq!(seen, SortField::ALL.to_vec());
        assert_eq!(field, SortField::Title);
    }

    #[test]
    fn sort_field_serializes_as_server_enum_value() {
        assert_eq!(serde_json::to_value(SortField::Title).unwrap(), "Title");
        assert_eq!(serde_json::to_value(SortField::Date).unwrap(), "Date");
        assert_eq!(serde_json::to_value(SortField::Operator).unwrap(), "Operator");
    }

    #[test]
    fn mission_deserializes_from_server_shape() {
        let body = r#"{
            "id": "m-1",
            "title": "Europa Probe",
            "operator": "ESA",
            "launch": { "date": "2025-01-01T00:00:00Z" }
        }"#;
        let mission: Mission = serde_json::from_str(body).unwrap();
        assert_eq!(mission.id, "m-1");
        assert_eq!(mission.title, "Europa Probe");
        assert_eq!(mission.launch.date.to_rfc3339(), "2025-01-01T00:00:00+00:00");
    }

    #[test]
    fn launch_defaults_match_the_service_placeholders() {
        let defaults = LaunchDefaults::default();
        assert_eq!(defaults.vehicle, "Epsilon IV");
        assert_eq!(defaults.site_name, "Vandenberg SLC-6");
        assert_eq!(defaults.periapsis, 700);
        assert_eq!(defaults.apoapsis, 422);
        assert_eq!(defaults.inclination, 90);
        assert_eq!(defaults.payload_capacity, 28_000);
        assert_eq!(defaults.payload_available, 0);
    }
}
