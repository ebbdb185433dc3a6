//! The four mission operations. Each builds a request document plus its
//! variables and delegates to the transport adapter; none of them touch
//! view state.
//!
//! The list query relies on the server for ordering — the result is never
//! re-sorted client-side. Mutations return the affected record (or its id
//! for delete); the caller is responsible for refreshing its snapshot.

use chrono::SecondsFormat;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::client::GraphqlClient;
use crate::error::ApiError;
use crate::model::{LaunchDefaults, Mission, MissionInput, SortField};

pub const MISSIONS_QUERY: &str = r#"query ($sortField: MissionSortFields!, $sortDesc: Boolean) {
  Missions(sort: { field: $sortField, desc: $sortDesc }) {
    id
    title
    operator
    launch {
      date
    }
  }
}"#;

pub const EDIT_MISSION_MUTATION: &str = r#"mutation ($id: ID!, $title: String!, $operator: String!, $date: DateTime!) {
  editMission(id: $id, title: $title, operator: $operator, date: $date) {
    id
    title
    operator
    launch {
      date
    }
  }
}"#;

pub const DELETE_MISSION_MUTATION: &str = r#"mutation ($id: ID!) {
  deleteMission(id: $id) {
    id
  }
}"#;

#[derive(Debug, Deserialize)]
struct MissionsData {
    #[serde(rename = "Missions")]
    missions: Vec<Mission>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateMissionData {
    create_mission: Mission,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EditMissionData {
    edit_mission: Mission,
}

#[derive(Debug, Deserialize)]
struct DeletedMission {
    id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteMissionData {
    delete_mission: DeletedMission,
}

/// Variables for the list query: exactly the sort pair, nothing else.
pub fn list_variables(field: SortField, descending: bool) -> Value {
    json!({
        "sortField": field,
        "sortDesc": descending,
    })
}

/// Variables shared by create and edit: the three client-editable fields.
/// The date goes out as RFC 3339 UTC with a `Z` suffix.
pub fn mission_variables(input: &MissionInput) -> Value {
    json!({
        "title": input.title,
        "operator": input.operator,
        "date": input.date.to_rfc3339_opts(SecondsFormat::Secs, true),
    })
}

/// Build the create document with the configured launch defaults inlined.
/// Only title, operator, and date travel as variables; the defaults are not
/// user input and stay part of the document itself.
pub fn create_document(defaults: &LaunchDefaults) -> String {
    format!(
        r#"mutation ($title: String!, $operator: String!, $date: DateTime!) {{
  createMission(mission: {{
    title: $title
    operator: $operator
    launch: {{
      date: $date
      vehicle: "{vehicle}"
      location: {{
        name: "{site}"
        longitude: {longitude}
        latitude: {latitude}
      }}
    }}
    orbit: {{
      periapsis: {periapsis}
      apoapsis: {apoapsis}
      inclination: {inclination}
    }}
    payload: {{
      capacity: {capacity}
      available: {available}
    }}
  }}) {{
    id
    title
    operator
    launch {{
      date
    }}
  }}
}}"#,
        vehicle = escape_string(&defaults.vehicle),
        site = escape_string(&defaults.site_name),
        longitude = defaults.longitude,
        latitude = defaults.latitude,
        periapsis = defaults.periapsis,
        apoapsis = defaults.apoapsis,
        inclination = defaults.inclination,
        capacity = defaults.payload_capacity,
        available = defaults.payload_available,
    )
}

/// Escape a value for inclusion in a GraphQL string literal.
fn escape_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Fetch the full mission list, ordered by the server.
pub async fn list_missions(
    client: &GraphqlClient,
    field: SortField,
    descending: bool,
) -> Result<Vec<Mission>, ApiError> {
    let data: MissionsData = client
        .execute(MISSIONS_QUERY, list_variables(field, descending))
        .await?;
    Ok(data.missions)
}

/// Create a mission from validated input plus the configured defaults.
pub async fn create_mission(
    client: &GraphqlClient,
    input: &MissionInput,
    defaults: &LaunchDefaults,
) -> Result<Mission, ApiError> {
    let document = create_document(defaults);
    let data: CreateMissionData = client
        .execute(&document, mission_variables(input))
        .await?;
    Ok(data.create_mission)
}

/// Update the three client-editable fields of an existing mission.
pub async fn update_mission(
    client: &GraphqlClient,
    id: &str,
    input: &MissionInput,
) -> Result<Mission, ApiError> {
    let mut variables = mission_variables(input);
    variables["id"] = Value::String(id.to_string());
    let data: EditMissionData = client.execute(EDIT_MISSION_MUTATION, variables).await?;
    Ok(data.edit_mission)
}

/// Delete a mission; the server answers with the deleted identifier.
pub async fn delete_mission(client: &GraphqlClient, id: &str) -> Result<String, ApiError> {
    let data: DeleteMissionData = client
        .execute(DELETE_MISSION_MUTATION, json!({ "id": id }))
        .await?;
    Ok(data.delete_mission.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::decode_envelope;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn europa_probe() -> MissionInput {
        MissionInput {
            title: "Europa Probe".to_string(),
            operator: "ESA".to_string(),
            date: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn list_variables_pass_the_sort_pair_verbatim() {
        for field in SortField::ALL {
            for descending in [false, true] {
                let vars = list_variables(field, descending);
                assert_eq!(vars["sortField"], field.to_string());
                assert_eq!(vars["sortDesc"], descending);
                assert_eq!(vars.as_object().unwrap().len(), 2);
            }
        }
    }

    #[test]
    fn mission_variables_carry_exactly_three_fields() {
        let vars = mission_variables(&europa_probe());
        assert_eq!(vars["title"], "Europa Probe");
        assert_eq!(vars["operator"], "ESA");
        assert_eq!(vars["date"], "2025-01-01T00:00:00Z");
        assert_eq!(vars.as_object().unwrap().len(), 3);
    }

    #[test]
    fn create_document_inlines_the_configured_defaults() {
        let document = create_document(&LaunchDefaults::default());
        assert!(document.contains("createMission"));
        assert!(document.contains(r#"vehicle: "Epsilon IV""#));
        assert!(document.contains(r#"name: "Vandenberg SLC-6""#));
        assert!(document.contains("longitude: -120.6266"));
        assert!(document.contains("latitude: -34.5813"));
        assert!(document.contains("periapsis: 700"));
        assert!(document.contains("apoapsis: 422"));
        assert!(document.contains("inclination: 90"));
        assert!(document.contains("capacity: 28000"));
        assert!(document.contains("available: 0"));
        // user fields stay variables, not literals
        assert!(document.contains("title: $title"));
        assert!(document.contains("date: $date"));
    }

    #[test]
    fn create_document_escapes_quoted_defaults() {
        let defaults = LaunchDefaults {
            vehicle: r#"Epsilon "IV""#.to_string(),
            ..LaunchDefaults::default()
        };
        let document = create_document(&defaults);
        assert!(document.contains(r#"vehicle: "Epsilon \"IV\"""#));
    }

    #[test]
    fn documents_name_the_expected_operations() {
        assert!(MISSIONS_QUERY.contains("Missions(sort:"));
        assert!(EDIT_MISSION_MUTATION.contains("editMission"));
        assert!(DELETE_MISSION_MUTATION.contains("deleteMission"));
    }

    #[test]
    fn list_payload_decodes_under_the_operation_key() {
        let body = r#"{
            "data": {
                "Missions": [
                    {
                        "id": "m-1",
                        "title": "Ares 3",
                        "operator": "NASA",
                        "launch": { "date": "2031-11-07T12:00:00Z" }
                    }
                ]
            }
        }"#;
        let data: MissionsData = decode_envelope(body).unwrap();
        assert_eq!(data.missions.len(), 1);
        assert_eq!(data.missions[0].title, "Ares 3");
    }

    #[test]
    fn delete_payload_echoes_the_identifier() {
        let body = r#"{ "data": { "deleteMission": { "id": "m-9" } } }"#;
        let data: DeleteMissionData = decode_envelope(body).unwrap();
        assert_eq!(data.delete_mission.id, "m-9");
    }

    #[test]
    fn update_variables_include_the_identifier() {
        let mut vars = mission_variables(&europa_probe());
        vars["id"] = Value::String("m-4".to_string());
        assert_eq!(vars["id"], "m-4");
        assert_eq!(vars.as_object().unwrap().len(), 4);
    }
}
