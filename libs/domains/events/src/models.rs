use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Event entity.
///
/// On the wire this is exactly `{"id","name","date","description"}`. The
/// stored form lives in [`crate::mongodb::EventDocument`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Event {
    /// Unique identifier; also the partition key
    #[schema(example = "1")]
    pub id: String,
    #[schema(example = "Demo")]
    pub name: String,
    /// Free-form date string, not parsed
    #[schema(example = "2024-01-01")]
    pub date: String,
    #[schema(example = "x")]
    pub description: String,
}

/// Create payload.
///
/// Every field is optional at the type level so that a missing field is a
/// validation failure rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateEvent {
    /// Assigned by the service when absent or empty. A JSON number is
    /// accepted and kept as its decimal text.
    #[serde(default, deserialize_with = "string_or_number")]
    #[schema(value_type = Option<String>)]
    pub id: Option<String>,

    #[serde(default)]
    #[validate(required, length(min = 1))]
    pub name: Option<String>,

    #[serde(default)]
    #[validate(required, length(min = 1))]
    pub date: Option<String>,

    #[serde(default)]
    #[validate(required, length(min = 1))]
    pub description: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
            RawId::Text(id) => id,
            RawId::Number(n) => n.to_string(),
        }),
    )
}

impl CreateEvent {
    /// The caller-supplied id, ignoring an empty string.
    pub fn requested_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// Builds the event once the id is known. Call after validation.
    pub fn into_event(self, id: String) -> Event {
        Event {
            id,
            name: self.name.unwrap_or_default(),
            date: self.date.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
        }
    }
}

/// Update payload. Absent and `null` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct UpdateEvent {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub date: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

impl Event {
    /// Merge an update into this event; the id never changes.
    pub fn apply_update(&mut self, update: UpdateEvent) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Event {
        Event {
            id: "7".to_string(),
            name: "Demo".to_string(),
            date: "2024-01-01".to_string(),
            description: "x".to_string(),
        }
    }

    #[test]
    fn test_event_wire_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            json,
            json!({ "id": "7", "name": "Demo", "date": "2024-01-01", "description": "x" })
        );
    }

    #[test]
    fn test_create_event_validation() {
        let ok: CreateEvent =
            serde_json::from_value(json!({ "name": "a", "date": "b", "description": "c" })).unwrap();
        assert!(ok.validate().is_ok());

        let missing: CreateEvent =
            serde_json::from_value(json!({ "name": "a", "date": "b" })).unwrap();
        assert!(missing.validate().is_err());

        let empty: CreateEvent =
            serde_json::from_value(json!({ "name": "", "date": "b", "description": "c" }))
                .unwrap();
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_create_event_numeric_id_kept_as_text() {
        let input: CreateEvent = serde_json::from_value(
            json!({ "id": 5, "name": "a", "date": "b", "description": "c" }),
        )
        .unwrap();
        assert_eq!(input.requested_id(), Some("5"));
        assert!(input.validate().is_ok());

        let null_id: CreateEvent =
            serde_json::from_value(json!({ "id": null, "name": "a" })).unwrap();
        assert_eq!(null_id.id, None);

        assert!(serde_json::from_value::<CreateEvent>(json!({ "id": true })).is_err());
    }

    #[test]
    fn test_requested_id_ignores_empty() {
        let input = CreateEvent {
            id: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(input.requested_id(), None);

        let input = CreateEvent {
            id: Some("42".to_string()),
            ..Default::default()
        };
        assert_eq!(input.requested_id(), Some("42"));
    }

    #[test]
    fn test_update_null_is_absent() {
        let update: UpdateEvent =
            serde_json::from_value(json!({ "name": null, "date": "2025-02-02" })).unwrap();
        assert_eq!(update.name, None);
        assert_eq!(update.date.as_deref(), Some("2025-02-02"));
    }

    #[test]
    fn test_apply_update_changes_only_present_fields() {
        let mut event = sample();
        event.apply_update(UpdateEvent {
            name: Some("X".to_string()),
            ..Default::default()
        });

        assert_eq!(event.name, "X");
        assert_eq!(event.date, "2024-01-01");
        assert_eq!(event.description, "x");
        assert_eq!(event.id, "7");
    }

    #[test]
    fn test_apply_empty_update_is_noop() {
        let mut event = sample();
        event.apply_update(UpdateEvent::default());
        assert_eq!(event, sample());
    }
}
