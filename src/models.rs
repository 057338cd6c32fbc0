use serde::{de, Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Confirmation returned by delete endpoints
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Category deleted successfully")]
    pub message: String,
}

impl MessageResponse {
    pub fn deleted(entity: &str) -> Self {
        Self {
            message: format!("{entity} deleted successfully"),
        }
    }
}

/// For `Option` fields of partial updates: a missing key is `None`, an
/// explicit `null` is rejected. Use together with `#[serde(default)]`.
pub fn non_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<T>::deserialize(deserializer)? {
        Some(value) => Ok(Some(value)),
        None => Err(de::Error::custom("null is not allowed; omit the field instead")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "non_null")]
        note: Option<String>,
    }

    #[test]
    fn missing_field_is_none() {
        let patch: Patch = serde_json::from_value(json!({})).unwrap();
        assert!(patch.note.is_none());
    }

    #[test]
    fn explicit_null_is_rejected() {
        let err = serde_json::from_value::<Patch>(json!({"note": null})).unwrap_err();
        assert!(err.to_string().contains("null is not allowed"));
    }

    #[test]
    fn present_value_is_kept() {
        let patch: Patch = serde_json::from_value(json!({"note": "x"})).unwrap();
        assert_eq!(patch.note.as_deref(), Some("x"));
    }

    #[test]
    fn delete_message_names_the_entity() {
        assert_eq!(
            MessageResponse::deleted("Fund").message,
            "Fund deleted successfully"
        );
    }
}
