use serde::{Deserialize, Deserializer, Serialize};

use crate::todos::repo_types::TodoPatch;

/// Input of `createTodo`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodoRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Input of `updateTodo`. Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTodoRequest {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl UpdateTodoRequest {
    pub fn new(id: i64, patch: TodoPatch) -> Self {
        Self {
            id,
            title: patch.title,
            description: patch.description,
            completed: patch.completed,
        }
    }

    pub fn into_parts(self) -> (i64, TodoPatch) {
        (
            self.id,
            TodoPatch {
                title: self.title,
                description: self.description,
                completed: self.completed,
            },
        )
    }
}

/// Input of `toggleTodo`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ToggleTodoRequest {
    pub id: i64,
    pub completed: bool,
}

/// Input of `deleteTodo`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DeleteTodoRequest {
    pub id: i64,
}

/// Output of `deleteTodo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteTodoResponse {
    pub success: bool,
}

// Present key (even `null`) → Some(..); missing key falls back to `default` → None.
fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(v: serde_json::Value) -> TodoPatch {
        serde_json::from_value::<UpdateTodoRequest>(v)
            .unwrap()
            .into_parts()
            .1
    }

    #[test]
    fn description_three_states() {
        assert_eq!(parse(json!({"id": 1})).description, None);
        assert_eq!(
            parse(json!({"id": 1, "description": null})).description,
            Some(None)
        );
        assert_eq!(
            parse(json!({"id": 1, "description": "new"})).description,
            Some(Some("new".to_string()))
        );
    }

    #[test]
    fn id_only_update_is_an_empty_patch() {
        assert!(parse(json!({"id": 7})).is_empty());
    }

    #[test]
    fn update_request_serializes_explicit_null_but_skips_omitted() {
        let cleared = UpdateTodoRequest {
            id: 1,
            description: Some(None),
            ..UpdateTodoRequest::default()
        };
        assert_eq!(
            serde_json::to_value(&cleared).unwrap(),
            json!({"id": 1, "description": null})
        );

        let omitted = UpdateTodoRequest {
            id: 1,
            completed: Some(true),
            ..UpdateTodoRequest::default()
        };
        assert_eq!(
            serde_json::to_value(&omitted).unwrap(),
            json!({"id": 1, "completed": true})
        );
    }

    #[test]
    fn create_request_description_is_optional() {
        let req: CreateTodoRequest = serde_json::from_value(json!({"title": "Buy milk"})).unwrap();
        assert_eq!(req.description, None);
    }

    #[test]
    fn wrong_type_is_rejected() {
        let res = serde_json::from_value::<UpdateTodoRequest>(json!({"id": 1, "description": 5}));
        assert!(res.is_err());
    }
}
