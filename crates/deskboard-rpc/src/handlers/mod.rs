//! Action handler modules and registration.

pub mod board;
pub mod column;
pub mod task;

use serde_json::Value;

use crate::errors::ActionError;
use crate::registry::ActionRegistry;

/// Register all board actions with the registry.
pub fn register_all(registry: &mut ActionRegistry) {
    // Board
    registry.register("getAll", board::GetAllHandler);

    // Tasks
    registry.register("createTask", task::CreateTaskHandler);
    registry.register("moveTask", task::MoveTaskHandler);
    registry.register("toggleComplete", task::ToggleCompleteHandler);
    registry.register("togglePriority", task::TogglePriorityHandler);
    registry.register("deleteTask", task::DeleteTaskHandler);
    registry.register("duplicateTask", task::DuplicateTaskHandler);

    // Columns
    registry.register("createColumn", column::CreateColumnHandler);
    registry.register("deleteColumn", column::DeleteColumnHandler);
    registry.register("reorderColumn", column::ReorderColumnHandler);
}

/// Extract a required field from the data object.
pub(crate) fn require_param<'a>(
    data: Option<&'a Value>,
    key: &str,
) -> Result<&'a Value, ActionError> {
    data.and_then(|d| d.get(key))
        .ok_or_else(|| ActionError::validation(format!("Missing required field: {key}")))
}

/// Extract a required, non-empty string field.
pub(crate) fn require_string_param(
    data: Option<&Value>,
    key: &str,
) -> Result<String, ActionError> {
    let value = require_param(data, key)?
        .as_str()
        .map(ToOwned::to_owned)
        .ok_or_else(|| ActionError::validation(format!("Field '{key}' must be a string")))?;
    if value.is_empty() {
        return Err(ActionError::validation(format!(
            "Field '{key}' must not be empty"
        )));
    }
    Ok(value)
}

/// Extract a required boolean field.
pub(crate) fn require_bool_param(data: Option<&Value>, key: &str) -> Result<bool, ActionError> {
    require_param(data, key)?
        .as_bool()
        .ok_or_else(|| ActionError::validation(format!("Field '{key}' must be a boolean")))
}

/// Extract a required array-of-strings field.
pub(crate) fn require_string_array_param(
    data: Option<&Value>,
    key: &str,
) -> Result<Vec<String>, ActionError> {
    let array = require_param(data, key)?
        .as_array()
        .ok_or_else(|| ActionError::validation(format!("Field '{key}' must be an array")))?;
    array
        .iter()
        .map(|v| {
            v.as_str().map(ToOwned::to_owned).ok_or_else(|| {
                ActionError::validation(format!("Field '{key}' must contain only strings"))
            })
        })
        .collect()
}

/// Extract an optional string field.
pub(crate) fn optional_string_param(data: Option<&Value>, key: &str) -> Option<String> {
    data.and_then(|d| d.get(key))
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
}

#[cfg(test)]
pub(crate) mod test_helpers {
    use deskboard_engine::{ConnectionConfig, new_in_memory, run_migrations};

    use crate::context::{RequestContext, RpcContext};

    /// Build an `RpcContext` over a migrated in-memory database.
    ///
    /// Pool size 1 so every `get()` returns the same in-memory database.
    pub fn make_test_context() -> RpcContext {
        let config = ConnectionConfig {
            pool_size: 1,
            ..Default::default()
        };
        let pool = new_in_memory(&config).unwrap();
        {
            let mut conn = pool.get().unwrap();
            let _ = run_migrations(&mut conn).unwrap();
        }
        RpcContext::new(pool)
    }

    /// The default test requester.
    pub fn test_request() -> RequestContext {
        RequestContext::new("user-test")
    }

    /// A second requester for ownership tests.
    pub fn other_request() -> RequestContext {
        RequestContext::new("user-other")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn register_all_populates_registry() {
        let mut registry = ActionRegistry::new();
        register_all(&mut registry);
        for action in [
            "getAll",
            "createTask",
            "moveTask",
            "toggleComplete",
            "togglePriority",
            "reorderColumn",
            "createColumn",
            "deleteColumn",
            "deleteTask",
            "duplicateTask",
        ] {
            assert!(registry.has_action(action), "missing action {action}");
        }
        assert_eq!(registry.actions().len(), 10);
    }

    #[test]
    fn require_param_missing() {
        let data = Some(json!({"other": 1}));
        let err = require_param(data.as_ref(), "task_id").unwrap_err();
        assert!(err.to_string().contains("Missing required field: task_id"));
    }

    #[test]
    fn require_string_param_rejects_wrong_type_and_empty() {
        let data = Some(json!({"task_id": 42, "column_id": ""}));
        assert!(require_string_param(data.as_ref(), "task_id").is_err());
        assert!(require_string_param(data.as_ref(), "column_id").is_err());
    }

    #[test]
    fn require_bool_param_ok_and_err() {
        let data = Some(json!({"completed": true, "priority": "yes"}));
        assert!(require_bool_param(data.as_ref(), "completed").unwrap());
        assert!(require_bool_param(data.as_ref(), "priority").is_err());
    }

    #[test]
    fn require_string_array_param_checks_elements() {
        let data = Some(json!({"ordered": ["a", "b"], "bad": ["a", 1]}));
        assert_eq!(
            require_string_array_param(data.as_ref(), "ordered").unwrap(),
            vec!["a".to_string(), "b".to_string()]
        );
        assert!(require_string_array_param(data.as_ref(), "bad").is_err());
    }

    #[test]
    fn optional_string_param_absent_is_none() {
        let data = Some(json!({"status": "priority"}));
        assert_eq!(
            optional_string_param(data.as_ref(), "status").as_deref(),
            Some("priority")
        );
        assert!(optional_string_param(data.as_ref(), "missing").is_none());
        assert!(optional_string_param(None, "status").is_none());
    }
}
