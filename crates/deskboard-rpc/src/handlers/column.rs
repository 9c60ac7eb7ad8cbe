//! Column action handlers.

use deskboard_engine::BoardService;
use serde_json::Value;

use crate::adapters::{column_to_wire, task_to_wire};
use crate::context::{RequestContext, RpcContext};
use crate::errors::ActionError;
use crate::handlers::{require_string_array_param, require_string_param};
use crate::registry::{ActionHandler, ActionOutcome};

/// `createColumn {column_name}` — append a column to the end of the board.
pub struct CreateColumnHandler;

impl ActionHandler for CreateColumnHandler {
    fn handle(
        &self,
        data: Option<&Value>,
        req: &RequestContext,
        ctx: &RpcContext,
    ) -> Result<ActionOutcome, ActionError> {
        let name = require_string_param(data, "column_name")?;

        let mut conn = ctx.pool.get()?;
        let column = BoardService::create_column(&mut conn, &req.owner_id, &name)?;
        Ok(ActionOutcome::created(column_to_wire(&column)))
    }
}

/// `deleteColumn {column_id}` — delete a column and all its tasks, then
/// recompact the remaining column positions.
pub struct DeleteColumnHandler;

impl ActionHandler for DeleteColumnHandler {
    fn handle(
        &self,
        data: Option<&Value>,
        req: &RequestContext,
        ctx: &RpcContext,
    ) -> Result<ActionOutcome, ActionError> {
        let column_id = require_string_param(data, "column_id")?;

        let mut conn = ctx.pool.get()?;
        BoardService::delete_column(&mut conn, &req.owner_id, &column_id)?;
        Ok(ActionOutcome::ok(Value::Null))
    }
}

/// `reorderColumn {column_id, ordered}` — rewrite task positions within a
/// column from an explicit id ordering. Ids missing from the list keep
/// their stored positions.
pub struct ReorderColumnHandler;

impl ActionHandler for ReorderColumnHandler {
    fn handle(
        &self,
        data: Option<&Value>,
        req: &RequestContext,
        ctx: &RpcContext,
    ) -> Result<ActionOutcome, ActionError> {
        let column_id = require_string_param(data, "column_id")?;
        let ordered = require_string_array_param(data, "ordered")?;

        let mut conn = ctx.pool.get()?;
        let tasks = BoardService::reorder_column(&mut conn, &req.owner_id, &column_id, &ordered)?;
        let wire: Vec<Value> = tasks.iter().map(task_to_wire).collect();
        Ok(ActionOutcome::ok(Value::Array(wire)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors;
    use crate::handlers::task::CreateTaskHandler;
    use crate::handlers::test_helpers::{make_test_context, other_request, test_request};
    use serde_json::json;

    #[test]
    fn create_column_appends() {
        let ctx = make_test_context();
        let req = test_request();

        let first = CreateColumnHandler
            .handle(Some(&json!({"column_name": "Todo"})), &req, &ctx)
            .unwrap();
        assert!(first.created);
        assert_eq!(first.data["column_name"], "Todo");
        assert_eq!(first.data["position"], 0);

        let second = CreateColumnHandler
            .handle(Some(&json!({"column_name": "Done"})), &req, &ctx)
            .unwrap();
        assert_eq!(second.data["position"], 1);
    }

    #[test]
    fn create_column_requires_name() {
        let ctx = make_test_context();
        let req = test_request();

        let err = CreateColumnHandler
            .handle(Some(&json!({})), &req, &ctx)
            .unwrap_err();
        assert_eq!(err.code(), errors::VALIDATION_ERROR);

        let err = CreateColumnHandler
            .handle(Some(&json!({"column_name": ""})), &req, &ctx)
            .unwrap_err();
        assert_eq!(err.code(), errors::VALIDATION_ERROR);
    }

    #[test]
    fn delete_column_cascades_and_recompacts() {
        let ctx = make_test_context();
        let req = test_request();

        let a = CreateColumnHandler
            .handle(Some(&json!({"column_name": "A"})), &req, &ctx)
            .unwrap();
        let b = CreateColumnHandler
            .handle(Some(&json!({"column_name": "B"})), &req, &ctx)
            .unwrap();
        let a_id = a.data["column_id"].as_str().unwrap().to_string();
        let _ = CreateTaskHandler
            .handle(
                Some(&json!({"column_id": a_id, "title": "Goes away"})),
                &req,
                &ctx,
            )
            .unwrap();

        let outcome = DeleteColumnHandler
            .handle(Some(&json!({"column_id": a_id})), &req, &ctx)
            .unwrap();
        assert!(outcome.data.is_null());

        // Surviving column slides down to position 0.
        let board = crate::handlers::board::GetAllHandler
            .handle(None, &req, &ctx)
            .unwrap();
        let columns = board.data["columns"].as_array().unwrap();
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0]["column_id"], b.data["column_id"]);
        assert_eq!(columns[0]["position"], 0);
    }

    #[test]
    fn delete_foreign_column_is_not_found() {
        let ctx = make_test_context();
        let req = test_request();
        let col = CreateColumnHandler
            .handle(Some(&json!({"column_name": "Mine"})), &req, &ctx)
            .unwrap();
        let col_id = col.data["column_id"].as_str().unwrap().to_string();

        let err = DeleteColumnHandler
            .handle(Some(&json!({"column_id": col_id})), &other_request(), &ctx)
            .unwrap_err();
        assert_eq!(err.code(), errors::NOT_FOUND);
        assert_eq!(err.http_status(), 404);
    }

    #[test]
    fn reorder_column_rewrites_positions() {
        let ctx = make_test_context();
        let req = test_request();
        let col = CreateColumnHandler
            .handle(Some(&json!({"column_name": "Todo"})), &req, &ctx)
            .unwrap();
        let col_id = col.data["column_id"].as_str().unwrap().to_string();

        let mut ids = Vec::new();
        for title in ["One", "Two", "Three"] {
            let t = CreateTaskHandler
                .handle(
                    Some(&json!({"column_id": col_id, "title": title})),
                    &req,
                    &ctx,
                )
                .unwrap();
            ids.push(t.data["task_id"].as_str().unwrap().to_string());
        }
        ids.reverse();

        let outcome = ReorderColumnHandler
            .handle(
                Some(&json!({"column_id": col_id, "ordered": ids})),
                &req,
                &ctx,
            )
            .unwrap();
        let tasks = outcome.data.as_array().unwrap();
        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0]["data"]["title"], "Three");
        assert_eq!(tasks[2]["data"]["title"], "One");
        for (i, task) in tasks.iter().enumerate() {
            assert_eq!(task["position"], i);
        }
    }

    #[test]
    fn reorder_foreign_column_is_forbidden() {
        let ctx = make_test_context();
        let req = test_request();
        let col = CreateColumnHandler
            .handle(Some(&json!({"column_name": "Mine"})), &req, &ctx)
            .unwrap();
        let col_id = col.data["column_id"].as_str().unwrap().to_string();

        let err = ReorderColumnHandler
            .handle(
                Some(&json!({"column_id": col_id, "ordered": []})),
                &other_request(),
                &ctx,
            )
            .unwrap_err();
        assert_eq!(err.code(), errors::FORBIDDEN);
    }
}
