//! Board read handler.

use deskboard_engine::BoardService;
use serde_json::Value;

use crate::adapters::board_to_wire;
use crate::context::{RequestContext, RpcContext};
use crate::errors::ActionError;
use crate::registry::{ActionHandler, ActionOutcome};

/// `getAll` — the requester's full board: columns in position order, each
/// with its tasks in position order.
pub struct GetAllHandler;

impl ActionHandler for GetAllHandler {
    fn handle(
        &self,
        _data: Option<&Value>,
        req: &RequestContext,
        ctx: &RpcContext,
    ) -> Result<ActionOutcome, ActionError> {
        let conn = ctx.pool.get()?;
        let board = BoardService::get_board(&conn, &req.owner_id)?;
        Ok(ActionOutcome::ok(board_to_wire(&board)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_helpers::{make_test_context, other_request, test_request};
    use deskboard_engine::BoardService;

    #[test]
    fn empty_board() {
        let ctx = make_test_context();
        let req = test_request();
        let outcome = GetAllHandler.handle(None, &req, &ctx).unwrap();
        assert!(!outcome.created);
        assert_eq!(outcome.data["columns"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn board_nests_tasks_under_columns() {
        let ctx = make_test_context();
        let req = test_request();
        {
            let mut conn = ctx.pool.get().unwrap();
            let col = BoardService::create_column(&mut conn, &req.owner_id, "Todo").unwrap();
            let _ = BoardService::create_task(&mut conn, &req.owner_id, &col.id, "One", None)
                .unwrap();
            let _ = BoardService::create_task(&mut conn, &req.owner_id, &col.id, "Two", None)
                .unwrap();
        }

        let outcome = GetAllHandler.handle(None, &req, &ctx).unwrap();
        let columns = outcome.data["columns"].as_array().unwrap();
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0]["column_name"], "Todo");
        let tasks = columns[0]["tasks"].as_array().unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0]["position"], 0);
        assert_eq!(tasks[1]["position"], 1);
    }

    #[test]
    fn board_is_scoped_to_the_requester() {
        let ctx = make_test_context();
        let req = test_request();
        {
            let mut conn = ctx.pool.get().unwrap();
            let _ = BoardService::create_column(&mut conn, &req.owner_id, "Mine").unwrap();
        }

        let outcome = GetAllHandler.handle(None, &other_request(), &ctx).unwrap();
        assert_eq!(outcome.data["columns"].as_array().unwrap().len(), 0);
    }
}
