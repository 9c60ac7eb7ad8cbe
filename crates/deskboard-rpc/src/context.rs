//! Handler dependency-injection and per-request context.

use deskboard_engine::ConnectionPool;

/// Shared context passed to every action handler.
#[derive(Clone)]
pub struct RpcContext {
    /// Board database connection pool.
    pub pool: ConnectionPool,
}

impl RpcContext {
    /// Create a context over a pool.
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }
}

/// Per-request context: the authenticated requester, resolved at the
/// transport boundary and threaded explicitly into every handler call.
#[derive(Clone, Debug)]
pub struct RequestContext {
    /// The requester's owner id. All reads and mutations are scoped to it.
    pub owner_id: String,
}

impl RequestContext {
    /// Create a request context for an owner.
    pub fn new(owner_id: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_helpers::make_test_context;

    #[test]
    fn context_hands_out_connections() {
        let ctx = make_test_context();
        let conn = ctx.pool.get().unwrap();
        let one: i64 = conn.query_row("SELECT 1", [], |row| row.get(0)).unwrap();
        assert_eq!(one, 1);
    }

    #[test]
    fn request_context_carries_owner() {
        let req = RequestContext::new("user-7");
        assert_eq!(req.owner_id, "user-7");
    }
}
