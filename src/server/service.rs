use may_minihttp::{HttpService, Request, Response};
use std::io;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use super::request::parse_request;
use super::response::write_context_response;
use crate::context::Context;
use crate::engine::{dispatch, HandlerFunc};
use crate::router::{RouteTable, SharedRouteTable};

/// `may_minihttp` service that routes every request through the engine's
/// route table.
///
/// Clones share one [`SharedRouteTable`], so routes published through
/// [`EngineService::routes`] become visible to all connections.
#[derive(Clone)]
pub struct EngineService {
    routes: Arc<SharedRouteTable<HandlerFunc>>,
}

impl EngineService {
    #[must_use]
    pub fn new(routes: RouteTable<HandlerFunc>) -> Self {
        Self {
            routes: Arc::new(SharedRouteTable::new(routes)),
        }
    }

    #[must_use]
    pub fn routes(&self) -> &Arc<SharedRouteTable<HandlerFunc>> {
        &self.routes
    }

    /// Dispatch a context against the current route snapshot.
    pub fn handle(&self, ctx: &mut Context) {
        let table = self.routes.load();
        dispatch(&table, ctx);
    }
}

impl HttpService for EngineService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let start = Instant::now();
        let mut ctx = Context::new(parse_request(req));
        self.handle(&mut ctx);
        write_context_response(res, &ctx);

        info!(
            method = %ctx.method,
            path = %ctx.path,
            status = ctx.status_code(),
            duration_us = start.elapsed().as_micros(),
            "Request completed"
        );
        Ok(())
    }
}
