//! # Engine
//!
//! The engine is the application-facing entry point: it owns the
//! [`RouteTable`], offers per-method registration helpers, and dispatches each
//! request [`Context`] to the matched handler.
//!
//! ```rust
//! use trierouter::context::Context;
//! use trierouter::engine::Engine;
//!
//! let mut engine = Engine::new();
//! engine.get("/hello/:name", |c: &mut Context| {
//!     let body = format!("hello {}", c.param("name"));
//!     c.string(200, body);
//! });
//!
//! let mut c = Context::from_parts("GET", "/hello/geektutu");
//! engine.handle(&mut c);
//! assert_eq!(c.response_body(), b"hello geektutu");
//!
//! let mut c = Context::from_parts("GET", "/nope");
//! engine.handle(&mut c);
//! assert_eq!(c.status_code(), 404);
//! ```
//!
//! The engine holds no global state; it is moved into the server with
//! [`Engine::into_service`] or [`Engine::run`] once registration is done.

use anyhow::Context as _;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{error, info};

use crate::context::Context;
use crate::router::{MatchPolicy, RouteTable};
use crate::server::{EngineService, HttpServer};

/// A registered request handler.
pub type HandlerFunc = Arc<dyn Fn(&mut Context) + Send + Sync>;

/// Route registration and request dispatch.
#[derive(Default)]
pub struct Engine {
    routes: RouteTable<HandlerFunc>,
}

impl Engine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_policy(policy: MatchPolicy) -> Self {
        Self {
            routes: RouteTable::with_policy(policy),
        }
    }

    /// Register `handler` for `method` and `pattern`.
    pub fn add_route<F>(&mut self, method: &str, pattern: &str, handler: F) -> &mut Self
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.routes.register(method, pattern, Arc::new(handler));
        self
    }

    pub fn get<F>(&mut self, pattern: &str, handler: F) -> &mut Self
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add_route("GET", pattern, handler)
    }

    pub fn post<F>(&mut self, pattern: &str, handler: F) -> &mut Self
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add_route("POST", pattern, handler)
    }

    pub fn put<F>(&mut self, pattern: &str, handler: F) -> &mut Self
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add_route("PUT", pattern, handler)
    }

    pub fn delete<F>(&mut self, pattern: &str, handler: F) -> &mut Self
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add_route("DELETE", pattern, handler)
    }

    pub fn patch<F>(&mut self, pattern: &str, handler: F) -> &mut Self
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add_route("PATCH", pattern, handler)
    }

    #[must_use]
    pub fn routes(&self) -> &RouteTable<HandlerFunc> {
        &self.routes
    }

    /// Dispatch `ctx` against this engine's routes.
    pub fn handle(&self, ctx: &mut Context) {
        dispatch(&self.routes, ctx);
    }

    /// Freeze the route table and wrap it for the HTTP server.
    #[must_use]
    pub fn into_service(self) -> EngineService {
        EngineService::new(self.routes)
    }

    /// Serve on `addr` until the server coroutine exits.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound or the server panics.
    pub fn run(self, addr: &str) -> anyhow::Result<()> {
        self.routes.dump_routes();
        info!(addr = %addr, "Starting HTTP server");
        let handle = HttpServer(self.into_service())
            .start(addr)
            .with_context(|| format!("failed to start server on {addr}"))?;
        handle
            .join()
            .map_err(|e| anyhow::anyhow!("server coroutine panicked: {e:?}"))
    }
}

/// Resolve `ctx` against `routes` and run the matched handler.
///
/// No match produces `404 NOT FOUND: <path>`. A panicking handler is caught
/// and turned into a 500.
pub fn dispatch(routes: &RouteTable<HandlerFunc>, ctx: &mut Context) {
    let Some(route_match) = routes.resolve(&ctx.method, &ctx.path) else {
        let body = format!("404 NOT FOUND: {}\n", ctx.path);
        ctx.string(404, body);
        return;
    };

    ctx.params = route_match.params;
    let handler = route_match.handler;
    if let Err(panic) = catch_unwind(AssertUnwindSafe(|| handler(ctx))) {
        error!(
            method = %ctx.method,
            path = %ctx.path,
            route_pattern = %route_match.pattern,
            panic_message = ?panic,
            "Handler panicked"
        );
        ctx.reset_response();
        ctx.string(500, "500 Internal Server Error\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_injected_before_handler() {
        let mut engine = Engine::new();
        engine.get("/assets/*filepath", |c: &mut Context| {
            let path = c.param("filepath").to_string();
            c.string(200, path);
        });

        let mut c = Context::from_parts("GET", "/assets/css/a/b.css");
        engine.handle(&mut c);
        assert_eq!(c.status_code(), 200);
        assert_eq!(c.response_body(), b"css/a/b.css");
    }

    #[test]
    fn test_not_found_body() {
        let engine = Engine::new();
        let mut c = Context::from_parts("GET", "/missing");
        engine.handle(&mut c);
        assert_eq!(c.status_code(), 404);
        assert_eq!(c.response_body(), b"404 NOT FOUND: /missing\n");
    }

    #[test]
    fn test_handler_panic_becomes_500() {
        let mut engine = Engine::new();
        engine.get("/boom", |_c: &mut Context| panic!("boom"));

        let mut c = Context::from_parts("GET", "/boom");
        engine.handle(&mut c);
        assert_eq!(c.status_code(), 500);
    }

    #[test]
    fn test_panic_discards_partial_response() {
        let mut engine = Engine::new();
        engine.get("/download", |c: &mut Context| {
            c.set_header("Content-Disposition", "attachment; filename=\"a.bin\"");
            c.data(200, vec![1, 2, 3]);
            panic!("disk vanished");
        });

        let mut c = Context::from_parts("GET", "/download");
        engine.handle(&mut c);
        assert_eq!(c.status_code(), 500);
        assert_eq!(c.response_header("content-disposition"), None);
        assert_eq!(c.response_headers().len(), 1);
        assert_eq!(c.response_body(), b"500 Internal Server Error\n");
    }

    #[test]
    fn test_registration_helpers_use_method() {
        let mut engine = Engine::with_policy(MatchPolicy::StaticFirst);
        engine
            .put("/r", |c: &mut Context| c.string(200, "put"))
            .delete("/r", |c: &mut Context| c.string(200, "delete"))
            .patch("/r", |c: &mut Context| c.string(200, "patch"));

        for method in ["PUT", "DELETE", "PATCH"] {
            let mut c = Context::from_parts(method, "/r");
            engine.handle(&mut c);
            assert_eq!(c.response_body(), method.to_lowercase().as_bytes());
        }
        assert_eq!(engine.routes().len(), 3);
        assert_eq!(engine.routes().policy(), MatchPolicy::StaticFirst);
    }
}
