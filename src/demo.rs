//! Demo routes served by the `trierouter serve` command.
//!
//! | Method | Pattern             | Response                                  |
//! |--------|---------------------|-------------------------------------------|
//! | GET    | `/`                 | HTML index                                |
//! | GET    | `/hello`            | greeting from `?name=` (default `World`)  |
//! | GET    | `/hello/:name`      | greeting from the path parameter          |
//! | GET    | `/assets/*filepath` | JSON echo of the captured file path       |
//! | GET    | `/api/user`         | JSON user record                          |
//! | POST   | `/login`            | JSON echo of the `username` form field    |

use serde::Serialize;

use crate::context::Context;
use crate::engine::Engine;
use crate::router::MatchPolicy;

const INDEX_HTML: &str = "<h1>Hello trierouter</h1>";

#[derive(Debug, Serialize)]
struct AssetResponse<'a> {
    filepath: &'a str,
}

#[derive(Debug, Serialize)]
struct User {
    id: u64,
    name: &'static str,
    email: &'static str,
}

#[derive(Debug, Serialize)]
struct LoginResponse<'a> {
    username: &'a str,
    authenticated: bool,
}

fn index(c: &mut Context) {
    c.html(200, INDEX_HTML);
}

fn hello_query(c: &mut Context) {
    let name = c.query("name").unwrap_or("World");
    let body = format!("hello {}, you're at {}\n", name, c.path);
    c.string(200, body);
}

fn hello_name(c: &mut Context) {
    let body = format!("hello {}, you're at {}\n", c.param("name"), c.path);
    c.string(200, body);
}

fn assets(c: &mut Context) {
    let filepath = c.param("filepath").to_string();
    c.json(200, &AssetResponse { filepath: &filepath });
}

fn api_user(c: &mut Context) {
    c.json(
        200,
        &User {
            id: 1,
            name: "gee",
            email: "gee@example.com",
        },
    );
}

fn login(c: &mut Context) {
    let Some(username) = c.post_form("username").map(str::to_owned) else {
        c.string(400, "missing username\n");
        return;
    };
    let authenticated = c.post_form("password").is_some_and(|p| !p.is_empty());
    c.json(
        200,
        &LoginResponse {
            username: &username,
            authenticated,
        },
    );
}

/// Install the demo routes on `engine`.
pub fn register_demo_routes(engine: &mut Engine) {
    engine
        .get("/", index)
        .get("/hello", hello_query)
        .get("/hello/:name", hello_name)
        .get("/assets/*filepath", assets)
        .get("/api/user", api_user)
        .post("/login", login);
}

/// A fresh engine with only the demo routes, matched under `policy`.
#[must_use]
pub fn demo_engine(policy: MatchPolicy) -> Engine {
    let mut engine = Engine::with_policy(policy);
    register_demo_routes(&mut engine);
    engine
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::CONTENT_TYPE_JSON;
    use crate::server::ParsedRequest;

    fn run(engine: &Engine, mut c: Context) -> Context {
        engine.handle(&mut c);
        c
    }

    #[test]
    fn test_index_is_html() {
        let engine = demo_engine(MatchPolicy::default());
        let c = run(&engine, Context::from_parts("GET", "/"));
        assert_eq!(c.status_code(), 200);
        assert_eq!(c.response_body(), INDEX_HTML.as_bytes());
    }

    #[test]
    fn test_hello_query_default() {
        let engine = demo_engine(MatchPolicy::default());
        let c = run(&engine, Context::from_parts("GET", "/hello"));
        assert_eq!(c.response_body(), b"hello World, you're at /hello\n");
    }

    #[test]
    fn test_hello_param_static_first() {
        let engine = demo_engine(MatchPolicy::StaticFirst);
        let c = run(&engine, Context::from_parts("GET", "/hello/geektutu"));
        assert_eq!(c.response_body(), b"hello geektutu, you're at /hello/geektutu\n");
    }

    #[test]
    fn test_assets_json() {
        let engine = demo_engine(MatchPolicy::default());
        let c = run(&engine, Context::from_parts("GET", "/assets/css/site.css"));
        assert_eq!(c.response_header("content-type"), Some(CONTENT_TYPE_JSON));
        let body: serde_json::Value = serde_json::from_slice(c.response_body()).unwrap();
        assert_eq!(body["filepath"], "css/site.css");
    }

    #[test]
    fn test_login_form() {
        let engine = demo_engine(MatchPolicy::default());
        let req = ParsedRequest {
            method: "POST".to_string(),
            path: "/login".to_string(),
            headers: [(
                "content-type".to_string(),
                "application/x-www-form-urlencoded".to_string(),
            )]
            .into_iter()
            .collect(),
            body: b"username=gee&password=secret".to_vec(),
            ..Default::default()
        };
        let c = run(&engine, Context::new(req));
        assert_eq!(c.status_code(), 200);
        let body: serde_json::Value = serde_json::from_slice(c.response_body()).unwrap();
        assert_eq!(body["username"], "gee");
        assert_eq!(body["authenticated"], true);
    }

    #[test]
    fn test_login_missing_username() {
        let engine = demo_engine(MatchPolicy::default());
        let c = run(&engine, Context::from_parts("POST", "/login"));
        assert_eq!(c.status_code(), 400);
    }
}
