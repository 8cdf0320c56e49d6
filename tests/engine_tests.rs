use trierouter::context::{CONTENT_TYPE_HTML, CONTENT_TYPE_JSON, CONTENT_TYPE_TEXT};
use trierouter::demo::demo_engine;
use trierouter::server::ParsedRequest;
use trierouter::{Context, Engine, MatchPolicy};

fn handle(engine: &Engine, method: &str, path: &str) -> Context {
    let mut c = Context::from_parts(method, path);
    engine.handle(&mut c);
    c
}

#[test]
fn test_demo_routes_under_both_policies() {
    for policy in [MatchPolicy::InsertionOrder, MatchPolicy::StaticFirst] {
        let engine = demo_engine(policy);

        let c = handle(&engine, "GET", "/");
        assert_eq!(c.status_code(), 200);
        assert_eq!(c.response_header("Content-Type"), Some(CONTENT_TYPE_HTML));

        let c = handle(&engine, "GET", "/hello/geektutu");
        assert_eq!(c.status_code(), 200);
        assert_eq!(c.response_header("content-type"), Some(CONTENT_TYPE_TEXT));
        assert_eq!(
            c.response_body(),
            b"hello geektutu, you're at /hello/geektutu\n"
        );
        assert_eq!(c.params.get("name"), Some("geektutu"));

        let c = handle(&engine, "GET", "/api/user");
        assert_eq!(c.response_header("content-type"), Some(CONTENT_TYPE_JSON));
        let user: serde_json::Value = serde_json::from_slice(c.response_body()).unwrap();
        assert_eq!(user["id"], 1);
    }
}

#[test]
fn test_query_parameter_greeting() {
    let engine = demo_engine(MatchPolicy::default());
    let req = ParsedRequest {
        method: "GET".to_string(),
        path: "/hello".to_string(),
        query_params: [("name".to_string(), "gee".to_string())]
            .into_iter()
            .collect(),
        ..Default::default()
    };
    let mut c = Context::new(req);
    engine.handle(&mut c);
    assert_eq!(c.response_body(), b"hello gee, you're at /hello\n");
}

#[test]
fn test_wrong_method_is_404_with_path() {
    let engine = demo_engine(MatchPolicy::default());
    let c = handle(&engine, "POST", "/hello/geektutu");
    assert_eq!(c.status_code(), 404);
    assert_eq!(c.response_body(), b"404 NOT FOUND: /hello/geektutu\n");
}

#[test]
fn test_custom_handlers_and_headers() {
    let mut engine = Engine::new();
    engine.get("/items/:id", |c: &mut Context| {
        let id = c.param("id").to_string();
        c.set_header("X-Item", &id);
        c.status(204);
    });

    let c = handle(&engine, "GET", "/items/9");
    assert_eq!(c.status_code(), 204);
    assert_eq!(c.response_header("x-item"), Some("9"));
    assert!(c.response_body().is_empty());
}

#[test]
fn test_panicking_handler_does_not_poison_engine() {
    let mut engine = Engine::new();
    engine
        .get("/boom", |_c: &mut Context| panic!("handler exploded"))
        .get("/ok", |c: &mut Context| c.string(200, "ok"));

    assert_eq!(handle(&engine, "GET", "/boom").status_code(), 500);
    assert_eq!(handle(&engine, "GET", "/ok").response_body(), b"ok");
}
