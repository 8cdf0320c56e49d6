pub mod http_server;
pub mod request;
pub mod response;
pub mod service;

pub use http_server::{HttpServer, ServerHandle};
pub use request::{decode_path, parse_form, parse_query_params, parse_request, ParsedRequest};
pub use response::{write_context_response, HeaderInterner, MAX_RESPONSE_HEADERS};
pub use service::EngineService;
