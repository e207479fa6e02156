pub mod cors;
pub mod json_body;
pub mod request_id;

pub use cors::CorsConfig;
pub use json_body::{JsonBody, JsonBodyMiddleware, ParsedJson, DEFAULT_JSON_BODY_LIMIT};
pub use request_id::{
    get_correlation_id, get_request_id, RequestIdData, RequestIdMiddleware, CORRELATION_ID_HEADER,
    REQUEST_ID_HEADER,
};
