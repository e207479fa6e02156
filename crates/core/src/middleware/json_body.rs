use crate::error::ServiceError;
use actix_web::{
    body::{BoxBody, EitherBody},
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web::{Bytes, BytesMut},
    Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use futures_util::StreamExt;
use serde_json::Value;
use std::future::{ready, Ready};
use std::rc::Rc;

/// Default JSON body limit (100 KiB)
pub const DEFAULT_JSON_BODY_LIMIT: usize = 100 * 1024;

/// Parses JSON request bodies before dispatch.
///
/// Requests with an `application/json` (or `application/*+json`) content type
/// have their body buffered and parsed. The parsed value is stored in the
/// request extensions for [`ParsedJson`], and the raw bytes are put back so
/// extractors such as `web::Json` keep working. Anything else passes through
/// untouched.
///
/// Malformed bodies are answered with 400 and oversized ones with 413 before
/// any handler runs.
#[derive(Debug, Clone, Copy)]
pub struct JsonBody {
    limit: usize,
    strict: bool,
}

impl Default for JsonBody {
    fn default() -> Self {
        Self::new(DEFAULT_JSON_BODY_LIMIT)
    }
}

impl JsonBody {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            strict: true,
        }
    }

    /// In strict mode only objects and arrays are accepted at the top level.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    fn parse(&self, body: &[u8]) -> Result<Value, ServiceError> {
        let value: Value =
            serde_json::from_slice(body).map_err(|e| ServiceError::InvalidJson(e.to_string()))?;

        if self.strict && !(value.is_object() || value.is_array()) {
            return Err(ServiceError::InvalidJson(
                "top-level value must be an object or array".to_string(),
            ));
        }

        Ok(value)
    }
}

impl<S, B> Transform<S, ServiceRequest> for JsonBody
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B, BoxBody>>;
    type Error = Error;
    type InitError = ();
    type Transform = JsonBodyMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JsonBodyMiddleware {
            service: Rc::new(service),
            config: *self,
        }))
    }
}

pub struct JsonBodyMiddleware<S> {
    service: Rc<S>,
    config: JsonBody,
}

impl<S, B> Service<ServiceRequest> for JsonBodyMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B, BoxBody>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let config = self.config;

        Box::pin(async move {
            if !is_json_request(&req) {
                return service.call(req).await.map(|res| res.map_into_left_body());
            }

            if declared_length(&req).is_some_and(|len| len > config.limit) {
                return Ok(reject(req, ServiceError::PayloadTooLarge { limit: config.limit }));
            }

            let body = match read_body(req.take_payload(), config.limit).await {
                Ok(body) => body,
                Err(err) => return Ok(reject(req, err)),
            };

            if !body.is_empty() {
                match config.parse(&body) {
                    Ok(value) => {
                        req.extensions_mut().insert(ParsedJson(value));
                    }
                    Err(err) => return Ok(reject(req, err)),
                }
            }

            req.set_payload(into_payload(body));
            service.call(req).await.map(|res| res.map_into_left_body())
        })
    }
}

fn is_json_request(req: &ServiceRequest) -> bool {
    match req.mime_type() {
        Ok(Some(mime)) => {
            mime.type_().as_str() == "application"
                && (mime.subtype().as_str() == "json"
                    || mime.suffix().map(|s| s.as_str()) == Some("json"))
        }
        _ => false,
    }
}

fn declared_length(req: &ServiceRequest) -> Option<usize> {
    req.headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

async fn read_body(mut payload: Payload, limit: usize) -> Result<Bytes, ServiceError> {
    let mut body = BytesMut::new();

    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| ServiceError::Payload(e.to_string()))?;
        if body.len() + chunk.len() > limit {
            return Err(ServiceError::PayloadTooLarge { limit });
        }
        body.extend_from_slice(&chunk);
    }

    Ok(body.freeze())
}

fn into_payload(body: Bytes) -> Payload {
    let (_, mut payload) = actix_http::h1::Payload::create(true);
    payload.unread_data(body);
    Payload::from(payload)
}

fn reject<B>(req: ServiceRequest, err: ServiceError) -> ServiceResponse<EitherBody<B, BoxBody>> {
    tracing::warn!(
        method = %req.method(),
        path = %req.path(),
        error = %err,
        "Rejected request body"
    );
    let (http_req, _) = req.into_parts();
    ServiceResponse::new(http_req, err.error_response()).map_into_right_body()
}

/// JSON body parsed by [`JsonBody`], or `Null` when the request carried none.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedJson(pub Value);

impl ParsedJson {
    pub fn is_present(&self) -> bool {
        !self.0.is_null()
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }

    /// Non-empty string field of a top-level object.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

impl FromRequest for ParsedJson {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(req
            .extensions()
            .get::<ParsedJson>()
            .cloned()
            .unwrap_or_default()))
    }
}
