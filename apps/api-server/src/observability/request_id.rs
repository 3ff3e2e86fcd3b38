//! Request ID middleware - tags every request with an id that is echoed back
//! in the `X-Request-ID` response header and recorded on the request span.

use actix_web::{
    Error, HttpMessage,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header::{HeaderName, HeaderValue},
};
use std::future::{Future, Ready, ready};
use std::pin::Pin;
use tracing::Instrument;
use uuid::Uuid;

/// Header name for request ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest client-supplied id that is accepted as-is.
const MAX_REQUEST_ID_LEN: usize = 64;

/// Keep a client-supplied id only if it is short printable ASCII.
fn accept_client_id(value: &HeaderValue) -> Option<String> {
    let id = value.to_str().ok()?;
    let valid = !id.is_empty()
        && id.len() <= MAX_REQUEST_ID_LEN
        && id.bytes().all(|b| b.is_ascii_graphic());
    valid.then(|| id.to_string())
}

pub struct RequestIdMiddleware;

impl<S, B> Transform<S, ServiceRequest> for RequestIdMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RequestIdService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestIdService { service }))
    }
}

pub struct RequestIdService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestIdService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let request_id = req
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(accept_client_id)
            .unwrap_or_else(|| Uuid::now_v7().to_string());

        req.extensions_mut().insert(RequestId(request_id.clone()));

        let span = tracing::info_span!(
            "request_id",
            request_id = %request_id,
            method = %req.method(),
            path = %req.path(),
        );
        let fut = self.service.call(req);

        Box::pin(
            async move {
                let mut res = fut.await?;

                let value = HeaderValue::from_str(&request_id)
                    .unwrap_or_else(|_| HeaderValue::from_static("unknown"));
                res.headers_mut()
                    .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);

                tracing::debug!(status = res.status().as_u16(), "Request finished");
                Ok(res)
            }
            .instrument(span),
        )
    }
}

/// Request ID extractor for handlers.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl actix_web::FromRequest for RequestId {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &actix_web::HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let request_id = req
            .extensions()
            .get::<RequestId>()
            .cloned()
            .unwrap_or_else(|| RequestId(Uuid::now_v7().to_string()));

        ready(Ok(request_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_client_id() {
        let ok = HeaderValue::from_static("abc-123");
        assert_eq!(accept_client_id(&ok).as_deref(), Some("abc-123"));

        let spaced = HeaderValue::from_static("abc 123");
        assert!(accept_client_id(&spaced).is_none());

        let long = HeaderValue::from_str(&"a".repeat(MAX_REQUEST_ID_LEN + 1)).unwrap();
        assert!(accept_client_id(&long).is_none());
    }
}
