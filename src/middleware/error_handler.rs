use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::JsonPayloadError,
    http::StatusCode,
    web::JsonConfig,
    Error, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;

use crate::core::AppError;
use crate::middleware::request_id::RequestIdValue;

const JSON_BODY_LIMIT: usize = 1024 * 1024;

/// Middleware that logs every error response once
pub struct ErrorHandler;

impl<S, B> Transform<S, ServiceRequest> for ErrorHandler
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = ErrorHandlerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorHandlerMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct ErrorHandlerMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for ErrorHandlerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            let res = service.call(req).await?;

            if let Some(err) = res.response().error() {
                let request_id = res
                    .request()
                    .extensions()
                    .get::<RequestIdValue>()
                    .map(|id| id.0.clone())
                    .unwrap_or_default();
                log_error(&request_id, res.request().path(), res.status(), err);
            }

            Ok(res)
        })
    }
}

/// Log a request error at a level matching its status
///
/// `request_id` is empty when the RequestId middleware is not installed.
pub fn log_error(request_id: &str, path: &str, status: StatusCode, err: &Error) {
    if status.is_server_error() {
        tracing::error!(request_id, path, status = status.as_u16(), "Request failed: {}", err);
    } else {
        tracing::warn!(request_id, path, status = status.as_u16(), "Request rejected: {}", err);
    }
}

/// JSON extractor settings shared by every route
pub fn json_config() -> JsonConfig {
    JsonConfig::default()
        .limit(JSON_BODY_LIMIT)
        .error_handler(json_error_handler)
}

/// Turn unreadable JSON bodies into the standard 400 error envelope
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    let app_error = match err {
        JsonPayloadError::Deserialize(source) => AppError::from_json_body(source),
        other => AppError::validation(format!("Invalid request body: {}", other)),
    };
    app_error.into()
}
