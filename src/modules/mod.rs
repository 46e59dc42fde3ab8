use actix_web::{web, HttpRequest, HttpResponse};

use crate::core::AppError;

pub mod documents;
pub mod health;
pub mod payments;
pub mod totals;

/// Register every module's routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    health::controllers::configure(cfg);
    totals::controllers::configure(cfg);
    payments::controllers::configure(cfg);
    documents::controllers::configure(cfg);
    cfg.default_service(web::to(route_not_found));
}

/// Unknown routes get the standard error envelope instead of an empty 404
async fn route_not_found(req: HttpRequest) -> Result<HttpResponse, AppError> {
    Err(AppError::not_found(format!(
        "No route for {} {}",
        req.method(),
        req.path()
    )))
}
