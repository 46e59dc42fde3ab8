use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::info;

use crate::core::error::AppError;
use crate::modules::payments::models::PaymentRecord;
use crate::modules::totals::models::{LineItem, TotalsConfig};
use crate::modules::totals::services::TotalsEngine;

/// Request body shared by the totals endpoints
#[derive(Debug, Deserialize)]
pub struct ComputeTotalsRequest {
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub config: TotalsConfig,
    #[serde(default)]
    pub payments: Vec<PaymentRecord>,
}

/// Compute document totals
/// POST /totals/compute
pub async fn compute_totals(
    request: web::Json<ComputeTotalsRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    let totals =
        TotalsEngine::compute_with_payments(&request.items, &request.config, &request.payments)?;

    info!(
        items = request.items.len(),
        payments = request.payments.len(),
        tax_method = %request.config.tax_method,
        total = %totals.total_amount,
        "Computed totals"
    );

    Ok(HttpResponse::Ok().json(totals))
}

/// Show how the proportional tax base was allocated
/// POST /totals/breakdown
pub async fn compute_breakdown(
    request: web::Json<ComputeTotalsRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    let breakdown = TotalsEngine::breakdown(&request.items, &request.config)?;

    Ok(HttpResponse::Ok().json(breakdown))
}

/// Configure totals routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/totals")
            .route("/compute", web::post().to(compute_totals))
            .route("/breakdown", web::post().to(compute_breakdown)),
    );
}
