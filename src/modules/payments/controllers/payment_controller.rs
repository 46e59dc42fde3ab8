use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::info;

use crate::core::error::AppError;
use crate::modules::payments::models::{PaymentInput, PaymentRecord};
use crate::modules::payments::services::PaymentLedger;
use crate::modules::totals::models::{LineItem, TotalsConfig};

/// Request body for recording a payment
#[derive(Debug, Deserialize)]
pub struct ApplyPaymentRequest {
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub config: TotalsConfig,
    #[serde(default)]
    pub payments: Vec<PaymentRecord>,
    pub payment: PaymentInput,
}

/// Request body for removing a recorded payment
#[derive(Debug, Deserialize)]
pub struct RemovePaymentRequest {
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub config: TotalsConfig,
    #[serde(default)]
    pub payments: Vec<PaymentRecord>,
    pub index: usize,
}

/// Record a payment and return the new ledger with fresh totals
/// POST /payments/apply
pub async fn apply_payment(
    request: web::Json<ApplyPaymentRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    let update = PaymentLedger::new(&request.items, &request.config)
        .apply(&request.payments, request.payment)?;

    info!(
        payments = update.payments.len(),
        paid = %update.totals.paid_amount,
        balance_due = %update.totals.balance_due,
        "Payment applied"
    );

    Ok(HttpResponse::Ok().json(update))
}

/// Remove a payment and return the new ledger with fresh totals
/// POST /payments/remove
pub async fn remove_payment(
    request: web::Json<RemovePaymentRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    let update = PaymentLedger::new(&request.items, &request.config)
        .remove(&request.payments, request.index)?;

    info!(
        index = request.index,
        payments = update.payments.len(),
        balance_due = %update.totals.balance_due,
        "Payment removed"
    );

    Ok(HttpResponse::Ok().json(update))
}

/// Configure payment routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/payments")
            .route("/apply", web::post().to(apply_payment))
            .route("/remove", web::post().to(remove_payment)),
    );
}
