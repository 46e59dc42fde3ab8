use actix_web::{web, HttpResponse};
use tracing::info;

use crate::core::error::AppError;
use crate::modules::documents::models::{Document, DocumentPayload};
use crate::modules::documents::services::TotalsRenderer;

/// Compute and format the totals of a document for templating
/// POST /documents/render
pub async fn render_document(
    renderer: web::Data<TotalsRenderer>,
    request: web::Json<DocumentPayload>,
) -> Result<HttpResponse, AppError> {
    let document = Document::try_from(request.into_inner())?;
    let rendered = renderer.render_document(&document);

    info!(
        kind = %document.kind(),
        status = %rendered.payment_status,
        total = %rendered.totals.total_amount,
        "Rendered document totals"
    );

    Ok(HttpResponse::Ok().json(rendered))
}

/// Configure document routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/documents").route("/render", web::post().to(render_document)));
}
