// src/handlers/documents.rs

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
};

// GET /api/invoices/{id}/pdf
#[utoipa::path(
    get,
    path = "/api/invoices/{id}/pdf",
    tag = "Invoices",
    responses(
        (status = 200, description = "PDF da fatura para download", body = Vec<u8>, content_type = "application/pdf"),
        (status = 404, description = "Fatura não encontrada")
    ),
    params(
        ("id" = Uuid, Path, description = "ID da fatura")
    ),
    security(("api_jwt" = []))
)]
pub async fn generate_invoice_pdf(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(invoice_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let (invoice_number, pdf_bytes) = app_state.document_service
        .generate_invoice_pdf(user.id, invoice_id)
        .await?;

    // Configura os Headers para o navegador baixar o PDF
    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"fatura_{}.pdf\"", invoice_number),
        ),
    ];

    Ok((headers, pdf_bytes).into_response())
}
