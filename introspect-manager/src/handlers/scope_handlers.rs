use actix_web::{web, HttpResponse, Result};
use chrono::Utc;
use shared_types::{
    ScopeData, ScopeDocumentRequest, ScopeDocumentResponse, ScopeRequest, ScopeResponse,
};
use tracing::info;

use crate::error::AppError;
use crate::scope;

/// The submit endpoint: validates the required subset and derives the full
/// project scope from the section responses.
pub async fn generate_scope(request: web::Json<ScopeRequest>) -> Result<HttpResponse, AppError> {
    let req = request.into_inner();

    if req.business.business_name.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "Business name is required".to_string(),
        ));
    }

    info!(
        business = %req.business.business_name,
        pages = req.pages.selected_pages.len(),
        goals = req.goals.visitor_goals.len(),
        "scope submission received"
    );

    let project_scope = scope::generate_project_scope(&req);

    Ok(HttpResponse::Ok().json(ScopeResponse {
        success: true,
        message: "Project scope generated successfully".to_string(),
        data: ScopeData {
            project_scope,
            submission_id: scope::new_submission_id(),
            timestamp: Utc::now().to_rfc3339(),
        },
    }))
}

/// Renders the downloadable markdown artifact and the prefilled email body
/// for a scope the client already holds.
pub async fn render_scope_document(
    request: web::Json<ScopeDocumentRequest>,
) -> Result<HttpResponse, AppError> {
    let req = request.into_inner();

    let markdown = scope::render_scope_document(&req.project_scope)?;
    let mailto = scope::mailto_link(&req.project_scope, &markdown);
    let filename = scope::document_filename(&req.project_scope);

    Ok(HttpResponse::Ok().json(ScopeDocumentResponse {
        filename,
        markdown,
        mailto,
    }))
}
