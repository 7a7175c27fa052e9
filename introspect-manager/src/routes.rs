//! Centralized route configuration for the Introspect manager API.
//!
//! This module provides a shared function to configure all application
//! routes, allowing both the main server and test servers to use the same
//! routing setup.

use crate::handlers::{main_handlers, scope_handlers, session_handlers};
use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(main_handlers::health_check))
            // Questionnaire session endpoints
            .route(
                "/sessions",
                web::post().to(session_handlers::create_session),
            )
            .route(
                "/sessions/{id}",
                web::get().to(session_handlers::get_session),
            )
            .route(
                "/sessions/{id}",
                web::delete().to(session_handlers::reset_session),
            )
            .route(
                "/sessions/{id}/responses",
                web::put().to(session_handlers::update_response),
            )
            .route(
                "/sessions/{id}/navigate",
                web::post().to(session_handlers::navigate),
            )
            .route(
                "/sessions/{id}/complete",
                web::post().to(session_handlers::complete_session),
            )
            .route(
                "/sessions/{id}/estimate",
                web::get().to(session_handlers::get_estimate),
            )
            // Scope submission endpoints
            .route("/scope", web::post().to(scope_handlers::generate_scope))
            .route(
                "/scope/document",
                web::post().to(scope_handlers::render_scope_document),
            ),
    );
}
