use crate::autosave::AutosaveScheduler;
use crate::config::AppConfig;
use crate::database::Database;
use crate::error::AppError;
use actix_web::{web, HttpResponse, Result};
use shared_types::{QuestionnaireSession, ServerStatus};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::SystemTime;

pub struct AppState {
    pub database: Arc<Database>,
    /// Active sessions; the store only holds debounced snapshots.
    pub sessions: Arc<Mutex<HashMap<String, QuestionnaireSession>>>,
    pub autosave: Arc<AutosaveScheduler>,
    pub config: Arc<AppConfig>,
    pub start_time: SystemTime,
}

impl AppState {
    pub fn sessions_lock(
        &self,
    ) -> Result<MutexGuard<'_, HashMap<String, QuestionnaireSession>>, AppError> {
        self.sessions
            .lock()
            .map_err(|e| AppError::Internal(format!("Failed to acquire session lock: {e}")))
    }
}

pub async fn health_check(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let uptime = data
        .start_time
        .elapsed()
        .map_err(|e| AppError::Internal(format!("Failed to calculate uptime: {e}")))?
        .as_secs();

    let status = ServerStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime,
    };

    Ok(HttpResponse::Ok().json(status))
}
