use actix_web::{web, HttpResponse, Result};
use shared_types::{
    CreateSessionRequest, EstimateResponse, NavigateRequest, QuestionnaireSession, SessionResponse,
    UpdateResponseRequest,
};
use tracing::info;

use crate::error::AppError;
use crate::handlers::AppState;
use crate::sequencer::{self, QuestionnaireAction};
use crate::{estimate, visibility};

/// Starts a session. When the request names a session id with a
/// non-expired snapshot, that session is restored instead; an unreadable
/// or expired snapshot degrades to a fresh start, never an error.
pub async fn create_session(
    data: web::Data<AppState>,
    request: web::Json<CreateSessionRequest>,
) -> Result<HttpResponse, AppError> {
    let req = request.into_inner();

    if let Some(ref session_id) = req.session_id {
        // A live in-memory session beats any snapshot: the store lags the
        // debounce window behind
        {
            let sessions = data.sessions_lock()?;
            if let Some(active) = sessions.get(session_id) {
                return Ok(HttpResponse::Ok().json(SessionResponse {
                    session: active.clone(),
                }));
            }
        }

        match data
            .database
            .load_session(session_id, data.config.sessions.retention_days)
        {
            Ok(Some(saved)) => {
                info!(session = %saved.session_id, "restored saved session");
                let mut sessions = data.sessions_lock()?;
                sessions.insert(saved.session_id.clone(), saved.clone());
                return Ok(HttpResponse::Ok().json(SessionResponse { session: saved }));
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(session = %session_id, "session not restorable: {e}");
            }
        }
    }

    let session = sequencer::apply(QuestionnaireSession::new(), QuestionnaireAction::Start);
    info!(session = %session.session_id, "started new session");

    let mut sessions = data.sessions_lock()?;
    sessions.insert(session.session_id.clone(), session.clone());

    Ok(HttpResponse::Created().json(SessionResponse { session }))
}

pub async fn get_session(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let session_id = path.into_inner();
    let session = fetch_session(&data, &session_id)?;
    Ok(HttpResponse::Ok().json(SessionResponse { session }))
}

/// Applies one answer. Visibility is always recomputed; the estimate only
/// when a cost-bearing key changed. Persistence is debounced.
pub async fn update_response(
    data: web::Data<AppState>,
    path: web::Path<String>,
    request: web::Json<UpdateResponseRequest>,
) -> Result<HttpResponse, AppError> {
    let session_id = path.into_inner();
    let session = fetch_session(&data, &session_id)?;
    reject_if_complete(&session)?;

    let updated = sequencer::apply(
        session,
        QuestionnaireAction::UpdateResponse(request.into_inner().update),
    );

    {
        let mut sessions = data.sessions_lock()?;
        sessions.insert(session_id, updated.clone());
    }
    data.autosave.schedule(updated.clone());

    Ok(HttpResponse::Ok().json(SessionResponse { session: updated }))
}

pub async fn navigate(
    data: web::Data<AppState>,
    path: web::Path<String>,
    request: web::Json<NavigateRequest>,
) -> Result<HttpResponse, AppError> {
    let session_id = path.into_inner();
    let session = fetch_session(&data, &session_id)?;
    reject_if_complete(&session)?;

    let updated = match request.into_inner() {
        NavigateRequest::Next => sequencer::advance(session)?,
        NavigateRequest::Previous => sequencer::apply(session, QuestionnaireAction::Previous),
        NavigateRequest::Jump { step } => {
            sequencer::apply(session, QuestionnaireAction::JumpTo(step))
        }
    };

    {
        let mut sessions = data.sessions_lock()?;
        sessions.insert(session_id, updated.clone());
    }
    data.autosave.schedule(updated.clone());

    Ok(HttpResponse::Ok().json(SessionResponse { session: updated }))
}

/// Terminal transition. The final state is returned to the caller and the
/// persisted snapshot is discarded; a completed run has no further use for
/// restore.
pub async fn complete_session(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let session_id = path.into_inner();
    let session = fetch_session(&data, &session_id)?;
    reject_if_complete(&session)?;

    let completed = sequencer::apply(session, QuestionnaireAction::Complete);
    info!(session = %session_id, "session completed");

    data.autosave.cancel(&session_id);
    if let Err(e) = data.database.delete_session(&session_id) {
        tracing::warn!(session = %session_id, "failed to clear completed session snapshot: {e}");
    }
    {
        let mut sessions = data.sessions_lock()?;
        sessions.remove(&session_id);
    }

    Ok(HttpResponse::Ok().json(SessionResponse { session: completed }))
}

/// Discards all session state and begins a fresh run under a new id.
pub async fn reset_session(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let session_id = path.into_inner();

    data.autosave.cancel(&session_id);
    if let Err(e) = data.database.delete_session(&session_id) {
        tracing::warn!(session = %session_id, "failed to clear session snapshot on reset: {e}");
    }

    let previous = {
        let mut sessions = data.sessions_lock()?;
        sessions.remove(&session_id)
    };

    let fresh = sequencer::apply(
        previous.unwrap_or_default(),
        QuestionnaireAction::Reset,
    );
    info!(old = %session_id, new = %fresh.session_id, "session reset");

    let mut sessions = data.sessions_lock()?;
    sessions.insert(fresh.session_id.clone(), fresh.clone());

    Ok(HttpResponse::Ok().json(SessionResponse { session: fresh }))
}

pub async fn get_estimate(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let session_id = path.into_inner();
    let session = fetch_session(&data, &session_id)?;

    let breakdown = estimate::cost_breakdown(&session.responses);
    Ok(HttpResponse::Ok().json(EstimateResponse { estimate: breakdown }))
}

/// Looks a session up in memory, falling back to a restorable snapshot so
/// a daemon restart does not strand live browser sessions.
fn fetch_session(
    data: &web::Data<AppState>,
    session_id: &str,
) -> Result<QuestionnaireSession, AppError> {
    {
        let sessions = data.sessions_lock()?;
        if let Some(session) = sessions.get(session_id) {
            return Ok(session.clone());
        }
    }

    let restored = data
        .database
        .load_session(session_id, data.config.sessions.retention_days)
        .unwrap_or_else(|e| {
            tracing::warn!(session = %session_id, "session not restorable: {e}");
            None
        });

    match restored {
        Some(mut session) => {
            // Stale flags from an older rule set would desync skipping
            session.conditional_visibility = visibility::resolve(&session.responses);
            let mut sessions = data.sessions_lock()?;
            sessions.insert(session.session_id.clone(), session.clone());
            Ok(session)
        }
        None => Err(AppError::SessionNotFound(session_id.to_string())),
    }
}

fn reject_if_complete(session: &QuestionnaireSession) -> Result<(), AppError> {
    if session.is_complete {
        return Err(AppError::InvalidRequest(format!(
            "Session {} is already completed; reset to start over",
            session.session_id
        )));
    }
    Ok(())
}
