//! Debounced session persistence.
//!
//! Every mutation schedules a write of that session one debounce window
//! out; a newer mutation inside the window aborts the pending task and
//! reschedules with the fresher snapshot. Writes are idempotent and cheap,
//! so last-write-wins is all the coordination a single-writer session
//! needs.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use shared_types::QuestionnaireSession;
use tokio::task::JoinHandle;

use crate::database::Database;
use crate::error::AppResult;

pub struct AutosaveScheduler {
    database: Arc<Database>,
    debounce: Duration,
    pending: Arc<Mutex<HashMap<String, JoinHandle<()>>>>,
}

impl AutosaveScheduler {
    pub fn new(database: Arc<Database>, debounce_ms: u64) -> Self {
        Self {
            database,
            debounce: Duration::from_millis(debounce_ms),
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Schedules `session` to be persisted after the debounce window,
    /// replacing any write already pending for the same session.
    pub fn schedule(&self, session: QuestionnaireSession) {
        let session_id = session.session_id.clone();

        let mut pending = match self.pending.lock() {
            Ok(guard) => guard,
            Err(e) => {
                tracing::error!("autosave scheduler lock poisoned: {e}");
                return;
            }
        };

        if let Some(handle) = pending.remove(&session_id) {
            handle.abort();
        }

        let database = Arc::clone(&self.database);
        let pending_map = Arc::clone(&self.pending);
        let delay = self.debounce;
        let task_id = session_id.clone();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = database.save_session(&session) {
                tracing::warn!(session = %session.session_id, "autosave failed: {e}");
            }
            if let Ok(mut map) = pending_map.lock() {
                map.remove(&task_id);
            }
        });

        pending.insert(session_id, handle);
    }

    /// Persists immediately, cancelling any pending debounced write.
    pub fn flush(&self, session: &QuestionnaireSession) -> AppResult<i64> {
        self.cancel(&session.session_id);
        self.database.save_session(session)
    }

    /// Drops any pending write for the session without persisting.
    pub fn cancel(&self, session_id: &str) {
        if let Ok(mut pending) = self.pending.lock() {
            if let Some(handle) = pending.remove(session_id) {
                handle.abort();
            }
        }
    }
}
