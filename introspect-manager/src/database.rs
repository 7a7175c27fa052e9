use crate::error::{AppError, AppResult};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use shared_types::QuestionnaireSession;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

pub type DbConnection = Arc<Mutex<Connection>>;

const SECONDS_PER_DAY: i64 = 86_400;

/// Snapshot store for in-progress sessions. One row per session: the whole
/// serialized state plus the save timestamp the retention check runs on.
/// This is a restore cache, not authoritative storage; the in-memory
/// session is the source of truth while the daemon runs.
pub struct Database {
    connection: DbConnection,
}

impl Database {
    pub fn new(db_path: &PathBuf) -> AppResult<Self> {
        // Ensure the database directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;

        let database = Database {
            connection: Arc::new(Mutex::new(conn)),
        };

        database.run_migrations()?;

        Ok(database)
    }

    pub fn connection(&self) -> DbConnection {
        Arc::clone(&self.connection)
    }

    fn run_migrations(&self) -> AppResult<()> {
        let conn = self.lock()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS questionnaire_sessions (
                id TEXT PRIMARY KEY,
                state TEXT NOT NULL,
                last_saved INTEGER NOT NULL
            )",
            [],
        )?;

        // The retention sweep filters on last_saved
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_sessions_last_saved
             ON questionnaire_sessions(last_saved)",
            [],
        )?;

        Ok(())
    }

    /// Writes the session snapshot, stamping `last_saved` with the write
    /// time. Returns the stamp.
    pub fn save_session(&self, session: &QuestionnaireSession) -> AppResult<i64> {
        let now = Utc::now().timestamp();
        let mut snapshot = session.clone();
        snapshot.last_saved = Some(now);
        let blob = serde_json::to_string(&snapshot)?;

        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO questionnaire_sessions (id, state, last_saved)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                 state = excluded.state,
                 last_saved = excluded.last_saved",
            params![snapshot.session_id, blob, now],
        )?;

        Ok(now)
    }

    /// Loads a snapshot, discarding it instead when it is older than the
    /// retention window.
    pub fn load_session(
        &self,
        session_id: &str,
        retention_days: i64,
    ) -> AppResult<Option<QuestionnaireSession>> {
        let conn = self.lock()?;

        let row: Option<(String, i64)> = conn
            .query_row(
                "SELECT state, last_saved FROM questionnaire_sessions WHERE id = ?1",
                params![session_id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let Some((blob, last_saved)) = row else {
            return Ok(None);
        };

        let cutoff = Utc::now().timestamp() - retention_days * SECONDS_PER_DAY;
        if last_saved < cutoff {
            conn.execute(
                "DELETE FROM questionnaire_sessions WHERE id = ?1",
                params![session_id],
            )?;
            tracing::info!(session = session_id, "discarded expired session snapshot");
            return Ok(None);
        }

        let session = serde_json::from_str(&blob)?;
        Ok(Some(session))
    }

    pub fn delete_session(&self, session_id: &str) -> AppResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "DELETE FROM questionnaire_sessions WHERE id = ?1",
            params![session_id],
        )?;
        Ok(())
    }

    /// Deletes every snapshot past the retention window, returning the
    /// number removed. Run at startup so abandoned sessions do not pile up.
    pub fn sweep_expired(&self, retention_days: i64) -> AppResult<usize> {
        let cutoff = Utc::now().timestamp() - retention_days * SECONDS_PER_DAY;
        let conn = self.lock()?;
        let removed = conn.execute(
            "DELETE FROM questionnaire_sessions WHERE last_saved < ?1",
            params![cutoff],
        )?;
        Ok(removed)
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, Connection>> {
        self.connection
            .lock()
            .map_err(|e| AppError::Internal(format!("Failed to acquire database lock: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_db() -> (Database, TempDir) {
        let tmp = TempDir::new().expect("temp dir");
        let db = Database::new(&tmp.path().join("sessions.db")).expect("open database");
        (db, tmp)
    }

    fn backdate(db: &Database, session_id: &str, days: i64) {
        let conn = db.connection();
        let conn = conn.lock().unwrap();
        let stamp = Utc::now().timestamp() - days * SECONDS_PER_DAY;
        conn.execute(
            "UPDATE questionnaire_sessions SET last_saved = ?1 WHERE id = ?2",
            params![stamp, session_id],
        )
        .unwrap();
    }

    #[test]
    fn save_and_load_roundtrip() {
        let (db, _tmp) = test_db();
        let mut session = QuestionnaireSession::new();
        session.responses.business_name = "Acme Anvils".to_string();
        session.current_step = 4;

        db.save_session(&session).unwrap();
        let loaded = db
            .load_session(&session.session_id, 7)
            .unwrap()
            .expect("snapshot present");

        assert_eq!(loaded.session_id, session.session_id);
        assert_eq!(loaded.current_step, 4);
        assert_eq!(loaded.responses.business_name, "Acme Anvils");
        assert!(loaded.last_saved.is_some());
    }

    #[test]
    fn missing_session_loads_as_none() {
        let (db, _tmp) = test_db();
        assert!(db.load_session("nope", 7).unwrap().is_none());
    }

    #[test]
    fn snapshot_older_than_retention_is_discarded() {
        let (db, _tmp) = test_db();
        let session = QuestionnaireSession::new();
        db.save_session(&session).unwrap();
        backdate(&db, &session.session_id, 8);

        assert!(db.load_session(&session.session_id, 7).unwrap().is_none());
        // The expired row is gone, not merely hidden
        let conn = db.connection();
        let conn = conn.lock().unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM questionnaire_sessions", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn snapshot_within_retention_survives() {
        let (db, _tmp) = test_db();
        let session = QuestionnaireSession::new();
        db.save_session(&session).unwrap();
        backdate(&db, &session.session_id, 6);

        assert!(db.load_session(&session.session_id, 7).unwrap().is_some());
    }

    #[test]
    fn delete_removes_snapshot() {
        let (db, _tmp) = test_db();
        let session = QuestionnaireSession::new();
        db.save_session(&session).unwrap();
        db.delete_session(&session.session_id).unwrap();
        assert!(db.load_session(&session.session_id, 7).unwrap().is_none());
    }

    #[test]
    fn sweep_removes_only_expired_rows() {
        let (db, _tmp) = test_db();
        let stale = QuestionnaireSession::new();
        let fresh = QuestionnaireSession::new();
        db.save_session(&stale).unwrap();
        db.save_session(&fresh).unwrap();
        backdate(&db, &stale.session_id, 30);

        assert_eq!(db.sweep_expired(7).unwrap(), 1);
        assert!(db.load_session(&stale.session_id, 7).unwrap().is_none());
        assert!(db.load_session(&fresh.session_id, 7).unwrap().is_some());
    }

    #[test]
    fn save_is_last_write_wins() {
        let (db, _tmp) = test_db();
        let mut session = QuestionnaireSession::new();
        session.current_step = 2;
        db.save_session(&session).unwrap();
        session.current_step = 9;
        db.save_session(&session).unwrap();

        let loaded = db.load_session(&session.session_id, 7).unwrap().unwrap();
        assert_eq!(loaded.current_step, 9);
    }
}
