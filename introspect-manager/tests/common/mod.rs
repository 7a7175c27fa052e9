//! Shared test infrastructure: each test gets an isolated AppState backed
//! by a throwaway database so tests can run in parallel.

use actix_web::web;
use introspect_manager::autosave::AutosaveScheduler;
use introspect_manager::config::{AppConfig, DatabaseConfig, ServerConfig, SessionsConfig};
use introspect_manager::database::Database;
use introspect_manager::handlers::AppState;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::SystemTime;
use tempfile::TempDir;

pub struct TestContext {
    pub state: web::Data<AppState>,
    pub database: Arc<Database>,
    _tmp: TempDir,
}

pub fn test_state() -> TestContext {
    let tmp = TempDir::new().expect("temp dir");
    let db_path = tmp.path().join("sessions.db");
    let database = Arc::new(Database::new(&db_path).expect("open test database"));

    let config = AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            path: db_path,
        },
        sessions: SessionsConfig {
            retention_days: 7,
            // Short debounce keeps autosave assertions fast
            autosave_debounce_ms: 10,
        },
    };

    let autosave = Arc::new(AutosaveScheduler::new(
        Arc::clone(&database),
        config.sessions.autosave_debounce_ms,
    ));

    let state = web::Data::new(AppState {
        database: Arc::clone(&database),
        sessions: Arc::new(Mutex::new(HashMap::new())),
        autosave,
        config: Arc::new(config),
        start_time: SystemTime::now(),
    });

    TestContext {
        state,
        database,
        _tmp: tmp,
    }
}
