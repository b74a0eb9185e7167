use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::Config;
use crate::extraction::sections::ResumeSummary;
use crate::interview::bank::QuestionBank;
use crate::interview::session::InterviewSession;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Startup configuration. Reserved for handlers that need runtime settings.
    #[allow(dead_code)]
    pub config: Config,
    /// Question bank loaded once at startup; read-only afterwards.
    pub bank: Arc<QuestionBank>,
    /// Single-candidate store: one resume summary and one interview at a
    /// time. The mutex enforces the single-writer assumption at the HTTP
    /// boundary; handlers never hold it across an await point.
    pub store: Arc<Mutex<SessionStore>>,
}

/// Mutable per-candidate state: the latest extracted resume summary and the
/// interview in progress, if any.
#[derive(Debug, Default)]
pub struct SessionStore {
    pub resume_summary: Option<ResumeSummary>,
    pub interview: Option<InterviewSession>,
}

impl AppState {
    pub fn new(config: Config, bank: QuestionBank) -> Self {
        Self {
            config,
            bank: Arc::new(bank),
            store: Arc::new(Mutex::new(SessionStore::default())),
        }
    }
}
