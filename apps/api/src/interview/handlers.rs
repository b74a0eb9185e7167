use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::session::{ConversationTurn, InterviewSession, SessionError, SessionState};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RolesResponse {
    pub roles: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct StartRequest {
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct SessionDetails {
    pub id: Uuid,
    pub role: String,
    pub started_at: DateTime<Utc>,
    pub current_question: Option<String>,
    pub questions_remaining: usize,
    pub conversation: Vec<ConversationTurn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Session status payload. `state` is `idle` with no session details before
/// any interview has been started.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub state: SessionState,
    #[serde(flatten)]
    pub session: Option<SessionDetails>,
}

impl SessionResponse {
    fn idle() -> Self {
        Self {
            state: SessionState::Idle,
            session: None,
        }
    }

    fn from_session(session: &InterviewSession, warning: Option<String>) -> Self {
        Self {
            state: session.state(),
            session: Some(SessionDetails {
                id: session.id,
                role: session.role.clone(),
                started_at: session.started_at,
                current_question: session.current_question().map(str::to_string),
                questions_remaining: session.questions_remaining(),
                conversation: session.conversation().to_vec(),
                warning,
            }),
        }
    }
}

/// GET /api/v1/roles
pub async fn handle_list_roles(State(state): State<AppState>) -> Json<RolesResponse> {
    Json(RolesResponse {
        roles: state.bank.roles(),
    })
}

/// POST /api/v1/interview/start
///
/// Starts (or restarts) the interview for the selected role. Restarting
/// replaces any prior session and discards its conversation. A role with no
/// usable questions completes immediately and carries a warning so the
/// caller can surface it instead of showing an empty interview.
pub async fn handle_start(
    State(state): State<AppState>,
    Json(req): Json<StartRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let role = req.role.trim();
    if role.is_empty() {
        return Err(AppError::Validation(
            "Select a role to start the interview".to_string(),
        ));
    }
    if !state.bank.contains_role(role) {
        return Err(AppError::NotFound(format!("No such role: {role}")));
    }

    let questions = state.bank.questions_for(role);
    let warning = questions
        .is_empty()
        .then(|| format!("No questions available for role '{role}'"));

    let session = InterviewSession::start(role, questions);
    info!(
        "Interview started for role '{}' ({} question(s), session {})",
        role,
        session.questions_remaining() + usize::from(session.current_question().is_some()),
        session.id
    );

    let response = SessionResponse::from_session(&session, warning);
    state.store.lock().interview = Some(session);
    Ok(Json(response))
}

/// POST /api/v1/interview/answer
///
/// Submits the candidate's answer to the pending question. Blank answers are
/// rejected and leave the session untouched; answering with no interview in
/// progress or no pending question is a conflict.
pub async fn handle_answer(
    State(state): State<AppState>,
    Json(req): Json<AnswerRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let mut store = state.store.lock();
    let session = store
        .interview
        .as_mut()
        .ok_or(SessionError::NoPendingQuestion)?;

    session.submit_answer(&req.answer)?;
    if session.is_completed() {
        info!("Interview completed (session {})", session.id);
    }
    Ok(Json(SessionResponse::from_session(session, None)))
}

/// GET /api/v1/interview
pub async fn handle_session_status(State(state): State<AppState>) -> Json<SessionResponse> {
    let store = state.store.lock();
    let response = match &store.interview {
        Some(session) => SessionResponse::from_session(session, None),
        None => SessionResponse::idle(),
    };
    Json(response)
}
