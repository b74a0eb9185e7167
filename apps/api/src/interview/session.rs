//! Interview session state machine — sequences question/answer turns over a
//! FIFO queue of prompts and accumulates the conversation log.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Who produced a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    Interviewer,
    Candidate,
}

impl Speaker {
    pub fn name(self) -> &'static str {
        match self {
            Speaker::Interviewer => "Interviewer",
            Speaker::Candidate => "Candidate",
        }
    }
}

/// One utterance in the interview conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub speaker: Speaker,
    pub text: String,
}

impl ConversationTurn {
    fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
        }
    }
}

/// Lifecycle state of an interview.
///
/// `Idle` is reported before any session exists; a session value itself is
/// only ever `Active` or `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Active,
    Completed,
}

/// Rejected session operations. The session is left untouched in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Please provide an answer before submitting")]
    AnswerRequired,

    #[error("No question is currently awaiting an answer")]
    NoPendingQuestion,
}

/// A single interview in progress: the selected role, the remaining question
/// queue, the pending question, and the append-only conversation log.
///
/// The queue is strict FIFO; no operation skips or reorders questions, and
/// the log is never truncated. Restarting an interview means constructing a
/// fresh session, which discards the prior conversation by replacement.
#[derive(Debug, Clone)]
pub struct InterviewSession {
    pub id: Uuid,
    pub role: String,
    pub started_at: DateTime<Utc>,
    queue: VecDeque<String>,
    current_question: Option<String>,
    conversation: Vec<ConversationTurn>,
    state: SessionState,
}

impl InterviewSession {
    /// Starts an interview for `role` over `questions`, posing the first
    /// question immediately.
    ///
    /// An empty question list completes the session right away with an empty
    /// log — no question is ever posed.
    pub fn start(role: impl Into<String>, questions: Vec<String>) -> Self {
        let mut queue: VecDeque<String> = questions.into();
        let mut conversation = Vec::new();

        let current_question = queue.pop_front();
        let state = match &current_question {
            Some(first) => {
                conversation.push(ConversationTurn::new(Speaker::Interviewer, first.clone()));
                SessionState::Active
            }
            None => SessionState::Completed,
        };

        Self {
            id: Uuid::new_v4(),
            role: role.into(),
            started_at: Utc::now(),
            queue,
            current_question,
            conversation,
            state,
        }
    }

    /// Records the candidate's answer to the pending question, then poses the
    /// next question or completes the session when the queue is exhausted.
    ///
    /// A blank or whitespace-only answer is rejected with `AnswerRequired`;
    /// the log and pending question are unchanged and the session stays
    /// `Active` awaiting a valid answer.
    pub fn submit_answer(&mut self, answer: &str) -> Result<(), SessionError> {
        if self.current_question.is_none() {
            return Err(SessionError::NoPendingQuestion);
        }
        if answer.trim().is_empty() {
            return Err(SessionError::AnswerRequired);
        }

        self.conversation
            .push(ConversationTurn::new(Speaker::Candidate, answer));

        match self.queue.pop_front() {
            Some(next) => {
                self.conversation
                    .push(ConversationTurn::new(Speaker::Interviewer, next.clone()));
                self.current_question = Some(next);
            }
            None => {
                self.current_question = None;
                self.state = SessionState::Completed;
            }
        }
        Ok(())
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn current_question(&self) -> Option<&str> {
        self.current_question.as_deref()
    }

    pub fn conversation(&self) -> &[ConversationTurn] {
        &self.conversation
    }

    pub fn questions_remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn is_completed(&self) -> bool {
        self.state == SessionState::Completed
    }
}
