use crate::error::QuizError;
use crate::generator::Question;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisitorId(Uuid);

impl VisitorId {
    pub fn new() -> Self {
        VisitorId(Uuid::new_v4())
    }
}

impl Default for VisitorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for VisitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for VisitorId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(VisitorId)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct StoredQuestion {
    question: String,
    answer: String,
}

/// What one visitor is currently working on. The question and its answer are
/// stored together, so either both are present or neither is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    current: Option<StoredQuestion>,
}

impl SessionState {
    /// The answer is kept as text so grading is a plain string comparison.
    /// A question without a computable answer stores an empty string, which
    /// no non-empty submission can match.
    pub fn with_question(question: &Question) -> Self {
        SessionState {
            current: Some(StoredQuestion {
                question: question.text.clone(),
                answer: question
                    .correct_answer
                    .map(|n| n.to_string())
                    .unwrap_or_default(),
            }),
        }
    }

    pub fn current_question(&self) -> Option<&str> {
        self.current.as_ref().map(|c| c.question.as_str())
    }

    pub fn correct_answer(&self) -> Option<&str> {
        self.current.as_ref().map(|c| c.answer.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}

pub trait SessionStore: Send + Sync {
    /// Unknown visitors read as an empty state.
    fn get(&self, visitor: &VisitorId) -> Result<SessionState, QuizError>;
    fn set(&self, visitor: &VisitorId, state: SessionState) -> Result<(), QuizError>;
    fn clear(&self, visitor: &VisitorId) -> Result<(), QuizError>;
}

struct Entry {
    state: SessionState,
    touched: DateTime<Utc>,
}

/// Keeps each visitor's state for `ttl` after its last write. Expired entries
/// read as empty and are swept on the next write.
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<VisitorId, Entry>>,
    ttl: Duration,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::with_ttl(Duration::hours(24))
    }
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        InMemorySessionStore {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_expired(&self, entry: &Entry, now: DateTime<Utc>) -> bool {
        now - entry.touched > self.ttl
    }

    fn get_at(&self, visitor: &VisitorId, now: DateTime<Utc>) -> Result<SessionState, QuizError> {
        let sessions = self.sessions.read().map_err(poisoned)?;
        Ok(sessions
            .get(visitor)
            .filter(|entry| !self.is_expired(entry, now))
            .map(|entry| entry.state.clone())
            .unwrap_or_default())
    }

    fn set_at(&self, visitor: &VisitorId, state: SessionState, now: DateTime<Utc>) -> Result<(), QuizError> {
        let mut sessions = self.sessions.write().map_err(poisoned)?;
        let before = sessions.len();
        sessions.retain(|_, entry| !self.is_expired(entry, now));
        if sessions.len() < before {
            log::debug!("Evicted {} expired sessions", before - sessions.len());
        }
        sessions.insert(*visitor, Entry { state, touched: now });
        Ok(())
    }
}

fn poisoned<T>(_: T) -> QuizError {
    QuizError::SessionStore("lock poisoned".to_string())
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, visitor: &VisitorId) -> Result<SessionState, QuizError> {
        self.get_at(visitor, Utc::now())
    }

    fn set(&self, visitor: &VisitorId, state: SessionState) -> Result<(), QuizError> {
        self.set_at(visitor, state, Utc::now())
    }

    fn clear(&self, visitor: &VisitorId) -> Result<(), QuizError> {
        let mut sessions = self.sessions.write().map_err(poisoned)?;
        sessions.remove(visitor);
        Ok(())
    }
}
