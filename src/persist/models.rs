//! Remote row types
//!
//! One struct per hosted collection, serialized exactly as the service
//! stores them. Preferences rows only carry the remotely-persisted
//! subset: learning style and weak areas are session-local and reset to
//! defaults on every load.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{Chapter, ExamLevel, Subject};
use crate::store::preferences::Language;
use crate::store::{ChatMessage, UserPreferences};

/// Externally-authenticated user identity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wrap an identity string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identity string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Row in the `profiles` collection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: UserId,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Row in the `user_preferences` collection, unique per user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PreferencesRow {
    pub user_id: UserId,
    #[serde(default)]
    pub level: Option<ExamLevel>,
    #[serde(default)]
    pub subject: Option<Subject>,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
    #[serde(default)]
    pub language: Language,
    pub updated_at: DateTime<Utc>,
}

impl PreferencesRow {
    /// Build the upsert payload for a user's current preferences
    pub fn from_preferences(user_id: &UserId, preferences: &UserPreferences) -> Self {
        Self {
            user_id: user_id.clone(),
            level: preferences.level,
            subject: preferences.subject,
            chapters: preferences.chapters.clone(),
            language: preferences.language,
            updated_at: Utc::now(),
        }
    }

    /// Rehydrate in-memory preferences from a fetched row
    ///
    /// Learning style and weak areas are not stored remotely and come
    /// back as defaults.
    pub fn into_preferences(self) -> UserPreferences {
        UserPreferences {
            level: self.level,
            subject: self.subject,
            chapters: self.chapters,
            language: self.language,
            ..Default::default()
        }
    }
}

/// Row in the `chat_history` collection, keyed by user × tutor × chapter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatHistoryRow {
    pub user_id: UserId,
    pub tutor_id: String,
    pub chapter_name: String,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    pub updated_at: DateTime<Utc>,
}

/// Row in the `user_progress` collection, keyed by user × subject × chapter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressRow {
    pub user_id: UserId,
    pub subject: Subject,
    pub chapter_name: String,
    #[serde(default)]
    pub completed_subtopics: Vec<String>,
    #[serde(default)]
    pub quiz_scores: Vec<u8>,
    pub last_accessed: DateTime<Utc>,
}
