//! Persistence gateway trait
//!
//! The application facade only sees this seam; the Supabase REST
//! implementation lives alongside it and tests substitute a recording
//! mock. No operation retries or queues: callers log failures and move
//! on with in-memory state as the source of truth.

use async_trait::async_trait;

use crate::catalog::Subject;
use crate::store::{ChatMessage, UserPreferences};

use super::error::PersistError;
use super::models::{ChatHistoryRow, PreferencesRow, Profile, ProgressRow, UserId};

/// Remote upsert/select operations keyed by the authenticated identity
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Fetch a user's stored preferences; `None` when no record exists
    async fn fetch_preferences(
        &self,
        user_id: &UserId,
    ) -> Result<Option<PreferencesRow>, PersistError>;

    /// Upsert the full merged preferences for a user
    async fn upsert_preferences(
        &self,
        user_id: &UserId,
        preferences: &UserPreferences,
    ) -> Result<(), PersistError>;

    /// Fetch the transcript for (user, tutor, chapter); `None` when absent
    async fn fetch_chat_history(
        &self,
        user_id: &UserId,
        tutor_id: &str,
        chapter_name: &str,
    ) -> Result<Option<ChatHistoryRow>, PersistError>;

    /// Upsert the full transcript for (user, tutor, chapter)
    async fn upsert_chat_history(
        &self,
        user_id: &UserId,
        tutor_id: &str,
        chapter_name: &str,
        messages: &[ChatMessage],
    ) -> Result<(), PersistError>;

    /// Delete the transcript for (user, tutor, chapter)
    async fn delete_chat_history(
        &self,
        user_id: &UserId,
        tutor_id: &str,
        chapter_name: &str,
    ) -> Result<(), PersistError>;

    /// Fetch the progress record for (user, subject, chapter)
    async fn fetch_progress(
        &self,
        user_id: &UserId,
        subject: Subject,
        chapter_name: &str,
    ) -> Result<Option<ProgressRow>, PersistError>;

    /// Upsert a progress record
    async fn upsert_progress(&self, row: &ProgressRow) -> Result<(), PersistError>;

    /// Fetch a user's profile row; `None` for first-time users
    async fn fetch_profile(&self, user_id: &UserId) -> Result<Option<Profile>, PersistError>;

    /// Create a profile row for a new user
    async fn create_profile(&self, profile: &Profile) -> Result<(), PersistError>;

    /// Update display fields on an existing profile
    async fn update_profile(
        &self,
        user_id: &UserId,
        full_name: Option<&str>,
        avatar_url: Option<&str>,
    ) -> Result<(), PersistError>;
}
