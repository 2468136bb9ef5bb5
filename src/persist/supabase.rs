//! Supabase (PostgREST) implementation of the persistence gateway

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::catalog::Subject;
use crate::store::{ChatMessage, UserPreferences};

use super::error::PersistError;
use super::gateway::PersistenceGateway;
use super::models::{ChatHistoryRow, PreferencesRow, Profile, ProgressRow, UserId};

/// REST client for a hosted Supabase project
pub struct SupabaseGateway {
    /// HTTP client
    client: Client,
    /// Project base URL (no trailing slash)
    base_url: String,
    /// Anonymous API key; doubles as the bearer before sign-in
    anon_key: String,
    /// Access token of the signed-in user, when present
    access_token: std::sync::Mutex<Option<String>>,
}

impl SupabaseGateway {
    /// Create a gateway for a project URL and anon key
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            access_token: std::sync::Mutex::new(None),
        }
    }

    /// Project base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Anonymous API key
    pub(crate) fn anon_key(&self) -> &str {
        &self.anon_key
    }

    /// HTTP client shared by REST and auth calls
    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    /// Install (or clear) the signed-in user's access token
    pub fn set_access_token(&self, token: Option<String>) {
        *self.access_token.lock().expect("access token lock") = token;
    }

    pub(crate) fn bearer(&self) -> String {
        self.access_token
            .lock()
            .expect("access token lock")
            .clone()
            .unwrap_or_else(|| self.anon_key.clone())
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn eq(value: impl std::fmt::Display) -> String {
        format!("eq.{value}")
    }

    async fn check(&self, response: reqwest::Response) -> Result<reqwest::Response, PersistError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(PersistError::Remote { status: status.as_u16(), message })
    }

    /// Select at most one row matching the filters
    async fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> Result<Option<T>, PersistError> {
        let mut query: Vec<(&str, String)> = vec![("select", "*".to_string()), ("limit", "1".to_string())];
        query.extend(filters.iter().cloned());

        let response = self
            .client
            .get(self.table_url(table))
            .header("apikey", &self.anon_key)
            .bearer_auth(self.bearer())
            .query(&query)
            .send()
            .await?;

        let body = self.check(response).await?.text().await?;
        let mut rows: Vec<T> = serde_json::from_str(&body)?;
        Ok(if rows.is_empty() { None } else { Some(rows.remove(0)) })
    }

    /// Upsert one row, merging on the given conflict columns
    async fn upsert<T: Serialize>(
        &self,
        table: &str,
        on_conflict: &str,
        row: &T,
    ) -> Result<(), PersistError> {
        let response = self
            .client
            .post(self.table_url(table))
            .header("apikey", &self.anon_key)
            .bearer_auth(self.bearer())
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .query(&[("on_conflict", on_conflict)])
            .json(row)
            .send()
            .await?;

        self.check(response).await?;
        Ok(())
    }
}

#[async_trait]
impl PersistenceGateway for SupabaseGateway {
    async fn fetch_preferences(
        &self,
        user_id: &UserId,
    ) -> Result<Option<PreferencesRow>, PersistError> {
        self.select_one("user_preferences", &[("user_id", Self::eq(user_id))]).await
    }

    async fn upsert_preferences(
        &self,
        user_id: &UserId,
        preferences: &UserPreferences,
    ) -> Result<(), PersistError> {
        let row = PreferencesRow::from_preferences(user_id, preferences);
        self.upsert("user_preferences", "user_id", &row).await
    }

    async fn fetch_chat_history(
        &self,
        user_id: &UserId,
        tutor_id: &str,
        chapter_name: &str,
    ) -> Result<Option<ChatHistoryRow>, PersistError> {
        self.select_one(
            "chat_history",
            &[
                ("user_id", Self::eq(user_id)),
                ("tutor_id", Self::eq(tutor_id)),
                ("chapter_name", Self::eq(chapter_name)),
            ],
        )
        .await
    }

    async fn upsert_chat_history(
        &self,
        user_id: &UserId,
        tutor_id: &str,
        chapter_name: &str,
        messages: &[ChatMessage],
    ) -> Result<(), PersistError> {
        let row = ChatHistoryRow {
            user_id: user_id.clone(),
            tutor_id: tutor_id.to_string(),
            chapter_name: chapter_name.to_string(),
            messages: messages.to_vec(),
            updated_at: Utc::now(),
        };
        self.upsert("chat_history", "user_id,tutor_id,chapter_name", &row).await
    }

    async fn delete_chat_history(
        &self,
        user_id: &UserId,
        tutor_id: &str,
        chapter_name: &str,
    ) -> Result<(), PersistError> {
        let response = self
            .client
            .delete(self.table_url("chat_history"))
            .header("apikey", &self.anon_key)
            .bearer_auth(self.bearer())
            .query(&[
                ("user_id", Self::eq(user_id)),
                ("tutor_id", Self::eq(tutor_id)),
                ("chapter_name", Self::eq(chapter_name)),
            ])
            .send()
            .await?;

        self.check(response).await?;
        Ok(())
    }

    async fn fetch_progress(
        &self,
        user_id: &UserId,
        subject: Subject,
        chapter_name: &str,
    ) -> Result<Option<ProgressRow>, PersistError> {
        let subject = serde_json::to_value(subject)?;
        self.select_one(
            "user_progress",
            &[
                ("user_id", Self::eq(user_id)),
                ("subject", Self::eq(subject.as_str().unwrap_or_default())),
                ("chapter_name", Self::eq(chapter_name)),
            ],
        )
        .await
    }

    async fn upsert_progress(&self, row: &ProgressRow) -> Result<(), PersistError> {
        self.upsert("user_progress", "user_id,subject,chapter_name", row).await
    }

    async fn fetch_profile(&self, user_id: &UserId) -> Result<Option<Profile>, PersistError> {
        self.select_one("profiles", &[("id", Self::eq(user_id))]).await
    }

    async fn create_profile(&self, profile: &Profile) -> Result<(), PersistError> {
        let response = self
            .client
            .post(self.table_url("profiles"))
            .header("apikey", &self.anon_key)
            .bearer_auth(self.bearer())
            .header("Prefer", "return=minimal")
            .json(profile)
            .send()
            .await?;

        self.check(response).await?;
        Ok(())
    }

    async fn update_profile(
        &self,
        user_id: &UserId,
        full_name: Option<&str>,
        avatar_url: Option<&str>,
    ) -> Result<(), PersistError> {
        let mut updates = serde_json::Map::new();
        if let Some(name) = full_name {
            updates.insert("full_name".to_string(), name.into());
        }
        if let Some(url) = avatar_url {
            updates.insert("avatar_url".to_string(), url.into());
        }
        updates.insert("updated_at".to_string(), Utc::now().to_rfc3339().into());

        let response = self
            .client
            .patch(self.table_url("profiles"))
            .header("apikey", &self.anon_key)
            .bearer_auth(self.bearer())
            .header("Prefer", "return=minimal")
            .query(&[("id", Self::eq(user_id))])
            .json(&updates)
            .send()
            .await?;

        self.check(response).await?;
        Ok(())
    }
}
