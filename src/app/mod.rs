//! Application facade: the state synchronization contract
//!
//! Owns the preference and session stores plus the injected gateways,
//! and wires their interactions: identity gain/loss, fire-and-forget
//! preference upserts, the debounced transcript auto-save, and the chat
//! send flow. In-memory state is always the source of truth; remote
//! failures are logged and never rolled back.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::catalog::{tutor_by_id, Chapter, Tutor};
use crate::config::Config;
use crate::gemini::{Generated, GenerationGateway};
use crate::mindmap::MindMap;
use crate::persist::{ensure_profile, AuthSession, PersistenceGateway};
use crate::store::{ChatMessage, Debouncer, PreferenceUpdate, SessionStore, UserPreferences};

/// Precondition failures on session operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AppError {
    /// A tutor must be selected before chatting
    #[error("No tutor selected")]
    NoTutorSelected,

    /// A chapter must be selected before generating a mind map
    #[error("No chapter selected")]
    NoChapterSelected,

    /// Session operations require an identity unless demo mode is on
    #[error("Sign in required")]
    SignInRequired,
}

/// The application facade
pub struct App {
    config: Config,
    persistence: Arc<dyn PersistenceGateway>,
    generation: GenerationGateway,
    preferences: UserPreferences,
    session: SessionStore,
    selected_tutor: Option<&'static Tutor>,
    identity: Option<AuthSession>,
    transcript_debounce: Debouncer,
}

impl App {
    /// Create an app with injected persistence
    pub fn new(config: Config, persistence: Arc<dyn PersistenceGateway>) -> Self {
        let generation = GenerationGateway::new(config.gemini_credential());
        let transcript_debounce = Debouncer::new(config.debounce_window());

        Self {
            config,
            persistence,
            generation,
            preferences: UserPreferences::default(),
            session: SessionStore::new(),
            selected_tutor: None,
            identity: None,
            transcript_debounce,
        }
    }

    /// Current preferences
    pub fn preferences(&self) -> &UserPreferences {
        &self.preferences
    }

    /// The session store
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// The selected tutor, if any
    pub fn selected_tutor(&self) -> Option<&'static Tutor> {
        self.selected_tutor
    }

    /// The established identity, if signed in
    pub fn identity(&self) -> Option<&AuthSession> {
        self.identity.as_ref()
    }

    /// Whether session operations are currently allowed
    pub fn session_allowed(&self) -> bool {
        self.identity.is_some() || self.config.demo_mode
    }

    /// Establish an identity and load remote preferences once
    ///
    /// A missing record or a failed fetch leaves the defaults in place;
    /// the failure is logged, never surfaced.
    pub async fn handle_sign_in(&mut self, auth: AuthSession) {
        ensure_profile(self.persistence.as_ref(), &auth).await;

        match self.persistence.fetch_preferences(&auth.user.id).await {
            Ok(Some(row)) => {
                self.preferences = row.into_preferences();
                info!(user = %auth.user.id, "loaded stored preferences");
            }
            Ok(None) => {}
            Err(err) => warn!(%err, "failed to load preferences"),
        }

        self.identity = Some(auth);
        self.sync_current_topic();
    }

    /// Drop the identity and reset all local state
    ///
    /// Preferences return to defaults, the selected tutor is cleared,
    /// the session empties, and any pending transcript save is
    /// cancelled. Remote sign-out is the caller's concern.
    pub fn sign_out(&mut self) {
        self.transcript_debounce.cancel();
        self.identity = None;
        self.preferences = UserPreferences::default();
        self.selected_tutor = None;
        self.session.reset();
    }

    /// Merge a partial preference update and persist the result
    ///
    /// The in-memory merge is synchronous and unconditional. When an
    /// identity exists, the merged result is upserted fire-and-forget;
    /// failures are logged and swallowed with no rollback and no retry.
    pub fn update_preferences(&mut self, update: PreferenceUpdate) {
        self.preferences.merge(update);
        self.sync_current_topic();
        self.persist_preferences();
    }

    /// Toggle a chapter selection, keeping the no-duplicates invariant
    pub fn toggle_chapter(&mut self, chapter: &Chapter) {
        self.preferences.toggle_chapter(chapter);
        self.sync_current_topic();
        self.persist_preferences();
    }

    /// Select the active tutor by id; returns the tutor when found
    pub fn select_tutor(&mut self, tutor_id: &str) -> Option<&'static Tutor> {
        self.selected_tutor = tutor_by_id(tutor_id);
        self.selected_tutor
    }

    /// Send a chat message through the generation gateway
    ///
    /// Appends the user message, generates a reply against the history
    /// window as it was before the append, appends the reply, and bumps
    /// progress by the fixed increment. Both appends re-arm the
    /// transcript debounce. Nothing prevents a second send while one is
    /// in flight; any busy-guard is the caller's.
    pub async fn send_message(&mut self, text: &str) -> Result<Generated<String>, AppError> {
        let tutor = self.selected_tutor.ok_or(AppError::NoTutorSelected)?;
        if !self.session_allowed() {
            return Err(AppError::SignInRequired);
        }

        let history = self.session.messages();
        self.session.add_message(ChatMessage::user(text));
        self.arm_transcript_save();

        let reply = self
            .generation
            .generate_chat_response(text, tutor, &self.preferences, &history)
            .await;

        self.session.add_message(ChatMessage::tutor(reply.value.clone()));
        self.arm_transcript_save();
        self.session.advance_progress();

        Ok(reply)
    }

    /// Regenerate the session mind map for the current chapter
    pub async fn request_mind_map(&mut self) -> Result<Generated<MindMap>, AppError> {
        let chapter = self.preferences.current_chapter().ok_or(AppError::NoChapterSelected)?;
        let (topic, subtopics) = (chapter.chapter_name.clone(), chapter.subtopics.clone());

        let generated = self.generation.generate_mind_map(&topic, &subtopics).await;
        self.session.update_mind_map(generated.value.clone());
        Ok(generated)
    }

    /// Generation gateway pass-through for the notes/mastery extension points
    pub fn generation(&self) -> &GenerationGateway {
        &self.generation
    }

    /// Load the remote transcript for (identity, tutor, topic), if any
    ///
    /// Fetch failures are logged and leave the session untouched.
    pub async fn restore_transcript(&mut self) {
        let Some(identity) = &self.identity else { return };
        let Some(tutor) = self.selected_tutor else { return };
        let Some(topic) = self.session.current_topic() else { return };

        match self.persistence.fetch_chat_history(&identity.user.id, tutor.id, &topic).await {
            Ok(Some(row)) => {
                info!(count = row.messages.len(), "restored chat history");
                self.session.replace_messages(row.messages);
            }
            Ok(None) => {}
            Err(err) => warn!(%err, "failed to load chat history"),
        }
    }

    /// Clear the session without touching preferences or identity
    pub fn reset_session(&mut self) {
        self.transcript_debounce.cancel();
        self.session.reset();
        self.sync_current_topic();
    }

    /// Keep the session topic in step with the current chapter
    fn sync_current_topic(&mut self) {
        self.session
            .set_current_topic(self.preferences.current_chapter().map(|c| c.chapter_name.clone()));
    }

    /// Fire-and-forget upsert of the current preferences
    fn persist_preferences(&self) {
        let Some(identity) = &self.identity else { return };

        let persistence = Arc::clone(&self.persistence);
        let user_id = identity.user.id.clone();
        let merged = self.preferences.clone();
        tokio::spawn(async move {
            if let Err(err) = persistence.upsert_preferences(&user_id, &merged).await {
                warn!(%err, "failed to save preferences");
            }
        });
    }

    /// Re-arm the debounced transcript save
    ///
    /// The save snapshots the transcript when the timer fires, so only
    /// the final state after a burst of messages reaches the remote.
    /// Without an identity there is nothing to key the row by and the
    /// timer is not armed.
    fn arm_transcript_save(&mut self) {
        let Some(identity) = &self.identity else { return };
        let Some(tutor) = self.selected_tutor else { return };
        let Some(topic) = self.session.current_topic() else { return };

        let persistence = Arc::clone(&self.persistence);
        let user_id = identity.user.id.clone();
        let tutor_id = tutor.id;
        let session = self.session.clone();

        self.transcript_debounce.arm(move || async move {
            let messages = session.messages();
            if messages.is_empty() {
                return;
            }
            if let Err(err) =
                persistence.upsert_chat_history(&user_id, tutor_id, &topic, &messages).await
            {
                warn!(%err, "failed to auto-save chat history");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::catalog::{ExamLevel, Subject};
    use crate::gemini::{FallbackCause, ResponseOrigin};
    use crate::persist::{
        AuthUser, ChatHistoryRow, PersistError, PreferencesRow, Profile, ProgressRow, UserId,
    };
    use crate::store::{MessageRole, PROGRESS_INCREMENT};

    const WINDOW: Duration = Duration::from_millis(2000);

    /// Recording stand-in for the remote store
    #[derive(Default)]
    struct RecordingGateway {
        chat_saves: Mutex<Vec<ChatHistoryRow>>,
        preference_saves: Mutex<Vec<(UserId, UserPreferences)>>,
        profiles: Mutex<Vec<Profile>>,
        stored_preferences: Mutex<Option<PreferencesRow>>,
        stored_history: Mutex<Option<ChatHistoryRow>>,
        fail_fetches: bool,
        fail_saves: bool,
    }

    impl RecordingGateway {
        fn failure() -> PersistError {
            PersistError::Remote { status: 500, message: "boom".to_string() }
        }
    }

    #[async_trait]
    impl PersistenceGateway for RecordingGateway {
        async fn fetch_preferences(
            &self,
            _user_id: &UserId,
        ) -> Result<Option<PreferencesRow>, PersistError> {
            if self.fail_fetches {
                return Err(Self::failure());
            }
            Ok(self.stored_preferences.lock().unwrap().clone())
        }

        async fn upsert_preferences(
            &self,
            user_id: &UserId,
            preferences: &UserPreferences,
        ) -> Result<(), PersistError> {
            if self.fail_saves {
                return Err(Self::failure());
            }
            self.preference_saves.lock().unwrap().push((user_id.clone(), preferences.clone()));
            Ok(())
        }

        async fn fetch_chat_history(
            &self,
            _user_id: &UserId,
            _tutor_id: &str,
            _chapter_name: &str,
        ) -> Result<Option<ChatHistoryRow>, PersistError> {
            if self.fail_fetches {
                return Err(Self::failure());
            }
            Ok(self.stored_history.lock().unwrap().clone())
        }

        async fn upsert_chat_history(
            &self,
            user_id: &UserId,
            tutor_id: &str,
            chapter_name: &str,
            messages: &[ChatMessage],
        ) -> Result<(), PersistError> {
            if self.fail_saves {
                return Err(Self::failure());
            }
            self.chat_saves.lock().unwrap().push(ChatHistoryRow {
                user_id: user_id.clone(),
                tutor_id: tutor_id.to_string(),
                chapter_name: chapter_name.to_string(),
                messages: messages.to_vec(),
                updated_at: chrono::Utc::now(),
            });
            Ok(())
        }

        async fn delete_chat_history(
            &self,
            _user_id: &UserId,
            _tutor_id: &str,
            _chapter_name: &str,
        ) -> Result<(), PersistError> {
            Ok(())
        }

        async fn fetch_progress(
            &self,
            _user_id: &UserId,
            _subject: Subject,
            _chapter_name: &str,
        ) -> Result<Option<ProgressRow>, PersistError> {
            Ok(None)
        }

        async fn upsert_progress(&self, _row: &ProgressRow) -> Result<(), PersistError> {
            Ok(())
        }

        async fn fetch_profile(
            &self,
            user_id: &UserId,
        ) -> Result<Option<Profile>, PersistError> {
            if self.fail_fetches {
                return Err(Self::failure());
            }
            Ok(self.profiles.lock().unwrap().iter().find(|p| &p.id == user_id).cloned())
        }

        async fn create_profile(&self, profile: &Profile) -> Result<(), PersistError> {
            self.profiles.lock().unwrap().push(profile.clone());
            Ok(())
        }

        async fn update_profile(
            &self,
            _user_id: &UserId,
            _full_name: Option<&str>,
            _avatar_url: Option<&str>,
        ) -> Result<(), PersistError> {
            Ok(())
        }
    }

    fn auth_session(id: &str) -> AuthSession {
        AuthSession {
            user: AuthUser {
                id: UserId::new(id),
                email: Some(format!("{id}@example.com")),
                full_name: None,
                avatar_url: None,
            },
            access_token: "jwt".to_string(),
        }
    }

    fn kinematics() -> Chapter {
        Chapter::new(
            "Kinematics",
            &["Motion Types", "Equations of Motion", "Graphs", "Projectile", "Relative Motion"],
        )
    }

    fn offline_config() -> Config {
        Config { debounce_ms: WINDOW.as_millis() as u64, ..Default::default() }
    }

    async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    async fn signed_in_app(gateway: Arc<RecordingGateway>) -> App {
        let mut app = App::new(offline_config(), gateway);
        app.handle_sign_in(auth_session("u1")).await;
        app.select_tutor("einstein");
        app.toggle_chapter(&kinematics());
        settle().await;
        app
    }

    #[tokio::test(start_paused = true)]
    async fn burst_of_messages_saves_exactly_once() {
        let gateway = Arc::new(RecordingGateway::default());
        let mut app = signed_in_app(Arc::clone(&gateway)).await;

        for text in ["one", "two", "three"] {
            app.send_message(text).await.unwrap();
        }

        settle().await;
        tokio::time::advance(WINDOW + Duration::from_millis(1)).await;
        settle().await;

        let saves = gateway.chat_saves.lock().unwrap();
        assert_eq!(saves.len(), 1);
        // 3 user messages + 3 tutor replies, all in the one save
        assert_eq!(saves[0].messages.len(), 6);
        assert_eq!(saves[0].tutor_id, "einstein");
        assert_eq!(saves[0].chapter_name, "Kinematics");
    }

    #[tokio::test(start_paused = true)]
    async fn spaced_messages_save_per_burst() {
        let gateway = Arc::new(RecordingGateway::default());
        let mut app = signed_in_app(Arc::clone(&gateway)).await;

        app.send_message("one").await.unwrap();
        settle().await;
        tokio::time::advance(WINDOW + Duration::from_millis(1)).await;
        settle().await;

        app.send_message("two").await.unwrap();
        settle().await;
        tokio::time::advance(WINDOW + Duration::from_millis(1)).await;
        settle().await;

        let saves = gateway.chat_saves.lock().unwrap();
        assert_eq!(saves.len(), 2);
        assert_eq!(saves[0].messages.len(), 2);
        // The second save carries the full transcript so far
        assert_eq!(saves[1].messages.len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn save_failures_leave_memory_untouched() {
        let gateway = Arc::new(RecordingGateway { fail_saves: true, ..Default::default() });
        let mut app = signed_in_app(Arc::clone(&gateway)).await;

        app.send_message("one").await.unwrap();
        tokio::time::advance(WINDOW + Duration::from_millis(1)).await;
        settle().await;

        assert_eq!(app.session().messages().len(), 2);
        assert_eq!(app.session().progress(), PROGRESS_INCREMENT);
    }

    #[tokio::test(start_paused = true)]
    async fn offline_projectile_scenario() {
        let gateway = Arc::new(RecordingGateway::default());
        let mut app = signed_in_app(Arc::clone(&gateway)).await;
        assert_eq!(app.session().progress(), 0);

        let reply = app.send_message("what is projectile motion").await.unwrap();

        assert_eq!(reply.origin, ResponseOrigin::Fallback(FallbackCause::NoCredential));
        assert!(reply.value.contains("Projectile Motion"));
        assert!(reply.value.contains("R = u² sin 2θ / g"));
        assert_eq!(app.session().progress(), PROGRESS_INCREMENT);

        let messages = app.session().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::User);
        assert_eq!(messages[1].role, MessageRole::Tutor);
    }

    #[tokio::test(start_paused = true)]
    async fn sign_out_clears_everything() {
        let gateway = Arc::new(RecordingGateway::default());
        let mut app = signed_in_app(Arc::clone(&gateway)).await;
        app.send_message("hello newton").await.unwrap();
        app.request_mind_map().await.unwrap();

        app.sign_out();

        assert!(app.identity().is_none());
        assert!(app.selected_tutor().is_none());
        assert_eq!(app.preferences(), &UserPreferences::default());
        let session = app.session().snapshot();
        assert!(session.messages.is_empty());
        assert!(session.mind_map.nodes.is_empty());
        assert_eq!(session.progress, 0);
        assert_eq!(session.current_topic, None);

        // The pending debounce was cancelled with it
        tokio::time::advance(WINDOW * 2).await;
        settle().await;
        assert!(gateway.chat_saves.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn preference_updates_persist_only_when_signed_in() {
        let gateway = Arc::new(RecordingGateway::default());
        let mut app = App::new(offline_config(), gateway.clone());

        app.update_preferences(PreferenceUpdate {
            level: Some(ExamLevel::JeeMain),
            ..Default::default()
        });
        settle().await;
        assert!(gateway.preference_saves.lock().unwrap().is_empty());
        assert_eq!(app.preferences().level, Some(ExamLevel::JeeMain));

        app.handle_sign_in(auth_session("u1")).await;
        app.update_preferences(PreferenceUpdate {
            subject: Some(Subject::Physics),
            ..Default::default()
        });
        settle().await;

        let saves = gateway.preference_saves.lock().unwrap();
        assert_eq!(saves.len(), 1);
        assert_eq!(saves[0].1.level, Some(ExamLevel::JeeMain));
        assert_eq!(saves[0].1.subject, Some(Subject::Physics));
    }

    #[tokio::test(start_paused = true)]
    async fn sign_in_loads_stored_preferences() {
        let gateway = Arc::new(RecordingGateway::default());
        *gateway.stored_preferences.lock().unwrap() = Some(PreferencesRow::from_preferences(
            &UserId::new("u1"),
            &UserPreferences {
                level: Some(ExamLevel::Neet),
                subject: Some(Subject::Biology),
                chapters: vec![Chapter::new("Ecology", &["Ecosystem"])],
                ..Default::default()
            },
        ));

        let mut app = App::new(offline_config(), gateway.clone());
        app.handle_sign_in(auth_session("u1")).await;

        assert_eq!(app.preferences().level, Some(ExamLevel::Neet));
        assert_eq!(app.session().current_topic(), Some("Ecology".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_preference_fetch_leaves_defaults() {
        let gateway = Arc::new(RecordingGateway { fail_fetches: true, ..Default::default() });
        let mut app = App::new(offline_config(), gateway.clone());
        app.handle_sign_in(auth_session("u1")).await;

        assert!(app.identity().is_some());
        assert_eq!(app.preferences(), &UserPreferences::default());
    }

    #[tokio::test(start_paused = true)]
    async fn first_sign_in_creates_a_profile() {
        let gateway = Arc::new(RecordingGateway::default());
        let mut app = App::new(offline_config(), gateway.clone());
        app.handle_sign_in(auth_session("new-user")).await;

        let profiles = gateway.profiles.lock().unwrap();
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].email.as_deref(), Some("new-user@example.com"));
    }

    #[tokio::test(start_paused = true)]
    async fn send_requires_tutor_and_identity() {
        let gateway = Arc::new(RecordingGateway::default());
        let mut app = App::new(offline_config(), gateway.clone());

        assert_eq!(app.send_message("hi").await.unwrap_err(), AppError::NoTutorSelected);

        app.select_tutor("feynman");
        assert_eq!(app.send_message("hi").await.unwrap_err(), AppError::SignInRequired);
    }

    #[tokio::test(start_paused = true)]
    async fn demo_mode_lifts_the_identity_requirement() {
        let gateway = Arc::new(RecordingGateway::default());
        let config = Config { demo_mode: true, ..offline_config() };
        let mut app = App::new(config, gateway.clone());
        app.select_tutor("feynman");
        app.toggle_chapter(&kinematics());

        let reply = app.send_message("hello newton").await.unwrap();
        assert!(reply.value.contains("Newton's Laws of Motion"));

        // No identity, so nothing is ever written remotely
        tokio::time::advance(WINDOW * 2).await;
        settle().await;
        assert!(gateway.chat_saves.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn mind_map_replaces_session_graph() {
        let gateway = Arc::new(RecordingGateway::default());
        let mut app = signed_in_app(Arc::clone(&gateway)).await;

        let generated = app.request_mind_map().await.unwrap();
        assert_eq!(generated.value.nodes.len(), 16);
        assert_eq!(app.session().snapshot().mind_map, generated.value);
    }

    #[tokio::test(start_paused = true)]
    async fn restore_transcript_loads_remote_history() {
        let gateway = Arc::new(RecordingGateway::default());
        *gateway.stored_history.lock().unwrap() = Some(ChatHistoryRow {
            user_id: UserId::new("u1"),
            tutor_id: "einstein".to_string(),
            chapter_name: "Kinematics".to_string(),
            messages: vec![ChatMessage::user("old question"), ChatMessage::tutor("old answer")],
            updated_at: chrono::Utc::now(),
        });

        let mut app = signed_in_app(Arc::clone(&gateway)).await;
        app.restore_transcript().await;

        let messages = app.session().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "old question");
    }
}
