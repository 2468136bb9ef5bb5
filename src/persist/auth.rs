//! Authentication against the hosted auth service
//!
//! Sign-in errors are the one failure class surfaced to the user; the
//! caller renders them inline. Sign-out failures are logged and
//! swallowed. A successful sign-in bootstraps the user's profile row.

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use super::gateway::PersistenceGateway;
use super::models::{Profile, UserId};
use super::supabase::SupabaseGateway;

/// Errors from sign-in/sign-out
#[derive(Debug, Error)]
pub enum AuthError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The auth service rejected the sign-in
    #[error("Sign-in failed ({status}): {message}")]
    SignInFailed {
        /// HTTP status code
        status: u16,
        /// Error body from the service
        message: String,
    },

    /// Token response could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The signed-in user as reported by the auth service
#[derive(Debug, Clone, PartialEq)]
pub struct AuthUser {
    pub id: UserId,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// An established identity with its access token
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub user: AuthUser,
    pub access_token: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: TokenUser,
}

#[derive(Debug, Deserialize)]
struct TokenUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: serde_json::Value,
}

impl TokenUser {
    fn meta_str(&self, keys: &[&str]) -> Option<String> {
        keys.iter()
            .find_map(|key| self.user_metadata.get(key))
            .and_then(|v| v.as_str())
            .map(str::to_string)
    }
}

impl SupabaseGateway {
    /// Sign in with the password grant
    ///
    /// The headless stand-in for the browser OAuth flow; the resulting
    /// session carries the same identity and token shape. The user's
    /// access token is installed on this gateway for subsequent calls.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        let response = self
            .http()
            .post(format!("{}/auth/v1/token", self.base_url()))
            .header("apikey", self.anon_key())
            .query(&[("grant_type", "password")])
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AuthError::SignInFailed { status: status.as_u16(), message });
        }

        let body = response.text().await?;
        let token: TokenResponse = serde_json::from_str(&body)?;

        let user = AuthUser {
            id: UserId::new(&token.user.id),
            email: token.user.email.clone(),
            full_name: token.user.meta_str(&["full_name", "name"]),
            avatar_url: token.user.meta_str(&["avatar_url", "picture"]),
        };

        self.set_access_token(Some(token.access_token.clone()));
        Ok(AuthSession { user, access_token: token.access_token })
    }

    /// The browser entry point for OAuth sign-in with a provider
    pub fn oauth_authorize_url(&self, provider: &str) -> String {
        format!("{}/auth/v1/authorize?provider={provider}", self.base_url())
    }

    /// Sign out the current session
    ///
    /// Failures are logged, never surfaced; the local token is cleared
    /// either way.
    pub async fn sign_out(&self) {
        let result = self
            .http()
            .post(format!("{}/auth/v1/logout", self.base_url()))
            .header("apikey", self.anon_key())
            .bearer_auth(self.bearer())
            .send()
            .await;

        match result {
            Ok(response) if !response.status().is_success() => {
                warn!(status = response.status().as_u16(), "remote sign-out failed");
            }
            Err(err) => warn!(%err, "remote sign-out failed"),
            _ => {}
        }

        self.set_access_token(None);
    }
}

/// Make sure a profile row exists for a freshly signed-in user
///
/// Fetch failures and create failures are logged and swallowed; profile
/// bootstrap is never a blocking step.
pub async fn ensure_profile(gateway: &dyn PersistenceGateway, session: &AuthSession) {
    match gateway.fetch_profile(&session.user.id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            let profile = Profile {
                id: session.user.id.clone(),
                email: session.user.email.clone(),
                full_name: session.user.full_name.clone(),
                avatar_url: session.user.avatar_url.clone(),
            };
            if let Err(err) = gateway.create_profile(&profile).await {
                warn!(%err, "failed to create profile for new user");
            }
        }
        Err(err) => warn!(%err, "failed to load profile"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oauth_url_names_the_provider() {
        let gateway = SupabaseGateway::new("https://proj.supabase.co", "anon");
        assert_eq!(
            gateway.oauth_authorize_url("google"),
            "https://proj.supabase.co/auth/v1/authorize?provider=google"
        );
    }

    #[test]
    fn token_user_metadata_falls_back_across_keys() {
        let user = TokenUser {
            id: "u1".into(),
            email: None,
            user_metadata: serde_json::json!({ "name": "Asha", "picture": "https://img" }),
        };
        assert_eq!(user.meta_str(&["full_name", "name"]), Some("Asha".into()));
        assert_eq!(user.meta_str(&["avatar_url", "picture"]), Some("https://img".into()));
        assert_eq!(user.meta_str(&["missing"]), None);
    }

    #[test]
    fn token_response_parses() {
        let json = r#"{
            "access_token": "jwt",
            "token_type": "bearer",
            "user": {"id": "u1", "email": "a@b.c", "user_metadata": {"full_name": "Asha"}}
        }"#;
        let token: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token, "jwt");
        assert_eq!(token.user.id, "u1");
    }
}
