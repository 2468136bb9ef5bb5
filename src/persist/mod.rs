//! Persistence gateway
//!
//! Thin mapping of store mutations onto remote upsert/select calls
//! against the hosted Supabase project, gated by the authenticated
//! identity. In-memory state is always the source of truth; remote
//! failures are logged and abandoned.

pub mod auth;
pub mod error;
pub mod gateway;
pub mod models;
pub mod supabase;

// Re-export commonly used types
pub use auth::{ensure_profile, AuthError, AuthSession, AuthUser};
pub use error::PersistError;
pub use gateway::PersistenceGateway;
pub use models::{ChatHistoryRow, PreferencesRow, Profile, ProgressRow, UserId};
pub use supabase::SupabaseGateway;
