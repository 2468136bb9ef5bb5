//! In-memory state containers and their mutation contracts
//!
//! The preference and session stores are plain injected state objects;
//! nothing here talks to the network. Synchronization with the
//! persistence gateway is wired up by the application facade.

pub mod debounce;
pub mod preferences;
pub mod session;

pub use debounce::Debouncer;
pub use preferences::{PreferenceUpdate, UserPreferences};
pub use session::{ChatMessage, MessageRole, SessionState, SessionStore, PROGRESS_INCREMENT};
