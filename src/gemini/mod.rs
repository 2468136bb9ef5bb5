//! Gemini generation gateway
//!
//! Turns chat messages and topic requests into generateContent calls,
//! degrading to hand-authored fallback content whenever the endpoint is
//! unconfigured or misbehaves.

pub mod client;
pub mod error;
pub mod fallback;
pub mod gateway;
pub mod models;
pub mod prompt;

// Re-export commonly used types
pub use client::GeminiClient;
pub use error::{FallbackCause, GenerationError, ResponseOrigin};
pub use gateway::{Generated, GenerationGateway};
pub use models::{MasteryEvaluation, NoteSection, ShortNotes};
