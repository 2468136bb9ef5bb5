//! Data models for Gemini generateContent requests and responses

use serde::{Deserialize, Serialize};

/// A message part (text only in this application)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// A role-tagged message in the request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// "user" or "model"
    pub role: String,
    pub parts: Vec<Part>,
}

impl Content {
    /// Create a user turn
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: "user".to_string(), parts: vec![Part { text: text.into() }] }
    }

    /// Create a model turn
    pub fn model(text: impl Into<String>) -> Self {
        Self { role: "model".to_string(), parts: vec![Part { text: text.into() }] }
    }
}

/// Sampling parameters
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    pub max_output_tokens: u32,
}

impl GenerationConfig {
    /// Chat sampling: creative but grounded
    pub fn chat() -> Self {
        Self { temperature: 0.7, top_k: Some(40), top_p: Some(0.95), max_output_tokens: 1024 }
    }

    /// Structured-document sampling: low temperature, larger budget
    pub fn structured(max_output_tokens: u32) -> Self {
        Self { temperature: 0.3, top_k: None, top_p: None, max_output_tokens }
    }

    /// Evaluation sampling
    pub fn evaluation() -> Self {
        Self { temperature: 0.5, top_k: None, top_p: None, max_output_tokens: 512 }
    }
}

/// A per-category content-safety threshold
#[derive(Debug, Clone, Serialize)]
pub struct SafetySetting {
    pub category: &'static str,
    pub threshold: &'static str,
}

/// The fixed safety thresholds applied to chat requests
pub fn default_safety_settings() -> Vec<SafetySetting> {
    const BLOCK: &str = "BLOCK_MEDIUM_AND_ABOVE";
    vec![
        SafetySetting { category: "HARM_CATEGORY_HARASSMENT", threshold: BLOCK },
        SafetySetting { category: "HARM_CATEGORY_HATE_SPEECH", threshold: BLOCK },
        SafetySetting { category: "HARM_CATEGORY_SEXUALLY_EXPLICIT", threshold: BLOCK },
        SafetySetting { category: "HARM_CATEGORY_DANGEROUS_CONTENT", threshold: BLOCK },
    ]
}

/// Request body for the generateContent endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub safety_settings: Vec<SafetySetting>,
}

impl GenerateContentRequest {
    /// Create a request with the given turns and sampling config
    pub fn new(contents: Vec<Content>, generation_config: GenerationConfig) -> Self {
        Self { contents, generation_config, safety_settings: Vec::new() }
    }

    /// Apply the fixed safety thresholds
    pub fn with_default_safety(mut self) -> Self {
        self.safety_settings = default_safety_settings();
        self
    }
}

/// Response from the generateContent endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One response candidate
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

/// Candidate content parts
#[derive(Debug, Clone, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, if any
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()
            .map(|p| p.text.as_str())
    }
}

/// Structured short notes for a topic
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShortNotes {
    pub title: String,
    pub sections: Vec<NoteSection>,
}

/// One section of short notes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NoteSection {
    pub heading: String,
    #[serde(default)]
    pub points: Vec<String>,
    #[serde(default)]
    pub formulas: Vec<String>,
    #[serde(default)]
    pub tips: String,
}

/// Result of evaluating a student's explanation of a topic
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MasteryEvaluation {
    /// 0-100
    pub score: u8,
    pub feedback: String,
}
