//! Generation gateway: remote call with uniform local degradation
//!
//! Every operation returns usable content. Remote failures of any kind
//! (no credential, network, HTTP status, unparseable or under-length
//! output) collapse into the corresponding fallback; the cause is kept
//! on the result's origin tag for logging and tests, never surfaced as
//! an error to the caller.

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::catalog::Tutor;
use crate::mindmap::{fallback_branches, layout_branches, layout_document, MindMap, RawMindMap};
use crate::store::preferences::UserPreferences;
use crate::store::ChatMessage;

use super::client::GeminiClient;
use super::error::{GenerationError, ResponseOrigin};
use super::fallback;
use super::models::{
    Content, GenerateContentRequest, GenerationConfig, MasteryEvaluation, ShortNotes,
};
use super::prompt;

/// Replies shorter than this are treated as unusable
pub const MIN_REPLY_LEN: usize = 10;
/// Remote mind-map documents with fewer nodes fall back
pub const MIN_MIND_MAP_NODES: usize = 8;

/// A generated value tagged with where it came from
#[derive(Debug, Clone)]
pub struct Generated<T> {
    pub value: T,
    pub origin: ResponseOrigin,
}

/// Gateway over the hosted generation endpoint
pub struct GenerationGateway {
    /// Present only when a usable credential is configured
    client: Option<GeminiClient>,
}

impl GenerationGateway {
    /// Create a gateway; `credential` must already pass the placeholder check
    pub fn new(credential: Option<String>) -> Self {
        Self { client: credential.map(GeminiClient::new) }
    }

    /// Create a gateway that always serves fallback content
    pub fn offline() -> Self {
        Self { client: None }
    }

    /// Whether a credential is configured
    pub fn has_credential(&self) -> bool {
        self.client.is_some()
    }

    /// Generate a tutor chat reply
    pub async fn generate_chat_response(
        &self,
        message: &str,
        tutor: &Tutor,
        preferences: &UserPreferences,
        history: &[ChatMessage],
    ) -> Generated<String> {
        match self.try_chat(message, tutor, preferences, history).await {
            Ok(text) => Generated { value: text, origin: ResponseOrigin::Remote },
            Err(err) => {
                warn!(tutor = tutor.id, %err, "chat generation failed, using fallback");
                Generated {
                    value: fallback::chat_fallback(message),
                    origin: ResponseOrigin::Fallback(err.cause()),
                }
            }
        }
    }

    async fn try_chat(
        &self,
        message: &str,
        tutor: &Tutor,
        preferences: &UserPreferences,
        history: &[ChatMessage],
    ) -> Result<String, GenerationError> {
        let client = self.client.as_ref().ok_or(GenerationError::NoCredential)?;
        let request = GenerateContentRequest::new(
            prompt::chat_contents(message, tutor, preferences, history),
            GenerationConfig::chat(),
        )
        .with_default_safety();

        let text = client.generate(request).await?;
        if text.trim().len() < MIN_REPLY_LEN {
            return Err(GenerationError::TooShort);
        }
        Ok(text)
    }

    /// Generate a laid-out mind map for a topic
    pub async fn generate_mind_map(
        &self,
        topic: &str,
        subtopics: &[String],
    ) -> Generated<MindMap> {
        match self.try_mind_map(topic, subtopics).await {
            Ok(map) => Generated { value: map, origin: ResponseOrigin::Remote },
            Err(err) => {
                warn!(topic, %err, "mind map generation failed, using deterministic fallback");
                let branches = fallback_branches(topic, subtopics);
                Generated {
                    value: layout_branches(topic, &branches),
                    origin: ResponseOrigin::Fallback(err.cause()),
                }
            }
        }
    }

    async fn try_mind_map(
        &self,
        topic: &str,
        subtopics: &[String],
    ) -> Result<MindMap, GenerationError> {
        let client = self.client.as_ref().ok_or(GenerationError::NoCredential)?;
        let request = GenerateContentRequest::new(
            vec![Content::user(prompt::mind_map_prompt(topic, subtopics))],
            GenerationConfig::structured(2048),
        );

        let text = client.generate(request).await?;
        let raw: RawMindMap = extract_json(&text)
            .ok_or_else(|| GenerationError::Parse("no mind map JSON in response".to_string()))?;
        if raw.nodes.len() < MIN_MIND_MAP_NODES {
            return Err(GenerationError::TooShort);
        }
        Ok(layout_document(&raw, topic))
    }

    /// Generate structured short notes for a topic
    pub async fn generate_short_notes(
        &self,
        topic: &str,
        subtopics: &[String],
    ) -> Generated<ShortNotes> {
        match self.try_short_notes(topic, subtopics).await {
            Ok(notes) => Generated { value: notes, origin: ResponseOrigin::Remote },
            Err(err) => {
                warn!(topic, %err, "short notes generation failed, using fallback");
                Generated {
                    value: fallback::notes_fallback(topic, subtopics),
                    origin: ResponseOrigin::Fallback(err.cause()),
                }
            }
        }
    }

    async fn try_short_notes(
        &self,
        topic: &str,
        subtopics: &[String],
    ) -> Result<ShortNotes, GenerationError> {
        let client = self.client.as_ref().ok_or(GenerationError::NoCredential)?;
        let request = GenerateContentRequest::new(
            vec![Content::user(prompt::short_notes_prompt(topic, subtopics))],
            GenerationConfig::structured(1500),
        );

        let text = client.generate(request).await?;
        extract_json(&text)
            .ok_or_else(|| GenerationError::Parse("no notes JSON in response".to_string()))
    }

    /// Score a student's own explanation of a topic
    pub async fn evaluate_mastery(
        &self,
        explanation: &str,
        topic: &str,
        tutor: &Tutor,
    ) -> Generated<MasteryEvaluation> {
        let client = match self.client.as_ref() {
            Some(client) => client,
            None => {
                return Generated {
                    value: fallback::mastery_offline(),
                    origin: ResponseOrigin::Fallback(GenerationError::NoCredential.cause()),
                }
            }
        };

        let request = GenerateContentRequest::new(
            vec![Content::user(prompt::mastery_prompt(explanation, topic, tutor))],
            GenerationConfig::evaluation(),
        );

        match client.generate(request).await {
            Ok(text) => match extract_json::<MasteryEvaluation>(&text) {
                Some(evaluation) => Generated { value: evaluation, origin: ResponseOrigin::Remote },
                None => {
                    warn!(topic, "mastery response was not parseable, using fallback score");
                    Generated {
                        value: fallback::mastery_unscored(),
                        origin: ResponseOrigin::Fallback(
                            GenerationError::Parse(String::new()).cause(),
                        ),
                    }
                }
            },
            Err(err) => {
                warn!(topic, %err, "mastery evaluation failed, using fallback score");
                Generated {
                    value: fallback::mastery_unscored(),
                    origin: ResponseOrigin::Fallback(err.cause()),
                }
            }
        }
    }
}

/// Extract the first `{...}` span of a text blob and parse it
///
/// The endpoint is prompted for bare JSON but often wraps it in prose or
/// markdown fences.
pub fn extract_json<T: DeserializeOwned>(text: &str) -> Option<T> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::catalog::tutor_by_id;
    use crate::gemini::error::FallbackCause;
    use crate::mindmap::NodeKind;

    fn offline() -> GenerationGateway {
        GenerationGateway::offline()
    }

    #[tokio::test]
    async fn no_credential_chat_uses_fallback_without_network() {
        let gateway = offline();
        let reply = gateway
            .generate_chat_response(
                "what is projectile motion",
                tutor_by_id("einstein").unwrap(),
                &UserPreferences::default(),
                &[],
            )
            .await;

        assert_eq!(reply.origin, ResponseOrigin::Fallback(FallbackCause::NoCredential));
        assert!(reply.value.contains("Projectile Motion"));
    }

    #[tokio::test]
    async fn no_credential_unknown_message_gets_guidance() {
        let gateway = offline();
        let reply = gateway
            .generate_chat_response(
                "how do plants sleep",
                tutor_by_id("darwin").unwrap(),
                &UserPreferences::default(),
                &[],
            )
            .await;

        assert!(!reply.origin.is_remote());
        assert!(reply.value.contains("offline mode"));
    }

    #[tokio::test]
    async fn offline_kinematics_mind_map_is_sixteen_nodes() {
        let gateway = offline();
        let map = gateway.generate_mind_map("Kinematics", &[]).await;

        assert_eq!(map.origin, ResponseOrigin::Fallback(FallbackCause::NoCredential));
        assert_eq!(map.value.nodes[0].label, "Kinematics");
        assert_eq!(map.value.nodes[0].kind, NodeKind::Central);
        // 1 center + 5 branches × 3 subs
        assert_eq!(map.value.nodes.len(), 16);
        assert_eq!(map.value.edges.len(), 15);
    }

    #[tokio::test]
    async fn offline_mastery_is_encouraging() {
        let gateway = offline();
        let review = gateway
            .evaluate_mastery("velocity is speed with direction", "Kinematics", tutor_by_id("kalam").unwrap())
            .await;

        assert_eq!(review.value.score, 75);
        assert_eq!(review.origin, ResponseOrigin::Fallback(FallbackCause::NoCredential));
    }

    #[test]
    fn extract_json_tolerates_markdown_fences() {
        let wrapped = "Here you go:\n```json\n{\"score\": 90, \"feedback\": \"great\"}\n```";
        let parsed: MasteryEvaluation = extract_json(wrapped).unwrap();
        assert_eq!(parsed.score, 90);
    }

    #[test]
    fn extract_json_rejects_braceless_text() {
        assert!(extract_json::<MasteryEvaluation>("no json here").is_none());
    }

    #[test]
    fn remote_mind_map_document_lays_out() {
        // What a well-behaved remote response parses into
        let json = r#"{
            "nodes": [
                {"id": "1", "label": "Kinematics", "type": "central"},
                {"id": "2", "label": "A", "type": "primary"},
                {"id": "3", "label": "B", "type": "primary"},
                {"id": "4", "label": "C", "type": "primary"},
                {"id": "2a", "label": "a1", "type": "secondary"},
                {"id": "2b", "label": "a2", "type": "secondary"},
                {"id": "3a", "label": "b1", "type": "secondary"},
                {"id": "4a", "label": "c1", "type": "secondary"}
            ],
            "edges": [
                {"id": "e1-2", "source": "1", "target": "2"},
                {"id": "e1-3", "source": "1", "target": "3"},
                {"id": "e1-4", "source": "1", "target": "4"},
                {"id": "e2-2a", "source": "2", "target": "2a"},
                {"id": "e2-2b", "source": "2", "target": "2b"},
                {"id": "e3-3a", "source": "3", "target": "3a"},
                {"id": "e4-4a", "source": "4", "target": "4a"}
            ]
        }"#;
        let raw: RawMindMap = extract_json(json).unwrap();
        assert_eq!(raw.nodes.len(), MIN_MIND_MAP_NODES);

        let map = layout_document(&raw, "Kinematics");
        assert_eq!(map.nodes.len(), 8);
        assert!(map.edges.iter().filter(|e| e.from_center).count() == 3);
    }
}
