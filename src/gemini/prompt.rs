//! Prompt construction for tutor chat and structured generation

use crate::catalog::Tutor;
use crate::store::preferences::{Language, LearningStyle, UserPreferences};
use crate::store::{ChatMessage, MessageRole};

use super::models::Content;

/// How many trailing history turns are included; older turns are dropped
pub const HISTORY_WINDOW: usize = 6;

/// Persona instruction for a tutor id
///
/// Unknown ids fall back to a generic expert-teacher instruction built
/// from the display name.
fn persona_instruction(tutor: &Tutor) -> String {
    match tutor.id {
        "einstein" => "You are Albert Einstein, the legendary physicist. Speak with wisdom and \
            curiosity. Use thought experiments and analogies to explain concepts. Connect physics \
            to philosophy and the wonder of the universe. Be encouraging and emphasize that \
            understanding comes through questioning."
            .to_string(),
        "ramanujan" => "You are Srinivasa Ramanujan, the mathematical genius. Speak with reverence \
            for the beauty of mathematics. Focus on patterns, intuition, and elegant solutions. \
            Share your unique perspective of seeing mathematical relationships that others miss. \
            Be humble yet passionate."
            .to_string(),
        "kalam" => "You are APJ Abdul Kalam, the People's President and scientist. Speak with \
            warmth and inspiration. Connect learning to dreams and purpose. Emphasize practical \
            applications and the power of education to transform lives. Use motivational language \
            and real-world Indian examples."
            .to_string(),
        "curie" => "You are Marie Curie, the pioneering scientist. Speak with determination and \
            scientific rigor. Emphasize the importance of persistence in discovery. Break down \
            chemistry concepts methodically. Share insights about the experimental approach and \
            careful observation."
            .to_string(),
        "darwin" => "You are Charles Darwin, the naturalist. Speak thoughtfully and \
            observationally. Connect biological concepts to evolution and natural patterns. \
            Encourage observation and questioning of the natural world. Use examples from nature \
            to explain concepts."
            .to_string(),
        "feynman" => "You are Richard Feynman, the playful physicist. Speak with enthusiasm and \
            humor. Make complex concepts feel simple and fun. Challenge assumptions and encourage \
            hands-on understanding. Use everyday analogies and admit when things are hard."
            .to_string(),
        _ => format!("You are {}, an expert teacher.", tutor.name),
    }
}

fn level_guide(preferences: &UserPreferences) -> &'static str {
    use crate::catalog::ExamLevel;
    match preferences.level {
        Some(ExamLevel::Class11) => "Explain at NCERT Class 11 level. Build foundations carefully.",
        Some(ExamLevel::Class12) => {
            "Explain at NCERT Class 12 level. Connect to board exam patterns."
        }
        Some(ExamLevel::JeeMain) => {
            "Focus on JEE Main level. Include problem-solving strategies and shortcuts."
        }
        Some(ExamLevel::JeeAdvanced) => {
            "Challenge with JEE Advanced level concepts. Push deeper understanding."
        }
        Some(ExamLevel::Neet) => {
            "Focus on NEET relevance. Connect to biological and medical applications."
        }
        None => "Intermediate level",
    }
}

fn learning_style_guide(style: LearningStyle) -> &'static str {
    match style {
        LearningStyle::Visual => {
            "Use visual descriptions, diagram references, and spatial analogies. Describe \
             concepts as if painting a picture."
        }
        LearningStyle::Auditory => {
            "Explain as if having a conversation. Use rhythm and repetition. Create memorable \
             phrases."
        }
        LearningStyle::StepByStep => {
            "Break down every concept into clear, numbered steps. Be thorough and methodical."
        }
        LearningStyle::Conceptual => {
            "Start with the big picture. Connect to broader principles before diving into details."
        }
    }
}

fn language_directive(language: Language) -> &'static str {
    match language {
        Language::English => "English",
        Language::Hindi => "Hindi (Devanagari script)",
        Language::Telugu => "Telugu",
    }
}

/// Build the tutor system prompt from persona and preferences
pub fn system_prompt(tutor: &Tutor, preferences: &UserPreferences) -> String {
    let subject = preferences
        .subject
        .map(|s| s.display_name())
        .unwrap_or("General");
    let weak_areas = if preferences.weak_areas.is_empty() {
        String::new()
    } else {
        format!("\n- Areas needing attention: {}", preferences.weak_areas)
    };

    format!(
        "{persona}\n\n\
         Teaching Context:\n\
         - Student Level: {level}\n\
         - Learning Style: {style}\n\
         - Subject Focus: {subject}{weak_areas}\n\n\
         Guidelines:\n\
         1. Keep responses focused and educational but conversational\n\
         2. Use markdown for formatting (bold for key terms, lists for steps)\n\
         3. Include relevant examples from Indian context when helpful\n\
         4. Ask follow-up questions to check understanding\n\
         5. Praise effort and encourage curiosity\n\
         6. If asked to generate a mind map, structure your response as concepts that can be visualized\n\
         7. Respond in {language}",
        persona = persona_instruction(tutor),
        level = level_guide(preferences),
        style = learning_style_guide(preferences.learning_style),
        language = language_directive(preferences.language),
    )
}

/// Assemble the role-tagged turns for a chat request
///
/// System instruction as an opening user turn, a fixed model
/// acknowledgment, the last [`HISTORY_WINDOW`] history turns, then the
/// new user message.
pub fn chat_contents(
    message: &str,
    tutor: &Tutor,
    preferences: &UserPreferences,
    history: &[ChatMessage],
) -> Vec<Content> {
    let mut contents = vec![
        Content::user(system_prompt(tutor, preferences)),
        Content::model("I understand my role and will teach accordingly."),
    ];

    let start = history.len().saturating_sub(HISTORY_WINDOW);
    for entry in &history[start..] {
        contents.push(match entry.role {
            MessageRole::User => Content::user(entry.content.clone()),
            MessageRole::Tutor => Content::model(entry.content.clone()),
        });
    }

    contents.push(Content::user(message));
    contents
}

/// Prompt for a structured mind-map document
pub fn mind_map_prompt(topic: &str, subtopics: &[String]) -> String {
    let subtopic_line = if subtopics.is_empty() {
        String::new()
    } else {
        format!("Include these subtopics: {}\n", subtopics.join(", "))
    };

    format!(
        "Generate a DETAILED mind map structure for the educational topic \"{topic}\".\n\
         {subtopic_line}\
         Create a comprehensive mind map with:\n\
         - 1 central node (the main topic)\n\
         - 4-6 primary branches (main concepts)\n\
         - 2-3 secondary nodes for each primary branch (sub-concepts, formulas, examples)\n\n\
         Return ONLY a valid JSON object with this exact structure (no markdown, no explanation):\n\
         {{\n\
           \"nodes\": [\n\
             {{\"id\": \"1\", \"label\": \"Central Topic\", \"type\": \"central\", \"description\": \"Brief description\"}},\n\
             {{\"id\": \"2\", \"label\": \"Main Concept 1\", \"type\": \"primary\", \"description\": \"Key point about this concept\"}},\n\
             {{\"id\": \"2a\", \"label\": \"Formula/Example\", \"type\": \"secondary\", \"description\": \"Specific detail\"}}\n\
           ],\n\
           \"edges\": [\n\
             {{\"id\": \"e1-2\", \"source\": \"1\", \"target\": \"2\"}},\n\
             {{\"id\": \"e2-2a\", \"source\": \"2\", \"target\": \"2a\"}}\n\
           ]\n\
         }}\n\n\
         Make it educational with specific formulas, examples, and key points for JEE/NEET students."
    )
}

/// Prompt for structured short notes
pub fn short_notes_prompt(topic: &str, subtopics: &[String]) -> String {
    let subtopic_line = if subtopics.is_empty() {
        String::new()
    } else {
        format!("Include these subtopics: {}\n", subtopics.join(", "))
    };

    format!(
        "Generate comprehensive short notes for \"{topic}\" suitable for JEE/NEET students.\n\
         {subtopic_line}\
         Format as JSON:\n\
         {{\n\
           \"title\": \"{topic}\",\n\
           \"sections\": [\n\
             {{\n\
               \"heading\": \"Key Concept Name\",\n\
               \"points\": [\"Point 1\", \"Point 2\"],\n\
               \"formulas\": [\"formula1\", \"formula2\"],\n\
               \"tips\": \"Exam tip\"\n\
             }}\n\
           ]\n\
         }}"
    )
}

/// Prompt for evaluating a student's own explanation of a topic
pub fn mastery_prompt(explanation: &str, topic: &str, tutor: &Tutor) -> String {
    format!(
        "As {name}, evaluate this student's explanation of \"{topic}\":\n\n\
         \"{explanation}\"\n\n\
         Provide:\n\
         1. A score from 0-100\n\
         2. Specific feedback on what they got right\n\
         3. Areas for improvement\n\
         4. An encouraging closing\n\n\
         Return as JSON: {{\"score\": number, \"feedback\": \"string\"}}",
        name = tutor.name,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{tutor_by_id, ExamLevel, Subject, Tutor};

    fn unknown_tutor() -> Tutor {
        Tutor {
            id: "hypatia",
            name: "Hypatia",
            avatar: "📐",
            tagline: "",
            subject: Subject::Mathematics,
        }
    }

    #[test]
    fn known_persona_speaks_in_character() {
        let prompt = system_prompt(tutor_by_id("feynman").unwrap(), &UserPreferences::default());
        assert!(prompt.contains("Richard Feynman"));
        assert!(prompt.contains("enthusiasm and humor"));
    }

    #[test]
    fn unknown_persona_gets_generic_instruction() {
        let prompt = system_prompt(&unknown_tutor(), &UserPreferences::default());
        assert!(prompt.starts_with("You are Hypatia, an expert teacher."));
    }

    #[test]
    fn preferences_shape_the_context() {
        let preferences = UserPreferences {
            level: Some(ExamLevel::JeeAdvanced),
            subject: Some(Subject::Physics),
            weak_areas: "rotational motion".into(),
            language: Language::Hindi,
            ..Default::default()
        };
        let prompt = system_prompt(tutor_by_id("einstein").unwrap(), &preferences);

        assert!(prompt.contains("JEE Advanced"));
        assert!(prompt.contains("Subject Focus: Physics"));
        assert!(prompt.contains("Areas needing attention: rotational motion"));
        assert!(prompt.contains("Respond in Hindi (Devanagari script)"));
    }

    #[test]
    fn history_window_drops_older_turns() {
        let history: Vec<ChatMessage> = (0..10)
            .map(|i| {
                if i % 2 == 0 {
                    ChatMessage::user(format!("q{i}"))
                } else {
                    ChatMessage::tutor(format!("a{i}"))
                }
            })
            .collect();

        let contents = chat_contents(
            "latest",
            tutor_by_id("curie").unwrap(),
            &UserPreferences::default(),
            &history,
        );

        // system + ack + 6 history + new message
        assert_eq!(contents.len(), 2 + HISTORY_WINDOW + 1);
        assert_eq!(contents[2].parts[0].text, "q4");
        assert_eq!(contents.last().unwrap().parts[0].text, "latest");
    }

    #[test]
    fn short_history_is_kept_whole() {
        let history = vec![ChatMessage::user("only")];
        let contents = chat_contents(
            "next",
            tutor_by_id("curie").unwrap(),
            &UserPreferences::default(),
            &history,
        );
        assert_eq!(contents.len(), 4);
    }

    #[test]
    fn mind_map_prompt_lists_subtopics() {
        let subs = vec!["Graphs".to_string(), "Projectile".to_string()];
        let prompt = mind_map_prompt("Kinematics", &subs);
        assert!(prompt.contains("Include these subtopics: Graphs, Projectile"));
        assert!(prompt.contains("ONLY a valid JSON object"));
    }
}
