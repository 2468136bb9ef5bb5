//! Hand-authored fallback content
//!
//! Served whenever the hosted endpoint is unconfigured, unreachable, or
//! returns an unusable result. Chat fallbacks are matched by substring
//! against the student's message; notes and mastery fallbacks mirror the
//! structured shapes the remote path would produce.

use super::models::{MasteryEvaluation, NoteSection, ShortNotes};

const NEWTONS_LAWS: &str = "**Newton's Laws of Motion** are the foundation of classical mechanics!\n\n\
**First Law (Inertia):** An object at rest stays at rest, and an object in motion stays in motion, \
unless acted upon by an external force.\n\n\
**Second Law:** F = ma - Force equals mass times acceleration.\n\n\
**Third Law:** For every action, there is an equal and opposite reaction.\n\n\
These laws explain everything from why you need a seatbelt to how rockets work! \
Would you like me to explain any of these in more detail?";

const KINEMATIC_EQUATIONS: &str = "**The Kinematic Equations** are powerful tools for solving motion problems!\n\n\
1. **v = u + at** (no displacement needed)\n\
2. **s = ut + ½at²** (no final velocity needed)\n\
3. **v² = u² + 2as** (no time needed)\n\n\
Where:\n\
- u = initial velocity\n\
- v = final velocity\n\
- a = acceleration\n\
- t = time\n\
- s = displacement\n\n\
**Pro tip:** Choose the equation that contains the unknown you're solving for! \
Would you like to try a practice problem?";

const PROJECTILE_MOTION: &str = "**Projectile Motion** - One of my favorite topics!\n\n\
The key insight: Horizontal and vertical motions are **independent**!\n\n\
📐 **Key Formulas:**\n\
- Time of flight: T = 2u sin θ / g\n\
- Maximum height: H = u² sin² θ / 2g\n\
- Range: R = u² sin 2θ / g\n\n\
🎯 **Maximum range** occurs at **45°**!\n\n\
The trajectory is always a **parabola**. Do you want to work through an example problem?";

/// Canned reply for a student message, matched by substring
pub fn chat_fallback(message: &str) -> String {
    let lower = message.to_lowercase();

    if lower.contains("newton") || lower.contains("law of motion") {
        return NEWTONS_LAWS.to_string();
    }
    if lower.contains("kinematic") || lower.contains("equation of motion") {
        return KINEMATIC_EQUATIONS.to_string();
    }
    if lower.contains("projectile") {
        return PROJECTILE_MOTION.to_string();
    }

    format!(
        "I understand you're asking about: **\"{message}\"**\n\n\
         I'm currently running in offline mode (Gemini API not configured), but I can still help \
         with many topics!\n\n\
         **Try asking about:**\n\
         - Newton's Laws of Motion\n\
         - Kinematic Equations\n\
         - Projectile Motion\n\
         - Work and Energy\n\
         - Thermodynamics basics\n\
         - Chemical Bonding\n\
         - Cell Biology\n\
         - And many more!\n\n\
         **To enable full AI responses:**\n\
         1. Get a free Gemini API key from: https://aistudio.google.com/app/apikey\n\
         2. Export it as `GEMINI_API_KEY` (or add it to your config file)\n\
         3. Restart mindforge\n\n\
         What specific topic would you like to explore? 🧠"
    )
}

/// Static short notes for the topics we have hand-authored content for
pub fn notes_fallback(topic: &str, subtopics: &[String]) -> ShortNotes {
    match topic {
        "Kinematics" => ShortNotes {
            title: "Kinematics - Study of Motion".to_string(),
            sections: vec![
                NoteSection {
                    heading: "Basic Concepts".to_string(),
                    points: vec![
                        "Distance is scalar, Displacement is vector".to_string(),
                        "Speed is rate of distance, Velocity is rate of displacement".to_string(),
                        "Acceleration is rate of change of velocity".to_string(),
                    ],
                    formulas: vec!["v = dx/dt".to_string(), "a = dv/dt".to_string()],
                    tips: "Always identify the reference frame first!".to_string(),
                },
                NoteSection {
                    heading: "Equations of Motion".to_string(),
                    points: vec![
                        "Use when acceleration is constant".to_string(),
                        "Each equation omits one variable".to_string(),
                        "Choose equation based on given data".to_string(),
                    ],
                    formulas: vec![
                        "v = u + at".to_string(),
                        "s = ut + ½at²".to_string(),
                        "v² = u² + 2as".to_string(),
                    ],
                    tips: "List knowns and unknowns before choosing equation".to_string(),
                },
                NoteSection {
                    heading: "Projectile Motion".to_string(),
                    points: vec![
                        "Horizontal and vertical motions are independent".to_string(),
                        "Horizontal velocity remains constant".to_string(),
                        "Maximum range at 45°".to_string(),
                    ],
                    formulas: vec![
                        "R = u²sin2θ/g".to_string(),
                        "H = u²sin²θ/2g".to_string(),
                        "T = 2usinθ/g".to_string(),
                    ],
                    tips: "Decompose initial velocity into components first".to_string(),
                },
            ],
        },
        "Laws of Motion" => ShortNotes {
            title: "Newton's Laws of Motion".to_string(),
            sections: vec![
                NoteSection {
                    heading: "Newton's First Law".to_string(),
                    points: vec![
                        "Law of Inertia".to_string(),
                        "Objects resist change in motion".to_string(),
                        "Mass measures inertia".to_string(),
                    ],
                    formulas: vec!["If F_net = 0, then a = 0".to_string()],
                    tips: "An object at rest OR in uniform motion stays that way".to_string(),
                },
                NoteSection {
                    heading: "Newton's Second Law".to_string(),
                    points: vec![
                        "Force causes acceleration".to_string(),
                        "Acceleration is proportional to net force".to_string(),
                        "Acceleration is inversely proportional to mass".to_string(),
                    ],
                    formulas: vec!["F = ma".to_string(), "F = dp/dt".to_string()],
                    tips: "Always draw a Free Body Diagram first!".to_string(),
                },
                NoteSection {
                    heading: "Friction".to_string(),
                    points: vec![
                        "Static friction prevents sliding (variable)".to_string(),
                        "Kinetic friction opposes sliding (constant)".to_string(),
                        "μ_s > μ_k always".to_string(),
                    ],
                    formulas: vec!["f_s ≤ μ_s N".to_string(), "f_k = μ_k N".to_string()],
                    tips: "Friction is parallel to surface, opposes relative motion".to_string(),
                },
            ],
        },
        _ => ShortNotes {
            title: topic.to_string(),
            sections: subtopics
                .iter()
                .map(|sub| NoteSection {
                    heading: sub.clone(),
                    points: vec![
                        "Key concept 1".to_string(),
                        "Key concept 2".to_string(),
                        "Key concept 3".to_string(),
                    ],
                    formulas: vec!["Formula 1".to_string(), "Formula 2".to_string()],
                    tips: "Focus on understanding, not just memorizing".to_string(),
                })
                .collect(),
        },
    }
}

/// Mastery feedback when no credential is configured
pub fn mastery_offline() -> MasteryEvaluation {
    MasteryEvaluation {
        score: 75,
        feedback: "Good effort! Your explanation shows understanding. Keep practicing to \
                   strengthen your grasp of the concepts."
            .to_string(),
    }
}

/// Mastery feedback when the remote result could not be used
pub fn mastery_unscored() -> MasteryEvaluation {
    MasteryEvaluation {
        score: 70,
        feedback: "Your explanation shows good understanding! Continue building on these concepts."
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newton_keyword_matches() {
        let reply = chat_fallback("Explain Newton's second law please");
        assert!(reply.contains("F = ma"));
    }

    #[test]
    fn projectile_keyword_matches_case_insensitively() {
        let reply = chat_fallback("What is PROJECTILE motion?");
        assert!(reply.contains("Horizontal and vertical motions are **independent**"));
    }

    #[test]
    fn unrecognized_message_gets_guidance() {
        let reply = chat_fallback("tell me about quantum entanglement");
        assert!(reply.contains("offline mode"));
        assert!(reply.contains("quantum entanglement"));
    }

    #[test]
    fn kinematics_notes_are_hand_authored() {
        let notes = notes_fallback("Kinematics", &[]);
        assert_eq!(notes.title, "Kinematics - Study of Motion");
        assert_eq!(notes.sections.len(), 3);
    }

    #[test]
    fn unknown_topic_notes_derive_from_subtopics() {
        let subs = vec!["Optics".to_string(), "Lenses".to_string()];
        let notes = notes_fallback("Ray Optics", &subs);
        assert_eq!(notes.title, "Ray Optics");
        assert_eq!(notes.sections.len(), 2);
        assert_eq!(notes.sections[0].heading, "Optics");
    }
}
