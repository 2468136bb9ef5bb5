//! Tutor persona catalog
//!
//! Each tutor is a fixed chat "voice" modelled on a historical figure.
//! The id selects the persona instruction used to template prompts; the
//! rest is display metadata.

use serde::Serialize;

use super::syllabus::Subject;

/// A tutor persona catalog entry
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Tutor {
    /// Stable identifier (e.g. "einstein")
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Avatar glyph shown next to the tutor
    pub avatar: &'static str,
    /// One-line tagline
    pub tagline: &'static str,
    /// Subject this tutor is strongest in
    pub subject: Subject,
}

/// The full tutor catalog
pub const TUTORS: &[Tutor] = &[
    Tutor {
        id: "einstein",
        name: "Albert Einstein",
        avatar: "⚛️",
        tagline: "Imagination is more important than knowledge",
        subject: Subject::Physics,
    },
    Tutor {
        id: "ramanujan",
        name: "Srinivasa Ramanujan",
        avatar: "∞",
        tagline: "Every positive integer is one of my personal friends",
        subject: Subject::Mathematics,
    },
    Tutor {
        id: "kalam",
        name: "APJ Abdul Kalam",
        avatar: "🚀",
        tagline: "Dream is not that which you see while sleeping",
        subject: Subject::Physics,
    },
    Tutor {
        id: "curie",
        name: "Marie Curie",
        avatar: "⚗️",
        tagline: "Nothing in life is to be feared, it is only to be understood",
        subject: Subject::Chemistry,
    },
    Tutor {
        id: "darwin",
        name: "Charles Darwin",
        avatar: "🌿",
        tagline: "It is the one most adaptable to change that survives",
        subject: Subject::Biology,
    },
    Tutor {
        id: "feynman",
        name: "Richard Feynman",
        avatar: "🥁",
        tagline: "What I cannot create, I do not understand",
        subject: Subject::Physics,
    },
];

/// Look up a tutor by id
pub fn tutor_by_id(id: &str) -> Option<&'static Tutor> {
    TUTORS.iter().find(|t| t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_six_personas() {
        assert_eq!(TUTORS.len(), 6);
    }

    #[test]
    fn lookup_by_id() {
        let tutor = tutor_by_id("curie").unwrap();
        assert_eq!(tutor.name, "Marie Curie");
        assert_eq!(tutor.subject, Subject::Chemistry);
    }

    #[test]
    fn unknown_id_is_none() {
        assert!(tutor_by_id("hawking").is_none());
    }

    #[test]
    fn ids_are_unique() {
        for (i, a) in TUTORS.iter().enumerate() {
            for b in &TUTORS[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }
}
