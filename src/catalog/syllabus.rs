//! Exam levels, subjects and the chapter syllabus
//!
//! The syllabus is the static source of every chapter the onboarding flow
//! can select. Chapter entries carry their subtopic list so mind-map and
//! notes generation can seed branches without another lookup.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Exam level the student is preparing for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ExamLevel {
    Class11,
    Class12,
    JeeMain,
    JeeAdvanced,
    Neet,
}

impl ExamLevel {
    /// All selectable levels
    pub fn all() -> &'static [ExamLevel] {
        &[Self::Class11, Self::Class12, Self::JeeMain, Self::JeeAdvanced, Self::Neet]
    }

    /// The kebab-case identifier used on the wire and the command line
    pub fn id(&self) -> &'static str {
        match self {
            Self::Class11 => "class-11",
            Self::Class12 => "class-12",
            Self::JeeMain => "jee-main",
            Self::JeeAdvanced => "jee-advanced",
            Self::Neet => "neet",
        }
    }

    /// Parse a level from its identifier
    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|level| level.id() == s.to_lowercase())
    }
}

impl std::str::FromStr for ExamLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            format!("Unknown level: {s}. Options: class-11, class-12, jee-main, jee-advanced, neet")
        })
    }
}

/// Subject area
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Physics,
    Chemistry,
    Mathematics,
    Biology,
}

impl Subject {
    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Physics => "Physics",
            Self::Chemistry => "Chemistry",
            Self::Mathematics => "Mathematics",
            Self::Biology => "Biology",
        }
    }

    /// All subjects
    pub fn all() -> &'static [Subject] {
        &[Self::Physics, Self::Chemistry, Self::Mathematics, Self::Biology]
    }

    /// Parse a subject from its lowercase identifier
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "physics" => Some(Self::Physics),
            "chemistry" => Some(Self::Chemistry),
            "mathematics" | "maths" => Some(Self::Mathematics),
            "biology" => Some(Self::Biology),
            _ => None,
        }
    }
}

impl std::str::FromStr for Subject {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            format!("Unknown subject: {s}. Options: physics, chemistry, mathematics, biology")
        })
    }
}

/// A syllabus chapter with its subtopics
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chapter {
    /// Chapter name (the persistence key for chat history and progress)
    pub chapter_name: String,
    /// Subtopics in teaching order
    pub subtopics: Vec<String>,
}

impl Chapter {
    /// Create a chapter from string-ish parts
    pub fn new(name: impl Into<String>, subtopics: &[&str]) -> Self {
        Self {
            chapter_name: name.into(),
            subtopics: subtopics.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Chapter syllabus per subject
static SYLLABUS: Lazy<HashMap<Subject, Vec<Chapter>>> = Lazy::new(|| {
    let mut map = HashMap::new();

    map.insert(
        Subject::Physics,
        vec![
            Chapter::new(
                "Kinematics",
                &["Motion Types", "Equations of Motion", "Graphs", "Projectile", "Relative Motion"],
            ),
            Chapter::new(
                "Laws of Motion",
                &["Newton's Laws", "Friction", "Circular Motion", "Free Body Diagrams"],
            ),
            Chapter::new(
                "Work, Energy and Power",
                &["Work", "Kinetic Energy", "Potential Energy", "Conservation", "Power"],
            ),
            Chapter::new(
                "Rotational Motion",
                &["Angular Quantities", "Moment of Inertia", "Torque", "Angular Momentum", "Rolling"],
            ),
        ],
    );

    map.insert(
        Subject::Chemistry,
        vec![
            Chapter::new(
                "Some Basic Concepts",
                &["Matter", "Mole Concept", "Stoichiometry", "Atomic Mass"],
            ),
            Chapter::new(
                "Atomic Structure",
                &["Subatomic Particles", "Bohr's Model", "Quantum Numbers", "Electronic Config"],
            ),
            Chapter::new(
                "Chemical Bonding",
                &["Ionic Bonds", "Covalent Bonds", "VSEPR Theory", "Hybridization"],
            ),
            Chapter::new(
                "Thermodynamics",
                &["First Law", "Enthalpy", "Entropy", "Gibbs Energy"],
            ),
            Chapter::new(
                "Equilibrium",
                &["Dynamic Equilibrium", "Le Chatelier", "Equilibrium Constant", "Ionic Equilibrium"],
            ),
        ],
    );

    map.insert(
        Subject::Mathematics,
        vec![
            Chapter::new(
                "Sets and Functions",
                &["Set Operations", "Types of Sets", "Functions", "Inverse Functions"],
            ),
            Chapter::new(
                "Trigonometry",
                &["Ratios", "Identities", "Standard Angles", "General Solutions"],
            ),
            Chapter::new(
                "Algebra",
                &["Complex Numbers", "Quadratic Equations", "Sequences", "Binomial Theorem"],
            ),
            Chapter::new(
                "Calculus Introduction",
                &["Limits", "Derivatives", "Continuity", "Integration"],
            ),
            Chapter::new(
                "Coordinate Geometry",
                &["Straight Lines", "Circles", "Parabola", "Ellipse", "Hyperbola"],
            ),
        ],
    );

    map.insert(
        Subject::Biology,
        vec![
            Chapter::new(
                "Cell Biology",
                &["Cell Theory", "Cell Types", "Organelles", "Cell Division"],
            ),
            Chapter::new(
                "Plant Physiology",
                &["Photosynthesis", "Transport", "Transpiration", "Plant Hormones"],
            ),
            Chapter::new(
                "Genetics",
                &["Mendel's Laws", "DNA Structure", "Central Dogma", "Mutations"],
            ),
            Chapter::new(
                "Human Physiology",
                &["Digestion", "Circulation", "Respiration", "Nervous System"],
            ),
            Chapter::new(
                "Ecology",
                &["Ecosystem", "Food Chain", "Energy Flow", "Biodiversity"],
            ),
        ],
    );

    map
});

/// Chapters available for a level/subject combination
///
/// Mathematics is not part of the NEET syllabus; every other combination
/// gets the subject's full chapter list.
pub fn chapters_for(level: ExamLevel, subject: Subject) -> &'static [Chapter] {
    if level == ExamLevel::Neet && subject == Subject::Mathematics {
        return &[];
    }
    SYLLABUS.get(&subject).map(|v| v.as_slice()).unwrap_or(&[])
}
