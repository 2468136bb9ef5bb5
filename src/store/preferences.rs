//! Student preferences and partial-update merging

use serde::{Deserialize, Serialize};

use crate::catalog::{Chapter, ExamLevel, Subject};

/// How the student prefers material to be explained
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LearningStyle {
    #[default]
    Visual,
    Auditory,
    StepByStep,
    Conceptual,
}

/// Response language
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Hindi,
    Telugu,
}

/// The student's preferences
///
/// `chapters` keeps selection order; the first entry is the current
/// chapter. No two entries ever share a chapter name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserPreferences {
    /// Exam level, unset until onboarding completes
    pub level: Option<ExamLevel>,
    /// Subject focus, unset until onboarding completes
    pub subject: Option<Subject>,
    /// Selected chapters in selection order
    pub chapters: Vec<Chapter>,
    /// Preferred explanation style
    pub learning_style: LearningStyle,
    /// Free-text areas the student wants extra attention on
    pub weak_areas: String,
    /// Response language
    pub language: Language,
}

/// A partial preference update: present fields overwrite, absent fields keep
#[derive(Debug, Clone, Default)]
pub struct PreferenceUpdate {
    pub level: Option<ExamLevel>,
    pub subject: Option<Subject>,
    pub chapters: Option<Vec<Chapter>>,
    pub learning_style: Option<LearningStyle>,
    pub weak_areas: Option<String>,
    pub language: Option<Language>,
}

impl UserPreferences {
    /// Shallow last-write-wins merge of a partial update
    pub fn merge(&mut self, update: PreferenceUpdate) {
        if let Some(level) = update.level {
            self.level = Some(level);
        }
        if let Some(subject) = update.subject {
            self.subject = Some(subject);
        }
        if let Some(chapters) = update.chapters {
            self.chapters = dedupe_chapters(chapters);
        }
        if let Some(style) = update.learning_style {
            self.learning_style = style;
        }
        if let Some(weak_areas) = update.weak_areas {
            self.weak_areas = weak_areas;
        }
        if let Some(language) = update.language {
            self.language = language;
        }
    }

    /// Toggle a chapter selection; returns true if the chapter was added
    pub fn toggle_chapter(&mut self, chapter: &Chapter) -> bool {
        if self.chapters.iter().any(|c| c.chapter_name == chapter.chapter_name) {
            self.chapters.retain(|c| c.chapter_name != chapter.chapter_name);
            false
        } else {
            self.chapters.push(chapter.clone());
            true
        }
    }

    /// The chapter driving the current session, if any
    pub fn current_chapter(&self) -> Option<&Chapter> {
        self.chapters.first()
    }
}

/// Keep the first occurrence of each chapter name
fn dedupe_chapters(chapters: Vec<Chapter>) -> Vec<Chapter> {
    let mut seen = Vec::new();
    for chapter in chapters {
        if !seen.iter().any(|c: &Chapter| c.chapter_name == chapter.chapter_name) {
            seen.push(chapter);
        }
    }
    seen
}
