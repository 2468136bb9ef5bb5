//! Static catalogs: tutor personas and the exam syllabus
//!
//! Everything in this module is immutable reference data. Tutors are
//! selected, never created; syllabus chapters are referenced by the
//! preference store but never mutated.

pub mod syllabus;
pub mod tutors;

pub use syllabus::{chapters_for, Chapter, ExamLevel, Subject};
pub use tutors::{tutor_by_id, Tutor, TUTORS};
