//! Data model: tests, sections and questions as loaded from a catalog.

mod question;
mod test;

pub use question::{Difficulty, Question, Subject, NUM_OPTIONS};
pub use test::{Section, Test};
