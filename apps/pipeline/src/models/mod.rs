pub mod matching;
pub mod record;
pub mod submission;
