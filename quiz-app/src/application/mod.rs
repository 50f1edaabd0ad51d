mod generate_quiz;

pub use generate_quiz::{GenerateQuiz, PipelineMode};
