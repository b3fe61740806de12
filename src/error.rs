//! Error types for round setup and data loading.
//!
//! Nothing inside the simulation tick returns an error; strikes and failed
//! rounds are phase transitions, not `Err`s.

use std::fmt;

/// What is wrong with a question record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionProblem {
    /// Fewer options than a round can play
    TooFewOptions(usize),
    /// More options than there are lanes
    TooManyOptions(usize),
    /// `correct` does not index into `options`
    CorrectIndexOutOfRange { correct: usize, options: usize },
}

impl fmt::Display for QuestionProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionProblem::TooFewOptions(n) => write!(f, "only {n} option(s)"),
            QuestionProblem::TooManyOptions(n) => write!(f, "{n} options for 4 lanes"),
            QuestionProblem::CorrectIndexOutOfRange { correct, options } => {
                write!(f, "correct index {correct} with {options} options")
            }
        }
    }
}

/// Errors that can occur while building a round or loading its data.
#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    /// A round was requested with an empty question list.
    #[error("cannot start a round without questions")]
    NoQuestions,

    /// The question bank has nothing for this topic.
    #[error("no questions for topic '{0}'")]
    UnknownTopic(String),

    /// A question record cannot be played.
    #[error("question {index} is malformed: {problem}")]
    MalformedQuestion { index: usize, problem: QuestionProblem },

    /// Failed to read a data file from disk.
    #[error("failed to read data file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse JSON content.
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}
