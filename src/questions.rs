//! Question bank loading and per-round selection
//!
//! The bank file maps a topic (planet) to its question records:
//!
//! ```json
//! { "questions": { "Mars": [ { "question": "...", "options": ["..."], "correct": 0 } ] } }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_OPTIONS, MIN_OPTIONS};
use crate::error::{QuestionProblem, QuizError};

/// A single multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question")]
    pub prompt: String,
    pub options: Vec<String>,
    /// Index into `options` of the right answer
    #[serde(default)]
    pub correct: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Question {
    pub fn new(prompt: impl Into<String>, options: &[&str], correct: usize) -> Self {
        Self {
            prompt: prompt.into(),
            options: options.iter().map(|s| s.to_string()).collect(),
            correct,
            explanation: None,
        }
    }

    /// Check the record can be played: 2-4 options and a valid correct index
    pub fn validate(&self) -> Result<(), QuestionProblem> {
        let n = self.options.len();
        if n < MIN_OPTIONS {
            return Err(QuestionProblem::TooFewOptions(n));
        }
        if n > MAX_OPTIONS {
            return Err(QuestionProblem::TooManyOptions(n));
        }
        if self.correct >= n {
            return Err(QuestionProblem::CorrectIndexOutOfRange {
                correct: self.correct,
                options: n,
            });
        }
        Ok(())
    }

    pub fn correct_text(&self) -> Option<&str> {
        self.options.get(self.correct).map(String::as_str)
    }
}

/// Validate a round's question list. Empty or malformed lists are refused.
pub fn validate_round(questions: &[Question]) -> Result<(), QuizError> {
    if questions.is_empty() {
        return Err(QuizError::NoQuestions);
    }
    for (index, question) in questions.iter().enumerate() {
        if let Err(problem) = question.validate() {
            log::warn!("Rejecting question {index} '{}': {problem}", question.prompt);
            return Err(QuizError::MalformedQuestion { index, problem });
        }
    }
    Ok(())
}

/// All questions, grouped by topic
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionBank {
    pub questions: BTreeMap<String, Vec<Question>>,
}

impl QuestionBank {
    pub fn from_json_str(json: &str) -> Result<Self, QuizError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a bank from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, QuizError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let bank = Self::from_json_str(&text)?;
        log::info!(
            "Loaded questions for {} topics from {}",
            bank.questions.len(),
            path.as_ref().display()
        );
        Ok(bank)
    }

    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.questions.keys().map(String::as_str)
    }

    pub fn has_topic(&self, topic: &str) -> bool {
        self.questions.get(topic).is_some_and(|q| !q.is_empty())
    }

    pub fn question_count(&self, topic: &str) -> usize {
        self.questions.get(topic).map_or(0, Vec::len)
    }

    /// Draw up to `count` questions for `topic` in random order
    pub fn select<R: Rng + ?Sized>(
        &self,
        topic: &str,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<Question>, QuizError> {
        let pool = self
            .questions
            .get(topic)
            .filter(|q| !q.is_empty())
            .ok_or_else(|| QuizError::UnknownTopic(topic.to_string()))?;

        let mut selected: Vec<Question> = pool.choose_multiple(rng, count.min(pool.len())).cloned().collect();
        selected.shuffle(rng);
        log::info!("Selected {} of {} questions for {topic}", selected.len(), pool.len());
        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const BANK: &str = r#"{
        "questions": {
            "Mars": [
                {"question": "Colour of Mars?", "options": ["Red", "Blue", "Green", "White"], "correct": 0},
                {"question": "Moons of Mars?", "options": ["0", "1", "2", "3"], "correct": 2,
                 "explanation": "Phobos and Deimos"},
                {"question": "Largest volcano?", "options": ["Olympus Mons", "Etna"], "correct": 0}
            ],
            "Venus": []
        }
    }"#;

    #[test]
    fn test_parse_bank() {
        let bank = QuestionBank::from_json_str(BANK).unwrap();
        assert_eq!(bank.question_count("Mars"), 3);
        assert!(bank.has_topic("Mars"));
        assert!(!bank.has_topic("Venus"));
        let moons = &bank.questions["Mars"][1];
        assert_eq!(moons.correct_text(), Some("2"));
        assert_eq!(moons.explanation.as_deref(), Some("Phobos and Deimos"));
    }

    #[test]
    fn test_select_caps_and_keeps_unique() {
        let bank = QuestionBank::from_json_str(BANK).unwrap();
        let mut rng = Pcg32::seed_from_u64(5);
        let picked = bank.select("Mars", 10, &mut rng).unwrap();
        assert_eq!(picked.len(), 3);
        for q in &bank.questions["Mars"] {
            assert_eq!(picked.iter().filter(|p| *p == q).count(), 1);
        }
        assert_eq!(bank.select("Mars", 2, &mut rng).unwrap().len(), 2);
    }

    #[test]
    fn test_select_unknown_or_empty_topic() {
        let bank = QuestionBank::from_json_str(BANK).unwrap();
        let mut rng = Pcg32::seed_from_u64(5);
        assert!(matches!(bank.select("Pluto", 5, &mut rng), Err(QuizError::UnknownTopic(_))));
        assert!(matches!(bank.select("Venus", 5, &mut rng), Err(QuizError::UnknownTopic(_))));
    }

    #[test]
    fn test_validation_policy() {
        assert!(Question::new("ok", &["a", "b"], 1).validate().is_ok());
        assert_eq!(
            Question::new("one", &["a"], 0).validate(),
            Err(QuestionProblem::TooFewOptions(1))
        );
        assert_eq!(
            Question::new("five", &["a", "b", "c", "d", "e"], 0).validate(),
            Err(QuestionProblem::TooManyOptions(5))
        );
        assert_eq!(
            Question::new("idx", &["a", "b", "c"], 3).validate(),
            Err(QuestionProblem::CorrectIndexOutOfRange { correct: 3, options: 3 })
        );
    }

    #[test]
    fn test_validate_round() {
        assert!(matches!(validate_round(&[]), Err(QuizError::NoQuestions)));
        let list = vec![Question::new("ok", &["a", "b"], 0), Question::new("bad", &["a"], 0)];
        assert!(matches!(
            validate_round(&list),
            Err(QuizError::MalformedQuestion { index: 1, .. })
        ));
    }
}
