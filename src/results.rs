//! Per-session record of finished rounds
//!
//! Kept in memory for the play session; passing a planet's quiz earns that
//! planet's trophy.

use serde::{Deserialize, Serialize};

use crate::sim::round::RoundOutcome;

/// Trophy awarded for passing a planet's quiz
pub fn trophy_for(planet: &str) -> &'static str {
    match planet {
        "Mercury" => "winged_helmet",
        "Venus" => "heart_gem",
        "Earth" => "blue_marble",
        "Mars" => "red_crystal",
        "Jupiter" => "lightning_bolt",
        "Saturn" => "golden_ring",
        "Uranus" => "ice_diamond",
        "Neptune" => "trident",
        "Sun" => "solar_crown",
        _ => "star_medal",
    }
}

/// One finished round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub topic: String,
    pub passed: bool,
    pub score: u32,
    pub total: u32,
    pub strikes: u32,
}

impl RoundRecord {
    pub fn from_outcome(topic: impl Into<String>, outcome: RoundOutcome) -> Self {
        Self {
            topic: topic.into(),
            passed: outcome.passed,
            score: outcome.score,
            total: outcome.total,
            strikes: outcome.strikes,
        }
    }

    /// Is this a better result than `other`? Passing beats failing, then score, then fewer strikes.
    fn beats(&self, other: &RoundRecord) -> bool {
        (self.passed, self.score, std::cmp::Reverse(self.strikes))
            > (other.passed, other.score, std::cmp::Reverse(other.strikes))
    }
}

/// Everything played this session, in order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionResults {
    pub records: Vec<RoundRecord>,
}

impl SessionResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a finished round. Returns true if it is the new best for its topic.
    pub fn record(&mut self, record: RoundRecord) -> bool {
        let is_best = self.best_for(&record.topic).is_none_or(|best| record.beats(best));
        log::info!(
            "Recorded {} round: {}/{} ({})",
            record.topic,
            record.score,
            record.total,
            if record.passed { "passed" } else { "failed" }
        );
        self.records.push(record);
        is_best
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Best result for a topic (earliest wins ties)
    pub fn best_for(&self, topic: &str) -> Option<&RoundRecord> {
        self.records
            .iter()
            .filter(|r| r.topic == topic)
            .fold(None, |best: Option<&RoundRecord>, r| match best {
                Some(b) if !r.beats(b) => Some(b),
                _ => Some(r),
            })
    }

    pub fn is_passed(&self, topic: &str) -> bool {
        self.records.iter().any(|r| r.topic == topic && r.passed)
    }

    /// Share of `planets` passed at least once, 0-100
    pub fn completion_percentage(&self, planets: &[&str]) -> u32 {
        if planets.is_empty() {
            return 0;
        }
        let passed = planets.iter().filter(|p| self.is_passed(p)).count();
        (passed * 100 / planets.len()) as u32
    }

    /// Trophies earned, one per passed topic, in the order first passed
    pub fn trophies(&self) -> Vec<(&str, &'static str)> {
        let mut earned: Vec<(&str, &'static str)> = Vec::new();
        for record in self.records.iter().filter(|r| r.passed) {
            if !earned.iter().any(|(topic, _)| *topic == record.topic) {
                earned.push((record.topic.as_str(), trophy_for(&record.topic)));
            }
        }
        earned
    }
}
