//! Quiz round state machine
//!
//! Owns the ship, every answer marker of the round, the warp tunnel backdrop
//! and the phase flow (intro, questions, transitions, finish). Each tick runs
//! in a fixed order: ship motion and shots, markers, collisions, then the
//! per-question pass check.

use std::fmt;
use std::ops::Range;

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;

use super::burst::BurstCounts;
use super::input::ControlState;
use super::lane::Lane;
use super::marker::{AnswerMarker, HitOutcome};
use super::projectile::ProjectileSet;
use super::ship::CardinalShip;
use super::tunnel::WarpTunnel;
use crate::error::QuizError;
use crate::questions::{Question, validate_round};
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// Planet banner, ship already flying
    Intro,
    /// The current question is live
    Playing,
    /// Short pause after a question resolves; the next one starts when it ends
    QuestionTransition,
    /// Every question resolved
    Complete,
    /// Strike limit reached (or aborted)
    Failed,
}

impl RoundPhase {
    pub fn is_finished(self) -> bool {
        matches!(self, RoundPhase::Complete | RoundPhase::Failed)
    }
}

/// Why a strike was given
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrikeReason {
    /// Flew into the correct answer instead of shooting it
    MissedCorrectAnswer,
    /// Flew into a wrong answer
    CrashedIntoWrongAnswer,
    /// Opened the correct path but did not fly through it
    NoFlyThrough,
    /// Let the whole group go by without opening the correct one
    PassedWithoutAnswering,
}

impl StrikeReason {
    /// Short player-facing text
    pub fn label(self) -> &'static str {
        match self {
            StrikeReason::MissedCorrectAnswer => "Missed the correct answer!",
            StrikeReason::CrashedIntoWrongAnswer => "Crashed into wrong answer!",
            StrikeReason::NoFlyThrough => "Didn't fly through the opened path!",
            StrikeReason::PassedWithoutAnswering => "Passed without answering!",
        }
    }

    /// Banner text shown in the strike message
    pub fn banner(self) -> &'static str {
        match self {
            StrikeReason::MissedCorrectAnswer => "TARGET LOCK FAILURE",
            StrikeReason::CrashedIntoWrongAnswer => "INCORRECT TARGET IMPACT",
            StrikeReason::NoFlyThrough => "NAVIGATION FAILURE: NO PASS",
            StrikeReason::PassedWithoutAnswering => "NO RESPONSE: TARGET NOT ACQUIRED",
        }
    }
}

/// An opened correct marker the ship still has to fly through
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingPass {
    pub lane: Lane,
    pub axial: f32,
}

/// What a banner message announces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Strike,
    Failure,
    Complete,
}

/// A timed banner message
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
    pub remaining: f32,
}

/// Final result of a finished round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundOutcome {
    pub passed: bool,
    pub score: u32,
    pub strikes: u32,
    pub total: u32,
}

pub type CompleteHook = Box<dyn FnMut(bool, u32, u32)>;
pub type FailHook = Box<dyn FnMut()>;

/// Construction parameters that are not question data
#[derive(Debug, Clone)]
pub struct RoundSetup {
    pub tuning: Tuning,
    pub burst: BurstCounts,
    /// Star field density multiplier
    pub star_density: f32,
    pub seed: u64,
}

impl Default for RoundSetup {
    fn default() -> Self {
        Self {
            tuning: Tuning::default(),
            burst: BurstCounts::default(),
            star_density: 1.0,
            seed: 0,
        }
    }
}

impl RoundSetup {
    pub fn from_settings(tuning: Tuning, settings: &Settings, seed: u64) -> Self {
        Self {
            tuning,
            burst: settings.burst_counts(),
            star_density: settings.quality.star_density(),
            seed,
        }
    }
}

/// One planet's quiz round
pub struct QuizRound {
    topic: String,
    questions: Vec<Question>,
    tuning: Tuning,
    rng: Pcg32,

    phase: RoundPhase,
    /// Seconds left in the current timed phase
    phase_timer: f32,
    question_index: usize,
    score: u32,
    strikes: u32,
    strike_history: Vec<StrikeReason>,
    pending_pass: Option<PendingPass>,

    ship: CardinalShip,
    markers: Vec<AnswerMarker>,
    /// Marker index range per question
    groups: Vec<Range<usize>>,
    tunnel: WarpTunnel,

    message: Option<Message>,
    screen_shake: f32,
    elapsed: f32,

    /// Set once the finish callback has been delivered
    reported: bool,
    on_complete: Option<CompleteHook>,
    on_fail: Option<FailHook>,
}

impl fmt::Debug for QuizRound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizRound")
            .field("topic", &self.topic)
            .field("phase", &self.phase)
            .field("question_index", &self.question_index)
            .field("score", &self.score)
            .field("strikes", &self.strikes)
            .field("markers", &self.markers.len())
            .finish_non_exhaustive()
    }
}

impl QuizRound {
    /// Build a round and spawn every question's markers up front.
    ///
    /// Refuses empty or malformed question lists.
    pub fn new(topic: impl Into<String>, questions: Vec<Question>, setup: RoundSetup) -> Result<Self, QuizError> {
        validate_round(&questions)?;

        let topic = topic.into();
        let RoundSetup {
            tuning,
            burst,
            star_density,
            seed,
        } = setup;
        let mut rng = Pcg32::seed_from_u64(seed);

        let mut ship = CardinalShip::new(tuning.motion.clone(), tuning.projectile.clone());
        ship.projectiles_mut()
            .set_max_range(tuning.required_projectile_range(questions.len()));

        let mut markers = Vec::new();
        let mut groups = Vec::with_capacity(questions.len());
        let base = ship.axial() - tuning.round.first_question_distance;

        for (index, question) in questions.iter().enumerate() {
            let axial = base - index as f32 * tuning.round.question_spacing;
            let mut lanes = Lane::ALL;
            lanes.shuffle(&mut rng);

            let start = markers.len();
            for (option, (text, lane)) in question.options.iter().zip(lanes).enumerate() {
                markers.push(AnswerMarker::new(
                    index,
                    lane,
                    axial,
                    text.clone(),
                    option == question.correct,
                    tuning.marker.clone(),
                    burst,
                    &mut rng,
                ));
            }
            groups.push(start..markers.len());
        }

        let tunnel = WarpTunnel::new(tuning.marker.tunnel_radius, star_density);
        let phase_timer = tuning.round.intro_duration;

        log::info!(
            "Starting {topic} quiz: {} questions, {} markers",
            questions.len(),
            markers.len()
        );

        Ok(Self {
            topic,
            questions,
            tuning,
            rng,
            phase: RoundPhase::Intro,
            phase_timer,
            question_index: 0,
            score: 0,
            strikes: 0,
            strike_history: Vec::new(),
            pending_pass: None,
            ship,
            markers,
            groups,
            tunnel,
            message: None,
            screen_shake: 0.0,
            elapsed: 0.0,
            reported: false,
            on_complete: None,
            on_fail: None,
        })
    }

    /// Called once with `(passed, score, strikes)` after the completion delay
    pub fn set_on_complete(&mut self, hook: impl FnMut(bool, u32, u32) + 'static) {
        self.on_complete = Some(Box::new(hook));
    }

    /// Called once after the failure delay
    pub fn set_on_fail(&mut self, hook: impl FnMut() + 'static) {
        self.on_fail = Some(Box::new(hook));
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn phase_timer(&self) -> f32 {
        self.phase_timer
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn question_index(&self) -> usize {
        self.question_index
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.question_index)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn strikes(&self) -> u32 {
        self.strikes
    }

    pub fn max_strikes(&self) -> u32 {
        self.tuning.round.max_strikes
    }

    pub fn strike_history(&self) -> &[StrikeReason] {
        &self.strike_history
    }

    pub fn pending_pass(&self) -> Option<PendingPass> {
        self.pending_pass
    }

    pub fn ship(&self) -> &CardinalShip {
        &self.ship
    }

    pub fn projectiles(&self) -> &ProjectileSet {
        self.ship.projectiles()
    }

    pub fn tunnel(&self) -> &WarpTunnel {
        &self.tunnel
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Every marker of the round, grouped by question in order
    pub fn markers(&self) -> &[AnswerMarker] {
        &self.markers
    }

    /// Markers belonging to question `index`
    pub fn markers_for(&self, index: usize) -> &[AnswerMarker] {
        match self.groups.get(index) {
            Some(range) => &self.markers[range.clone()],
            None => &[],
        }
    }

    /// Markers of the live question (empty once the round is past the last one)
    pub fn current_markers(&self) -> &[AnswerMarker] {
        self.markers_for(self.question_index)
    }

    /// Active banner message, if any
    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref().filter(|m| m.remaining > 0.0)
    }

    pub fn screen_shake(&self) -> f32 {
        self.screen_shake
    }

    /// Result of the round once it has finished
    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.phase.is_finished().then(|| RoundOutcome {
            passed: self.phase == RoundPhase::Complete,
            score: self.score,
            strikes: self.strikes,
            total: self.questions.len() as u32,
        })
    }

    /// Advance the round by `dt` seconds
    pub fn update(&mut self, dt: f32, controls: &dyn ControlState) {
        self.elapsed += dt;
        self.update_effects(dt);

        match self.phase {
            RoundPhase::Intro => {
                self.advance_world(dt, controls);
                self.phase_timer -= dt;
                if self.phase_timer <= 0.0 {
                    self.phase = RoundPhase::Playing;
                    log::debug!("Intro over, question 1 of {}", self.questions.len());
                }
            }
            RoundPhase::Playing => {
                self.advance_world(dt, controls);
                self.resolve_collisions();
                if self.phase == RoundPhase::Playing {
                    self.check_group_passed();
                }
            }
            RoundPhase::QuestionTransition => {
                self.advance_world(dt, controls);
                self.phase_timer -= dt;
                if self.phase_timer <= 0.0 {
                    self.advance_question();
                }
            }
            RoundPhase::Complete => {
                self.advance_world(dt, controls);
                self.phase_timer -= dt;
                if self.phase_timer <= 0.0 {
                    self.report();
                }
            }
            RoundPhase::Failed => {
                // The ship stops; only the delay runs
                self.phase_timer -= dt;
                if self.phase_timer <= 0.0 {
                    self.report();
                }
            }
        }
    }

    /// Leave the round early and report immediately.
    ///
    /// An unfinished round becomes Failed and fires `on_fail`. During the
    /// completion delay the round stays Complete and `on_complete` fires
    /// without waiting.
    pub fn abort(&mut self) {
        if self.reported {
            return;
        }
        if !self.phase.is_finished() {
            log::info!("{} quiz aborted on question {}", self.topic, self.question_index + 1);
            self.phase = RoundPhase::Failed;
            self.pending_pass = None;
        }
        self.phase_timer = 0.0;
        self.report();
    }

    fn update_effects(&mut self, dt: f32) {
        if let Some(message) = &mut self.message {
            message.remaining -= dt;
            if message.remaining <= 0.0 {
                self.message = None;
            }
        }
        self.screen_shake = (self.screen_shake - self.tuning.round.shake_decay * dt).max(0.0);
    }

    fn advance_world(&mut self, dt: f32, controls: &dyn ControlState) {
        self.ship.update(dt, controls);
        for marker in &mut self.markers {
            marker.update(dt);
        }
        self.tunnel.update(dt, self.ship.forward_speed());
    }

    fn resolve_collisions(&mut self) {
        let Some(group) = self.groups.get(self.question_index).cloned() else {
            return;
        };

        // Shots against this question's markers; each shot lands at most once
        let mut spent = Vec::new();
        for (shot_index, shot) in self.ship.projectiles().iter().enumerate() {
            let Some(marker) = self.markers[group.clone()].iter_mut().find(|m| m.hit_test(shot)) else {
                continue;
            };
            spent.push(shot_index);
            self.message = None;
            match marker.on_hit(&mut self.rng) {
                HitOutcome::Correct => {
                    log::debug!("Correct answer '{}' opened in {}", marker.text, marker.lane.name());
                    self.pending_pass = Some(PendingPass {
                        lane: marker.lane,
                        axial: marker.axial,
                    });
                }
                HitOutcome::Incorrect => {
                    log::debug!("Wrong answer '{}' hit", marker.text);
                }
                HitOutcome::Ignored => {}
            }
        }
        self.ship.projectiles_mut().consume(&spent);

        // Flying through the opened path
        if let Some(pass) = self.pending_pass {
            if self.ship.lane() == pass.lane
                && self.ship.axial() < pass.axial - self.tuning.round.pass_margin
            {
                self.pending_pass = None;
                self.score += 1;
                log::info!(
                    "Question {} answered, score {}",
                    self.question_index + 1,
                    self.score
                );
                self.begin_transition();
                return;
            }
        }

        // Ship against live markers
        let ship_pos = self.ship.world_position();
        let ship_lane = self.ship.lane();
        let contact = self.markers[group.clone()]
            .iter()
            .position(|m| m.check_ship_collision(ship_pos, ship_lane));
        if let Some(offset) = contact {
            let marker = &mut self.markers[group.start + offset];
            let reason = if marker.correct {
                StrikeReason::MissedCorrectAnswer
            } else {
                StrikeReason::CrashedIntoWrongAnswer
            };
            marker.destroy(&mut self.rng);
            self.register_strike(reason);
        }
    }

    fn check_group_passed(&mut self) {
        let Some(group) = self.groups.get(self.question_index).cloned() else {
            return;
        };
        let markers = &self.markers[group];
        let behind = self.ship.axial() + self.tuning.round.behind_margin;
        let all_passed = markers.iter().all(|m| m.destroyed || m.axial > behind);
        if !all_passed {
            return;
        }

        if self.pending_pass.take().is_some() {
            self.register_strike(StrikeReason::NoFlyThrough);
        } else if !markers.iter().any(|m| m.correct && m.destroyed) {
            self.register_strike(StrikeReason::PassedWithoutAnswering);
        }
    }

    fn register_strike(&mut self, reason: StrikeReason) {
        self.strikes += 1;
        self.strike_history.push(reason);
        self.pending_pass = None;
        self.screen_shake = self.tuning.round.strike_shake;
        let max = self.tuning.round.max_strikes;
        log::info!(
            "Strike {}/{} on question {}: {}",
            self.strikes,
            max,
            self.question_index + 1,
            reason.label()
        );

        if self.strikes >= max {
            self.phase = RoundPhase::Failed;
            self.phase_timer = self.tuning.round.fail_delay;
            self.show_message(
                MessageKind::Failure,
                "CRITICAL FAILURE".to_string(),
                self.tuning.round.fail_delay,
            );
            log::info!("{} quiz failed with score {}", self.topic, self.score);
        } else {
            self.show_message(
                MessageKind::Strike,
                format!("STRIKE {} OF {max}: {}", self.strikes, reason.banner()),
                self.tuning.round.strike_message_duration,
            );
            self.begin_transition();
        }
    }

    fn begin_transition(&mut self) {
        self.phase = RoundPhase::QuestionTransition;
        self.phase_timer = self.tuning.round.transition_duration;
    }

    fn advance_question(&mut self) {
        self.question_index += 1;
        self.pending_pass = None;

        if self.question_index >= self.questions.len() {
            self.phase = RoundPhase::Complete;
            self.phase_timer = self.tuning.round.complete_delay;
            self.show_message(
                MessageKind::Complete,
                format!("{} Quiz Complete!", self.topic),
                self.tuning.round.complete_delay,
            );
            log::info!(
                "{} quiz complete: {}/{} with {} strikes",
                self.topic,
                self.score,
                self.questions.len(),
                self.strikes
            );
        } else {
            self.phase = RoundPhase::Playing;
            log::debug!("Question {} of {}", self.question_index + 1, self.questions.len());
        }
    }

    fn show_message(&mut self, kind: MessageKind, text: String, duration: f32) {
        self.message = Some(Message {
            kind,
            text,
            remaining: duration,
        });
    }

    /// Deliver the finish callback exactly once
    fn report(&mut self) {
        if self.reported {
            return;
        }
        self.reported = true;
        match self.phase {
            RoundPhase::Complete => {
                if let Some(hook) = &mut self.on_complete {
                    hook(true, self.score, self.strikes);
                }
            }
            RoundPhase::Failed => {
                if let Some(hook) = &mut self.on_fail {
                    hook();
                }
            }
            _ => {}
        }
    }
}
