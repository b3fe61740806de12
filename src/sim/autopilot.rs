//! Demo autopilot
//!
//! Plays the round on its own: lines up on the correct answer, shoots it
//! open, then holds the lane until the ship has flown through.

use super::input::TickInput;
use super::marker::AnswerMarker;
use super::round::{QuizRound, RoundPhase};

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    /// Planned input from the previous tick
    last: TickInput,
}

impl Autopilot {
    pub fn last_input(&self) -> TickInput {
        self.last
    }

    /// Decide this tick's controls from the round state
    pub fn plan(&mut self, round: &QuizRound) -> TickInput {
        let ship = round.ship();
        let mut input = TickInput::default();

        if round.phase().is_finished() {
            self.last = input;
            return input;
        }

        if let Some(pass) = round.pending_pass() {
            input.held[pass.lane.index()] = true;
        } else if let Some(target) = next_target(round) {
            input.held[target.lane.index()] = true;

            // Only shoot once lined up and the live question is the target
            let lined_up = ship.is_settled() && ship.lane() == target.lane;
            let live = round.phase() == RoundPhase::Playing
                && target.question_index == round.question_index();
            input.fire = lined_up && live;
        }

        self.last = input;
        input
    }
}

/// The nearest unopened correct marker still ahead of the ship
fn next_target(round: &QuizRound) -> Option<&AnswerMarker> {
    let ship_axial = round.ship().axial();
    let index = round.question_index();
    (index..=index + 1)
        .flat_map(|i| round.markers_for(i))
        .find(|m| m.correct && m.is_alive() && m.axial < ship_axial)
}
