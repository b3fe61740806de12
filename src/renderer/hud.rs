//! HUD model
//!
//! Built fresh from the round every frame; the backend lays it out.

use glam::Vec3;

use super::surface::{Color, colors};
use crate::settings::Settings;
use crate::sim::lane::Lane;
use crate::sim::round::{MessageKind, QuizRound, RoundPhase};

/// Characters per answer label line
pub const LABEL_CHARS: usize = 18;
pub const LABEL_LINES: usize = 3;
/// Characters per question prompt line
pub const PROMPT_CHARS: usize = 58;
pub const PROMPT_LINES: usize = 2;

/// Floating text over an answer marker
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerLabel {
    pub lane: Lane,
    /// World position the label is projected from
    pub anchor: Vec3,
    pub lines: Vec<String>,
    pub flash: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub text: String,
    pub color: Color,
    /// Completion gets the large panel treatment
    pub panel: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntroOverlay {
    pub title: String,
    pub subtitle: String,
    /// Blink phase for the subtitle, 0..1
    pub subtitle_alpha: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HudView {
    /// One entry per allowed strike; `true` while that shield is intact
    pub shields: Vec<bool>,
    pub strikes_text: String,
    pub score: u32,
    /// 1-based, capped at the total
    pub question_number: usize,
    pub question_total: usize,
    /// Wrapped prompt, only while a question is on screen
    pub prompt: Option<Vec<String>>,
    pub message: Option<Banner>,
    pub intro: Option<IntroOverlay>,
    pub labels: Vec<AnswerLabel>,
}

impl HudView {
    pub fn from_round(round: &QuizRound, settings: &Settings) -> Self {
        let max = round.max_strikes();
        let remaining = max.saturating_sub(round.strikes());
        let shields = (0..max).map(|i| i < remaining).collect();
        let total = round.question_count();
        let phase = round.phase();

        let prompt = matches!(phase, RoundPhase::Playing | RoundPhase::QuestionTransition)
            .then(|| round.current_question())
            .flatten()
            .map(|q| wrap_label(&q.prompt, PROMPT_CHARS, PROMPT_LINES));

        let message = round.message().map(|m| Banner {
            text: m.text.clone(),
            color: match m.kind {
                MessageKind::Complete => colors::MESSAGE_SUCCESS,
                MessageKind::Strike | MessageKind::Failure => colors::MESSAGE_STRIKE,
            },
            panel: m.kind == MessageKind::Complete,
        });

        let intro = (phase == RoundPhase::Intro).then(|| IntroOverlay {
            title: format!("PLANETARY ANALYSIS: {}", round.topic().to_uppercase()),
            subtitle: "INITIALIZING...".to_string(),
            subtitle_alpha: 0.5 + 0.5 * (round.elapsed() * 10.0).sin(),
        });

        let labels = if settings.answer_labels {
            round
                .current_markers()
                .iter()
                .filter(|m| m.is_alive())
                .map(|m| AnswerLabel {
                    lane: m.lane,
                    anchor: m.world_position(),
                    lines: wrap_label(&m.text, LABEL_CHARS, LABEL_LINES),
                    flash: m.hit_flash,
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            shields,
            strikes_text: format!("STRIKES {}/{max}", round.strikes()),
            score: round.score(),
            question_number: (round.question_index() + 1).min(total),
            question_total: total,
            prompt,
            message,
            intro,
            labels,
        }
    }
}

/// Greedy word wrap into at most `max_lines` lines of `max_chars`.
///
/// Words longer than a line are split; text that does not fit ends the
/// last line with `...`.
pub fn wrap_label(text: &str, max_chars: usize, max_lines: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        // Hard-split words that cannot fit on any line
        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            lines.push(word.drain(..max_chars).collect());
        }
        let word: String = word.into_iter().collect();
        if word.is_empty() {
            continue;
        }

        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::replace(&mut current, word));
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if max_lines == 0 || lines.len() <= max_lines {
        return lines;
    }

    let overflow = lines.split_off(max_lines - 1).join(" ");
    let keep = max_chars.saturating_sub(3);
    let cut: String = overflow.chars().take(keep).collect();
    lines.push(format!("{}...", cut.trim_end()));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::questions::Question;
    use crate::sim::input::TickInput;
    use crate::sim::round::RoundSetup;

    #[test]
    fn test_wrap_short_text() {
        assert_eq!(wrap_label("Olympus Mons", 8, 3), vec!["Olympus", "Mons"]);
        assert_eq!(wrap_label("Mars", 18, 3), vec!["Mars"]);
        assert!(wrap_label("   ", 18, 3).is_empty());
    }

    #[test]
    fn test_wrap_overflow_gets_ellipsis() {
        let lines = wrap_label("one two three four five six", 9, 2);
        assert_eq!(lines, vec!["one two", "three..."]);
        assert!(lines.iter().all(|l| l.chars().count() <= 9));
    }

    #[test]
    fn test_wrap_splits_long_words() {
        assert_eq!(wrap_label("Supercalifragilistic", 8, 3), vec!["Supercal", "ifragili", "stic"]);
    }

    fn round() -> QuizRound {
        let questions = vec![
            Question::new("Which planet has the Great Red Spot?", &["Jupiter", "Mars", "Venus", "Saturn"], 0),
            Question::new("Second?", &["Yes", "No"], 0),
        ];
        QuizRound::new("Jupiter", questions, RoundSetup::default()).unwrap()
    }

    #[test]
    fn test_intro_overlay_hides_prompt() {
        let round = round();
        let hud = HudView::from_round(&round, &Settings::default());
        assert_eq!(
            hud.intro.as_ref().map(|i| i.title.as_str()),
            Some("PLANETARY ANALYSIS: JUPITER")
        );
        assert!(hud.prompt.is_none());
        assert_eq!(hud.shields, vec![true, true, true]);
        assert_eq!(hud.strikes_text, "STRIKES 0/3");
        assert_eq!((hud.question_number, hud.question_total), (1, 2));
        // Labels show for the live question only
        assert_eq!(hud.labels.len(), 4);
    }

    #[test]
    fn test_prompt_while_playing() {
        let mut round = round();
        for _ in 0..(2.1 / SIM_DT) as usize {
            round.update(SIM_DT, &TickInput::default());
        }
        assert_eq!(round.phase(), RoundPhase::Playing);
        let hud = HudView::from_round(&round, &Settings::default());
        assert!(hud.intro.is_none());
        assert_eq!(
            hud.prompt,
            Some(vec!["Which planet has the Great Red Spot?".to_string()])
        );
    }

    #[test]
    fn test_labels_follow_settings_and_alive_markers() {
        let mut round = round();
        let no_labels = Settings {
            answer_labels: false,
            ..Settings::default()
        };
        assert!(HudView::from_round(&round, &no_labels).labels.is_empty());

        // Idle in South until the crash destroys that marker
        for _ in 0..(6.0 / SIM_DT) as usize {
            round.update(SIM_DT, &TickInput::default());
            if round.strikes() > 0 {
                break;
            }
        }
        assert_eq!(round.strikes(), 1);
        let hud = HudView::from_round(&round, &Settings::default());
        assert_eq!(hud.labels.len(), 3);
        assert!(hud.labels.iter().all(|l| l.lane != Lane::South));
        assert_eq!(hud.shields, vec![true, true, false]);
        assert_eq!(hud.message.map(|m| m.color), Some(colors::MESSAGE_STRIKE));
    }
}
