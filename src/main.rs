//! Tunnel Quiz entry point
//!
//! Headless runner: loads a question bank, plays one planet's round with the
//! autopilot through the fixed-step clock and records every frame's draw
//! calls, then reports the result. Rendering backends plug in through
//! `RenderSurface` instead of the recorded `DrawList`.

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use tunnel_quiz::consts::{QUESTIONS_PER_ROUND, SIM_DT};
use tunnel_quiz::renderer::{DrawList, draw_round};
use tunnel_quiz::results::{RoundRecord, SessionResults, trophy_for};
use tunnel_quiz::sim::{Autopilot, FixedStep, QuizRound, RoundSetup};
use tunnel_quiz::{QualityPreset, QuestionBank, QuizError, Settings, Tuning};

/// Question bank shipped with the game
const BUILTIN_BANK: &str = include_str!("../assets/quiz_questions.json");

/// Tunnel Quiz command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "tunnel-quiz", about = "Warp-tunnel planet quiz (headless autopilot run)")]
struct Args {
    /// Planet whose quiz to play.
    #[arg(long, default_value = "Mars")]
    topic: String,

    /// Question bank JSON (defaults to the built-in bank).
    #[arg(long)]
    bank: Option<PathBuf>,

    /// Gameplay tuning JSON.
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Presentation settings JSON.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Override the quality preset (low, medium, high).
    #[arg(long)]
    quality: Option<String>,

    /// Seed for question selection and lane layout.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Simulated display refresh rate.
    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// Give up (abort the round) after this many simulated seconds.
    #[arg(long, default_value_t = 120.0)]
    max_seconds: f32,

    /// List the bank's topics and exit.
    #[arg(long)]
    list_topics: bool,
}

fn main() -> Result<(), QuizError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    log::info!("Tunnel Quiz (headless) starting...");

    let bank = match &args.bank {
        Some(path) => QuestionBank::load(path)?,
        None => QuestionBank::from_json_str(BUILTIN_BANK)?,
    };

    if args.list_topics {
        for topic in bank.topics() {
            println!("{topic} ({} questions)", bank.question_count(topic));
        }
        return Ok(());
    }

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    let mut settings = args.settings.as_ref().map(Settings::load).unwrap_or_default();
    if let Some(name) = &args.quality {
        match QualityPreset::from_str(name) {
            Some(preset) => settings.quality = preset,
            None => log::warn!("Unknown quality preset '{name}', keeping {}", settings.quality.as_str()),
        }
    }

    let mut rng = Pcg32::seed_from_u64(args.seed);
    let questions = bank.select(&args.topic, QUESTIONS_PER_ROUND, &mut rng)?;
    let setup = RoundSetup::from_settings(tuning, &settings, args.seed);
    let mut round = QuizRound::new(args.topic.clone(), questions, setup)?;

    let finished = Rc::new(Cell::new(false));
    let done = finished.clone();
    round.set_on_complete(move |passed, score, strikes| {
        log::info!("Round complete: passed={passed}, score={score}, strikes={strikes}");
        done.set(true);
    });
    let done = finished.clone();
    round.set_on_fail(move || {
        log::info!("Round failed");
        done.set(true);
    });

    let mut clock = FixedStep::new();
    let mut pilot = Autopilot::default();
    let mut frame = DrawList::new();
    let frame_dt = 1.0 / args.fps.max(1.0);
    let mut frames = 0u64;
    let mut draw_calls = 0usize;

    while !finished.get() {
        if round.elapsed() >= args.max_seconds {
            log::warn!("Giving up after {:.0}s", round.elapsed());
            round.abort();
            break;
        }
        for _ in 0..clock.advance(frame_dt) {
            let input = pilot.plan(&round);
            round.update(SIM_DT, &input);
        }
        frame.clear();
        draw_round(&round, &settings, &mut frame);
        frames += 1;
        draw_calls += frame.len();
    }

    log::info!(
        "Rendered {frames} frames, {:.0} draw calls per frame",
        draw_calls as f64 / frames.max(1) as f64
    );

    let mut results = SessionResults::new();
    if let Some(outcome) = round.outcome() {
        results.record(RoundRecord::from_outcome(&args.topic, outcome));
        println!(
            "{}: {} ({}/{} correct, {} strikes)",
            args.topic,
            if outcome.passed { "PASSED" } else { "FAILED" },
            outcome.score,
            outcome.total,
            outcome.strikes
        );
        if outcome.passed {
            println!("Trophy earned: {}", trophy_for(&args.topic));
        }
        for reason in round.strike_history() {
            println!("  strike: {}", reason.label());
        }
    }

    Ok(())
}
