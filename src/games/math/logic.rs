//! Round engine. Pure functions over [`GameState`].
//!
//! Every transition runs to completion before returning, so a countdown step
//! and an answer can never both resolve the same round: whichever arrives
//! first moves the timer off `Running`, and the other is ignored.

use super::catalog::roll_offers;
use super::effects::EffectKind;
use super::problem;
use super::state::{GameState, Outcome, Phase, Timer};

/// How a round was resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Resolution {
    Correct,
    Wrong,
    Timeout,
    Revealed,
}

/// Advance scheduled work by `steps` quanta of `config.tick_ms`.
pub fn tick(state: &mut GameState, steps: u32) {
    state.anim_frame = state.anim_frame.wrapping_add(steps);
    for _ in 0..steps {
        if !step(state) {
            break;
        }
    }
}

/// One quantum. Returns false when nothing is scheduled.
fn step(state: &mut GameState) -> bool {
    let tick_ms = state.config.tick_ms;
    match state.timer {
        Timer::Idle => false,
        Timer::Running => {
            state.countdown_ms = state.countdown_ms.saturating_sub(tick_ms);
            if state.countdown_ms == 0 {
                state.timer = Timer::Idle;
                resolve_round(state, Resolution::Timeout);
            }
            true
        }
        Timer::Feedback { remaining_ms } => {
            let left = remaining_ms.saturating_sub(tick_ms);
            if left == 0 {
                begin_next_round(state);
            } else {
                state.timer = Timer::Feedback { remaining_ms: left };
            }
            true
        }
    }
}

/// New problem at the current difficulty, full countdown, timer running.
pub fn start_round(state: &mut GameState) {
    state.problem = problem::generate(&mut state.rng, state.difficulty);
    state.countdown_ms = state.time_limit_ms;
    state.timer = Timer::Running;
    log::debug!(
        "round {} started: {} (limit {}ms)",
        state.round,
        state.problem.question(),
        state.time_limit_ms
    );
}

/// Submit typed text as the answer. Returns false when no round is open.
///
/// Anything that does not parse as a number is simply wrong.
pub fn submit_answer(state: &mut GameState, raw: &str) -> bool {
    if !state.accepting_answers() {
        return false;
    }
    state.timer = Timer::Idle;

    let correct = raw
        .trim()
        .parse::<f64>()
        .map(|v| v == state.problem.answer as f64)
        .unwrap_or(false);
    let resolution = if correct {
        Resolution::Correct
    } else {
        Resolution::Wrong
    };
    resolve_round(state, resolution);
    true
}

/// Give up the round to see the answer. Costs a life like a wrong answer.
pub fn reveal_answer(state: &mut GameState) -> bool {
    if !state.accepting_answers() {
        return false;
    }
    state.timer = Timer::Idle;
    resolve_round(state, Resolution::Revealed);
    true
}

/// Points for a correct answer given the current effects and time left.
pub fn points_for_correct(state: &GameState) -> u64 {
    let base = state.config.base_point as u64 + state.problem.answer.unsigned_abs();
    let multiplier = if state.effects.has(EffectKind::Double) { 2 } else { 1 };
    let mut gained = base * multiplier;
    if state.effects.has(EffectKind::TimeBonus) {
        gained += (state.countdown_ms as f64 / 10.0).round() as u64;
    }
    gained
}

fn resolve_round(state: &mut GameState, resolution: Resolution) {
    let answer = state.problem.answer;
    match resolution {
        Resolution::Correct => {
            let gained = points_for_correct(state);
            state.correct_count += 1;
            state.score += gained;
            state.last_outcome = Some(Outcome::Correct { gained });
            state.add_log(&format!("Correct! +{} points", gained), false);
        }
        Resolution::Wrong | Resolution::Timeout | Resolution::Revealed => {
            let (outcome, text) = match resolution {
                Resolution::Wrong => (Outcome::Wrong { answer }, format!("Wrong! It was {}", answer)),
                Resolution::Timeout => (Outcome::Timeout { answer }, format!("Time's up! It was {}", answer)),
                _ => (Outcome::Revealed { answer }, format!("The answer was {}", answer)),
            };
            state.last_outcome = Some(outcome);
            state.add_log(&text, false);

            state.lives = state.lives.saturating_sub(1);
            if state.lives == 0 {
                state.phase = Phase::GameOver;
                state.timer = Timer::Idle;
                state.add_log("GAME OVER", true);
                log::info!(
                    "game over at round {} with {} points ({} correct)",
                    state.round,
                    state.score,
                    state.correct_count
                );
                return;
            }
        }
    }
    advance_round(state);
}

/// Round boundary: decay effects, bump the round, then either open the shop
/// or schedule the next problem.
fn advance_round(state: &mut GameState) {
    state.effects.decay();
    state.round += 1;

    if state.round % state.config.rounds_before_shop == 0 {
        open_shop(state);
    } else if state.config.feedback_delay_ms == 0 {
        begin_next_round(state);
    } else {
        state.timer = Timer::Feedback {
            remaining_ms: state.config.feedback_delay_ms,
        };
    }
}

/// Apply a pending AddTime bonus to the limit, then start the round.
fn begin_next_round(state: &mut GameState) {
    if let Some(effect) = state.effects.take(EffectKind::AddTime) {
        let bonus = effect.bonus_ms.unwrap_or(0);
        let before = state.time_limit_ms;
        state.time_limit_ms = before
            .saturating_add(bonus)
            .min(state.config.max_time_ms)
            .max(before);
        state.add_log(
            &format!("Time limit {}ms -> {}ms", before, state.time_limit_ms),
            false,
        );
    }
    start_round(state);
}

fn open_shop(state: &mut GameState) {
    state.phase = Phase::Shop;
    state.timer = Timer::Idle;
    state.offers = roll_offers(&mut state.rng, &state.config);
    state.add_log(&format!("Shop is open! ({} offers)", state.offers.len()), true);
    log::debug!("shop opened at round {}", state.round);
}

/// Leave the shop: harder problems, less time, next round.
pub fn close_shop(state: &mut GameState) -> bool {
    if state.phase != Phase::Shop {
        return false;
    }
    state.phase = Phase::Answering;
    state.offers.clear();
    state.difficulty += 1;
    state.time_limit_ms = state
        .time_limit_ms
        .saturating_sub(state.config.time_decrease_after_shop)
        .max(state.config.min_time_ms);
    state.add_log(
        &format!("Level {} - {}ms per problem", state.difficulty, state.time_limit_ms),
        true,
    );
    // A pending AddTime waits for the next ordinary round advance.
    start_round(state);
    true
}

/// Back to round 1 with the same config. The RNG stream continues.
pub fn restart(state: &mut GameState) {
    let config = &state.config;
    state.lives = config.start_lives;
    state.score = 0;
    state.round = 1;
    state.correct_count = 0;
    state.difficulty = 1;
    state.time_limit_ms = config.start_time_ms;
    state.inventory.clear();
    state.offers.clear();
    state.effects.clear();
    state.last_outcome = None;
    state.phase = Phase::Answering;
    state.log.clear();
    state.add_log("New game!", true);
    log::info!("game restarted");
    start_round(state);
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::games::math::config::GameConfig;
    use crate::games::math::effects::Effect;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_close_shop_arithmetic(
            limit in 1000u32..10_000,
            difficulty in 1u32..50,
            pending_bonus in proptest::option::of(1u32..5000),
        ) {
            let mut s = GameState::new(GameConfig::default(), 3);
            s.phase = Phase::Shop;
            s.timer = Timer::Idle;
            s.time_limit_ms = limit;
            s.difficulty = difficulty;
            if let Some(bonus) = pending_bonus {
                s.effects.push(Effect::add_time(bonus));
            }
            close_shop(&mut s);
            prop_assert_eq!(s.difficulty, difficulty + 1);
            prop_assert_eq!(s.time_limit_ms, limit.saturating_sub(200).max(1000));
        }

        #[test]
        fn prop_round_frozen_after_game_over(
            seed in any::<u64>(),
            inputs in proptest::collection::vec("[0-9x-]{0,3}", 1..40),
            ticks in 0u32..400,
        ) {
            let mut s = GameState::new(GameConfig::default(), seed);
            s.lives = 1;
            submit_answer(&mut s, "x");
            let round = s.round;
            for input in &inputs {
                submit_answer(&mut s, input);
                reveal_answer(&mut s);
                tick(&mut s, ticks);
            }
            prop_assert_eq!(s.phase, Phase::GameOver);
            prop_assert_eq!(s.round, round);
            prop_assert_eq!(s.lives, 0);
        }

        #[test]
        fn prop_lives_zero_iff_game_over(
            seed in any::<u64>(),
            steps in proptest::collection::vec(0u32..80, 1..60),
        ) {
            let mut s = GameState::new(GameConfig::default(), seed);
            for n in steps {
                tick(&mut s, n);
                if s.phase == Phase::Shop {
                    close_shop(&mut s);
                }
                prop_assert_eq!(s.lives == 0, s.phase == Phase::GameOver);
            }
        }
    }
}
