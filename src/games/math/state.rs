//! Game state: the single aggregate every command mutates.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::catalog::{PowerUpDef, ShopOffer};
use super::config::GameConfig;
use super::effects::{Effect, EffectLedger};
use super::problem::{self, Op, Problem};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Phase {
    Answering,
    Shop,
    GameOver,
}

/// The engine's only scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Timer {
    /// Nothing scheduled (round resolved, shop open, or game over).
    Idle,
    /// `countdown_ms` is ticking for the current problem.
    Running,
    /// Outcome is on screen; the next problem appears when this reaches 0.
    Feedback { remaining_ms: u32 },
}

/// How the last round ended, for the feedback line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Correct { gained: u64 },
    Wrong { answer: i64 },
    Timeout { answer: i64 },
    Revealed { answer: i64 },
}

/// An owned power-up: a copy of its definition plus what was paid for it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct InventoryItem {
    pub def: PowerUpDef,
    pub paid: u64,
}

impl InventoryItem {
    pub fn resale_value(&self, sell_ratio: f64) -> u64 {
        (self.paid as f64 * sell_ratio).round() as u64
    }
}

#[derive(Clone, Debug)]
pub struct LogEntry {
    pub text: String,
    pub important: bool,
}

pub struct GameState {
    pub config: GameConfig,
    pub lives: u32,
    pub score: u64,
    pub round: u32,
    pub correct_count: u32,
    pub difficulty: u32,
    pub time_limit_ms: u32,
    pub problem: Problem,
    pub countdown_ms: u32,
    pub timer: Timer,
    pub phase: Phase,
    pub effects: EffectLedger,
    pub inventory: Vec<InventoryItem>,
    pub offers: Vec<ShopOffer>,
    pub last_outcome: Option<Outcome>,
    pub log: Vec<LogEntry>,
    pub rng: Pcg32,
    /// Animation frame counter.
    pub anim_frame: u32,
}

impl GameState {
    /// Fresh game with round 1 already running.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let problem = problem::generate(&mut rng, 1);
        let time_limit_ms = config.start_time_ms;
        Self {
            lives: config.start_lives,
            score: 0,
            round: 1,
            correct_count: 0,
            difficulty: 1,
            time_limit_ms,
            problem,
            countdown_ms: time_limit_ms,
            timer: Timer::Running,
            phase: Phase::Answering,
            effects: EffectLedger::new(),
            inventory: Vec::new(),
            offers: Vec::new(),
            last_outcome: None,
            log: vec![LogEntry {
                text: "Pixel Math! Solve before the clock runs out.".into(),
                important: true,
            }],
            rng,
            anim_frame: 0,
            config,
        }
    }

    pub fn add_log(&mut self, text: &str, important: bool) {
        self.log.push(LogEntry {
            text: text.to_string(),
            important,
        });
        if self.log.len() > self.config.log_capacity {
            self.log.remove(0);
        }
    }

    pub fn inventory_full(&self) -> bool {
        self.inventory.len() >= self.config.max_inventory
    }

    /// Whether an answer can be submitted right now.
    pub fn accepting_answers(&self) -> bool {
        self.phase == Phase::Answering && self.timer == Timer::Running
    }

    /// Plain-data view for any presentation layer. Hides the answer.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            lives: self.lives,
            score: self.score,
            round: self.round,
            correct_count: self.correct_count,
            inventory: self.inventory.clone(),
            effects: self.effects.iter().copied().collect(),
            phase: self.phase,
            shop_offers: self.offers.clone(),
            problem: ProblemView {
                a: self.problem.a,
                b: self.problem.b,
                op: self.problem.op,
            },
            countdown_ms: self.countdown_ms,
            time_limit_ms: self.time_limit_ms,
            difficulty: self.difficulty,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ProblemView {
    pub a: i64,
    pub b: i64,
    pub op: Op,
}

impl ProblemView {
    pub fn question(&self) -> String {
        format!("{} {} {} = ?", self.a, self.op.symbol(), self.b)
    }
}

/// What a presentation layer may see of a game. Serializes to JSON.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot {
    pub lives: u32,
    pub score: u64,
    pub round: u32,
    pub correct_count: u32,
    pub inventory: Vec<InventoryItem>,
    pub effects: Vec<Effect>,
    pub phase: Phase,
    pub shop_offers: Vec<ShopOffer>,
    pub problem: ProblemView,
    pub countdown_ms: u32,
    pub time_limit_ms: u32,
    pub difficulty: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::math::catalog;

    #[test]
    fn initial_state() {
        let s = GameState::new(GameConfig::default(), 1);
        assert_eq!(s.lives, 3);
        assert_eq!(s.score, 0);
        assert_eq!(s.round, 1);
        assert_eq!(s.difficulty, 1);
        assert_eq!(s.time_limit_ms, 3000);
        assert_eq!(s.countdown_ms, 3000);
        assert_eq!(s.phase, Phase::Answering);
        assert_eq!(s.timer, Timer::Running);
        assert_eq!(s.problem.op, Op::Add);
        assert!(s.inventory.is_empty());
        assert!(s.effects.is_empty());
    }

    #[test]
    fn log_truncation() {
        let mut s = GameState::new(GameConfig::default(), 1);
        for i in 0..50 {
            s.add_log(&format!("msg {}", i), false);
        }
        assert_eq!(s.log.len(), 30);
        assert_eq!(s.log.last().unwrap().text, "msg 49");
    }

    #[test]
    fn resale_rounds_half_up() {
        let item = InventoryItem {
            def: catalog::CATALOG[0],
            paid: 75,
        };
        assert_eq!(item.resale_value(0.5), 38);
        let item = InventoryItem {
            def: catalog::CATALOG[0],
            paid: 200,
        };
        assert_eq!(item.resale_value(0.5), 100);
    }

    #[test]
    fn snapshot_hides_answer() {
        let s = GameState::new(GameConfig::default(), 5);
        let snap = s.snapshot();
        assert_eq!(snap.problem.question(), s.problem.question());
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"countdown_ms\":3000"));
        assert!(!json.contains("\"answer\""));
    }
}
