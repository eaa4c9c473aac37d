//! Pixel Math: answer arithmetic against the clock, spend points in the shop.

pub mod actions;
pub mod catalog;
pub mod config;
pub mod economy;
pub mod effects;
pub mod logic;
pub mod problem;
pub mod render;
pub mod state;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::games::Game;
use crate::input::{ClickState, InputEvent};

use actions::*;
use config::GameConfig;
use state::{GameState, Phase};

/// Keys for inventory slots 1-3.
pub const USE_KEYS: [char; 3] = ['q', 'w', 'e'];
pub const SELL_KEYS: [char; 3] = ['a', 's', 'd'];

/// Longest answer the input buffer accepts (sign included).
pub const MAX_INPUT_LEN: usize = 7;

pub struct MathGame {
    pub state: GameState,
    /// Answer being typed. Cleared whenever the round or phase moves on.
    pub input: String,
}

impl MathGame {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        log::info!("new game (seed {})", seed);
        Self {
            state: GameState::new(config, seed),
            input: String::new(),
        }
    }

    /// Run `f` against the engine and drop a half-typed answer if it moved
    /// to another round or phase.
    fn with_round_guard<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let before = (self.state.round, self.state.phase);
        let out = f(self);
        if (self.state.round, self.state.phase) != before {
            self.input.clear();
        }
        out
    }

    fn handle_key(&mut self, key: char) -> bool {
        match self.state.phase {
            Phase::GameOver => match key {
                'r' => {
                    logic::restart(&mut self.state);
                    true
                }
                _ => false,
            },
            Phase::Shop => match key {
                '1'..='9' => self.buy((key as u8 - b'1') as usize),
                'c' => logic::close_shop(&mut self.state),
                _ => self.handle_item_key(key),
            },
            Phase::Answering => match key {
                '0'..='9' | '-' => self.type_char(key),
                '?' => logic::reveal_answer(&mut self.state),
                _ => self.handle_item_key(key),
            },
        }
    }

    fn handle_item_key(&mut self, key: char) -> bool {
        if let Some(slot) = USE_KEYS.iter().position(|&k| k == key) {
            return economy::use_item(&mut self.state, slot);
        }
        if let Some(slot) = SELL_KEYS.iter().position(|&k| k == key) {
            return economy::sell_item(&mut self.state, slot);
        }
        false
    }

    fn handle_click(&mut self, action_id: u16) -> bool {
        match action_id {
            SUBMIT_ANSWER => self.submit(),
            REVEAL_ANSWER => logic::reveal_answer(&mut self.state),
            ERASE => self.erase(),
            MINUS => self.type_char('-'),
            id if (DIGIT_BASE..DIGIT_BASE + 10).contains(&id) => {
                self.type_char((b'0' + (id - DIGIT_BASE) as u8) as char)
            }
            CLOSE_SHOP => logic::close_shop(&mut self.state),
            RESTART if self.state.phase == Phase::GameOver => {
                logic::restart(&mut self.state);
                true
            }
            id if (BUY_BASE..USE_BASE).contains(&id) => self.buy((id - BUY_BASE) as usize),
            id if (USE_BASE..SELL_BASE).contains(&id) => {
                economy::use_item(&mut self.state, (id - USE_BASE) as usize)
            }
            id if (SELL_BASE..SELL_BASE + 100).contains(&id) => {
                economy::sell_item(&mut self.state, (id - SELL_BASE) as usize)
            }
            _ => false,
        }
    }

    /// Append to the answer buffer. `-` is only accepted as the first character.
    fn type_char(&mut self, c: char) -> bool {
        if !self.state.accepting_answers() || self.input.len() >= MAX_INPUT_LEN {
            return false;
        }
        if c == '-' && !self.input.is_empty() {
            return false;
        }
        self.input.push(c);
        true
    }

    fn erase(&mut self) -> bool {
        self.input.pop().is_some()
    }

    /// Submit the buffer. An empty buffer is not sent.
    fn submit(&mut self) -> bool {
        if !self.state.accepting_answers() || self.input.is_empty() {
            return false;
        }
        let raw = std::mem::take(&mut self.input);
        logic::submit_answer(&mut self.state, &raw)
    }

    fn buy(&mut self, offer_idx: usize) -> bool {
        if let Err(e) = economy::buy(&mut self.state, offer_idx) {
            self.state.add_log(&e.to_string(), true);
        }
        true
    }
}

impl Game for MathGame {
    fn handle_input(&mut self, event: &InputEvent) -> bool {
        self.with_round_guard(|game| match event {
            InputEvent::Key(c) => game.handle_key(*c),
            InputEvent::Enter => game.submit(),
            InputEvent::Backspace => game.erase(),
            InputEvent::Esc => {
                let had_input = !game.input.is_empty();
                game.input.clear();
                had_input
            }
            InputEvent::Click(id) => game.handle_click(*id),
        })
    }

    fn tick(&mut self, delta_ticks: u32) {
        self.with_round_guard(|game| logic::tick(&mut game.state, delta_ticks));
    }

    fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.state, &self.input, f, area, click_state);
    }
}
