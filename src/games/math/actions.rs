//! Semantic action IDs for Pixel Math click targets.
//!
//! Registered during render and dispatched via `InputEvent::Click`.

// ── Answering ───────────────────────────────────────────────────
pub const SUBMIT_ANSWER: u16 = 1;
pub const REVEAL_ANSWER: u16 = 2;
pub const ERASE: u16 = 3;
pub const MINUS: u16 = 4;

// ── Keypad digits (base + digit 0..9) ───────────────────────────
pub const DIGIT_BASE: u16 = 10;

// ── Shop / game over ────────────────────────────────────────────
pub const CLOSE_SHOP: u16 = 30;
pub const RESTART: u16 = 31;

// ── Shop purchase (base + offer index) ──────────────────────────
pub const BUY_BASE: u16 = 100;

// ── Inventory (base + slot index) ───────────────────────────────
pub const USE_BASE: u16 = 200;
pub const SELL_BASE: u16 = 300;
