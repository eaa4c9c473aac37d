//! Shop purchases, inventory use and resale.

use thiserror::Error;

use super::catalog::{PowerUpDef, PowerUpKind};
use super::effects::{Effect, EffectKind};
use super::state::{GameState, InventoryItem, Phase};

/// Why a purchase was refused. The `Display` text is shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShopError {
    #[error("The shop is closed")]
    WrongPhase,
    #[error("No such offer")]
    NoSuchOffer,
    #[error("Inventory full ({capacity} slots)")]
    InventoryFull { capacity: usize },
    #[error("Not enough points ({score}/{price})")]
    InsufficientScore { price: u64, score: u64 },
}

/// Buy the offer at `offer_idx`. On success the offer leaves the shop and a
/// copy of its definition (with the price paid) joins the inventory.
pub fn buy(state: &mut GameState, offer_idx: usize) -> Result<PowerUpDef, ShopError> {
    if state.phase != Phase::Shop {
        return Err(ShopError::WrongPhase);
    }
    let offer = *state.offers.get(offer_idx).ok_or(ShopError::NoSuchOffer)?;
    if state.inventory_full() {
        return Err(ShopError::InventoryFull {
            capacity: state.config.max_inventory,
        });
    }
    if state.score < offer.price {
        return Err(ShopError::InsufficientScore {
            price: offer.price,
            score: state.score,
        });
    }

    state.score -= offer.price;
    state.inventory.push(InventoryItem {
        def: offer.def,
        paid: offer.price,
    });
    state.offers.remove(offer_idx);
    state.add_log(
        &format!("Bought {} for {}", offer.def.name, offer.price),
        false,
    );
    log::debug!("bought {} for {}", offer.def.id, offer.price);
    Ok(offer.def)
}

/// Use the inventory item at `idx`. Returns false for a bad index or after
/// game over.
pub fn use_item(state: &mut GameState, idx: usize) -> bool {
    if state.phase == Phase::GameOver {
        return false;
    }
    let Some(item) = state.inventory.get(idx).copied() else {
        return false;
    };

    let consumed = apply(state, item.def.kind);
    if item.def.one_time || consumed {
        state.inventory.remove(idx);
    }
    true
}

/// Sell the inventory item at `idx` for `round(paid * sell_ratio)`.
pub fn sell_item(state: &mut GameState, idx: usize) -> bool {
    if state.phase == Phase::GameOver || idx >= state.inventory.len() {
        return false;
    }
    let item = state.inventory.remove(idx);
    let credit = item.resale_value(state.config.sell_ratio);
    state.score += credit;
    state.add_log(&format!("Sold {} for {}", item.def.name, credit), false);
    true
}

/// Run a power-up's effect. Returns whether the item was used up.
pub fn apply(state: &mut GameState, kind: PowerUpKind) -> bool {
    match kind {
        PowerUpKind::ExtraLife { lives } => {
            state.lives += lives;
            state.add_log(&format!("+{} lives!", lives), true);
            true
        }
        PowerUpKind::DoublePoints { rounds } => {
            state.effects.push(Effect::timed(EffectKind::Double, rounds));
            state.add_log(&format!("2x points for {} rounds", rounds), true);
            true
        }
        PowerUpKind::TimeBonus { rounds } => {
            state.effects.push(Effect::timed(EffectKind::TimeBonus, rounds));
            state.add_log("Time bonus armed", true);
            true
        }
        PowerUpKind::AddTime => {
            // Nothing to gain at the cap; keep the item.
            if state.time_limit_ms >= state.config.max_time_ms {
                state.add_log("Time limit is already at its maximum", false);
                return false;
            }
            let bonus = state.config.add_time_bonus_ms;
            state.effects.push(Effect::add_time(bonus));
            state.add_log(&format!("+{}ms from the next round", bonus), true);
            true
        }
        PowerUpKind::InstantPoints { points } => {
            state.score += points;
            state.add_log(&format!("+{} points!", points), true);
            true
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::games::math::config::GameConfig;
    use crate::games::math::logic;
    use proptest::prelude::*;

    #[derive(Clone, Debug)]
    enum Cmd {
        Buy(usize),
        Use(usize),
        Sell(usize),
        Answer(bool),
        Tick(u32),
        CloseShop,
    }

    fn arb_cmd() -> impl Strategy<Value = Cmd> {
        prop_oneof![
            (0usize..4).prop_map(Cmd::Buy),
            (0usize..4).prop_map(Cmd::Use),
            (0usize..4).prop_map(Cmd::Sell),
            any::<bool>().prop_map(Cmd::Answer),
            (0u32..80).prop_map(Cmd::Tick),
            Just(Cmd::CloseShop),
        ]
    }

    fn run(state: &mut GameState, cmd: &Cmd) {
        match cmd {
            Cmd::Buy(i) => {
                let _ = buy(state, *i);
            }
            Cmd::Use(i) => {
                use_item(state, *i);
            }
            Cmd::Sell(i) => {
                sell_item(state, *i);
            }
            Cmd::Answer(right) => {
                let text = if *right {
                    state.problem.answer.to_string()
                } else {
                    "?".to_string()
                };
                logic::submit_answer(state, &text);
            }
            Cmd::Tick(n) => logic::tick(state, *n),
            Cmd::CloseShop => {
                logic::close_shop(state);
            }
        }
    }

    proptest! {
        #[test]
        fn prop_inventory_never_exceeds_capacity(
            seed in any::<u64>(),
            cmds in proptest::collection::vec(arb_cmd(), 1..120),
        ) {
            let mut s = GameState::new(GameConfig::default(), seed);
            s.score = 5_000;
            for cmd in &cmds {
                run(&mut s, cmd);
                prop_assert!(s.inventory.len() <= s.config.max_inventory);
            }
        }

        #[test]
        fn prop_failed_buy_changes_nothing(seed in any::<u64>(), score in 0u64..400) {
            let mut s = GameState::new(GameConfig::default(), seed);
            s.round = 4;
            s.config.feedback_delay_ms = 0;
            let answer = s.problem.answer.to_string();
            logic::submit_answer(&mut s, &answer);
            s.score = score;
            for i in 0..s.offers.len() {
                let before = (s.score, s.inventory.len(), s.offers.len());
                if buy(&mut s, i).is_err() {
                    prop_assert_eq!(before, (s.score, s.inventory.len(), s.offers.len()));
                }
            }
        }

        #[test]
        fn prop_lives_zero_iff_game_over_with_items(
            seed in any::<u64>(),
            cmds in proptest::collection::vec(arb_cmd(), 1..120),
        ) {
            let mut s = GameState::new(GameConfig::default(), seed);
            s.score = 1_000;
            for cmd in &cmds {
                run(&mut s, cmd);
                prop_assert_eq!(s.lives == 0, s.phase == Phase::GameOver);
            }
        }
    }
}
