//! Power-up catalog and shop offer sampling.
//!
//! The catalog is purely declarative. What a power-up does when used lives
//! in [`super::economy::apply`], dispatched on [`PowerUpKind`].

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;
use serde::Serialize;

use super::config::GameConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Rarity {
    Common,
    Rare,
    Epic,
}

impl Rarity {
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
        }
    }
}

/// What a power-up does. Add a variant here and an arm in `economy::apply`
/// to extend the shop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum PowerUpKind {
    /// Grant lives immediately.
    ExtraLife { lives: u32 },
    /// Double points for the next `rounds` rounds.
    DoublePoints { rounds: u32 },
    /// Add `ms_left / 10` to the next correct answer.
    TimeBonus { rounds: u32 },
    /// Raise the time limit once, starting next round.
    AddTime,
    /// Grant score immediately.
    InstantPoints { points: u64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PowerUpDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub base_price: u64,
    pub rarity: Rarity,
    /// Removed from inventory after one use regardless of what the effect reports.
    pub one_time: bool,
    pub kind: PowerUpKind,
}

pub const CATALOG: &[PowerUpDef] = &[
    PowerUpDef {
        id: "extra_life",
        name: "+2 Lives",
        description: "Adds two lives right away.",
        base_price: 120,
        rarity: Rarity::Rare,
        one_time: true,
        kind: PowerUpKind::ExtraLife { lives: 2 },
    },
    PowerUpDef {
        id: "double_2",
        name: "2x Points (2 rounds)",
        description: "Doubles points for the next two rounds.",
        base_price: 150,
        rarity: Rarity::Epic,
        one_time: false,
        kind: PowerUpKind::DoublePoints { rounds: 2 },
    },
    PowerUpDef {
        id: "time_bonus_points",
        name: "Time Bonus",
        description: "Next correct answer also pays ms left / 10.",
        base_price: 90,
        rarity: Rarity::Common,
        one_time: false,
        kind: PowerUpKind::TimeBonus { rounds: 1 },
    },
    PowerUpDef {
        id: "instant_points",
        name: "+200 Points",
        description: "Instantly adds 200 points.",
        base_price: 200,
        rarity: Rarity::Rare,
        one_time: true,
        kind: PowerUpKind::InstantPoints { points: 200 },
    },
    PowerUpDef {
        id: "add_time_ms",
        name: "+500ms",
        description: "Raises the time limit by 500ms from the next round.",
        base_price: 70,
        rarity: Rarity::Common,
        one_time: true,
        kind: PowerUpKind::AddTime,
    },
];

pub fn find(id: &str) -> Option<&'static PowerUpDef> {
    CATALOG.iter().find(|d| d.id == id)
}

/// A power-up on sale with its jittered price.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ShopOffer {
    pub def: PowerUpDef,
    pub price: u64,
}

/// Catalog base price jittered by `U[low, high)`, rounded, floored at `min_offer_price`.
pub fn jitter_price<R: Rng + ?Sized>(rng: &mut R, base: u64, config: &GameConfig) -> u64 {
    let factor = rng.random_range(config.price_jitter_low..config.price_jitter_high);
    let price = (base as f64 * factor).round() as u64;
    price.max(config.min_offer_price as u64)
}

/// Roll a fresh set of 1..=`max_offers` offers, weighted by rarity.
/// The same definition may appear more than once.
pub fn roll_offers<R: Rng + ?Sized>(rng: &mut R, config: &GameConfig) -> Vec<ShopOffer> {
    let weights = CATALOG
        .iter()
        .map(|d| config.rarity_weights.weight(d.rarity));
    let dist = match WeightedIndex::new(weights) {
        Ok(d) => d,
        Err(e) => {
            log::warn!("Cannot roll shop offers: {}", e);
            return Vec::new();
        }
    };

    let count = rng.random_range(1..=config.max_offers);
    (0..count)
        .map(|_| {
            let def = CATALOG[dist.sample(rng)];
            ShopOffer {
                def,
                price: jitter_price(rng, def.base_price, config),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn catalog_ids_unique() {
        for (i, a) in CATALOG.iter().enumerate() {
            for b in &CATALOG[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn find_by_id() {
        assert_eq!(find("extra_life").unwrap().base_price, 120);
        assert!(find("nope").is_none());
    }

    #[test]
    fn offers_between_one_and_three() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let offers = roll_offers(&mut rng, &config);
            assert!((1..=3).contains(&offers.len()));
            seen[offers.len()] = true;
        }
        assert!(seen[1] && seen[2] && seen[3]);
    }

    #[test]
    fn epic_only_weights_yield_epic_items() {
        let mut config = GameConfig::default();
        config.rarity_weights.common = 0;
        config.rarity_weights.rare = 0;
        config.rarity_weights.epic = 1;
        let mut rng = Pcg32::seed_from_u64(9);
        for _ in 0..50 {
            for offer in roll_offers(&mut rng, &config) {
                assert_eq!(offer.def.rarity, Rarity::Epic);
            }
        }
    }

    #[test]
    fn zero_weights_yield_no_offers() {
        let mut config = GameConfig::default();
        config.rarity_weights.common = 0;
        config.rarity_weights.rare = 0;
        config.rarity_weights.epic = 0;
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(roll_offers(&mut rng, &config).is_empty());
    }

    #[test]
    fn cheap_items_floored_at_minimum() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(4);
        for _ in 0..50 {
            assert_eq!(jitter_price(&mut rng, 1, &config), 10);
        }
    }
}
