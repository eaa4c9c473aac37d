//! Active modifiers and their per-round expiry.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum EffectKind {
    /// Points ×2 on a correct answer.
    Double,
    /// Correct answer also pays `ms_left / 10`.
    TimeBonus,
    /// One-shot raise of the time limit, taken at next round setup.
    AddTime,
}

impl EffectKind {
    pub fn label(&self) -> &'static str {
        match self {
            EffectKind::Double => "2x",
            EffectKind::TimeBonus => "Time bonus",
            EffectKind::AddTime => "+Time",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Effect {
    pub kind: EffectKind,
    /// `None` for one-shot effects that only leave the ledger via [`EffectLedger::take`].
    pub rounds_left: Option<u32>,
    pub bonus_ms: Option<u32>,
}

impl Effect {
    pub fn timed(kind: EffectKind, rounds: u32) -> Self {
        Self {
            kind,
            rounds_left: Some(rounds),
            bonus_ms: None,
        }
    }

    pub fn add_time(bonus_ms: u32) -> Self {
        Self {
            kind: EffectKind::AddTime,
            rounds_left: None,
            bonus_ms: Some(bonus_ms),
        }
    }
}

/// Ordered list of active effects. Duplicates of the same kind are allowed
/// and decay independently.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct EffectLedger {
    effects: Vec<Effect>,
}

impl EffectLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    pub fn has(&self, kind: EffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    /// Remove and return the first effect of `kind`.
    pub fn take(&mut self, kind: EffectKind) -> Option<Effect> {
        let idx = self.effects.iter().position(|e| e.kind == kind)?;
        Some(self.effects.remove(idx))
    }

    /// Round boundary: count timed effects down and drop the ones that hit 0.
    /// Effects without a counter are left alone.
    pub fn decay(&mut self) {
        for e in &mut self.effects {
            if let Some(n) = e.rounds_left.as_mut() {
                *n = n.saturating_sub(1);
            }
        }
        self.effects.retain(|e| e.rounds_left.map_or(true, |n| n >= 1));
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decay_counts_down_and_purges() {
        let mut ledger = EffectLedger::new();
        ledger.push(Effect::timed(EffectKind::Double, 2));
        ledger.decay();
        assert_eq!(ledger.iter().next().unwrap().rounds_left, Some(1));
        assert!(ledger.has(EffectKind::Double));
        ledger.decay();
        assert!(!ledger.has(EffectKind::Double));
        assert!(ledger.is_empty());
    }

    #[test]
    fn decay_leaves_one_shot_effects() {
        let mut ledger = EffectLedger::new();
        ledger.push(Effect::add_time(500));
        for _ in 0..5 {
            ledger.decay();
        }
        assert!(ledger.has(EffectKind::AddTime));
    }

    #[test]
    fn take_removes_only_first_match() {
        let mut ledger = EffectLedger::new();
        ledger.push(Effect::add_time(500));
        ledger.push(Effect::timed(EffectKind::Double, 1));
        ledger.push(Effect::add_time(300));

        let taken = ledger.take(EffectKind::AddTime).unwrap();
        assert_eq!(taken.bonus_ms, Some(500));
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.take(EffectKind::AddTime).unwrap().bonus_ms, Some(300));
        assert!(ledger.take(EffectKind::AddTime).is_none());
    }

    #[test]
    fn duplicates_decay_independently() {
        let mut ledger = EffectLedger::new();
        ledger.push(Effect::timed(EffectKind::Double, 2));
        ledger.decay();
        ledger.push(Effect::timed(EffectKind::Double, 2));
        ledger.decay();
        // first expired, second has one round left
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.iter().next().unwrap().rounds_left, Some(1));
    }

    #[test]
    fn zero_round_effect_purged_on_first_decay() {
        let mut ledger = EffectLedger::new();
        ledger.push(Effect::timed(EffectKind::TimeBonus, 0));
        ledger.decay();
        assert!(ledger.is_empty());
    }
}
