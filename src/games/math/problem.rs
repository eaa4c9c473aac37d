//! Arithmetic problem generation, scaled by difficulty.

use rand::Rng;
use serde::Serialize;

/// Largest second operand regardless of difficulty (keeps `*` mental-math sized).
pub const MAX_B: i64 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Op {
    Add,
    Sub,
    Mul,
}

impl Op {
    pub fn symbol(&self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
            Op::Mul => '*',
        }
    }

    pub fn apply(&self, a: i64, b: i64) -> i64 {
        match self {
            Op::Add => a + b,
            Op::Sub => a - b,
            Op::Mul => a * b,
        }
    }

    /// Operators unlocked at `difficulty`: `+` always, `-` from 2, `*` from 3.
    pub fn unlocked(difficulty: u32) -> &'static [Op] {
        match difficulty {
            0 | 1 => &[Op::Add],
            2 => &[Op::Add, Op::Sub],
            _ => &[Op::Add, Op::Sub, Op::Mul],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Problem {
    pub a: i64,
    pub b: i64,
    pub op: Op,
    /// Exact result. May be negative for subtraction.
    pub answer: i64,
}

impl Problem {
    pub fn new(a: i64, b: i64, op: Op) -> Self {
        Self {
            a,
            b,
            op,
            answer: op.apply(a, b),
        }
    }

    /// "a op b = ?"
    pub fn question(&self) -> String {
        format!("{} {} {} = ?", self.a, self.op.symbol(), self.b)
    }
}

/// Upper operand bound for `a` at a difficulty.
pub fn operand_max(difficulty: u32) -> i64 {
    5 + 5 * difficulty.max(1) as i64
}

/// Generate a problem: `a` in `1..=max`, `b` in `1..=min(max, 10)`, operator
/// uniform over the unlocked set.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, difficulty: u32) -> Problem {
    let max = operand_max(difficulty);
    let a = rng.random_range(1..=max);
    let b = rng.random_range(1..=max.min(MAX_B));
    let ops = Op::unlocked(difficulty);
    let op = ops[rng.random_range(0..ops.len())];
    Problem::new(a, b, op)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    proptest! {
        #[test]
        fn prop_op_within_unlocked_set(seed in any::<u64>(), difficulty in 1u32..20) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let p = generate(&mut rng, difficulty);
            prop_assert!(Op::unlocked(difficulty).contains(&p.op));
        }

        #[test]
        fn prop_answer_matches_operator(seed in any::<u64>(), difficulty in 1u32..20) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let p = generate(&mut rng, difficulty);
            prop_assert_eq!(p.answer, p.op.apply(p.a, p.b));
        }

        #[test]
        fn prop_operands_in_range(seed in any::<u64>(), difficulty in 1u32..20) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let p = generate(&mut rng, difficulty);
            let max = operand_max(difficulty);
            prop_assert!((1..=max).contains(&p.a), "a={} max={}", p.a, max);
            prop_assert!((1..=max.min(MAX_B)).contains(&p.b), "b={}", p.b);
        }
    }
}
