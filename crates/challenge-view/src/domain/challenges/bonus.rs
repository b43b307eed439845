//! Checkpoint / reliability bonus classification.

use challenge_view_core::Bonus;

use super::Challenge;

/// Prize pool discriminator carrying checkpoint bonuses.
const CHECKPOINT_KIND: &str = "checkpoint";

/// Classify the single bonus shown for a challenge.
///
/// A checkpoint pool with prizes always beats the reliability bonus, and the
/// reliability bonus only shows when its rounded value is non-zero.
pub fn classify_bonus(challenge: &Challenge) -> Bonus {
    let checkpoint = challenge
        .prize_sets
        .iter()
        .find(|set| set.kind == CHECKPOINT_KIND)
        .filter(|set| !set.prizes.is_empty());
    if let Some(set) = checkpoint {
        return Bonus::Checkpoint {
            amount: set.prizes[0].value,
            count: set.prizes.len(),
        };
    }

    match challenge.reliability_bonus {
        Some(amount) if amount.round() != 0.0 => Bonus::Reliability { amount },
        _ => Bonus::None,
    }
}
