//! Card evaluation heuristic.

use std::cmp::Ordering;

use super::config::BotConfig;
use crate::cards::CardInstance;

/// Heuristic value of a card: `attack + health - cost_weight * cost`.
#[must_use]
pub fn score(card: &CardInstance, config: &BotConfig) -> f64 {
    (card.attack + card.health) as f64 - config.cost_weight * card.cost as f64
}

/// Order two cards by score, breaking ties by instance id so plans are
/// deterministic.
#[must_use]
pub fn by_score(a: &CardInstance, b: &CardInstance, config: &BotConfig) -> Ordering {
    score(a, config)
        .total_cmp(&score(b, config))
        .then_with(|| a.id.cmp(&b.id))
}

/// Lowest-scoring card, if any.
pub fn weakest<'a>(
    cards: impl IntoIterator<Item = &'a CardInstance>,
    config: &BotConfig,
) -> Option<&'a CardInstance> {
    cards.into_iter().min_by(|a, b| by_score(a, b, config))
}
