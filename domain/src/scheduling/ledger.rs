//! Participation ledger: the fairness bookkeeping behind balanced selection
//!
//! The ledger tracks, per participant, how often they spoke, when they last
//! spoke, and how much "imbalance budget" they have been credited because an
//! override gave someone else a turn they were not due.
//!
//! # Scoring
//!
//! ```text
//! current_rate   = participation_count / max(1, total_turns)
//! gap            = target_share - current_rate
//! recency_factor = min(1.0, (total_turns - last_selected_at_turn) / 3.0)
//! score          = gap * 10.0 + recency_factor * 0.5 + imbalance_budget * 0.2
//! ```
//!
//! # Tie-break
//!
//! Highest score wins. Every score within [`SCORE_EPSILON`] of the maximum
//! ties; a tie goes to the participant with the lowest
//! `last_selected_at_turn`, then to the first in candidate (roster) order.
//! Ties are measured against the maximum rather than pairwise, so the winner
//! does not depend on the order candidates are scored in.

use super::target_share::TargetShares;
use serde::Serialize;
use std::collections::HashMap;

const GAP_WEIGHT: f64 = 10.0;
const RECENCY_WEIGHT: f64 = 0.5;
const BUDGET_WEIGHT: f64 = 0.2;
/// Turns after which the recency factor saturates at 1.0
const RECENCY_HORIZON: f64 = 3.0;
/// Budget removed from an overridden participant per override
const BUDGET_DECAY: f64 = 0.1;
/// Scores closer than this are treated as equal
pub const SCORE_EPSILON: f64 = 1e-9;

/// Per-participant fairness state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticipantStats {
    pub target_share: f64,
    pub participation_count: u64,
    pub last_selected_at_turn: u64,
    pub imbalance_budget: f64,
}

impl ParticipantStats {
    fn new(target_share: f64) -> Self {
        Self {
            target_share,
            participation_count: 0,
            last_selected_at_turn: 0,
            imbalance_budget: 0.0,
        }
    }
}

/// Winner of a scoring round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    pub name: String,
    pub score: f64,
}

/// Fairness bookkeeping for one conversation.
#[derive(Debug, Clone)]
pub struct ParticipationLedger {
    order: Vec<String>,
    stats: HashMap<String, ParticipantStats>,
    total_turns: u64,
}

impl ParticipationLedger {
    pub fn new(shares: &TargetShares) -> Self {
        let order: Vec<String> = shares.iter().map(|(name, _)| name.to_string()).collect();
        let stats = shares
            .iter()
            .map(|(name, share)| (name.to_string(), ParticipantStats::new(share)))
            .collect();
        Self {
            order,
            stats,
            total_turns: 0,
        }
    }

    /// Advance the turn counter, returning the new turn number.
    pub fn begin_turn(&mut self) -> u64 {
        self.total_turns += 1;
        self.total_turns
    }

    pub fn total_turns(&self) -> u64 {
        self.total_turns
    }

    pub fn contains(&self, name: &str) -> bool {
        self.stats.contains_key(name)
    }

    pub fn stats(&self, name: &str) -> Option<&ParticipantStats> {
        self.stats.get(name)
    }

    pub fn participation_count(&self, name: &str) -> u64 {
        self.stats.get(name).map_or(0, |s| s.participation_count)
    }

    pub fn imbalance_budget(&self, name: &str) -> f64 {
        self.stats.get(name).map_or(0.0, |s| s.imbalance_budget)
    }

    /// Fraction of all turns so far that went to `name`.
    pub fn current_rate(&self, name: &str) -> f64 {
        let denominator = self.total_turns.max(1) as f64;
        self.participation_count(name) as f64 / denominator
    }

    /// Priority score for `name`, or `None` if the name is unknown.
    pub fn score(&self, name: &str) -> Option<f64> {
        let stats = self.stats.get(name)?;
        let gap = stats.target_share - self.current_rate(name);
        let turns_since = self.total_turns.saturating_sub(stats.last_selected_at_turn);
        let recency_factor = (turns_since as f64 / RECENCY_HORIZON).min(1.0);
        Some(
            gap * GAP_WEIGHT
                + recency_factor * RECENCY_WEIGHT
                + stats.imbalance_budget * BUDGET_WEIGHT,
        )
    }

    /// Pick the highest-scoring known candidate.
    ///
    /// Unknown names are ignored. Returns `None` when no candidate is known.
    pub fn best_candidate<'a, I>(&self, candidates: I) -> Option<ScoredCandidate>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let scored: Vec<(&str, f64, u64)> = candidates
            .into_iter()
            .filter_map(|name| {
                let stats = self.stats.get(name)?;
                Some((name, self.score(name)?, stats.last_selected_at_turn))
            })
            .collect();

        pick_winner(&scored).map(|(name, score)| ScoredCandidate {
            name: name.to_string(),
            score,
        })
    }

    /// Count a turn for `name` at the current turn number.
    ///
    /// Returns `false` (and changes nothing) if the name is unknown.
    pub fn record_selection(&mut self, name: &str) -> bool {
        let turn = self.total_turns;
        match self.stats.get_mut(name) {
            Some(stats) => {
                stats.participation_count += 1;
                stats.last_selected_at_turn = turn;
                true
            }
            None => false,
        }
    }

    /// Bank the fairness debt created by an override in favour of `overridden`.
    ///
    /// If `overridden` is now above its target share, the excess is credited
    /// to every other participant's imbalance budget in proportion to their
    /// target shares. The overridden participant's own budget decays by 0.1,
    /// never below zero.
    pub fn apply_override_adjustment(&mut self, overridden: &str) {
        let Some(stats) = self.stats.get(overridden) else {
            return;
        };
        let target = stats.target_share;
        let current_rate = self.current_rate(overridden);

        if current_rate > target {
            let excess = current_rate - target;
            let others_total: f64 = self
                .stats
                .iter()
                .filter(|(name, _)| name.as_str() != overridden)
                .map(|(_, s)| s.target_share)
                .sum();

            if others_total > 0.0 {
                for (name, other) in self.stats.iter_mut() {
                    if name != overridden {
                        other.imbalance_budget += excess * (other.target_share / others_total);
                    }
                }
            }
        }

        if let Some(stats) = self.stats.get_mut(overridden) {
            stats.imbalance_budget = (stats.imbalance_budget - BUDGET_DECAY).max(0.0);
        }
    }

    /// Zero every counter and budget.
    pub fn reset(&mut self) {
        self.total_turns = 0;
        for stats in self.stats.values_mut() {
            stats.participation_count = 0;
            stats.last_selected_at_turn = 0;
            stats.imbalance_budget = 0.0;
        }
    }

    /// `(name, stats)` pairs in roster order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParticipantStats)> {
        self.order
            .iter()
            .filter_map(|name| self.stats.get(name).map(|s| (name.as_str(), s)))
    }

    /// Whether every counter is back at its initial value
    pub fn is_pristine(&self) -> bool {
        self.total_turns == 0
            && self.stats.values().all(|s| {
                s.participation_count == 0
                    && s.last_selected_at_turn == 0
                    && s.imbalance_budget == 0.0
            })
    }
}

/// Resolve `(name, score, last_selected_at_turn)` rows to a winner.
///
/// Every row within [`SCORE_EPSILON`] of the maximum score is in the tie
/// set, so the result does not depend on the order rows were scored in.
/// Within the tie set the lowest `last_selected_at_turn` wins, then the
/// earliest row.
fn pick_winner<'a>(scored: &[(&'a str, f64, u64)]) -> Option<(&'a str, f64)> {
    let max = scored
        .iter()
        .map(|(_, score, _)| *score)
        .fold(f64::NEG_INFINITY, f64::max);

    scored
        .iter()
        .filter(|(_, score, _)| max - *score <= SCORE_EPSILON)
        .min_by_key(|(_, _, last_selected)| *last_selected)
        .map(|(name, score, _)| (*name, *score))
}
