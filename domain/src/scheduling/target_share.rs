//! Target participation shares
//!
//! A target share is the long-run fraction of turns a participant should get.
//! Shares are either supplied explicitly (and validated) or derived from the
//! roster size and the default participant.

use crate::core::error::SchedulerError;
use crate::core::participant::{Participant, Roster};
use std::collections::HashMap;

/// Allowed distance of the share total from 1.0
pub const SHARE_TOLERANCE: f64 = 0.01;

/// Cap on the default participant's derived share
const DEFAULT_SHARE_CAP: f64 = 0.4;

/// Validated per-participant target shares, stored in roster order.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetShares {
    shares: Vec<(String, f64)>,
}

impl TargetShares {
    /// Derive shares automatically.
    ///
    /// The default participant gets `min(0.4, 2/N)`; the rest is split evenly
    /// among the other `N - 1` participants. A single-member roster gives the
    /// default everything.
    ///
    /// `default_name` must already be resolved against the roster.
    pub fn derive<P: Participant>(roster: &Roster<P>, default_name: &str) -> Self {
        let n = roster.len();
        if n == 1 {
            return Self {
                shares: roster.names().map(|name| (name.to_string(), 1.0)).collect(),
            };
        }

        let default_share = DEFAULT_SHARE_CAP.min(2.0 / n as f64);
        let other_share = (1.0 - default_share) / (n - 1) as f64;

        let shares = roster
            .names()
            .map(|name| {
                let share = if name == default_name {
                    default_share
                } else {
                    other_share
                };
                (name.to_string(), share)
            })
            .collect();

        Self { shares }
    }

    /// Validate an explicit share map against the roster.
    ///
    /// Every key must name a roster member, every value must be finite and
    /// non-negative, and the total must be within [`SHARE_TOLERANCE`] of 1.0.
    /// Roster members missing from the map get a share of 0.0.
    pub fn validated<P: Participant>(
        roster: &Roster<P>,
        explicit: &HashMap<String, f64>,
    ) -> Result<Self, SchedulerError> {
        let mut keys: Vec<&String> = explicit.keys().collect();
        keys.sort();

        for name in &keys {
            if !roster.contains(name) {
                return Err(SchedulerError::UnknownTargetShareParticipant(
                    (*name).clone(),
                ));
            }
            let value = explicit[*name];
            if !value.is_finite() || value < 0.0 {
                return Err(SchedulerError::InvalidTargetShare {
                    name: (*name).clone(),
                    value,
                });
            }
        }

        let sum: f64 = explicit.values().sum();
        if (sum - 1.0).abs() > SHARE_TOLERANCE {
            return Err(SchedulerError::TargetShareSum {
                sum,
                tolerance: SHARE_TOLERANCE,
            });
        }

        let shares = roster
            .names()
            .map(|name| (name.to_string(), explicit.get(name).copied().unwrap_or(0.0)))
            .collect();

        Ok(Self { shares })
    }

    /// Share for `name`, 0.0 if unknown
    pub fn get(&self, name: &str) -> f64 {
        self.shares
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, share)| *share)
            .unwrap_or(0.0)
    }

    /// `(name, share)` pairs in roster order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.shares.iter().map(|(name, share)| (name.as_str(), *share))
    }

    pub fn total(&self) -> f64 {
        self.shares.iter().map(|(_, share)| share).sum()
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::participant::NamedParticipant;

    fn roster(names: &[&str]) -> Roster<NamedParticipant> {
        Roster::new(names.iter().map(|n| NamedParticipant::new(*n)).collect()).unwrap()
    }

    fn shares(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(n, s)| (n.to_string(), *s)).collect()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_derive_three_participants() {
        let shares = TargetShares::derive(&roster(&["PM", "Analyst", "Critic"]), "PM");
        assert!(approx(shares.get("PM"), 0.4));
        assert!(approx(shares.get("Analyst"), 0.3));
        assert!(approx(shares.get("Critic"), 0.3));
        assert!(approx(shares.total(), 1.0));
    }

    #[test]
    fn test_derive_large_roster_uses_two_over_n() {
        let names = ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"];
        let shares = TargetShares::derive(&roster(&names), "C");
        assert!(approx(shares.get("C"), 0.2));
        assert!(approx(shares.get("A"), 0.8 / 9.0));
        assert!(approx(shares.total(), 1.0));
    }

    #[test]
    fn test_derive_two_participants_caps_default() {
        let shares = TargetShares::derive(&roster(&["PM", "Critic"]), "PM");
        assert!(approx(shares.get("PM"), 0.4));
        assert!(approx(shares.get("Critic"), 0.6));
    }

    #[test]
    fn test_derive_single_participant() {
        let shares = TargetShares::derive(&roster(&["Solo"]), "Solo");
        assert!(approx(shares.get("Solo"), 1.0));
    }

    #[test]
    fn test_validated_accepts_within_tolerance() {
        let roster = roster(&["A", "B", "C"]);
        for total_c in [0.195, 0.2, 0.205] {
            let explicit = shares(&[("A", 0.5), ("B", 0.3), ("C", total_c)]);
            assert!(TargetShares::validated(&roster, &explicit).is_ok());
        }
    }

    #[test]
    fn test_validated_rejects_bad_sums() {
        let roster = roster(&["A", "B", "C"]);

        let low = shares(&[("A", 0.25), ("B", 0.15), ("C", 0.1)]);
        assert!(matches!(
            TargetShares::validated(&roster, &low),
            Err(SchedulerError::TargetShareSum { .. })
        ));

        let high = shares(&[("A", 0.75), ("B", 0.45), ("C", 0.3)]);
        assert!(matches!(
            TargetShares::validated(&roster, &high),
            Err(SchedulerError::TargetShareSum { .. })
        ));
    }

    #[test]
    fn test_validated_rejects_unknown_participant() {
        let roster = roster(&["A", "B"]);
        let explicit = shares(&[("A", 0.5), ("Oracle", 0.5)]);
        assert_eq!(
            TargetShares::validated(&roster, &explicit).unwrap_err(),
            SchedulerError::UnknownTargetShareParticipant("Oracle".to_string())
        );
    }

    #[test]
    fn test_validated_rejects_negative_and_nan() {
        let roster = roster(&["A", "B"]);

        let negative = shares(&[("A", 1.5), ("B", -0.5)]);
        assert!(matches!(
            TargetShares::validated(&roster, &negative),
            Err(SchedulerError::InvalidTargetShare { .. })
        ));

        let nan = shares(&[("A", 1.0), ("B", f64::NAN)]);
        assert!(matches!(
            TargetShares::validated(&roster, &nan),
            Err(SchedulerError::InvalidTargetShare { .. })
        ));
    }

    #[test]
    fn test_validated_fills_missing_with_zero() {
        let roster = roster(&["A", "B", "C"]);
        let explicit = shares(&[("A", 0.6), ("B", 0.4)]);
        let shares = TargetShares::validated(&roster, &explicit).unwrap();
        assert_eq!(shares.get("C"), 0.0);
        assert_eq!(
            shares.iter().map(|(n, _)| n).collect::<Vec<_>>(),
            vec!["A", "B", "C"]
        );
    }
}
