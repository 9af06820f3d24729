//! Reward tier → celebration intensity.
//!
//! This is presentation policy tied to a particular option set, so it lives in
//! configuration rather than in the engine. The host turns a [`Celebration`]
//! into whatever effect it draws.

use serde::{Deserialize, Serialize};

use crate::types::{SpinResult, WeightedOption};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Celebration {
    None,
    Sparkle,
    SideCannons,
    Fireworks,
    Jackpot,
}

impl Celebration {
    /// Numeric intensity, 0 (none) to 4 (jackpot).
    pub fn level(self) -> u8 {
        match self {
            Celebration::None => 0,
            Celebration::Sparkle => 1,
            Celebration::SideCannons => 2,
            Celebration::Fireworks => 3,
            Celebration::Jackpot => 4,
        }
    }
}

/// Caption for a real reward.
pub const REWARD_HEADLINE: &str = "Exclusive Reward";
/// Caption for a consolation slice.
pub const CONSOLATION_HEADLINE: &str = "Session Result";

/// Options with weight at or below `max_weight` get `celebration`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CelebrationTier {
    pub max_weight: f64,
    pub celebration: Celebration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CelebrationPolicy {
    /// Labels that always trigger [`Celebration::Jackpot`], compared case-insensitively.
    pub jackpot_labels: Vec<String>,
    /// Checked rarest-first, i.e. by ascending `max_weight`.
    pub tiers: Vec<CelebrationTier>,
    /// Label fragments marking a consolation slice, matched case-insensitively.
    pub consolation_markers: Vec<String>,
}

impl Default for CelebrationPolicy {
    fn default() -> Self {
        Self {
            jackpot_labels: vec!["100% DISCOUNT".to_string()],
            tiers: vec![
                CelebrationTier { max_weight: 4.0, celebration: Celebration::Fireworks },
                CelebrationTier { max_weight: 7.0, celebration: Celebration::SideCannons },
                CelebrationTier { max_weight: 14.0, celebration: Celebration::Sparkle },
            ],
            consolation_markers: vec!["LUCK".to_string()],
        }
    }
}

impl CelebrationPolicy {
    pub fn celebration_for(&self, option: &WeightedOption) -> Celebration {
        if self
            .jackpot_labels
            .iter()
            .any(|l| l.eq_ignore_ascii_case(option.label.trim()))
        {
            return Celebration::Jackpot;
        }

        let mut tiers: Vec<&CelebrationTier> = self.tiers.iter().collect();
        tiers.sort_by(|a, b| a.max_weight.total_cmp(&b.max_weight));
        tiers
            .into_iter()
            .find(|t| option.weight <= t.max_weight)
            .map(|t| t.celebration)
            .unwrap_or(Celebration::None)
    }

    /// Caption shown above the result label. Decided by label, independent of tier.
    pub fn headline_for(&self, option: &WeightedOption) -> &'static str {
        let label = option.label.to_uppercase();
        if self
            .consolation_markers
            .iter()
            .any(|m| !m.trim().is_empty() && label.contains(&m.trim().to_uppercase()))
        {
            CONSOLATION_HEADLINE
        } else {
            REWARD_HEADLINE
        }
    }

    /// Result payload for display, with the celebration resolved.
    pub fn outcome<'a>(&self, result: &'a SpinResult) -> SpinOutcome<'a> {
        let celebration = self.celebration_for(&result.option);
        SpinOutcome {
            option: &result.option,
            index: result.index,
            timestamp_ms: result.timestamp_ms,
            celebration,
            celebration_level: celebration.level(),
            headline: self.headline_for(&result.option),
        }
    }
}

/// A [`SpinResult`] plus its celebration, serialized as one flat record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinOutcome<'a> {
    pub option: &'a WeightedOption,
    pub index: usize,
    pub timestamp_ms: f64,
    pub celebration: Celebration,
    pub celebration_level: u8,
    pub headline: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_test::{assert_ser_tokens, Token};

    fn opt(label: &str, weight: f64) -> WeightedOption {
        WeightedOption::new("x", label, "#cc9933", weight)
    }

    #[test]
    fn test_default_policy_matches_reward_list() {
        let policy = CelebrationPolicy::default();
        assert_eq!(policy.celebration_for(&opt("100% DISCOUNT", 2.0)), Celebration::Jackpot);
        assert_eq!(policy.celebration_for(&opt("50% DISCOUNT", 4.0)), Celebration::Fireworks);
        assert_eq!(policy.celebration_for(&opt("100 RS CASHBACK", 3.0)), Celebration::Fireworks);
        assert_eq!(policy.celebration_for(&opt("20% DISCOUNT", 7.0)), Celebration::SideCannons);
        assert_eq!(policy.celebration_for(&opt("50 RS CASHBACK", 14.0)), Celebration::Sparkle);
        assert_eq!(policy.celebration_for(&opt("BETTER LUCK NEXT TIME", 70.0)), Celebration::None);
    }

    #[test]
    fn test_jackpot_label_case_insensitive() {
        let policy = CelebrationPolicy::default();
        assert_eq!(policy.celebration_for(&opt("100% discount", 50.0)), Celebration::Jackpot);
    }

    #[test]
    fn test_unsorted_tiers_still_rarest_first() {
        let policy = CelebrationPolicy {
            jackpot_labels: vec![],
            consolation_markers: vec![],
            tiers: vec![
                CelebrationTier { max_weight: 10.0, celebration: Celebration::Sparkle },
                CelebrationTier { max_weight: 1.0, celebration: Celebration::Fireworks },
            ],
        };
        assert_eq!(policy.celebration_for(&opt("a", 0.5)), Celebration::Fireworks);
        assert_eq!(policy.celebration_for(&opt("a", 5.0)), Celebration::Sparkle);
        assert_eq!(policy.celebration_for(&opt("a", 11.0)), Celebration::None);
    }

    #[test]
    fn test_headline_and_level() {
        let policy = CelebrationPolicy::default();
        assert_eq!(policy.headline_for(&opt("BETTER LUCK NEXT TIME", 70.0)), CONSOLATION_HEADLINE);
        assert_eq!(policy.headline_for(&opt("20% DISCOUNT", 7.0)), REWARD_HEADLINE);
        assert_eq!(Celebration::Jackpot.level(), 4);
        assert!(Celebration::Sparkle < Celebration::Jackpot);
    }

    #[test]
    fn test_headline_follows_label_not_tier() {
        let policy = CelebrationPolicy::default();
        // rare but labelled as a consolation
        assert_eq!(policy.celebration_for(&opt("Good luck charm", 1.0)), Celebration::Fireworks);
        assert_eq!(policy.headline_for(&opt("Good luck charm", 1.0)), CONSOLATION_HEADLINE);
        // common with no celebration, still a reward
        assert_eq!(policy.celebration_for(&opt("Free coffee", 90.0)), Celebration::None);
        assert_eq!(policy.headline_for(&opt("Free coffee", 90.0)), REWARD_HEADLINE);

        let custom = CelebrationPolicy {
            consolation_markers: vec!["try again".to_string()],
            ..CelebrationPolicy::default()
        };
        assert_eq!(custom.headline_for(&opt("TRY AGAIN", 50.0)), CONSOLATION_HEADLINE);
        assert_eq!(custom.headline_for(&opt("BETTER LUCK NEXT TIME", 70.0)), REWARD_HEADLINE);
    }

    #[test]
    fn test_outcome_serializes_as_flat_struct() {
        let result = SpinResult {
            option: WeightedOption::new("1", "100% DISCOUNT", "#cc9933", 2.0),
            index: 0,
            timestamp_ms: 1.5,
        };
        let policy = CelebrationPolicy::default();
        assert_ser_tokens(
            &policy.outcome(&result),
            &[
                Token::Struct { name: "SpinOutcome", len: 6 },
                Token::Str("option"),
                Token::Struct { name: "WeightedOption", len: 4 },
                Token::Str("id"),
                Token::Str("1"),
                Token::Str("label"),
                Token::Str("100% DISCOUNT"),
                Token::Str("color"),
                Token::Str("#cc9933"),
                Token::Str("weight"),
                Token::F64(2.0),
                Token::StructEnd,
                Token::Str("index"),
                Token::U64(0),
                Token::Str("timestampMs"),
                Token::F64(1.5),
                Token::Str("celebration"),
                Token::UnitVariant { name: "Celebration", variant: "jackpot" },
                Token::Str("celebrationLevel"),
                Token::U8(4),
                Token::Str("headline"),
                Token::Str(REWARD_HEADLINE),
                Token::StructEnd,
            ],
        );
    }
}
