//! The fixed issuer-network rule table and prefix matching.
//!
//! Rules are evaluated strictly in table order and the first rule whose prefix
//! and length both fit wins. Rules with longer prefixes come before rules whose
//! prefixes they overlap, so a `1800` number of length 15 is JCB before the
//! generic fallback is ever consulted. Overlaps are resolved by order only,
//! never by how well the length fits: real network ranges are ambiguous (the
//! `2221`-`2720` MasterCard range sits numerically between other issuers'
//! prefixes) and the table keeps that ambiguity visible.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::policy::ClassificationMode;

/// An issuer-network family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Network {
    /// Japan Credit Bureau, including the legacy 15-digit `1800`/`2131` ranges.
    #[serde(rename = "JCB")]
    Jcb,
    /// Diners Club International and Carte Blanche.
    #[serde(rename = "Diners Club")]
    DinersClub,
    /// Discover, including the `644`-`649` and `65` ranges.
    #[serde(rename = "Discover")]
    Discover,
    /// MasterCard, both the `51`-`55` and the `2221`-`2720` series.
    #[serde(rename = "MasterCard")]
    MasterCard,
    /// American Express.
    #[serde(rename = "American Express")]
    AmericanExpress,
    /// Visa.
    #[serde(rename = "Visa")]
    Visa,
    /// Any 13-19 digit number; only produced in lenient mode.
    #[serde(rename = "Generic")]
    Generic,
}

impl Network {
    /// Display name of the network.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Jcb => "JCB",
            Self::DinersClub => "Diners Club",
            Self::Discover => "Discover",
            Self::MasterCard => "MasterCard",
            Self::AmericanExpress => "American Express",
            Self::Visa => "Visa",
            Self::Generic => "Generic",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A matcher for the leading digits of a card number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixPattern {
    /// The number starts with exactly these digits.
    Literal(&'static str),
    /// The first `low.len()` digits, read as a number, lie in `low..=high`.
    ///
    /// Both bounds must have the same number of digits.
    Range {
        low: &'static str,
        high: &'static str,
    },
}

impl PrefixPattern {
    /// Number of leading digits this pattern inspects.
    #[must_use]
    pub fn width(self) -> usize {
        match self {
            Self::Literal(lit) => lit.len(),
            Self::Range { low, .. } => low.len(),
        }
    }

    /// Whether `digits` starts with this prefix.
    ///
    /// Equal-length ASCII digit strings order the same way as the numbers they
    /// spell, so range checks compare the string slices directly.
    #[must_use]
    pub fn matches(self, digits: &str) -> bool {
        match self {
            Self::Literal(lit) => digits.starts_with(lit),
            Self::Range { low, high } => digits
                .get(..low.len())
                .is_some_and(|head| low <= head && head <= high),
        }
    }
}

impl fmt::Display for PrefixPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(lit) => f.write_str(lit),
            Self::Range { low, high } => write!(f, "{low}-{high}"),
        }
    }
}

/// One row of the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkRule {
    /// Human-readable label distinguishing rules of the same network.
    pub label: &'static str,
    /// Network reported when this rule wins.
    pub network: Network,
    /// Accepted prefixes; any one of them is enough.
    pub prefixes: &'static [PrefixPattern],
    /// Accepted digit counts.
    pub lengths: &'static [usize],
}

impl NetworkRule {
    /// The network name reported for this rule.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.network.name()
    }

    /// Whether this is the generic fallback rule.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.network == Network::Generic
    }

    /// Whether `digits` starts with one of this rule's prefixes.
    #[must_use]
    pub fn matches_prefix(&self, digits: &str) -> bool {
        self.prefixes.iter().any(|p| p.matches(digits))
    }

    /// Whether `len` is one of this rule's allowed lengths.
    #[must_use]
    pub fn allows_length(&self, len: usize) -> bool {
        self.lengths.contains(&len)
    }

    /// Whether both prefix and length fit.
    #[must_use]
    pub fn accepts(&self, digits: &str) -> bool {
        self.allows_length(digits.len()) && self.matches_prefix(digits)
    }

    /// Widest prefix in this rule.
    #[must_use]
    pub fn specificity(&self) -> usize {
        self.prefixes
            .iter()
            .map(|p| p.width())
            .max()
            .unwrap_or(0)
    }
}

const fn lit(s: &'static str) -> PrefixPattern {
    PrefixPattern::Literal(s)
}

const fn range(low: &'static str, high: &'static str) -> PrefixPattern {
    PrefixPattern::Range { low, high }
}

/// The rule table in priority order. The generic fallback is always last.
pub static RULES: &[NetworkRule] = &[
    NetworkRule {
        label: "JCB (special)",
        network: Network::Jcb,
        prefixes: &[lit("1800"), lit("2131")],
        lengths: &[15],
    },
    NetworkRule {
        label: "JCB (range)",
        network: Network::Jcb,
        prefixes: &[lit("35")],
        lengths: &[16, 17, 18, 19],
    },
    NetworkRule {
        label: "Diners Club",
        network: Network::DinersClub,
        prefixes: &[lit("36"), range("300", "305"), range("38", "39")],
        lengths: &[14],
    },
    NetworkRule {
        label: "Discover",
        network: Network::Discover,
        prefixes: &[lit("6011"), range("644", "649"), lit("65")],
        lengths: &[16],
    },
    NetworkRule {
        label: "MasterCard",
        network: Network::MasterCard,
        prefixes: &[range("51", "55"), range("2221", "2720")],
        lengths: &[16],
    },
    NetworkRule {
        label: "American Express",
        network: Network::AmericanExpress,
        prefixes: &[lit("34"), lit("37")],
        lengths: &[15],
    },
    NetworkRule {
        label: "Visa",
        network: Network::Visa,
        prefixes: &[lit("4")],
        lengths: &[13, 16],
    },
    NetworkRule {
        label: "Generic fallback",
        network: Network::Generic,
        prefixes: &[range("0", "9")],
        lengths: &[13, 14, 15, 16, 17, 18, 19],
    },
];

/// Find the first rule, in priority order, that accepts `digits`.
///
/// `digits` must already be normalized (ASCII digits only). In
/// [`ClassificationMode::Strict`] the generic fallback is skipped.
#[must_use]
pub fn classify(digits: &str, mode: ClassificationMode) -> Option<&'static NetworkRule> {
    RULES
        .iter()
        .filter(|rule| mode == ClassificationMode::Lenient || !rule.is_fallback())
        .find(|rule| rule.accepts(digits))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn network_of(digits: &str) -> Option<Network> {
        classify(digits, ClassificationMode::Lenient).map(|r| r.network)
    }

    fn truncated(bound: &str, width: usize) -> &str {
        &bound[..width]
    }

    fn bounds(p: PrefixPattern) -> (&'static str, &'static str) {
        match p {
            PrefixPattern::Literal(lit) => (lit, lit),
            PrefixPattern::Range { low, high } => (low, high),
        }
    }

    fn prefixes_overlap(a: PrefixPattern, b: PrefixPattern) -> bool {
        let width = a.width().min(b.width());
        let (a_lo, a_hi) = bounds(a);
        let (b_lo, b_hi) = bounds(b);
        truncated(a_lo, width) <= truncated(b_hi, width)
            && truncated(b_lo, width) <= truncated(a_hi, width)
    }

    // ---- table shape ----

    #[test]
    fn test_table_ranges_are_well_formed() {
        for rule in RULES {
            assert!(!rule.prefixes.is_empty(), "{} has no prefixes", rule.label);
            assert!(!rule.lengths.is_empty(), "{} has no lengths", rule.label);
            for p in rule.prefixes {
                let (lo, hi) = bounds(*p);
                assert_eq!(lo.len(), hi.len(), "{}: {p}", rule.label);
                assert!(lo <= hi, "{}: {p}", rule.label);
                assert!(lo.bytes().all(|b| b.is_ascii_digit()), "{}: {p}", rule.label);
            }
            for len in rule.lengths {
                assert!((13..=19).contains(len), "{}: length {len}", rule.label);
            }
        }
    }

    #[test]
    fn test_fallback_is_last_and_unique() {
        let fallbacks: Vec<usize> = RULES
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_fallback())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(fallbacks, vec![RULES.len() - 1]);
    }

    #[test]
    fn test_overlapping_rules_are_ordered_most_specific_first() {
        for (i, earlier) in RULES.iter().enumerate() {
            for later in &RULES[i + 1..] {
                let lengths_overlap = earlier.lengths.iter().any(|l| later.allows_length(*l));
                for a in earlier.prefixes {
                    for b in later.prefixes {
                        if lengths_overlap && prefixes_overlap(*a, *b) {
                            assert!(
                                a.width() >= b.width(),
                                "{} ({a}) overlaps {} ({b}) but is less specific",
                                earlier.label,
                                later.label
                            );
                        }
                    }
                }
            }
        }
    }

    // ---- prefix matching ----

    #[test]
    fn test_literal_prefix() {
        assert!(lit("6011").matches("6011000000000004"));
        assert!(!lit("6011").matches("6012000000000004"));
        assert!(!lit("6011").matches("601"));
    }

    #[test]
    fn test_range_prefix_bounds_inclusive() {
        let mc = range("2221", "2720");
        assert!(mc.matches("2221000000000009"));
        assert!(mc.matches("2720990000000000"));
        assert!(mc.matches("2500000000000001"));
        assert!(!mc.matches("2220990000000000"));
        assert!(!mc.matches("2721000000000000"));
        assert!(!mc.matches("222"));
    }

    #[test]
    fn test_single_digit_range() {
        let any = range("0", "9");
        assert!(any.matches("0"));
        assert!(any.matches("9123"));
        assert!(!any.matches(""));
    }

    #[test]
    fn test_prefix_display() {
        assert_eq!(lit("34").to_string(), "34");
        assert_eq!(range("51", "55").to_string(), "51-55");
    }

    // ---- classification ----

    #[test]
    fn test_classify_named_networks() {
        assert_eq!(network_of("4111111111111111"), Some(Network::Visa));
        assert_eq!(network_of("4222222222222"), Some(Network::Visa));
        assert_eq!(network_of("5500000000000004"), Some(Network::MasterCard));
        assert_eq!(network_of("2221000000000009"), Some(Network::MasterCard));
        assert_eq!(network_of("340000000000009"), Some(Network::AmericanExpress));
        assert_eq!(network_of("378282246310005"), Some(Network::AmericanExpress));
        assert_eq!(network_of("6011111111111117"), Some(Network::Discover));
        assert_eq!(network_of("6445644564456445"), Some(Network::Discover));
        assert_eq!(network_of("6500000000000002"), Some(Network::Discover));
        assert_eq!(network_of("30569309025904"), Some(Network::DinersClub));
        assert_eq!(network_of("36000000000008"), Some(Network::DinersClub));
        assert_eq!(network_of("38520000023237"), Some(Network::DinersClub));
        assert_eq!(network_of("3530111333300000"), Some(Network::Jcb));
        assert_eq!(network_of("3566002020360505123"), Some(Network::Jcb));
        assert_eq!(network_of("180000000000002"), Some(Network::Jcb));
        assert_eq!(network_of("213100000000001"), Some(Network::Jcb));
    }

    #[test]
    fn test_length_must_fit_the_rule() {
        // Visa prefix with 15 digits is not Visa; the fallback takes it.
        assert_eq!(network_of("411111111111111"), Some(Network::Generic));
        // Amex prefix with 16 digits is not Amex.
        assert_eq!(network_of("3400000000000009"), Some(Network::Generic));
        // JCB special prefix at 16 digits is neither JCB nor MasterCard.
        assert_eq!(network_of("2131000000000000"), Some(Network::Generic));
    }

    #[test]
    fn test_priority_beats_fallback() {
        let rule = classify("180000000000000", ClassificationMode::Lenient).unwrap();
        assert_eq!(rule.label, "JCB (special)");
        assert_eq!(rule.name(), "JCB");
    }

    #[test]
    fn test_strict_mode_skips_fallback() {
        assert!(classify("9999999999999", ClassificationMode::Strict).is_none());
        assert_eq!(
            classify("9999999999999", ClassificationMode::Lenient).map(|r| r.network),
            Some(Network::Generic)
        );
        assert_eq!(
            classify("4111111111111111", ClassificationMode::Strict).map(|r| r.network),
            Some(Network::Visa)
        );
    }

    #[test]
    fn test_fallback_rejects_out_of_range_lengths() {
        assert!(classify("999999999999", ClassificationMode::Lenient).is_none());
        assert!(classify("99999999999999999999", ClassificationMode::Lenient).is_none());
    }

    #[test]
    fn test_specificity() {
        assert_eq!(RULES[0].specificity(), 4);
        assert_eq!(RULES[RULES.len() - 1].specificity(), 1);
    }

    #[test]
    fn test_network_serializes_as_display_name() {
        let json = serde_json::to_string(&Network::AmericanExpress).unwrap();
        assert_eq!(json, "\"American Express\"");
        assert_eq!(Network::DinersClub.to_string(), "Diners Club");
    }
}
