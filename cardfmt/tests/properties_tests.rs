//! Property tests for `cardfmt::validate`.
//!
//! Covers:
//! - every 13-19 digit run is valid under `None` and normalizes to itself
//! - digit runs of any other length are invalid under every policy
//! - normalized digits re-validate to the same network
//! - delimiter policies reject contiguous runs that are not 16 digits
//! - canonical re-grouping re-validates under the same policy
//! - arbitrary input never panics and never yields non-digit output

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use cardfmt::{
    ClassificationMode, DelimiterPolicy, Network, ValidatorConfig, group_digits, validate,
    validate_with,
};
use proptest::prelude::*;

fn policy_strategy() -> impl Strategy<Value = DelimiterPolicy> {
    prop::sample::select(DelimiterPolicy::ALL.to_vec())
}

fn digits_strategy(len: std::ops::RangeInclusive<usize>) -> impl Strategy<Value = String> {
    prop::collection::vec(prop::char::range('0', '9'), len).prop_map(|v| v.into_iter().collect())
}

proptest! {
    #[test]
    fn digit_runs_of_card_length_are_valid(s in digits_strategy(13..=19)) {
        let result = validate(&s, DelimiterPolicy::None);
        prop_assert!(result.is_valid);
        prop_assert_eq!(&result.normalized_digits, &s);
        prop_assert!(result.network.is_some());
    }

    #[test]
    fn digit_runs_of_other_lengths_are_invalid(
        s in prop_oneof![digits_strategy(0..=12), digits_strategy(20..=40)],
        policy in policy_strategy(),
    ) {
        let result = validate(&s, policy);
        prop_assert!(!result.is_valid);
        prop_assert!(result.network.is_none());
        prop_assert!(result.normalized_digits.is_empty());
    }

    #[test]
    fn normalization_is_idempotent(
        groups in prop::collection::vec(digits_strategy(4..=4), 4),
        sep in prop::sample::select(vec![" ", "-"]),
    ) {
        let input = groups.join(sep);
        let first = validate(&input, DelimiterPolicy::SpaceOrDash);
        prop_assert!(first.is_valid);
        let again = validate(&first.normalized_digits, DelimiterPolicy::None);
        prop_assert!(again.is_valid);
        prop_assert_eq!(again.network, first.network);
        prop_assert_eq!(again.normalized_digits, first.normalized_digits);
    }

    #[test]
    fn canonical_grouping_round_trips((policy, s) in policy_strategy().prop_flat_map(|policy| {
        // Delimiter policies accept only the 16-digit shape.
        let len = if policy == DelimiterPolicy::None { 13..=19 } else { 16..=16 };
        (Just(policy), digits_strategy(len))
    })) {
        let first = validate(&s, policy);
        prop_assert!(first.is_valid, "{} under {}", s, policy);
        let normalized = first.normalized_digits;
        let grouped = group_digits(&normalized, policy);
        let result = validate(&grouped, policy);
        prop_assert!(result.is_valid, "{} under {}", grouped, policy);
        prop_assert_eq!(result.normalized_digits, normalized);
    }

    #[test]
    fn delimiter_policies_take_only_sixteen_digit_runs(
        s in prop_oneof![digits_strategy(13..=15), digits_strategy(17..=19)],
        policy in prop::sample::select(vec![
            DelimiterPolicy::Space,
            DelimiterPolicy::Dash,
            DelimiterPolicy::SpaceOrDash,
        ]),
    ) {
        prop_assert!(validate(&s, DelimiterPolicy::None).is_valid);
        prop_assert!(!validate(&s, policy).is_valid);
    }

    #[test]
    fn mixed_separators_never_validate(
        groups in prop::collection::vec(digits_strategy(4..=4), 4),
        mixed_at in 0usize..3,
    ) {
        let mut input = String::new();
        for (i, group) in groups.iter().enumerate() {
            if i > 0 {
                input.push(if i - 1 == mixed_at { ' ' } else { '-' });
            }
            input.push_str(group);
        }
        prop_assert!(!validate(&input, DelimiterPolicy::SpaceOrDash).is_valid);
    }

    #[test]
    fn arbitrary_input_yields_digit_only_output(s in ".{0,80}", policy in policy_strategy()) {
        let result = validate(&s, policy);
        prop_assert!(result.normalized_digits.bytes().all(|b| b.is_ascii_digit()));
        if !result.is_valid {
            prop_assert!(result.network.is_none());
        }
    }

    #[test]
    fn strict_mode_never_reports_generic(s in digits_strategy(13..=19)) {
        let config = ValidatorConfig::new(DelimiterPolicy::None).with_mode(ClassificationMode::Strict);
        let result = validate_with(&s, &config);
        prop_assert!(result.is_valid);
        prop_assert_ne!(result.network, Some(Network::Generic));
    }
}

// The JCB special rule allows only 15 digits, so the 13-digit literal
// `validate("1800000000000", None)` falls through to the generic fallback.
// The 15-digit form is the one that must resolve to JCB.
#[test]
fn fifteen_digit_jcb_special_is_not_generic() {
    assert_eq!(
        validate("1800000000000", DelimiterPolicy::None).network,
        Some(Network::Generic)
    );
    for input in ["180000000000000", "213112345678901"] {
        let result = validate(input, DelimiterPolicy::None);
        assert!(result.is_valid);
        assert_eq!(result.network_name(), Some("JCB"), "{input}");
    }
}

#[test]
fn boundary_lengths_invalid_under_every_policy() {
    for policy in DelimiterPolicy::ALL {
        assert!(!validate("", policy).is_valid);
        assert!(!validate("411111111111", policy).is_valid);
        assert!(!validate("41111111111111111111", policy).is_valid);
    }
}
