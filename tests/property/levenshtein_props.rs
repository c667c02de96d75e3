//! Edit distance: metric laws, and agreement with two independent
//! implementations.

use proptest::prelude::*;
use sleuth::{levenshtein, levenshtein_within};

use super::oracles::oracle_levenshtein;

fn any_word() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zé ü]{0,10}").unwrap()
}

proptest! {
    #[test]
    fn prop_identity(a in any_word()) {
        prop_assert_eq!(levenshtein(&a, &a), 0);
    }

    #[test]
    fn prop_symmetric(a in any_word(), b in any_word()) {
        prop_assert_eq!(levenshtein(&a, &b), levenshtein(&b, &a));
    }

    #[test]
    fn prop_triangle_inequality(a in any_word(), b in any_word(), c in any_word()) {
        prop_assert!(levenshtein(&a, &c) <= levenshtein(&a, &b) + levenshtein(&b, &c));
    }

    #[test]
    fn prop_bounded_by_longer_length(a in any_word(), b in any_word()) {
        let longer = a.chars().count().max(b.chars().count());
        prop_assert!(levenshtein(&a, &b) <= longer);
    }

    #[test]
    fn prop_matches_reference(a in any_word(), b in any_word()) {
        prop_assert_eq!(levenshtein(&a, &b), oracle_levenshtein(&a, &b));
    }

    #[test]
    fn prop_matches_strsim(a in any_word(), b in any_word()) {
        prop_assert_eq!(levenshtein(&a, &b), strsim::levenshtein(&a, &b));
    }

    #[test]
    fn prop_within_agrees_with_distance(a in any_word(), b in any_word(), max in 0usize..5) {
        prop_assert_eq!(levenshtein_within(&a, &b, max), levenshtein(&a, &b) <= max);
    }
}
