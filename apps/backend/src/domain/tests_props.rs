use proptest::prelude::*;

use crate::domain::{ActionCounter, Palette, Rarity};

fn any_rarity() -> impl Strategy<Value = Rarity> {
    prop::sample::select(Rarity::ALL.to_vec())
}

proptest! {
    /// Palette depends only on remaining actions vs. the threshold.
    #[test]
    fn prop_palette_rules(remaining in 0u32..50, max in 0u32..50, threshold in 0u32..10) {
        let counter = ActionCounter::new(remaining, max).with_warning_threshold(threshold);
        let expected = if remaining == 0 {
            Palette::Exhausted
        } else if remaining <= threshold {
            Palette::Warning
        } else {
            Palette::Normal
        };
        prop_assert_eq!(counter.palette(), expected);
    }

    /// Filled and empty pips always add up to the maximum.
    #[test]
    fn prop_pips_partition_max(remaining in 0u32..1000, max in 0u32..1000) {
        let view = ActionCounter::new(remaining, max).view();
        prop_assert_eq!(view.filled + view.empty, max);
        prop_assert!(view.filled <= remaining);
    }

    /// Name, label and tier all identify the same rarity.
    #[test]
    fn prop_rarity_identifiers_agree(rarity in any_rarity()) {
        prop_assert_eq!(rarity.as_str().parse::<Rarity>().unwrap(), rarity);
        prop_assert_eq!(Rarity::from_label(rarity.label()), Some(rarity));
        prop_assert_eq!(Rarity::ALL[usize::from(rarity.tier()) - 1], rarity);
    }

    /// Tier order matches enum order.
    #[test]
    fn prop_tier_order_matches_ord(a in any_rarity(), b in any_rarity()) {
        prop_assert_eq!(a.cmp(&b), a.tier().cmp(&b.tier()));
    }
}
