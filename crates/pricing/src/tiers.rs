use serde::{Deserialize, Serialize};

use tarragona_core::{DomainError, DomainResult};

/// A closed price step: applies to values up to and including `up_to`.
///
/// `up_to == None` marks the open-ended last tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tier {
    pub up_to: Option<u32>,
    pub amount: u64,
}

impl Tier {
    const fn upto(up_to: u32, amount: u64) -> Self {
        Self {
            up_to: Some(up_to),
            amount,
        }
    }

    const fn open(amount: u64) -> Self {
        Self {
            up_to: None,
            amount,
        }
    }

    fn covers(&self, value: u32) -> bool {
        self.up_to.is_none_or(|limit| value <= limit)
    }
}

/// Per-guest unit price by guest count.
pub const GUEST_TIERS: [Tier; 3] = [
    Tier::upto(100, 8_000),
    Tier::upto(500, 6_000),
    Tier::open(4_000),
];

/// Flat fee by duration in hours (not scaled by hours).
pub const DURATION_TIERS: [Tier; 3] = [
    Tier::upto(3, 100_000),
    Tier::upto(6, 200_000),
    Tier::open(300_000),
];

/// Monetary breakdown for one party. Whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyAmounts {
    pub guest_amount: u64,
    pub duration_amount: u64,
    pub total: u64,
}

fn lookup(tiers: &[Tier], value: u32) -> u64 {
    // The last tier is open-ended, so a match always exists.
    tiers
        .iter()
        .find(|t| t.covers(value))
        .map(|t| t.amount)
        .unwrap_or_default()
}

fn ensure_positive(field: &str, value: u32) -> DomainResult<()> {
    if value < 1 {
        return Err(DomainError::validation(format!("{field} must be at least 1")));
    }
    Ok(())
}

/// Unit price for a single guest given the party's guest count.
pub fn guest_unit_price(guest_count: u32) -> DomainResult<u64> {
    ensure_positive("guestCount", guest_count)?;
    Ok(lookup(&GUEST_TIERS, guest_count))
}

/// Flat fee for a party of the given duration.
pub fn duration_fee(duration_hours: u32) -> DomainResult<u64> {
    ensure_positive("durationHours", duration_hours)?;
    Ok(lookup(&DURATION_TIERS, duration_hours))
}

/// Price a party. Rejects zero counts instead of clamping.
pub fn compute_amounts(guest_count: u32, duration_hours: u32) -> DomainResult<PartyAmounts> {
    let guest_amount = u64::from(guest_count) * guest_unit_price(guest_count)?;
    let duration_amount = duration_fee(duration_hours)?;

    Ok(PartyAmounts {
        guest_amount,
        duration_amount,
        total: guest_amount + duration_amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn guest_amount(g: u32) -> u64 {
        compute_amounts(g, 1).unwrap().guest_amount
    }

    fn duration_amount(h: u32) -> u64 {
        compute_amounts(1, h).unwrap().duration_amount
    }

    #[test]
    fn guest_tier_boundaries_are_inclusive_on_the_upper_end() {
        assert_eq!(guest_amount(1), 8_000);
        assert_eq!(guest_amount(100), 100 * 8_000);
        assert_eq!(guest_amount(101), 101 * 6_000);
        assert_eq!(guest_amount(500), 500 * 6_000);
        assert_eq!(guest_amount(501), 501 * 4_000);
    }

    #[test]
    fn duration_fee_is_a_step_not_a_rate() {
        assert_eq!(duration_amount(1), 100_000);
        assert_eq!(duration_amount(3), 100_000);
        assert_eq!(duration_amount(4), 200_000);
        assert_eq!(duration_amount(6), 200_000);
        assert_eq!(duration_amount(7), 300_000);
        assert_eq!(duration_amount(48), 300_000);
    }

    #[test]
    fn worked_examples() {
        assert_eq!(
            compute_amounts(50, 2).unwrap(),
            PartyAmounts {
                guest_amount: 400_000,
                duration_amount: 100_000,
                total: 500_000,
            }
        );
        assert_eq!(
            compute_amounts(600, 8).unwrap(),
            PartyAmounts {
                guest_amount: 2_400_000,
                duration_amount: 300_000,
                total: 2_700_000,
            }
        );
    }

    #[test]
    fn zero_inputs_are_rejected() {
        assert!(compute_amounts(0, 5).unwrap_err().message().contains("guestCount"));
        assert!(compute_amounts(5, 0).unwrap_err().message().contains("durationHours"));
    }

    #[test]
    fn amounts_serialize_in_camel_case() {
        let json = serde_json::to_value(compute_amounts(50, 2).unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "guestAmount": 400000,
                "durationAmount": 100000,
                "total": 500000,
            })
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 512,
            ..ProptestConfig::default()
        })]

        #[test]
        fn total_is_sum_of_parts(g in 1u32..=u32::MAX, h in 1u32..=u32::MAX) {
            let a = compute_amounts(g, h).unwrap();
            prop_assert_eq!(a.total, a.guest_amount + a.duration_amount);
        }

        #[test]
        fn pricing_is_deterministic(g in 1u32..10_000, h in 1u32..200) {
            prop_assert_eq!(compute_amounts(g, h).unwrap(), compute_amounts(g, h).unwrap());
        }

        /// Inside one tier every extra guest adds to the guest amount.
        #[test]
        fn guest_amount_never_decreases_within_a_tier(g in 1u32..2_000) {
            let same_tier = GUEST_TIERS
                .iter()
                .position(|t| t.covers(g)) == GUEST_TIERS.iter().position(|t| t.covers(g + 1));
            if same_tier {
                prop_assert!(guest_amount(g + 1) > guest_amount(g));
            }
        }
    }
}
