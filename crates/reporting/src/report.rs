//! Aggregate report over a set of party records.
//!
//! A single linear pass: no windowing, no incremental update. Callers filter
//! by [`crate::DateRange`] before aggregating.

use serde::{Deserialize, Serialize};

use tarragona_parties::PartyRecord;

/// Fixed, mutually exclusive duration buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationBucket {
    /// 1 to 3 hours.
    OneToThree,
    /// 4 to 6 hours.
    FourToSix,
    /// 7 hours or more.
    SevenPlus,
}

impl DurationBucket {
    pub const ALL: [DurationBucket; 3] = [Self::OneToThree, Self::FourToSix, Self::SevenPlus];

    /// Bucket for a duration. `None` only for 0 hours, which insert-time
    /// validation never lets through.
    pub fn for_hours(hours: u32) -> Option<Self> {
        match hours {
            0 => None,
            1..=3 => Some(Self::OneToThree),
            4..=6 => Some(Self::FourToSix),
            _ => Some(Self::SevenPlus),
        }
    }
}

/// Party counts per duration bucket. Serialized with the bucket labels as keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeCounts {
    #[serde(rename = "1-3")]
    pub one_to_three: u64,
    #[serde(rename = "4-6")]
    pub four_to_six: u64,
    #[serde(rename = "7+")]
    pub seven_plus: u64,
}

impl RangeCounts {
    pub fn get(&self, bucket: DurationBucket) -> u64 {
        match bucket {
            DurationBucket::OneToThree => self.one_to_three,
            DurationBucket::FourToSix => self.four_to_six,
            DurationBucket::SevenPlus => self.seven_plus,
        }
    }

    fn slot(&mut self, bucket: DurationBucket) -> &mut u64 {
        match bucket {
            DurationBucket::OneToThree => &mut self.one_to_three,
            DurationBucket::FourToSix => &mut self.four_to_six,
            DurationBucket::SevenPlus => &mut self.seven_plus,
        }
    }

    pub fn total(&self) -> u64 {
        DurationBucket::ALL.iter().map(|b| self.get(*b)).sum()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTotals {
    pub total_guests: u64,
    pub total_hours: u64,
    pub total_amount: u64,
    pub parties_count: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub totals: ReportTotals,
    pub ranges: RangeCounts,
}

/// Sum guests, hours and totals and histogram durations.
pub fn build_report(records: &[PartyRecord]) -> Report {
    let mut report = Report::default();

    for record in records {
        let totals = &mut report.totals;
        totals.total_guests += u64::from(record.guest_count);
        totals.total_hours += u64::from(record.duration_hours);
        totals.total_amount += record.total;
        totals.parties_count += 1;

        if let Some(bucket) = DurationBucket::for_hours(record.duration_hours) {
            *report.ranges.slot(bucket) += 1;
        }
    }

    report
}
