use crate::records::DonationRecord;

/// Total value of these donations
/// Amounts are parsed as floats, so a missing or non numeric amount turns
/// the whole sum into NaN instead of raising an error. An empty set sums
/// to positive zero
pub fn total_value(records: &[DonationRecord]) -> f64 {
    // folded from +0.0: an empty table renders as 0.00, never -0.00
    records
        .iter()
        .map(|record| record.amount())
        .fold(0.0, |total, amount| total + amount)
}

/// Anonymous share of a set of donations, by record count and by value
/// Percentages are rounded to whole numbers. An empty set divides by zero
/// and comes out as NaN; callers have to guard before formatting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnonymousShare {
    pub count_percent: f64,
    pub value_percent: f64,
}

/// Compute the anonymous share over `records`
/// A record counts as anonymous when its donor name field is empty or
/// missing entirely
pub fn anonymous_share(records: &[DonationRecord]) -> AnonymousShare {
    let mut anonymous_count = 0usize;
    let mut anonymous_value = 0.0f64;

    for record in records.iter().filter(|record| record.is_anonymous()) {
        anonymous_count += 1;
        anonymous_value += record.amount();
    }

    AnonymousShare {
        count_percent: (100.0 * anonymous_count as f64 / records.len() as f64).round(),
        value_percent: (100.0 * anonymous_value / total_value(records)).round(),
    }
}
