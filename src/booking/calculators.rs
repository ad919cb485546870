//! Core booking calculation functions.
//!
//! Pure functions for availability and stay pricing - no database access.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::*;

use super::models::ReservationSpan;

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Number of nights between two dates (calendar-day difference).
///
/// Negative when `end` precedes `start`; callers validate ranges before
/// pricing, so a negative result only ever reaches the fallback branch.
pub fn nights_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// Total price for a stay.
///
/// `nights × nightly_price` when the stay spans at least one night and the
/// nightly price is non-zero. A same-day selection (zero nights) falls back
/// to the single nightly price rather than erroring; this matches the
/// marketplace's long-standing checkout behavior.
pub fn total_price(start: NaiveDate, end: NaiveDate, nightly_price: Decimal) -> Decimal {
    let nights = nights_between(start, end);

    if nights > 0 && !nightly_price.is_zero() {
        round_money(Decimal::from(nights) * nightly_price, 2)
    } else {
        round_money(nightly_price, 2)
    }
}

/// Expand reservations into the set of blocked calendar dates.
///
/// Every date inside a reservation's inclusive `[start, end]` interval is
/// blocked. Overlapping reservations deduplicate through the set; output is
/// sorted by date. Spans with `end < start` contribute nothing.
pub fn blocked_dates(spans: &[ReservationSpan]) -> BTreeSet<NaiveDate> {
    let mut dates = BTreeSet::new();

    for span in spans {
        let mut day = span.start_date;
        while day <= span.end_date {
            dates.insert(day);
            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }
    }

    dates
}

/// Whether two inclusive date intervals share at least one day
pub fn ranges_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start <= b_end && b_start <= a_end
}

/// First existing span overlapping the requested inclusive range, if any.
///
/// Spans arrive ordered by start date, so the earliest clash is reported.
pub fn find_conflict(
    spans: &[ReservationSpan],
    start: NaiveDate,
    end: NaiveDate,
) -> Option<ReservationSpan> {
    spans
        .iter()
        .copied()
        .find(|span| ranges_overlap(start, end, span.start_date, span.end_date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn span(start: NaiveDate, end: NaiveDate) -> ReservationSpan {
        ReservationSpan {
            start_date: start,
            end_date: end,
        }
    }

    // ==================== round_money tests ====================

    #[test]
    fn test_round_money_bankers_rounding_to_even() {
        assert_eq!(round_money(dec!(2.5), 0), dec!(2)); // rounds down to even
        assert_eq!(round_money(dec!(3.5), 0), dec!(4)); // rounds up to even
        assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
        assert_eq!(round_money(dec!(1.236), 2), dec!(1.24));
    }

    // ==================== nights_between tests ====================

    #[test]
    fn test_nights_between_simple() {
        assert_eq!(nights_between(date(2024, 3, 10), date(2024, 3, 15)), 5);
    }

    #[test]
    fn test_nights_between_same_day() {
        assert_eq!(nights_between(date(2024, 3, 10), date(2024, 3, 10)), 0);
    }

    #[test]
    fn test_nights_between_inverted_is_negative() {
        assert_eq!(nights_between(date(2024, 3, 15), date(2024, 3, 10)), -5);
    }

    #[test]
    fn test_nights_between_across_month_boundary() {
        assert_eq!(nights_between(date(2024, 1, 30), date(2024, 2, 2)), 3);
    }

    #[test]
    fn test_nights_between_across_leap_day() {
        assert_eq!(nights_between(date(2024, 2, 28), date(2024, 3, 1)), 2);
        assert_eq!(nights_between(date(2023, 2, 28), date(2023, 3, 1)), 1);
    }

    // ==================== total_price tests ====================

    #[test]
    fn test_total_price_multiplies_nights() {
        assert_eq!(
            total_price(date(2024, 3, 10), date(2024, 3, 15), dec!(120)),
            dec!(600)
        );
    }

    #[test]
    fn test_total_price_single_night() {
        assert_eq!(
            total_price(date(2024, 3, 10), date(2024, 3, 11), dec!(99.50)),
            dec!(99.50)
        );
    }

    #[test]
    fn test_total_price_same_day_falls_back_to_nightly() {
        // Zero nights: the nightly price alone, not zero and not an error
        assert_eq!(
            total_price(date(2024, 3, 10), date(2024, 3, 10), dec!(120)),
            dec!(120)
        );
    }

    #[test]
    fn test_total_price_zero_price_falls_back() {
        assert_eq!(
            total_price(date(2024, 3, 10), date(2024, 3, 15), dec!(0)),
            dec!(0)
        );
    }

    #[test]
    fn test_total_price_fractional_nightly() {
        assert_eq!(
            total_price(date(2024, 3, 10), date(2024, 3, 13), dec!(33.33)),
            dec!(99.99)
        );
    }

    #[test]
    fn test_total_price_rounds_to_cents() {
        assert_eq!(
            total_price(date(2024, 3, 10), date(2024, 3, 13), dec!(0.335)),
            dec!(1.00) // 3 × 0.335 = 1.005, banker's rounding
        );
    }

    #[test]
    fn test_total_price_fallback_rounds_to_cents() {
        // Same-day fallback gets the same cent precision as the multiply branch
        assert_eq!(
            total_price(date(2024, 3, 10), date(2024, 3, 10), dec!(120.005)),
            dec!(120.00)
        );
        assert_eq!(
            total_price(date(2024, 3, 10), date(2024, 3, 12), dec!(120.005)),
            dec!(240.01)
        );
    }

    // ==================== blocked_dates tests ====================

    #[test]
    fn test_blocked_dates_single_span_inclusive() {
        let dates = blocked_dates(&[span(date(2024, 3, 10), date(2024, 3, 12))]);

        assert_eq!(dates.len(), 3);
        assert!(dates.contains(&date(2024, 3, 10)));
        assert!(dates.contains(&date(2024, 3, 11)));
        assert!(dates.contains(&date(2024, 3, 12)));
    }

    #[test]
    fn test_blocked_dates_excludes_outside_dates() {
        let dates = blocked_dates(&[span(date(2024, 3, 10), date(2024, 3, 12))]);

        assert!(!dates.contains(&date(2024, 3, 9)));
        assert!(!dates.contains(&date(2024, 3, 13)));
    }

    #[test]
    fn test_blocked_dates_covers_every_reserved_day() {
        let spans = vec![
            span(date(2024, 3, 1), date(2024, 3, 5)),
            span(date(2024, 3, 20), date(2024, 3, 22)),
        ];
        let dates = blocked_dates(&spans);

        for s in &spans {
            let mut day = s.start_date;
            while day <= s.end_date {
                assert!(dates.contains(&day), "missing {}", day);
                day = day.succ_opt().unwrap();
            }
        }
        assert_eq!(dates.len(), 8);
    }

    #[test]
    fn test_blocked_dates_overlapping_spans_deduplicate() {
        let dates = blocked_dates(&[
            span(date(2024, 3, 10), date(2024, 3, 14)),
            span(date(2024, 3, 12), date(2024, 3, 16)),
        ]);

        // 10..=16 once each
        assert_eq!(dates.len(), 7);
    }

    #[test]
    fn test_blocked_dates_single_day_span() {
        let dates = blocked_dates(&[span(date(2024, 3, 10), date(2024, 3, 10))]);
        assert_eq!(dates.len(), 1);
    }

    #[test]
    fn test_blocked_dates_empty_input() {
        assert!(blocked_dates(&[]).is_empty());
    }

    #[test]
    fn test_blocked_dates_inverted_span_ignored() {
        let dates = blocked_dates(&[span(date(2024, 3, 15), date(2024, 3, 10))]);
        assert!(dates.is_empty());
    }

    #[test]
    fn test_blocked_dates_sorted_output() {
        let dates = blocked_dates(&[
            span(date(2024, 3, 20), date(2024, 3, 21)),
            span(date(2024, 3, 1), date(2024, 3, 2)),
        ]);
        let collected: Vec<_> = dates.into_iter().collect();
        assert_eq!(
            collected,
            vec![
                date(2024, 3, 1),
                date(2024, 3, 2),
                date(2024, 3, 20),
                date(2024, 3, 21),
            ]
        );
    }

    // ==================== ranges_overlap tests ====================

    #[test]
    fn test_ranges_overlap_partial() {
        assert!(ranges_overlap(
            date(2024, 3, 10),
            date(2024, 3, 15),
            date(2024, 3, 14),
            date(2024, 3, 20),
        ));
    }

    #[test]
    fn test_ranges_overlap_contained() {
        assert!(ranges_overlap(
            date(2024, 3, 10),
            date(2024, 3, 20),
            date(2024, 3, 12),
            date(2024, 3, 14),
        ));
    }

    #[test]
    fn test_ranges_overlap_touching_endpoints_conflict() {
        // Inclusive intervals: sharing a single day is a conflict
        assert!(ranges_overlap(
            date(2024, 3, 10),
            date(2024, 3, 15),
            date(2024, 3, 15),
            date(2024, 3, 20),
        ));
    }

    #[test]
    fn test_ranges_overlap_disjoint() {
        assert!(!ranges_overlap(
            date(2024, 3, 10),
            date(2024, 3, 15),
            date(2024, 3, 16),
            date(2024, 3, 20),
        ));
    }

    #[test]
    fn test_ranges_overlap_is_symmetric() {
        let (a1, a2) = (date(2024, 3, 10), date(2024, 3, 15));
        let (b1, b2) = (date(2024, 3, 14), date(2024, 3, 20));
        assert_eq!(
            ranges_overlap(a1, a2, b1, b2),
            ranges_overlap(b1, b2, a1, a2)
        );
    }

    // ==================== find_conflict tests ====================

    #[test]
    fn test_find_conflict_reports_earliest_clash() {
        let spans = vec![
            span(date(2024, 3, 1), date(2024, 3, 5)),
            span(date(2024, 3, 8), date(2024, 3, 12)),
            span(date(2024, 3, 11), date(2024, 3, 14)),
        ];

        let hit = find_conflict(&spans, date(2024, 3, 10), date(2024, 3, 20)).unwrap();
        assert_eq!(hit.start_date, date(2024, 3, 8));
        assert_eq!(hit.end_date, date(2024, 3, 12));
    }

    #[test]
    fn test_find_conflict_touching_endpoint_is_a_clash() {
        let spans = vec![span(date(2024, 3, 10), date(2024, 3, 15))];

        assert!(find_conflict(&spans, date(2024, 3, 15), date(2024, 3, 20)).is_some());
        assert!(find_conflict(&spans, date(2024, 3, 5), date(2024, 3, 10)).is_some());
    }

    #[test]
    fn test_find_conflict_none_when_disjoint() {
        let spans = vec![
            span(date(2024, 3, 1), date(2024, 3, 5)),
            span(date(2024, 3, 20), date(2024, 3, 25)),
        ];

        assert!(find_conflict(&spans, date(2024, 3, 6), date(2024, 3, 19)).is_none());
    }

    #[test]
    fn test_find_conflict_empty_spans() {
        assert!(find_conflict(&[], date(2024, 3, 10), date(2024, 3, 15)).is_none());
    }
}
