//! EventWindowFilter.

use crate::domain::{DateRange, EventRecord};

/// Events whose date falls inside `range`, inclusive on both ends, in source order.
///
/// An inverted range yields nothing.
pub fn filter_events(events: &[EventRecord], range: &DateRange) -> Vec<EventRecord> {
    events
        .iter()
        .filter(|ev| range.contains(ev.event_date))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn ev(date: NaiveDate, title: &str) -> EventRecord {
        EventRecord {
            event_date: date,
            event_title: title.to_string(),
            event_type: "Policy".into(),
            region: "Global".into(),
            notes: String::new(),
        }
    }

    #[test]
    fn event_outside_window_is_dropped() {
        let events = vec![ev(d(2020, 3, 1), "X")];
        let range = DateRange::new(d(2020, 1, 1), d(2020, 2, 1));
        assert!(filter_events(&events, &range).is_empty());
    }

    #[test]
    fn boundaries_are_included() {
        let events = vec![
            ev(d(2019, 12, 31), "before"),
            ev(d(2020, 1, 1), "start"),
            ev(d(2020, 2, 1), "end"),
            ev(d(2020, 2, 2), "after"),
        ];
        let range = DateRange::new(d(2020, 1, 1), d(2020, 2, 1));
        let titles: Vec<_> = filter_events(&events, &range)
            .into_iter()
            .map(|e| e.event_title)
            .collect();
        assert_eq!(titles, vec!["start", "end"]);
    }

    #[test]
    fn source_order_is_kept() {
        let events = vec![
            ev(d(2020, 5, 1), "may"),
            ev(d(2020, 1, 1), "jan"),
            ev(d(2020, 3, 1), "mar"),
        ];
        let range = DateRange::new(d(2020, 1, 1), d(2020, 12, 31));
        let titles: Vec<_> = filter_events(&events, &range)
            .into_iter()
            .map(|e| e.event_title)
            .collect();
        assert_eq!(titles, vec!["may", "jan", "mar"]);
    }

    fn arb_date() -> impl Strategy<Value = NaiveDate> {
        // 2000-01-01 .. roughly 2030
        (730_120i32..741_000).prop_map(|n| NaiveDate::from_num_days_from_ce_opt(n).unwrap())
    }

    proptest! {
        #[test]
        fn keeps_exactly_the_dates_inside(
            dates in prop::collection::vec(arb_date(), 0..40),
            a in arb_date(),
            b in arb_date(),
        ) {
            let (s, e) = if a <= b { (a, b) } else { (b, a) };
            let events: Vec<_> = dates
                .iter()
                .enumerate()
                .map(|(i, &dt)| ev(dt, &i.to_string()))
                .collect();
            let kept = filter_events(&events, &DateRange::new(s, e));

            let expected: Vec<_> = events
                .iter()
                .filter(|x| s <= x.event_date && x.event_date <= e)
                .cloned()
                .collect();
            prop_assert_eq!(kept, expected);
        }

        #[test]
        fn inverted_range_yields_nothing(
            dates in prop::collection::vec(arb_date(), 0..40),
            a in arb_date(),
            b in arb_date(),
        ) {
            prop_assume!(a != b);
            let (s, e) = if a > b { (a, b) } else { (b, a) };
            let events: Vec<_> = dates.iter().map(|&dt| ev(dt, "x")).collect();
            prop_assert!(filter_events(&events, &DateRange::new(s, e)).is_empty());
        }
    }
}
