use proptest::prelude::*;
use scheduler_core::{
    next_date, next_occurrence, CalendarDate, DateField, RecurrenceError, RecurrenceRule,
};

fn base_date() -> CalendarDate {
    CalendarDate::from_ymd(2000, 1, 1).unwrap()
}

fn date_strategy() -> impl Strategy<Value = CalendarDate> {
    (0u64..40_000).prop_map(|offset| base_date().checked_add_days(offset).unwrap())
}

fn rule_strategy() -> impl Strategy<Value = RecurrenceRule> {
    prop_oneof![
        Just(RecurrenceRule::Yearly),
        (1u16..=400).prop_map(RecurrenceRule::EveryNDays),
    ]
}

/// Single-step reference: advance from `anchor` until strictly after `now`.
fn step_loop(now: CalendarDate, anchor: CalendarDate, days: u16) -> CalendarDate {
    let mut cursor = anchor;
    loop {
        cursor = cursor.checked_add_days(u64::from(days)).unwrap();
        if cursor > now {
            return cursor;
        }
    }
}

proptest! {
    #[test]
    fn closed_form_day_advance_matches_step_loop(
        now in date_strategy(),
        anchor in date_strategy(),
        days in 1u16..=400,
    ) {
        let fast = next_occurrence(now, anchor, RecurrenceRule::EveryNDays(days)).unwrap();
        prop_assert_eq!(fast, step_loop(now, anchor, days));
    }

    #[test]
    fn day_result_is_the_unique_catch_up_date(
        anchor in date_strategy(),
        gap in 0i64..20_000,
        days in 1u16..=400,
    ) {
        let now = anchor.checked_add_days(gap as u64).unwrap();
        let next = next_occurrence(now, anchor, RecurrenceRule::EveryNDays(days)).unwrap();
        let n = i64::from(days);

        prop_assert!(next > now);
        prop_assert_eq!(next.days_since(anchor) % n, 0);
        prop_assert!(next.days_since(now) <= n);
    }

    #[test]
    fn result_is_strictly_after_now(
        now in date_strategy(),
        anchor in date_strategy(),
        rule in rule_strategy(),
    ) {
        let next = next_occurrence(now, anchor, rule).unwrap();
        prop_assert!(next > now);
    }

    #[test]
    fn repeated_advancement_strictly_increases(
        now in date_strategy(),
        anchor in date_strategy(),
        rule in rule_strategy(),
    ) {
        let first = next_occurrence(now, anchor, rule).unwrap();
        let second = next_occurrence(first, first, rule).unwrap();
        let third = next_occurrence(second, second, rule).unwrap();
        prop_assert!(first < second);
        prop_assert!(second < third);
    }

    #[test]
    fn string_entry_point_round_trips_typed_result(
        now in date_strategy(),
        anchor in date_strategy(),
        rule in rule_strategy(),
    ) {
        let typed = next_occurrence(now, anchor, rule).unwrap();
        let text = next_date(&now.to_string(), &anchor.to_string(), &rule.to_string()).unwrap();
        prop_assert_eq!(text, typed.to_string());
    }

    #[test]
    fn intervals_above_cap_always_fail(days in 401u64..100_000) {
        let rule = format!("d {days}");
        prop_assert_eq!(
            next_date("20250101", "20240101", &rule),
            Err(RecurrenceError::IntervalTooLarge { interval: days, rule: rule.clone() })
        );
    }
}

#[test]
fn yearly_rule_steps_past_now() {
    assert_eq!(next_date("20260315", "20240315", "y").unwrap(), "20270315");
}

#[test]
fn day_rule_rejects_candidate_equal_to_now() {
    assert_eq!(next_date("20250110", "20250101", "d 3").unwrap(), "20250113");
}

#[test]
fn interval_of_401_is_too_large() {
    assert!(matches!(
        next_date("20250101", "20250101", "d 401"),
        Err(RecurrenceError::IntervalTooLarge { interval: 401, .. })
    ));
}

#[test]
fn unknown_rule_code_is_rejected() {
    assert_eq!(
        next_date("20250101", "20250101", "w 5"),
        Err(RecurrenceError::InvalidRuleCode("w 5".to_string()))
    );
}

#[test]
fn dashed_date_is_rejected() {
    assert_eq!(
        next_date("2025-01-01", "20250101", "d 3"),
        Err(RecurrenceError::InvalidDate {
            field: DateField::Now,
            value: "2025-01-01".to_string(),
        })
    );
}

#[test]
fn leap_day_anchor_uses_clamped_yearly_steps() {
    assert_eq!(next_date("20240301", "20240229", "y").unwrap(), "20250228");
    assert_eq!(next_date("20270101", "20240229", "y").unwrap(), "20270228");
}

#[test]
fn error_messages_name_the_failing_input() {
    let err = next_date("20250101", "2025011", "y").unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid `date` value `2025011`: expected a YYYYMMDD date"
    );
    let err = next_date("20250101", "20250101", "d x").unwrap_err();
    assert!(err.to_string().contains("`d x`"));
}
