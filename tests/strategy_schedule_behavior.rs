//! Behavior-driven tests for strategy scheduling
//!
//! A scheduler reads a strategy record and asks how long until its entry
//! window opens or closes.

use csocal_core::{
    minutes_until_strategy_end, minutes_until_strategy_start, CalendarError, DayOfWeek,
    Recurring, StrategySchedule, UtcInstant, TIME_MINUTES_7_DAYS,
};

fn strategy_json(recurring: &str, start_at: i64, end_at: i64, day_of_week: i8) -> String {
    format!(
        r#"{{
            "name": "unit-test-strategy-1",
            "enabled": true,
            "test": true,
            "entryConditions": {{
                "startAt": {start_at},
                "endAt": {end_at},
                "recurring": "{recurring}",
                "interval": 1,
                "dayOfWeek": {day_of_week}
            }}
        }}"#
    )
}

#[test]
fn weekly_friday_strategy_starts_at_midnight_friday() {
    // Given: a weekly strategy open all of Friday
    let schedule =
        StrategySchedule::from_json(&strategy_json("weekly", 0, 1440, 5)).expect("parses");
    assert_eq!(schedule.entry_conditions.day_of_week, Some(DayOfWeek::Friday));

    // When: the scheduler asks on Wednesday 2021-11-03 at 18:30
    let t = UtcInstant::parse("2021-11-03T18:30:00Z").expect("valid");

    // Then: the start is Friday 00:00 and the end Saturday 00:00
    assert_eq!(minutes_until_strategy_start(t, &schedule).expect("ok"), 1770.0);
    assert_eq!(minutes_until_strategy_end(t, &schedule).expect("ok"), 3210.0);
}

#[test]
fn started_strategy_waits_a_week_for_its_next_start() {
    // Given: a Friday strategy that opened at 00:00
    let schedule =
        StrategySchedule::from_json(&strategy_json("weekly", 0, 1440, 5)).expect("parses");

    // When: the scheduler asks on that Friday at 00:00
    let t = UtcInstant::parse("2021-11-05T00:00:00Z").expect("valid");

    // Then: the next start is a full week away and the end is today
    assert_eq!(
        minutes_until_strategy_start(t, &schedule).expect("ok"),
        TIME_MINUTES_7_DAYS as f64
    );
    assert_eq!(minutes_until_strategy_end(t, &schedule).expect("ok"), 1440.0);
}

#[test]
fn hourly_strategies_stop_at_the_top_of_the_hour() {
    let schedule =
        StrategySchedule::from_json(&strategy_json("hourly", 0, 1440, -1)).expect("parses");
    assert_eq!(schedule.entry_conditions.recurring, Recurring::Hourly);

    let t = UtcInstant::parse("2021-11-03T18:30:00Z").expect("valid");

    assert_eq!(minutes_until_strategy_end(t, &schedule).expect("ok"), 30.0);
}

#[test]
fn invalid_day_codes_are_rejected_when_reading_the_record() {
    let error = StrategySchedule::from_json(&strategy_json("weekly", 0, 1440, 9))
        .expect_err("must fail");

    assert!(error
        .to_string()
        .contains(&CalendarError::InvalidDayOfWeek { value: 9 }.to_string()));
}
