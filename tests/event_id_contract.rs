//! Contract tests for event IDs
//!
//! Event IDs are stored by other services, so every shape must keep
//! encoding and decoding exactly as it does today.

use csocal_core::{
    classify_event_id, cso_length, decode_event_id, decode_manual_id, decode_split_id,
    decode_token, decode_unsplit_id, encode_event_id, encode_manual_id, encode_split_id,
    encode_unsplit_id, is_half_month, CalendarError, CsoLength, CsoPeriod, EventId, EventIdKind,
    UtcInstant, DEFAULT_MANUAL_SYMBOL,
};

fn at(year: i32, month: u8, day: u8, hour: u8) -> UtcInstant {
    UtcInstant::from_ymd_hms_milli(year, month, day, hour, 0, 0, 0).expect("valid instant")
}

// =============================================================================
// Period IDs
// =============================================================================

#[test]
fn period_id_names_the_window_available_now() {
    // Given: a strategy asking for an ID during the June 2022 rollover weekend
    let t = at(2022, 6, 25, 16);

    // When: the period ID is encoded
    let id = encode_event_id(t, "atomic", "call_spread_v1", CsoPeriod::Monthly, false)
        .expect("encodes");

    // Then: it names the July 2022 cycle
    assert_eq!(id, "atomic-call_spread_v1-monthly-27JUN22-29JUL22");
}

#[test]
fn decoded_period_ids_carry_exact_boundaries() {
    // Given: a stored period ID
    let id = "atomic-call_spread_v1-monthly-27JUN22-29JUL22";

    // When: it is decoded
    let event = decode_event_id(id).expect("decodes");

    // Then: the dates are the entry close and the maturity, not midnight
    assert_eq!(event.start_date, at(2022, 6, 27, 4));
    assert_eq!(event.end_date, at(2022, 7, 29, 8));

    // And: the window decoded is the window that was encoded
    let window_start = csocal_core::entry_window(at(2022, 6, 25, 16), false).expect("window");
    assert_eq!(event.start_date, window_start.start_date);
}

#[test]
fn decoding_then_rendering_reproduces_stored_ids() {
    let stored = [
        "atomic-call_spread_v1-monthly-27JUN22-29JUL22",
        "atomic-engine-monthly-14JUL23-28JUL23",
        "atomic-engine-monthly-14JUL23-25AUG23",
        "atomic-engine-bimonthly-27JUN22-26AUG22",
        "atomic-oyster-trade-84",
        "atomic-oyster-5-trades-1JAN24",
        "atomic-deribit-BTC-29JUL22",
    ];

    for id in stored {
        let event = EventId::parse(id).expect("decodes");
        assert_eq!(event.to_string(), id);
    }
}

#[test]
fn tokens_between_boundaries_are_refused() {
    // Given: a token on the rollover weekend
    // When: it is decoded
    let error = decode_token("25JUN22").expect_err("must fail");

    // Then: the caller learns which phase the day fell in
    assert!(error.to_string().contains("rolloverOpen"));
    assert!(matches!(error, CalendarError::AmbiguousToken { .. }));
}

#[test]
fn period_id_with_wrong_segment_count_is_a_format_error() {
    let error = decode_event_id("invalid-atomic-call_spread_v1-monthly-27JUN22-29JUL22")
        .expect_err("must fail");

    assert!(matches!(error, CalendarError::InvalidEventIdFormat { .. }));
}

// =============================================================================
// Lengths
// =============================================================================

#[test]
fn lengths_follow_window_shape() {
    let cases = [
        ("atomic-engine-monthly-27JUN22-29JUL22", false, CsoLength::FullMonth),
        ("atomic-engine-monthly-27JUN22-26AUG22", false, CsoLength::TwoMonths),
        ("atomic-engine-monthly-14JUL23-28JUL23", true, CsoLength::HalfMonth),
        ("atomic-engine-monthly-14JUL23-25AUG23", true, CsoLength::OneAndAHalfMonths),
    ];

    for (id, half_month, length) in cases {
        assert_eq!(is_half_month(id).expect("ok"), half_month, "{id}");
        assert_eq!(cso_length(id).expect("ok"), length, "{id}");
    }
}

// =============================================================================
// Trade and manual IDs
// =============================================================================

#[test]
fn split_ids_encode_and_decode() {
    let id = encode_split_id("atomic", "engine", 44).expect("encodes");
    assert_eq!(id, "atomic-engine-trade-44");

    let event = decode_split_id(&id).expect("decodes");
    assert_eq!(event.provider, "atomic");
    assert_eq!(event.strategy_id, "engine");
    assert_eq!(event.trade_index, 44);
}

#[test]
fn unsplit_ids_decode_to_midday() {
    let id = encode_unsplit_id(at(2024, 1, 1, 0), "atomic", "oyster", 5).expect("encodes");
    let event = decode_unsplit_id(&id).expect("decodes");

    assert_eq!(event.num_trades, 5);
    assert_eq!(event.start_date, at(2024, 1, 1, 12));
}

#[test]
fn manual_ids_decode_to_the_expiry_hour() {
    let id = encode_manual_id("atomic", "deribit", at(2022, 7, 29, 8), DEFAULT_MANUAL_SYMBOL)
        .expect("encodes");
    let event = decode_manual_id(&id).expect("decodes");

    assert_eq!(event.source, "deribit");
    assert_eq!(event.maturity, at(2022, 7, 29, 8));
}

#[test]
fn trade_and_manual_ids_with_bad_date_tokens_are_refused() {
    let unsplit = decode_unsplit_id("atomic-oyster-5-trades-1JANUARY24").expect_err("must fail");
    assert_eq!(
        unsplit,
        CalendarError::InvalidDateToken {
            value: "1JANUARY24".to_owned()
        }
    );

    let manual = decode_manual_id("atomic-deribit-BTC-29JULY22").expect_err("must fail");
    assert_eq!(
        manual,
        CalendarError::InvalidDateToken {
            value: "29JULY22".to_owned()
        }
    );
}

#[test]
fn trade_and_manual_ids_with_wrong_segment_count_are_format_errors() {
    let is_format_error = |result: Result<(), CalendarError>| {
        matches!(result, Err(CalendarError::InvalidEventIdFormat { .. }))
    };

    assert!(is_format_error(decode_split_id("atomic-engine-trade").map(drop)));
    assert!(is_format_error(decode_split_id("atomic-engine-x-trade-44").map(drop)));
    assert!(is_format_error(decode_unsplit_id("atomic-oyster-5-1JAN24").map(drop)));
    assert!(is_format_error(decode_unsplit_id("atomic-x-oyster-5-trades-1JAN24").map(drop)));
    assert!(is_format_error(decode_manual_id("atomic-deribit-29JUL22").map(drop)));
    assert!(is_format_error(decode_manual_id("atomic-deribit-BTC-x-29JUL22").map(drop)));
}

#[test]
fn classification_is_total() {
    assert_eq!(classify_event_id("a-b-trade-1").expect("ok"), EventIdKind::Split);
    assert_eq!(classify_event_id("a-b-c-1JAN24").expect("ok"), EventIdKind::Manual);
    assert_eq!(classify_event_id("a-b-2-trades-1JAN24").expect("ok"), EventIdKind::Unsplit);
    assert_eq!(classify_event_id("a-b-c-d-e").expect("ok"), EventIdKind::Period);

    for malformed in ["", "a", "a-b-c", "a-b-c-d-e-f"] {
        assert!(
            matches!(
                classify_event_id(malformed),
                Err(CalendarError::InvalidEventIdFormat { .. })
            ),
            "{malformed:?}"
        );
    }
}

#[test]
fn segments_with_hyphens_cannot_be_encoded() {
    let error = encode_event_id(at(2022, 6, 25, 16), "atomic", "call-spread", CsoPeriod::Monthly, false)
        .expect_err("must fail");

    assert!(matches!(
        error,
        CalendarError::InvalidSegment {
            field: "strategyId",
            ..
        }
    ));
}
