use super::*;

#[test]
fn parse_timestamp_accepts_rfc3339_and_naive_forms() {
    let a = parse_timestamp("2025-03-01T10:05:00Z").unwrap();
    let b = parse_timestamp("2025-03-01 10:05:00").unwrap();
    let c = parse_timestamp("2025-03-01T12:05:00+02:00").unwrap();
    let d = parse_timestamp("2025-03-01T10:05:00.250").unwrap();
    assert_eq!(a, b);
    assert_eq!(a, c);
    assert!(d > a);
}

#[test]
fn parse_timestamp_rejects_garbage() {
    assert_eq!(parse_timestamp("yesterday"), None);
}

#[test]
fn compare_timestamps_is_chronological_across_offsets() {
    assert_eq!(
        compare_timestamps("2025-03-01T09:00:00Z", "2025-03-01T10:30:00+02:00"),
        Ordering::Greater
    );
    assert_eq!(compare_timestamps("b", "a"), Ordering::Greater);
}

#[test]
fn compare_timestamps_puts_unparseable_after_parsed() {
    assert_eq!(compare_timestamps("2024-01-01 07zz", "2024-01-01T10:00:00+05:00"), Ordering::Greater);
    assert_eq!(compare_timestamps("2024-01-01 06:00:00", "2024-01-01 07zz"), Ordering::Less);
    assert_eq!(compare_timestamps("2024-01-01 05:00:00", "2024-01-01T05:00:00Z"), Ordering::Less);
}

#[test]
fn mixed_timestamps_sort_consistently() {
    let mut values = vec![
        "2024-01-01 07zz",
        "2024-01-01 06:00:00",
        "garbage",
        "2024-01-01T10:00:00+05:00",
        "2023-12-31T23:00:00Z",
    ];
    values.sort_by(|a, b| compare_timestamps(a, b));
    assert_eq!(
        values,
        vec![
            "2023-12-31T23:00:00Z",
            "2024-01-01T10:00:00+05:00",
            "2024-01-01 06:00:00",
            "2024-01-01 07zz",
            "garbage",
        ]
    );

    let mut reversed = values.clone();
    reversed.reverse();
    reversed.sort_by(|a, b| compare_timestamps(a, b));
    assert_eq!(reversed, values);
}

#[test]
fn format_timestamp_renders_minutes_or_raw() {
    assert_eq!(format_timestamp("2025-03-01T10:05:42Z"), "2025-03-01 10:05");
    assert_eq!(format_timestamp("soon"), "soon");
    assert_eq!(format_day("2025-03-01T10:05:42Z"), "2025-03-01");
}

#[test]
fn truncate_preview_collapses_whitespace_and_cuts() {
    assert_eq!(truncate_preview("hello\n  world", 40), "hello world");
    assert_eq!(truncate_preview("abcdefgh", 4), "abcd…");
    assert_eq!(truncate_preview("ünïcödé", 3), "ünï…");
}
