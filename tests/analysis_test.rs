// ABOUTME: Integration tests for the derived query views
// ABOUTME: History ordering, progress aggregation, name dedup, and dashboard summary
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{date, record, undated_record};
use liftlog::analysis::{
    dates_desc, exercise_names, history_for, next_set_number, progress_for, records_on,
    training_summary,
};

#[test]
fn single_session_progress_point() {
    // two squat sets on one day collapse into one aggregate point
    let records = [
        record("2024-01-01", "Squat", 1, 100.0, 10),
        record("2024-01-01", "Squat", 2, 110.0, 8),
    ];

    let points = progress_for(&records, "Squat");
    assert_eq!(points.len(), 1);

    let point = &points[0];
    assert_eq!(point.date, date("2024-01-01"));
    assert_eq!(point.date_formatted, "1/1");
    assert!((point.max_weight - 110.0).abs() < f64::EPSILON);
    assert!((point.total_volume - 1880.0).abs() < f64::EPSILON);
    assert!((point.avg_reps - 9.0).abs() < f64::EPSILON);
    assert_eq!(point.sets, 2);
}

#[test]
fn history_is_sorted_by_date_then_set() {
    let records = [
        record("2024-01-08", "Squat", 2, 105.0, 8),
        record("2024-01-01", "Squat", 1, 100.0, 10),
        record("2024-01-08", "Squat", 1, 100.0, 10),
        record("2024-01-01", "Bench", 1, 60.0, 10),
        record("2024-01-01", "Squat", 2, 110.0, 8),
    ];

    let history = history_for(&records, "Squat");
    assert_eq!(history.len(), 4);
    for pair in history.windows(2) {
        assert!(pair[0].date <= pair[1].date);
        if pair[0].date == pair[1].date {
            assert!(pair[0].set <= pair[1].set);
        }
    }
}

#[test]
fn undated_records_sort_last_and_skip_progress() {
    let records = [
        undated_record("Squat", 1, 90.0, 12),
        record("2024-01-01", "Squat", 1, 100.0, 10),
    ];

    let history = history_for(&records, "Squat");
    assert_eq!(history[0].date, Some(date("2024-01-01")));
    assert_eq!(history[1].date, None);

    // no day to join an undated record to
    let points = progress_for(&records, "Squat");
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].sets, 1);
}

#[test]
fn total_volume_matches_the_per_record_sum() {
    let records = [
        record("2024-01-01", "Squat", 1, 100.0, 10),
        record("2024-01-01", "Squat", 2, 110.0, 8),
        record("2024-01-08", "Squat", 1, 102.5, 10),
        record("2024-01-08", "Bench", 1, 60.0, 10),
    ];

    for point in progress_for(&records, "Squat") {
        let expected: f64 = records
            .iter()
            .filter(|r| r.exercise == "Squat" && r.date == Some(point.date))
            .map(|r| r.weight * f64::from(r.reps))
            .sum();
        assert!((point.total_volume - expected).abs() < f64::EPSILON);
    }
}

#[test]
fn avg_reps_rounds_half_away_from_zero() {
    let records = [
        record("2024-01-01", "Row", 1, 60.0, 9),
        record("2024-01-01", "Row", 2, 60.0, 10),
    ];
    let points = progress_for(&records, "Row");
    assert!((points[0].avg_reps - 9.5).abs() < f64::EPSILON);

    let records = [
        record("2024-01-01", "Row", 1, 60.0, 4),
        record("2024-01-01", "Row", 2, 60.0, 5),
        record("2024-01-01", "Row", 3, 60.0, 5),
    ];
    let points = progress_for(&records, "Row");
    assert!((points[0].avg_reps - 4.7).abs() < f64::EPSILON);
}

#[test]
fn exercise_names_are_sorted_and_deduplicated() {
    let records = [
        record("2024-01-01", "Squat", 1, 100.0, 10),
        record("2024-01-02", "Bench", 1, 60.0, 10),
        record("2024-01-03", "Squat", 1, 100.0, 10),
        record("2024-01-03", "bench", 1, 60.0, 10),
    ];

    // case-sensitive: "Bench" and "bench" are distinct exercises
    let names = exercise_names(&records);
    assert_eq!(names, ["Bench", "Squat", "bench"]);
}

#[test]
fn records_on_keeps_collection_order() {
    let records = [
        record("2024-01-01", "Squat", 2, 110.0, 8),
        record("2024-01-02", "Bench", 1, 60.0, 10),
        record("2024-01-01", "Squat", 1, 100.0, 10),
    ];

    let day = records_on(&records, date("2024-01-01"));
    assert_eq!(day.len(), 2);
    assert_eq!(day[0].set, 2);
    assert_eq!(day[1].set, 1);
}

#[test]
fn next_set_number_continues_the_day() {
    let records = [
        record("2024-01-01", "Squat", 1, 100.0, 10),
        record("2024-01-01", "Squat", 3, 110.0, 8),
        record("2024-01-02", "Squat", 5, 110.0, 8),
    ];

    assert_eq!(next_set_number(&records, "Squat", date("2024-01-01")), 4);
    assert_eq!(next_set_number(&records, "Squat", date("2024-01-03")), 1);
    assert_eq!(next_set_number(&records, "Bench", date("2024-01-01")), 1);
}

#[test]
fn dates_run_newest_first() {
    let records = [
        record("2024-01-01", "Squat", 1, 100.0, 10),
        record("2024-01-08", "Squat", 1, 100.0, 10),
        record("2024-01-01", "Bench", 1, 60.0, 10),
        undated_record("Curl", 1, 20.0, 12),
    ];

    assert_eq!(
        dates_desc(&records),
        [date("2024-01-08"), date("2024-01-01")]
    );
}

#[test]
fn summary_aggregates_across_exercises() {
    let records = [
        record("2024-01-01", "Squat", 1, 100.0, 10), // volume 1000
        record("2024-01-08", "Squat", 1, 110.0, 10), // volume 1100, latest
        record("2024-01-08", "Bench", 1, 60.0, 10),  // volume 600, latest
    ];

    let summary = training_summary(&records);
    assert_eq!(summary.exercises, 2);
    assert_eq!(summary.sessions, 3);
    assert!((summary.latest_volume - 1700.0).abs() < f64::EPSILON);
}

#[test]
fn empty_collection_yields_empty_views() {
    let records: [liftlog_core::models::SetRecord; 0] = [];
    assert!(progress_for(&records, "Squat").is_empty());
    assert!(history_for(&records, "Squat").is_empty());
    assert!(exercise_names(&records).is_empty());
    assert_eq!(training_summary(&records), Default::default());
}
