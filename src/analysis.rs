// ABOUTME: Pure query views over the canonical record collection
// ABOUTME: Per-date lookup, per-exercise history, progress series, and dashboard aggregates
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Query Views
//!
//! Every view is a pure function over a record slice, derived fresh on each
//! call and never cached across mutations. The store re-exports them bound to
//! its current collection.
//!
//! Records whose date could not be recovered during normalization sort after
//! all dated records in history views and are excluded from progress
//! aggregation, which has no day to join them to.

use chrono::{Datelike, NaiveDate};
use liftlog_core::models::{ProgressPoint, SetRecord, TrainingSummary};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// All records performed on `date`, in original collection order
#[must_use]
pub fn records_on(records: &[SetRecord], date: NaiveDate) -> Vec<SetRecord> {
    records
        .iter()
        .filter(|r| r.date == Some(date))
        .cloned()
        .collect()
}

/// Chronological history for one exercise: date ascending, then set ordinal
/// ascending. Undated records sort last, by set ordinal.
#[must_use]
pub fn history_for(records: &[SetRecord], exercise: &str) -> Vec<SetRecord> {
    let mut history: Vec<SetRecord> = records
        .iter()
        .filter(|r| r.exercise == exercise)
        .cloned()
        .collect();
    history.sort_by(|a, b| match (a.date, b.date) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.set.cmp(&b.set)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.set.cmp(&b.set),
    });
    history
}

/// Distinct exercise names, lexicographically ascending, duplicates collapsed
#[must_use]
pub fn exercise_names(records: &[SetRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.exercise.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct training dates, newest first
#[must_use]
pub fn dates_desc(records: &[SetRecord]) -> Vec<NaiveDate> {
    records
        .iter()
        .filter_map(|r| r.date)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .rev()
        .collect()
}

/// One progress point per distinct dated day for the exercise, ascending
#[must_use]
pub fn progress_for(records: &[SetRecord], exercise: &str) -> Vec<ProgressPoint> {
    let history = history_for(records, exercise);
    let dated: Vec<&SetRecord> = history.iter().filter(|r| r.date.is_some()).collect();

    let mut points = Vec::new();
    let mut start = 0;
    while start < dated.len() {
        let date = dated[start].date;
        let mut end = start;
        while end < dated.len() && dated[end].date == date {
            end += 1;
        }
        if let Some(date) = date {
            points.push(progress_point(date, &dated[start..end]));
        }
        start = end;
    }
    points
}

fn progress_point(date: NaiveDate, sets: &[&SetRecord]) -> ProgressPoint {
    let max_weight = sets.iter().map(|r| r.weight).fold(0.0_f64, f64::max);
    let total_volume = sets
        .iter()
        .map(|r| r.weight * f64::from(r.reps))
        .sum::<f64>();
    let avg_reps = sets.iter().map(|r| f64::from(r.reps)).sum::<f64>() / sets.len() as f64;

    ProgressPoint {
        date,
        date_formatted: format_display_date(date),
        max_weight,
        total_volume,
        avg_reps: round_one_decimal(avg_reps),
        sets: sets.len() as u32,
    }
}

/// Next free set ordinal for the exercise on `date`
#[must_use]
pub fn next_set_number(records: &[SetRecord], exercise: &str, date: NaiveDate) -> u32 {
    records
        .iter()
        .filter(|r| r.exercise == exercise && r.date == Some(date))
        .map(|r| r.set)
        .max()
        .map_or(1, |highest| highest + 1)
}

/// Collection-wide aggregate backing the dashboard stat cards
#[must_use]
pub fn training_summary(records: &[SetRecord]) -> TrainingSummary {
    let mut summary = TrainingSummary::default();
    for name in exercise_names(records) {
        let points = progress_for(records, &name);
        if let Some(latest) = points.last() {
            summary.exercises += 1;
            summary.sessions += points.len();
            summary.latest_volume += latest.total_volume;
        }
    }
    summary
}

/// `M/D` without leading zeros, the display form the dashboard charts use
fn format_display_date(date: NaiveDate) -> String {
    format!("{}/{}", date.month(), date.day())
}

/// Round half-away-from-zero at one decimal
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn display_date_drops_leading_zeros() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(format_display_date(date), "3/7");
        let date = NaiveDate::from_ymd_opt(2024, 11, 23).unwrap();
        assert_eq!(format_display_date(date), "11/23");
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert!((round_one_decimal(8.25) - 8.3).abs() < f64::EPSILON);
        assert!((round_one_decimal(8.24) - 8.2).abs() < f64::EPSILON);
        assert!((round_one_decimal(9.0) - 9.0).abs() < f64::EPSILON);
    }
}
