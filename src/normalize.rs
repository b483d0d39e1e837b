// ABOUTME: Normalization of heterogeneous backend payloads into canonical set records
// ABOUTME: Tagged-union shape classification with permissive per-field mapping
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Payload Normalization
//!
//! The persistence backend has emitted three different shapes over its
//! lifetime: a flat array of record objects, an object wrapping such an array
//! under a known field, and a nested week → date → exercise → sets map.
//! Classification is an explicit dispatch over a tagged union rather than
//! duck-typed sniffing; every variant funnels into the same canonical
//! [`SetRecord`].
//!
//! Normalization never fails. A malformed slice at any nesting level
//! contributes nothing and leaves a `debug!` breadcrumb.

use chrono::NaiveDate;
use liftlog_core::models::{SetRecord, Week};
use serde_json::{Map, Value};
use tracing::debug;
use uuid::Uuid;

/// Wrapper fields a flat sequence may hide under
const WRAPPER_FIELDS: [&str; 2] = ["exercises", "records"];

/// Wrapper field for the nested weekly shape
const WEEKLY_WRAPPER: &str = "weeks";

/// The shapes the backend is known to emit
#[derive(Debug, Clone, PartialEq)]
pub enum RawExercisePayload {
    /// Flat sequence of record-like objects
    Flat(Vec<Value>),
    /// Flat sequence found under a known wrapper field
    Wrapped(Vec<Value>),
    /// Nested week → date → exercise → sets structure
    Weekly(Map<String, Value>),
    /// Unrecognized input; contributes no records
    Empty,
}

/// Classify a raw payload into one of the accepted shapes.
///
/// Anything that is neither an array nor an object maps to
/// [`RawExercisePayload::Empty`].
#[must_use]
pub fn classify(raw: Value) -> RawExercisePayload {
    match raw {
        Value::Array(items) => RawExercisePayload::Flat(items),
        Value::Object(mut obj) => {
            for field in WRAPPER_FIELDS {
                if matches!(obj.get(field), Some(Value::Array(_))) {
                    if let Some(Value::Array(items)) = obj.remove(field) {
                        return RawExercisePayload::Wrapped(items);
                    }
                }
            }
            if let Some(Value::Object(weeks)) = obj.remove(WEEKLY_WRAPPER) {
                return RawExercisePayload::Weekly(weeks);
            }
            if obj.is_empty() {
                RawExercisePayload::Empty
            } else {
                RawExercisePayload::Weekly(obj)
            }
        }
        _ => RawExercisePayload::Empty,
    }
}

/// Normalize a raw payload into a flat, order-preserving record sequence
#[must_use]
pub fn normalize(raw: Value) -> Vec<SetRecord> {
    match classify(raw) {
        RawExercisePayload::Flat(items) | RawExercisePayload::Wrapped(items) => {
            normalize_flat(&items)
        }
        RawExercisePayload::Weekly(weeks) => normalize_weekly(&weeks),
        RawExercisePayload::Empty => Vec::new(),
    }
}

/// Hints carried down from enclosing nesting levels
#[derive(Debug, Default)]
struct RecordContext<'a> {
    week: Option<Week>,
    date: Option<NaiveDate>,
    exercise: Option<&'a str>,
    /// 1-based position within a per-exercise sets array
    position: Option<u32>,
}

fn normalize_flat(items: &[Value]) -> Vec<SetRecord> {
    items
        .iter()
        .enumerate()
        .filter_map(|(idx, item)| {
            let record = record_from_value(item, &RecordContext::default());
            if record.is_none() {
                debug!("dropping unparsable record at index {idx}");
            }
            record
        })
        .collect()
}

fn normalize_weekly(weeks: &Map<String, Value>) -> Vec<SetRecord> {
    // Top-level keys that are themselves dates mean the structure skipped the
    // week level entirely; the whole map is week 1.
    let date_keyed = !weeks.is_empty() && weeks.keys().all(|k| parse_date(k).is_some());
    if date_keyed {
        return normalize_week(&Week::Number(1), weeks);
    }

    let mut records = Vec::new();
    for (week_key, value) in weeks {
        match value.as_object() {
            Some(dates) => records.extend(normalize_week(&Week::parse(week_key), dates)),
            None => debug!("dropping non-object week entry '{week_key}'"),
        }
    }
    records
}

fn normalize_week(week: &Week, dates: &Map<String, Value>) -> Vec<SetRecord> {
    let mut records = Vec::new();
    for (date_key, value) in dates {
        let Some(date) = parse_date(date_key) else {
            debug!("dropping week {week} entry with undated key '{date_key}'");
            continue;
        };
        let Some(exercises) = value.as_object() else {
            debug!("dropping non-object date entry '{date_key}'");
            continue;
        };
        for (exercise, sets_value) in exercises {
            let Some(sets) = sets_value.as_array() else {
                debug!("dropping non-array sets for '{exercise}' on {date_key}");
                continue;
            };
            for (idx, set_value) in sets.iter().enumerate() {
                let ctx = RecordContext {
                    week: Some(week.clone()),
                    date: Some(date),
                    exercise: Some(exercise),
                    position: Some(idx as u32 + 1),
                };
                match record_from_value(set_value, &ctx) {
                    Some(record) => records.push(record),
                    None => debug!("dropping unparsable set {idx} for '{exercise}' on {date_key}"),
                }
            }
        }
    }
    records
}

/// Map one record-like object into a canonical record.
///
/// Required fields (exercise, set ordinal, weight, reps) that cannot be
/// recovered from the object or the surrounding context make the record
/// unparsable. A missing date is recoverable later only for store-created
/// records, so it stays `None` here.
fn record_from_value(value: &Value, ctx: &RecordContext<'_>) -> Option<SetRecord> {
    let obj = value.as_object()?;

    let exercise = ctx
        .exercise
        .map(str::to_owned)
        .or_else(|| non_empty_string(obj, "exercise"))?;
    let set = integer_field(obj, "set")
        .or_else(|| integer_field(obj, "sets"))
        .or(ctx.position)
        .filter(|s| *s >= 1)?;
    let weight = number_field(obj, "weight").filter(|w| *w >= 0.0)?;
    let reps = integer_field(obj, "reps").filter(|r| *r >= 1)?;

    Some(SetRecord {
        id: id_field(obj).unwrap_or_else(|| Uuid::new_v4().to_string()),
        date: ctx.date.or_else(|| date_field(obj)),
        week: week_field(obj).or_else(|| ctx.week.clone()),
        exercise,
        set,
        weight,
        reps,
        rir: rir_field(obj),
    })
}

fn non_empty_string(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

/// Identifiers arrive as strings or numbers depending on the backend
fn id_field(obj: &Map<String, Value>) -> Option<String> {
    match obj.get("id") {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Numbers arrive as JSON numbers or numeric strings
fn number_field(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    match obj.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn integer_field(obj: &Map<String, Value>, key: &str) -> Option<u32> {
    match obj.get(key)? {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Missing or empty RIR stays absent, never zero
fn rir_field(obj: &Map<String, Value>) -> Option<u32> {
    match obj.get("rir")? {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn week_field(obj: &Map<String, Value>) -> Option<Week> {
    match obj.get("week")? {
        Value::Number(n) => n.as_i64().map(Week::Number),
        Value::String(s) if !s.trim().is_empty() => Some(Week::parse(s)),
        _ => None,
    }
}

/// Recover the record date: an explicit `date` field wins, then the date
/// portion of a `performed_at` timestamp
fn date_field(obj: &Map<String, Value>) -> Option<NaiveDate> {
    if let Some(date) = obj.get("date").and_then(Value::as_str).and_then(parse_date) {
        return Some(date);
    }
    obj.get("performed_at")
        .and_then(Value::as_str)
        .and_then(parse_timestamp_date)
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Take the date portion of an RFC 3339 timestamp, tolerating bare dates
fn parse_timestamp_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    chrono::DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| parse_date(trimmed.get(..10)?))
}
