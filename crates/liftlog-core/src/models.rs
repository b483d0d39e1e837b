// ABOUTME: Canonical data models for the training log
// ABOUTME: SetRecord, week tags, draft/patch inputs, and derived progress types
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Week grouping tag for consecutive training days.
///
/// Backends disagree on whether weeks are numbered or free-form labels, so
/// both are carried verbatim. Informational only; never used for ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Week {
    /// Numeric week identifier
    Number(i64),
    /// Free-form week label
    Label(String),
}

impl Week {
    /// Parse a raw week identifier, numeric if possible
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        raw.trim()
            .parse::<i64>()
            .map_or_else(|_| Self::Label(raw.to_owned()), Self::Number)
    }
}

impl From<i64> for Week {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Label(label) => write!(f, "{label}"),
        }
    }
}

/// One performed set of one exercise on one date.
///
/// The canonical record every data source shape normalizes into. `exercise`
/// is compared case-sensitively and is the join key across history and
/// progress views; `id` is stable for the record's lifetime and used only for
/// targeted update, never for ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetRecord {
    /// Opaque identifier, collision-free within a user's collection
    pub id: String,
    /// Calendar date the set was performed; `None` only when normalization
    /// could not recover a date from the source record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Week grouping tag, informational only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week: Option<Week>,
    /// Human-readable exercise name
    pub exercise: String,
    /// Ordinal position of this set within `(date, exercise)`
    pub set: u32,
    /// Load in a fixed unit, non-negative
    pub weight: f64,
    /// Repetitions completed
    pub reps: u32,
    /// Reps in reserve; `None` means "not tracked", never zero
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rir: Option<u32>,
}

impl SetRecord {
    /// Whether this record matches an update identity
    #[must_use]
    pub fn matches(&self, key: &SetKey) -> bool {
        self.exercise == key.exercise && self.set == key.set && self.date == key.date
    }
}

/// Input for creating a new set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetDraft {
    /// Exercise name, required
    pub exercise: String,
    /// Set ordinal, required
    pub set: u32,
    /// Load, must be positive
    pub weight: f64,
    /// Repetitions, must be positive
    pub reps: u32,
    /// Optional reps in reserve
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rir: Option<u32>,
    /// Optional date override; the backend assigns today when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

/// Update identity: which record a patch targets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetKey {
    /// Exercise name
    pub exercise: String,
    /// Set ordinal
    pub set: u32,
    /// Date the set was performed
    pub date: Option<NaiveDate>,
}

/// Three-state RIR patch so "clear the RIR" survives the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RirPatch {
    /// Leave the stored value alone
    #[default]
    Untouched,
    /// Remove the stored value
    Clear,
    /// Replace the stored value
    Set(u32),
}

/// Partial update for an existing set.
///
/// Only fields that differ from the currently known record are transmitted;
/// identity fields (`exercise`, `set`, `date`) are never patched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SetPatch {
    /// New load, if changed
    pub weight: Option<f64>,
    /// New repetitions, if changed
    pub reps: Option<u32>,
    /// RIR change, including explicit clearing
    pub rir: RirPatch,
}

impl SetPatch {
    /// Whether the patch carries no field at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weight.is_none() && self.reps.is_none() && self.rir == RirPatch::Untouched
    }
}

/// Derived per-date aggregate for one exercise.
///
/// Computed fresh on every query; never cached across mutations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressPoint {
    /// The training date
    pub date: NaiveDate,
    /// Display form of the date (`M/D`, no leading zeros)
    pub date_formatted: String,
    /// Max load over that date's sets
    pub max_weight: f64,
    /// Sum of `weight * reps` over that date's sets
    pub total_volume: f64,
    /// Mean repetitions, rounded half-away-from-zero to one decimal
    pub avg_reps: f64,
    /// Number of sets performed that date
    pub sets: u32,
}

/// Collection-wide aggregate backing the dashboard stat cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TrainingSummary {
    /// Distinct exercises with at least one progress point
    pub exercises: usize,
    /// Training sessions summed over exercises (one per exercise per date)
    pub sessions: usize,
    /// Sum of each exercise's most recent session volume
    pub latest_volume: f64,
}
