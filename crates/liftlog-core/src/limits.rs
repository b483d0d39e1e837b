// ABOUTME: Validation bounds shared by the store and the CLI
// ABOUTME: Minimum ordinals and field length caps for set submissions
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

/// Lowest accepted set ordinal
pub const MIN_SET_NUMBER: u32 = 1;

/// Lowest accepted repetition count
pub const MIN_REPS: u32 = 1;

/// Longest accepted exercise name, in bytes
pub const MAX_EXERCISE_NAME_LEN: usize = 200;
