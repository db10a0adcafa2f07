// ABOUTME: Fitlog intelligence crate: nutrition parsing and training calculations
// ABOUTME: Pure, synchronous algorithms consumed by the HTTP layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

#![deny(unsafe_code)]

//! # Fitlog Intelligence
//!
//! Algorithms with no I/O and no shared mutable state, safe to call from any
//! number of request handlers concurrently.
//!
//! - **nutrition**: food description parsing, serving-size conversion and
//!   vision-model reply parsing
//! - **strength**: one-rep-max estimation
//! - **dashboard**: aggregation of logged food and water into daily summaries

/// Daily intake aggregation for the dashboard
pub mod dashboard;

/// Nutrition description parsing and serving conversion
pub mod nutrition;

/// One-rep-max estimation
pub mod strength;

pub use dashboard::{summarize_intake, DailyCalories, DashboardSummary, IntakeTotals};
pub use nutrition::{
    convert_serving, parse_description, parse_vision_reply, ConversionResult, ParsedNutrition,
    VisionFood, VisionReplyError,
};
pub use strength::{estimate_one_rep_max, OneRepMaxEstimate, OneRepMaxFormula, OneRepMaxInput};
