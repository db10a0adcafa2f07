// ABOUTME: Water intake model counting glasses drunk per calendar day
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Glasses of water a user logged on one local calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterIntake {
    /// Local calendar day
    pub date: NaiveDate,
    /// Number of glasses filled
    pub glasses: u32,
}
