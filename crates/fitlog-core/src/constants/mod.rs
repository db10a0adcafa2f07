// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Unit conversion factors, validation limits and defaults for Fitlog
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

//! Constants grouped by domain.

/// Serving-size and body-weight conversion factors
pub mod units {
    /// Grams in one avoirdupois ounce
    pub const GRAMS_PER_OUNCE: f64 = 28.3495;
    /// Grams in one cup (water-density approximation)
    pub const GRAMS_PER_CUP: f64 = 240.0;
    /// Fluid ounces in one cup
    pub const OUNCES_PER_CUP: f64 = 8.0;
    /// Kilograms in one pound
    pub const KG_PER_POUND: f64 = 0.453_592;
}

/// Validation limits for user input
pub mod limits {
    /// Minimum password length accepted at registration
    pub const MIN_PASSWORD_LENGTH: usize = 8;
    /// Special characters, one of which must appear in a password
    pub const PASSWORD_SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";
    /// Maximum repetitions accepted by the 1RM estimators
    pub const MAX_ONE_REP_MAX_REPS: u32 = 30;
    /// Lowest accepted rate of perceived exertion
    pub const MIN_RPE: f64 = 1.0;
    /// Highest accepted rate of perceived exertion
    pub const MAX_RPE: f64 = 10.0;
    /// Upper bound for food search page size
    pub const MAX_FOOD_SEARCH_RESULTS: u32 = 50;
    /// Number of exercises requested per body part
    pub const EXERCISES_PER_BODY_PART: u32 = 10;
}

/// Defaults used when configuration or stored data is absent
pub mod defaults {
    /// Daily calorie goal when the user never set one
    pub const CALORIE_GOAL: f64 = 2000.0;
    /// Food search page size when the caller gives none
    pub const FOOD_SEARCH_RESULTS: u32 = 10;
    /// Language search results are translated into
    pub const USER_LANGUAGE: &str = "es";
    /// Offset from UTC, in hours, that defines a user's calendar day
    pub const LOCAL_UTC_OFFSET_HOURS: i32 = -5;
    /// JWT lifetime in hours
    pub const JWT_EXPIRY_HOURS: i64 = 24;
}

/// Service names used in structured logs
pub mod service_names {
    /// Server service name
    pub const FITLOG_SERVER: &str = "fitlog-server";
    /// `FatSecret` food database
    pub const FATSECRET: &str = "FatSecret API";
    /// `OpenAI` chat completions
    pub const OPENAI: &str = "OpenAI API";
    /// `ExerciseDB` on `RapidAPI`
    pub const EXERCISEDB: &str = "ExerciseDB API";
}
