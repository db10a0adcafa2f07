// ABOUTME: Strength training models for routines and one-rep-max records
// ABOUTME: WeightUnit, RoutineDay, Routine and OneRepMaxRecord definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Unit a lifted weight is expressed in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    /// Kilograms
    Kg,
    /// Pounds
    Lb,
}

impl WeightUnit {
    /// Database string representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kg => "kg",
            Self::Lb => "lb",
        }
    }

    /// Parse from the database representation
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "kg" => Some(Self::Kg),
            "lb" => Some(Self::Lb),
            _ => None,
        }
    }
}

/// Day of the week a routine is scheduled on
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum RoutineDay {
    /// Monday
    #[serde(alias = "Monday", alias = "Lunes", alias = "lunes")]
    Monday,
    /// Tuesday
    #[serde(alias = "Tuesday", alias = "Martes", alias = "martes")]
    Tuesday,
    /// Wednesday
    #[serde(alias = "Wednesday", alias = "Miércoles", alias = "miércoles", alias = "miercoles")]
    Wednesday,
    /// Thursday
    #[serde(alias = "Thursday", alias = "Jueves", alias = "jueves")]
    Thursday,
    /// Friday
    #[serde(alias = "Friday", alias = "Viernes", alias = "viernes")]
    Friday,
    /// Saturday
    #[serde(alias = "Saturday", alias = "Sábado", alias = "sábado", alias = "sabado")]
    Saturday,
    /// Sunday
    #[serde(alias = "Sunday", alias = "Domingo", alias = "domingo")]
    Sunday,
}

impl RoutineDay {
    /// Database string representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }

    /// Parse a weekday name, accepting English and Spanish spellings
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "monday" | "lunes" => Some(Self::Monday),
            "tuesday" | "martes" => Some(Self::Tuesday),
            "wednesday" | "miércoles" | "miercoles" => Some(Self::Wednesday),
            "thursday" | "jueves" => Some(Self::Thursday),
            "friday" | "viernes" => Some(Self::Friday),
            "saturday" | "sábado" | "sabado" => Some(Self::Saturday),
            "sunday" | "domingo" => Some(Self::Sunday),
            _ => None,
        }
    }
}

/// Training routine scheduled on a weekday
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Routine {
    /// Row identifier
    pub id: i64,
    /// Scheduled weekday
    pub day: RoutineDay,
    /// Routine name
    pub name: String,
    /// Exercises as supplied by the client, stored as a JSON array
    pub exercises: Vec<Value>,
}

/// Stored one-rep-max estimate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneRepMaxRecord {
    /// Row identifier
    pub id: i64,
    /// Exercise name
    pub exercise: String,
    /// Weight lifted
    pub weight: f64,
    /// Unit of `weight` and `one_rep_max`
    pub unit: WeightUnit,
    /// Repetitions performed
    pub reps: u32,
    /// Rate of perceived exertion (1-10)
    pub rpe: f64,
    /// Estimated one-rep max
    pub one_rep_max: f64,
    /// Day the set was performed
    pub recorded_on: NaiveDate,
}
