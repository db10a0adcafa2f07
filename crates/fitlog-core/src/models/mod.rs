// ABOUTME: Core data models and types for the Fitlog API
// ABOUTME: Re-exports user, nutrition, hydration and training data structures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

//! # Data Models
//!
//! Shared data structures passed between the persistence layer, the
//! intelligence algorithms and the HTTP routes.
//!
//! ## Core Models
//!
//! - `User`: Registered account
//! - `FoodLogEntry`, `MealType`, `ServingSpec`: Food logging
//! - `WaterIntake`: Glasses of water per day
//! - `Routine`, `RoutineDay`: Weekly training routines
//! - `OneRepMaxRecord`, `WeightUnit`: Strength records

mod hydration;
mod nutrition;
mod training;
mod user;

pub use hydration::WaterIntake;
pub use nutrition::{FoodLogEntry, MealType, ServingQuantity, ServingSpec, ServingUnit};
pub use training::{OneRepMaxRecord, Routine, RoutineDay, WeightUnit};
pub use user::User;
