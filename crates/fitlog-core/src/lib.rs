// ABOUTME: Core types and constants for the Fitlog fitness tracking API
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

#![deny(unsafe_code)]

//! # Fitlog Core
//!
//! Foundation crate providing shared types and constants for the Fitlog
//! fitness tracking API. It changes rarely, which keeps incremental builds of
//! the server and intelligence crates fast.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Application-wide constants organized by domain
//! - **models**: Users, food log entries, water intake, routines and 1RM records

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (food log, water, routines, one-rep max, users)
pub mod models;
