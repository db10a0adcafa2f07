// ABOUTME: User account model
// ABOUTME: Holds identity fields and the bcrypt password hash (never serialized)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registered user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,
    /// Lower-cased username
    pub username: String,
    /// Email address used for login
    pub email: String,
    /// Bcrypt hash of the password
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Registration timestamp
    pub created_at: DateTime<Utc>,
}
