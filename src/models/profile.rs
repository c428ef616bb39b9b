// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Normalized user profile.

use serde::{Deserialize, Serialize};

/// Profile of the connected user.
///
/// Every field is optional: anything LinkedIn did not return stays `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// LinkedIn member ID
    pub identifier: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// "First Last"
    pub display_name: Option<String>,
    pub email: Option<String>,
    /// LinkedIn only exposes confirmed addresses, so this mirrors `email`.
    pub email_verified: Option<String>,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    #[serde(rename = "profileURL")]
    pub profile_url: Option<String>,
    /// Member headline
    pub description: Option<String>,
    pub phone: Option<String>,
    pub birth_day: Option<String>,
    pub birth_month: Option<String>,
    pub birth_year: Option<String>,
}
