// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! A first-degree connection of the user.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContact {
    pub identifier: Option<String>,
    /// "Last First" (connections list the surname first)
    pub display_name: Option<String>,
    #[serde(rename = "profileURL")]
    pub profile_url: Option<String>,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    /// Connection summary
    pub description: Option<String>,
}
