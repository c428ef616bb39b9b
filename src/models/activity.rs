// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Network update (share) activity.

use serde::{Deserialize, Serialize};

/// Number of updates requested per activity fetch.
pub const ACTIVITY_PAGE_SIZE: u32 = 25;

/// One share from the user's network update stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserActivity {
    pub id: Option<String>,
    /// Raw timestamp as sent by LinkedIn (milliseconds since the epoch)
    pub date: Option<String>,
    /// Comment of the shared item
    pub text: Option<String>,
    pub user: ActivityUser,
}

/// Author of an activity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityUser {
    pub identifier: Option<String>,
    /// "First Last"
    pub display_name: Option<String>,
    #[serde(rename = "profileURL")]
    pub profile_url: Option<String>,
    /// The updates endpoint does not carry pictures; always `None`.
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
}

/// Which update stream to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityScope {
    /// The user's own shares
    Me,
    /// The whole network timeline
    Timeline,
}

impl ActivityScope {
    /// `"me"` selects the user's own shares; anything else the timeline.
    pub fn parse(stream: &str) -> Self {
        if stream == "me" {
            ActivityScope::Me
        } else {
            ActivityScope::Timeline
        }
    }

    /// Query parameters for the network updates endpoint.
    pub fn query(&self) -> Vec<(String, String)> {
        let mut query = vec![("type".to_string(), "SHAR".to_string())];
        if *self == ActivityScope::Me {
            query.push(("scope".to_string(), "self".to_string()));
        }
        query.push(("count".to_string(), ACTIVITY_PAGE_SIZE.to_string()));
        query
    }
}
