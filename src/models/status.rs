// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Status updates (shares) posted on the user's behalf.

use serde::{Deserialize, Serialize};

/// A status update to publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusUpdate {
    /// Plain text comment, shared with connections only.
    Text(String),
    /// Share with optional title, link and image.
    Share(ShareContent),
}

/// Fields of a share. Unset fields are left out of the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareContent {
    pub title: Option<String>,
    pub comment: Option<String>,
    pub submitted_url: Option<String>,
    pub submitted_image_url: Option<String>,
    /// `None` means private (connections only).
    pub private: Option<bool>,
}

impl StatusUpdate {
    /// Build a share from positional fields:
    /// `[title, comment, url, image_url, is_private]`.
    ///
    /// Blank fields are skipped, as are fields past the fifth. The privacy
    /// flag only makes the share public when it reads as false
    /// (`false`, `0`, `no`).
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Self {
        let field = |i: usize| {
            fields
                .get(i)
                .map(|f| f.as_ref().trim())
                .filter(|f| !f.is_empty())
                .map(str::to_string)
        };

        let private = field(4).map(|flag| {
            !matches!(flag.to_ascii_lowercase().as_str(), "false" | "0" | "no")
        });

        StatusUpdate::Share(ShareContent {
            title: field(0),
            comment: field(1),
            submitted_url: field(2),
            submitted_image_url: field(3),
            private,
        })
    }

    /// Whether the update is restricted to the user's connections.
    pub fn is_private(&self) -> bool {
        match self {
            StatusUpdate::Text(_) => true,
            StatusUpdate::Share(share) => share.private.unwrap_or(true),
        }
    }

    /// JSON body for the shares endpoint.
    pub fn to_share_request(&self) -> ShareRequest {
        let visibility = Visibility {
            code: if self.is_private() {
                VISIBILITY_CONNECTIONS
            } else {
                VISIBILITY_ANYONE
            },
        };

        match self {
            StatusUpdate::Text(comment) => ShareRequest {
                comment: Some(comment.clone()),
                content: None,
                visibility,
            },
            StatusUpdate::Share(share) => {
                let content = ShareRequestContent {
                    title: share.title.clone(),
                    submitted_url: share.submitted_url.clone(),
                    submitted_image_url: share.submitted_image_url.clone(),
                };
                ShareRequest {
                    comment: share.comment.clone(),
                    content: (!content.is_empty()).then_some(content),
                    visibility,
                }
            }
        }
    }
}

impl From<&str> for StatusUpdate {
    fn from(comment: &str) -> Self {
        StatusUpdate::Text(comment.to_string())
    }
}

const VISIBILITY_CONNECTIONS: &str = "connections-only";
const VISIBILITY_ANYONE: &str = "anyone";

/// Wire format of `POST /people/~/shares` (JSON flavor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<ShareRequestContent>,
    pub visibility: Visibility,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ShareRequestContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_image_url: Option<String>,
}

impl ShareRequestContent {
    fn is_empty(&self) -> bool {
        self.title.is_none() && self.submitted_url.is_none() && self.submitted_image_url.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Visibility {
    pub code: &'static str,
}

/// LinkedIn's acknowledgement of a posted share.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostedStatus {
    #[serde(default)]
    pub update_key: Option<String>,
    #[serde(default)]
    pub update_url: Option<String>,
}

impl PostedStatus {
    /// Best-effort decode of the share response; an unreadable body yields
    /// an empty acknowledgement.
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }
}
