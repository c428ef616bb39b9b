// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for connected sessions.

use crate::error::Result;
use crate::middleware::Session;
use crate::models::{
    PostedStatus, ShareContent, StatusUpdate, UserActivity, UserContact, UserProfile,
};
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::{Validate, ValidationError};

/// API routes (require a connected session).
/// The session middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/profile", get(get_profile))
        .route("/api/contacts", get(get_contacts))
        .route("/api/activity", get(get_activity))
        .route("/api/status", post(post_status))
}

// ─── Profile & Network ───────────────────────────────────────

/// Get the connected user's LinkedIn profile.
async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> Result<Json<UserProfile>> {
    let provider = state.provider_for(&session.id)?;
    Ok(Json(provider.fetch_profile().await?))
}

/// Get the user's connections.
async fn get_contacts(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> Result<Json<Vec<UserContact>>> {
    let provider = state.provider_for(&session.id)?;
    let contacts = provider.fetch_contacts().await;

    tracing::debug!(count = contacts.len(), "Fetched LinkedIn connections");
    Ok(Json(contacts))
}

#[derive(Debug, Deserialize)]
pub struct ActivityParams {
    /// `me` for the user's own shares, anything else for the timeline
    #[serde(default = "default_stream")]
    stream: String,
}

fn default_stream() -> String {
    "timeline".to_string()
}

/// Get recent shares.
async fn get_activity(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Query(params): Query<ActivityParams>,
) -> Result<Json<Vec<UserActivity>>> {
    let provider = state.provider_for(&session.id)?;
    Ok(Json(provider.fetch_activity(&params.stream).await))
}

// ─── Status ──────────────────────────────────────────────────

/// Request body for posting a status update.
#[derive(Debug, Default, Deserialize, Validate)]
#[validate(schema(function = "validate_has_content"))]
pub struct StatusRequest {
    #[validate(length(max = 700, message = "comment must be at most 700 characters"))]
    pub comment: Option<String>,

    #[validate(length(max = 200, message = "title must be at most 200 characters"))]
    pub title: Option<String>,

    #[validate(url(message = "url must be a valid URL"))]
    pub url: Option<String>,

    #[serde(alias = "imageUrl")]
    #[validate(url(message = "image_url must be a valid URL"))]
    pub image_url: Option<String>,

    /// Share with connections only (the default) or with anyone
    pub private: Option<bool>,
}

fn validate_has_content(request: &StatusRequest) -> std::result::Result<(), ValidationError> {
    let present = |field: &Option<String>| field.as_deref().is_some_and(|v| !v.trim().is_empty());
    if present(&request.comment) || present(&request.url) {
        Ok(())
    } else {
        Err(ValidationError::new("empty_status")
            .with_message("a status needs a comment or a url".into()))
    }
}

impl From<StatusRequest> for StatusUpdate {
    fn from(request: StatusRequest) -> Self {
        let non_blank = |field: Option<String>| field.filter(|v| !v.trim().is_empty());

        let share = ShareContent {
            title: non_blank(request.title),
            comment: non_blank(request.comment),
            submitted_url: non_blank(request.url),
            submitted_image_url: non_blank(request.image_url),
            private: request.private,
        };

        match share {
            ShareContent {
                title: None,
                comment: Some(comment),
                submitted_url: None,
                submitted_image_url: None,
                private: None,
            } => StatusUpdate::Text(comment),
            share => StatusUpdate::Share(share),
        }
    }
}

/// Post a status update on the user's behalf.
async fn post_status(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Json(request): Json<StatusRequest>,
) -> Result<(StatusCode, Json<PostedStatus>)> {
    request.validate()?;

    let provider = state.provider_for(&session.id)?;
    let posted = provider.post_status(StatusUpdate::from(request)).await?;

    Ok((StatusCode::CREATED, Json(posted)))
}
