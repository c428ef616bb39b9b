// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the LinkedIn adapter.

pub mod activity;
pub mod contact;
pub mod profile;
pub mod status;
pub mod tokens;

pub use activity::{ActivityScope, ActivityUser, UserActivity, ACTIVITY_PAGE_SIZE};
pub use contact::UserContact;
pub use profile::UserProfile;
pub use status::{PostedStatus, ShareContent, StatusUpdate};
pub use tokens::{Credentials, TokenPair};
