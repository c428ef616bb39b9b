// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mapping of LinkedIn v1 XML payloads onto the normalized models.
//!
//! These functions take the raw response body and never touch the network.
//! Elements missing from the payload leave the matching field `None`.

use crate::models::{ActivityUser, UserActivity, UserContact, UserProfile};
use roxmltree::{Document, Node};

pub use roxmltree::Error as XmlError;

/// First child element with the given tag name.
fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.has_tag_name(name))
}

/// Trimmed, non-empty text of the element at `path` below `node`.
fn text_at(node: Node, path: &[&str]) -> Option<String> {
    let mut current = node;
    for name in path {
        current = child(current, name)?;
    }
    current
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Join the present name parts with a single space.
fn join_names(parts: &[Option<&str>]) -> Option<String> {
    let joined = parts.iter().flatten().copied().collect::<Vec<_>>().join(" ");
    (!joined.is_empty()).then_some(joined)
}

/// Map the `<person>` document returned by the profile endpoint.
pub fn parse_profile(xml: &str) -> Result<UserProfile, XmlError> {
    let doc = Document::parse(xml)?;
    let person = doc.root_element();

    let first_name = text_at(person, &["first-name"]);
    let last_name = text_at(person, &["last-name"]);
    let display_name = join_names(&[first_name.as_deref(), last_name.as_deref()]);
    let email = text_at(person, &["email-address"]);

    // The original-size picture wins over the thumbnail when both are sent.
    let photo_url = text_at(person, &["picture-urls", "picture-url"])
        .or_else(|| text_at(person, &["picture-url"]));

    Ok(UserProfile {
        identifier: text_at(person, &["id"]),
        first_name,
        last_name,
        display_name,
        email_verified: email.clone(),
        email,
        photo_url,
        profile_url: text_at(person, &["public-profile-url"]),
        description: text_at(person, &["headline"]),
        phone: text_at(person, &["phone-numbers", "phone-number", "phone-number"]),
        birth_day: text_at(person, &["date-of-birth", "day"]),
        birth_month: text_at(person, &["date-of-birth", "month"]),
        birth_year: text_at(person, &["date-of-birth", "year"]),
    })
}

/// Map the `<connections>` document; one contact per `<person>`.
pub fn parse_connections(xml: &str) -> Result<Vec<UserContact>, XmlError> {
    let doc = Document::parse(xml)?;

    let contacts = doc
        .root_element()
        .children()
        .filter(|n| n.has_tag_name("person"))
        .map(|person| {
            let first_name = text_at(person, &["first-name"]);
            let last_name = text_at(person, &["last-name"]);
            UserContact {
                identifier: text_at(person, &["id"]),
                display_name: join_names(&[last_name.as_deref(), first_name.as_deref()]),
                profile_url: text_at(person, &["public-profile-url"]),
                photo_url: text_at(person, &["picture-url"]),
                description: text_at(person, &["summary"]),
            }
        })
        .collect();

    Ok(contacts)
}

/// Map the `<updates>` document of the network updates endpoint.
pub fn parse_updates(xml: &str) -> Result<Vec<UserActivity>, XmlError> {
    let doc = Document::parse(xml)?;

    let activities = doc
        .root_element()
        .children()
        .filter(|n| n.has_tag_name("update"))
        .map(|update| {
            let person = child(update, "update-content").and_then(|c| child(c, "person"));

            let user = person
                .map(|person| {
                    let first_name = text_at(person, &["first-name"]);
                    let last_name = text_at(person, &["last-name"]);
                    ActivityUser {
                        identifier: text_at(person, &["id"]),
                        display_name: join_names(&[first_name.as_deref(), last_name.as_deref()]),
                        profile_url: text_at(person, &["site-standard-profile-request", "url"]),
                        photo_url: None,
                    }
                })
                .unwrap_or_default();

            UserActivity {
                id: text_at(update, &["id"]),
                date: text_at(update, &["timestamp"]),
                text: person.and_then(|p| text_at(p, &["current-share", "comment"])),
                user,
            }
        })
        .collect();

    Ok(activities)
}

/// `<message>` of an API `<error>` document, if the body is one.
pub fn api_error_message(xml: &str) -> Option<String> {
    let doc = Document::parse(xml).ok()?;
    let root = doc.root_element();
    if !root.has_tag_name("error") {
        return None;
    }
    text_at(root, &["message"])
}
