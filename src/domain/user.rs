//! Users, user references and the signed-in session.
//!
//! The identity provider is external to the plugin: the signed-in identity is
//! handed over through the plugin configuration and modelled here as a
//! [`Session`]. API documents reference users either by id or as a populated
//! sub-document, which [`UserRef`] captures.

use serde::{Deserialize, Serialize};

/// A user record as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Server identifier.
    #[serde(rename = "_id", default)]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Primary email address.
    #[serde(default)]
    pub email: String,
}

/// A reference to a user inside another document.
///
/// Depending on the endpoint, the API either populates the reference with the
/// user document or leaves the bare object id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserRef {
    /// Populated user document.
    User(User),
    /// Unpopulated object id.
    Id(String),
}

impl UserRef {
    /// Returns the referenced user's id, if known.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::User(user) if !user.id.is_empty() => Some(user.id.as_str()),
            Self::User(_) => None,
            Self::Id(id) => Some(id.as_str()),
        }
    }

    /// Returns the populated user, or `None` for a bare id.
    #[must_use]
    pub const fn populated(&self) -> Option<&User> {
        match self {
            Self::User(user) => Some(user),
            Self::Id(_) => None,
        }
    }
}

/// The signed-in person, as provided by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Full name shown in greetings and used to prefill applications.
    pub name: String,
    /// Primary email address; the API keys all per-user queries on it.
    pub email: String,
}

/// Authentication state of the plugin.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    /// Nobody is signed in; gated routes are unavailable.
    #[default]
    Anonymous,
    /// A user is signed in.
    SignedIn(Identity),
}

impl Session {
    /// Builds a session from optional configuration values.
    ///
    /// An email is required to sign in. When the name is missing or blank, the
    /// local part of the email is used instead.
    #[must_use]
    pub fn from_parts(name: Option<&str>, email: Option<&str>) -> Self {
        let Some(email) = email.map(str::trim).filter(|e| !e.is_empty()) else {
            return Self::Anonymous;
        };

        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map_or_else(
                || email.split('@').next().unwrap_or(email).to_string(),
                ToString::to_string,
            );

        Self::SignedIn(Identity {
            name,
            email: email.to_string(),
        })
    }

    /// Returns the signed-in identity, if any.
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        match self {
            Self::SignedIn(identity) => Some(identity),
            Self::Anonymous => None,
        }
    }

    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        matches!(self, Self::SignedIn(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_requires_an_email() {
        assert_eq!(Session::from_parts(Some("Ada"), None), Session::Anonymous);
        assert_eq!(Session::from_parts(Some("Ada"), Some("  ")), Session::Anonymous);
    }

    #[test]
    fn session_falls_back_to_email_local_part() {
        let session = Session::from_parts(None, Some("ada@example.com"));
        assert_eq!(session.identity().map(|i| i.name.as_str()), Some("ada"));
    }

    #[test]
    fn user_ref_accepts_ids_and_documents() {
        let id: UserRef = serde_json::from_str(r#""64f0c0ffee""#).unwrap();
        assert_eq!(id.id(), Some("64f0c0ffee"));
        assert!(id.populated().is_none());

        let doc: UserRef =
            serde_json::from_str(r#"{"_id":"u1","name":"Ada","email":"ada@example.com"}"#).unwrap();
        assert_eq!(doc.populated().map(|u| u.email.as_str()), Some("ada@example.com"));
    }
}
