//! Notification Models
//!
//! Data structures matching the notification service payloads.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ApiError;

/// Opaque notification identifier.
///
/// The service sends integers today; strings are accepted as well so the
/// client never does arithmetic on ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NotificationId(String);

impl NotificationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NotificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for NotificationId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for NotificationId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for NotificationId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Token::deserialize(deserializer).map(|t| Self(t.into_string()))
    }
}

/// Integer-or-string id as it appears on the wire
#[derive(Deserialize)]
#[serde(untagged)]
enum Token {
    Number(i64),
    Text(String),
}

impl Token {
    fn into_string(self) -> String {
        match self {
            Token::Number(n) => n.to_string(),
            Token::Text(s) => s,
        }
    }
}

/// Snapshot of the server-side unread count
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnreadCount(u32);

impl UnreadCount {
    pub fn new(count: u32) -> Self {
        Self(count)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// One fewer unread notification, never below zero
    pub fn decremented(self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

/// Entity a notification points at (an order, a product, a user...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedEntity {
    pub kind: String,
    pub id: String,
}

impl RelatedEntity {
    /// Page showing the entity, for the kinds the admin site knows about
    pub fn href(&self) -> Option<String> {
        let id = percent_encoding::utf8_percent_encode(&self.id, percent_encoding::NON_ALPHANUMERIC);
        match self.kind.as_str() {
            "order" => Some(format!("/orders/{}", id)),
            "product" => Some(format!("/products/edit/{}", id)),
            "user" => Some(format!("/admin/users/{}", id)),
            _ => None,
        }
    }
}

/// A notification as the client knows it
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "WireNotification")]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub related: Option<RelatedEntity>,
}

impl Notification {
    pub fn new(id: impl Into<NotificationId>, message: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
            is_read: false,
            created_at,
            related: None,
        }
    }

    pub fn read(mut self) -> Self {
        self.is_read = true;
        self
    }

    pub fn with_related(mut self, kind: impl Into<String>, id: impl Into<String>) -> Self {
        self.related = Some(RelatedEntity { kind: kind.into(), id: id.into() });
        self
    }
}

#[derive(Deserialize)]
struct WireNotification {
    notification_id: NotificationId,
    message: String,
    is_read: bool,
    #[serde(deserialize_with = "deserialize_timestamp")]
    created_at: DateTime<Utc>,
    #[serde(default)]
    related_entity_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_token")]
    related_entity_id: Option<String>,
}

impl From<WireNotification> for Notification {
    fn from(wire: WireNotification) -> Self {
        let related = match (wire.related_entity_type, wire.related_entity_id) {
            (Some(kind), Some(id)) => Some(RelatedEntity { kind, id }),
            _ => None,
        };
        Self {
            id: wire.notification_id,
            message: wire.message,
            is_read: wire.is_read,
            created_at: wire.created_at,
            related,
        }
    }
}

#[derive(Deserialize)]
struct CountBody {
    count: u32,
}

fn deserialize_timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| serde::de::Error::custom(format!("unrecognised timestamp: {}", raw)))
}

fn deserialize_optional_token<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Token>::deserialize(deserializer)?.map(Token::into_string))
}

/// Parse the timestamp formats the service is known to emit.
///
/// RFC 3339 first, then offset-less ISO-8601 (taken as UTC), then RFC 2822
/// which is what `jsonify` produces for Python datetimes.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    DateTime::parse_from_rfc2822(raw).ok().map(|parsed| parsed.with_timezone(&Utc))
}

/// Decode the body of the unread-count endpoint
pub fn decode_unread_count(body: &str) -> Result<UnreadCount, ApiError> {
    serde_json::from_str::<CountBody>(body)
        .map(|b| UnreadCount::new(b.count))
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Decode the body of the recent-notifications endpoint, keeping server order
pub fn decode_notifications(body: &str) -> Result<Vec<Notification>, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}
