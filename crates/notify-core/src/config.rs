//! Client Configuration
//!
//! Endpoint layout and display options. Every field has a default matching
//! the admin site, so an empty JSON object is a valid configuration.

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::models::{NotificationId, RelatedEntity};

/// Placeholder substituted with the notification id in `mark_read_path`
const ID_PLACEHOLDER: &str = "{id}";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Prefix for every endpoint; empty means same origin
    pub base_url: String,
    pub unread_count_path: String,
    pub list_path: String,
    /// Must contain `{id}`
    pub mark_read_path: String,
    /// Form field carrying the anti-forgery token
    pub csrf_field: String,
    /// Where the site sends requests whose session has expired
    pub login_path: String,
    /// Where the mark-read handler lands when it fails
    pub notifications_page_path: String,
    pub poll_interval_secs: u64,
    pub list_limit: usize,
    /// Counts above the cap render as "{cap}+"
    pub badge_cap: Option<u32>,
    /// Longer messages are cut and suffixed with an ellipsis
    pub max_message_chars: Option<usize>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            unread_count_path: "/api/notifications/unread-count".to_string(),
            list_path: "/api/notifications".to_string(),
            mark_read_path: "/notifications/mark-read/{id}".to_string(),
            csrf_field: "csrf_token".to_string(),
            login_path: "/login".to_string(),
            notifications_page_path: "/notifications".to_string(),
            poll_interval_secs: 30,
            list_limit: 5,
            badge_cap: None,
            max_message_chars: None,
        }
    }
}

impl ClientConfig {
    /// Parse a JSON configuration, falling back to defaults for missing fields
    pub fn from_json(raw: &str) -> Result<Self, String> {
        let config: Self = serde_json::from_str(raw).map_err(|e| format!("Invalid notification config: {}", e))?;
        if !config.mark_read_path.contains(ID_PLACEHOLDER) {
            return Err(format!("mark_read_path must contain {}", ID_PLACEHOLDER));
        }
        Ok(config)
    }

    /// Poll period for the unread count, at least one second
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    /// List size actually requested; a limit of zero would only ever show the placeholder
    pub fn effective_limit(&self, limit: usize) -> usize {
        limit.max(1)
    }

    pub fn unread_count_url(&self) -> String {
        self.join(&self.unread_count_path)
    }

    pub fn list_url(&self, limit: usize) -> String {
        format!("{}?limit={}", self.join(&self.list_path), self.effective_limit(limit))
    }

    pub fn mark_read_url(&self, id: &NotificationId) -> String {
        let encoded = utf8_percent_encode(id.as_str(), NON_ALPHANUMERIC).to_string();
        self.join(&self.mark_read_path.replace(ID_PLACEHOLDER, &encoded))
    }

    /// Form body for the mark-read request
    pub fn mark_read_body(&self, csrf_token: &str) -> String {
        format!(
            "{}={}",
            utf8_percent_encode(&self.csrf_field, NON_ALPHANUMERIC),
            utf8_percent_encode(csrf_token, NON_ALPHANUMERIC)
        )
    }

    /// Whether a followed redirect ended on the login page rather than the
    /// page the mark-read handler sends us to
    pub fn is_login_redirect(&self, final_url: &str) -> bool {
        lands_on(final_url, &self.login_path)
    }

    /// Whether a mark-read for a notification with its own page ended on the
    /// notifications overview, where the handler sends its failures.
    ///
    /// Without a related page the overview is also the success target.
    pub fn is_error_landing(&self, final_url: &str, related: Option<&RelatedEntity>) -> bool {
        related.and_then(RelatedEntity::href).is_some() && lands_on(final_url, &self.notifications_page_path)
    }

    fn join(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

fn lands_on(final_url: &str, page_path: &str) -> bool {
    let path = final_url.split(['?', '#']).next().unwrap_or_default();
    !page_path.is_empty() && path.trim_end_matches('/').ends_with(page_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_urls() {
        let config = ClientConfig::default();
        assert_eq!(config.unread_count_url(), "/api/notifications/unread-count");
        assert_eq!(config.list_url(5), "/api/notifications?limit=5");
        assert_eq!(config.mark_read_url(&NotificationId::from(42)), "/notifications/mark-read/42");
        assert_eq!(config.poll_interval(), Duration::from_secs(30));
    }

    #[test]
    fn test_base_url_and_encoding() {
        let config = ClientConfig { base_url: "https://admin.example.com/".to_string(), ..Default::default() };
        assert_eq!(config.list_url(0), "https://admin.example.com/api/notifications?limit=1");
        assert_eq!(
            config.mark_read_url(&NotificationId::new("a/b c")),
            "https://admin.example.com/notifications/mark-read/a%2Fb%20c"
        );
        assert_eq!(config.mark_read_body("tok+en="), "csrf%5Ftoken=tok%2Ben%3D");
    }

    #[test]
    fn test_login_redirect_detection() {
        let config = ClientConfig::default();
        assert!(config.is_login_redirect("https://admin.example.com/login?next=%2Fnotifications"));
        assert!(config.is_login_redirect("/login"));
        assert!(!config.is_login_redirect("https://admin.example.com/orders/12"));
        assert!(!config.is_login_redirect("https://admin.example.com/notifications"));
    }

    #[test]
    fn test_error_landing_needs_related_page() {
        let config = ClientConfig::default();
        let order = RelatedEntity { kind: "order".into(), id: "12".into() };
        let invoice = RelatedEntity { kind: "invoice".into(), id: "3".into() };

        assert!(config.is_error_landing("https://admin.example.com/notifications", Some(&order)));
        assert!(config.is_error_landing("/notifications/", Some(&order)));
        assert!(!config.is_error_landing("https://admin.example.com/orders/12", Some(&order)));
        assert!(!config.is_error_landing("https://admin.example.com/notifications", Some(&invoice)));
        assert!(!config.is_error_landing("https://admin.example.com/notifications", None));
    }

    #[test]
    fn test_from_json_partial() {
        let config = ClientConfig::from_json(r#"{"poll_interval_secs": 10, "list_limit": 8, "badge_cap": 99}"#).unwrap();
        assert_eq!(config.poll_interval(), Duration::from_secs(10));
        assert_eq!(config.list_limit, 8);
        assert_eq!(config.badge_cap, Some(99));
        assert_eq!(config.csrf_field, "csrf_token");
    }

    #[test]
    fn test_from_json_rejects_bad_input() {
        assert!(ClientConfig::from_json("{").is_err());
        assert!(ClientConfig::from_json(r#"{"mark_read_path": "/read"}"#).is_err());
    }
}
