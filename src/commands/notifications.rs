//! Notification Endpoints
//!
//! `NotificationApi` over HTTP, with the anti-forgery token read from the page.

use async_trait::async_trait;
use notify_core::{
    decode_notifications, decode_unread_count, ApiError, ClientConfig, Notification, NotificationApi, UnreadCount,
};

use super::{get_text, post_form};

pub struct HttpNotificationApi {
    config: ClientConfig,
    /// Looked up on every mark-read so a refreshed token is picked up
    csrf_token: Box<dyn Fn() -> Option<String>>,
}

impl HttpNotificationApi {
    pub fn new(config: ClientConfig, csrf_token: impl Fn() -> Option<String> + 'static) -> Self {
        Self {
            config,
            csrf_token: Box::new(csrf_token),
        }
    }
}

#[async_trait(?Send)]
impl NotificationApi for HttpNotificationApi {
    async fn unread_count(&self) -> Result<UnreadCount, ApiError> {
        let body = get_text(&self.config.unread_count_url()).await?;
        decode_unread_count(&body)
    }

    async fn recent(&self, limit: usize) -> Result<Vec<Notification>, ApiError> {
        let body = get_text(&self.config.list_url(limit)).await?;
        decode_notifications(&body)
    }

    async fn mark_read(&self, notification: &Notification) -> Result<(), ApiError> {
        let token = (self.csrf_token)()
            .filter(|t| !t.is_empty())
            .ok_or(ApiError::MissingCsrfToken)?;

        let url = self.config.mark_read_url(&notification.id);
        let response = post_form(&url, &self.config.mark_read_body(&token)).await?;
        if !response.redirected() {
            return Ok(());
        }

        let landed = response.url();
        // An expired session is answered with a redirect to the login form
        if self.config.is_login_redirect(&landed) {
            return Err(ApiError::Status(401));
        }
        if self.config.is_error_landing(&landed, notification.related.as_ref()) {
            return Err(ApiError::Rejected);
        }
        Ok(())
    }
}
