//! Notification Service Seam
//!
//! Abstract interface to the remote notification endpoints.
//! The browser implementation uses `fetch`; tests use scripted fakes.

use std::rc::Rc;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::models::{Notification, UnreadCount};

/// Remote notification service.
///
/// Futures are not `Send`: the client runs on a single-threaded event loop.
#[async_trait(?Send)]
pub trait NotificationApi {
    /// Current number of unread notifications
    async fn unread_count(&self) -> Result<UnreadCount, ApiError>;

    /// Most recent notifications, newest first, at most `limit`
    async fn recent(&self, limit: usize) -> Result<Vec<Notification>, ApiError>;

    /// Ask the service to flag one notification as read
    async fn mark_read(&self, notification: &Notification) -> Result<(), ApiError>;
}

#[async_trait(?Send)]
impl<T: NotificationApi + ?Sized> NotificationApi for Rc<T> {
    async fn unread_count(&self) -> Result<UnreadCount, ApiError> {
        (**self).unread_count().await
    }

    async fn recent(&self, limit: usize) -> Result<Vec<Notification>, ApiError> {
        (**self).recent(limit).await
    }

    async fn mark_read(&self, notification: &Notification) -> Result<(), ApiError> {
        (**self).mark_read(notification).await
    }
}
