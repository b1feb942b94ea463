//! Notification Bell Core
//!
//! Platform-independent half of the notification bell:
//! - models: wire types and decoding
//! - api: transport seam to the notification service
//! - client: polling, rendering and mark-read reconciliation
//! - schedule: when count and list refreshes run
//! - view: render targets and the rendered list model
//!
//! Nothing here touches the DOM; the frontend injects the render targets.

mod api;
mod client;
mod config;
mod error;
mod models;
mod schedule;
mod sequence;
mod state;
mod time_ago;
mod view;


pub use api::NotificationApi;
pub use client::{MarkReadOutcome, NotificationClient, RefreshOutcome};
pub use config::ClientConfig;
pub use error::ApiError;
pub use models::{
    decode_notifications, decode_unread_count, parse_timestamp, Notification, NotificationId,
    RelatedEntity, UnreadCount,
};
pub use schedule::{schedule, Refresh, Triggers};
pub use time_ago::{format_time_ago, Clock, SystemClock};
pub use view::{badge_label, truncate_message, BadgeTarget, EntryView, ListContent, ListTarget};
