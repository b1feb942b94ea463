//! UI Components
//!
//! Leptos components rendered into the notification dropdown.

mod notification_entry;
mod notification_list;

pub use notification_entry::NotificationEntry;
pub use notification_list::NotificationList;
