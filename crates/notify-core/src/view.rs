//! Render Targets
//!
//! The client never looks elements up itself. The frontend hands it a badge
//! target and a list target; tests hand it recorders.

use crate::models::{NotificationId, UnreadCount};

/// Unread-count badge
pub trait BadgeTarget {
    /// Show the badge with the given label
    fn show(&self, label: &str);
    fn hide(&self);
}

/// Dropdown list container
pub trait ListTarget {
    /// Replace the container contents
    fn render(&self, content: &ListContent);
}

/// What the dropdown list currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum ListContent {
    /// Nothing fetched yet
    Loading,
    /// Fetched, zero notifications
    Empty,
    /// Last fetch failed
    Failed,
    Entries(Vec<EntryView>),
}

impl ListContent {
    pub const LOADING_TEXT: &'static str = "Loading...";
    pub const EMPTY_TEXT: &'static str = "No notifications";
    pub const FAILED_TEXT: &'static str = "Error loading notifications";

    /// Placeholder text shown instead of entries, if any
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            ListContent::Loading => Some(Self::LOADING_TEXT),
            ListContent::Empty => Some(Self::EMPTY_TEXT),
            ListContent::Failed => Some(Self::FAILED_TEXT),
            ListContent::Entries(_) => None,
        }
    }

    pub fn entries(&self) -> &[EntryView] {
        match self {
            ListContent::Entries(entries) => entries,
            _ => &[],
        }
    }
}

/// One rendered dropdown entry
#[derive(Debug, Clone, PartialEq)]
pub struct EntryView {
    pub id: NotificationId,
    pub message: String,
    /// Relative age, e.g. "5m ago"
    pub age: String,
    pub unread: bool,
    /// Page of the related entity
    pub link: Option<String>,
    /// A mark-read request is in flight
    pub pending: bool,
    /// Why the last mark-read failed
    pub error: Option<String>,
}

impl EntryView {
    /// CSS classes; unread entries are emphasized
    pub fn class(&self) -> &'static str {
        if self.unread {
            "dropdown-item fw-bold"
        } else {
            "dropdown-item"
        }
    }
}

/// Badge label for a count, `None` when the badge should be hidden
pub fn badge_label(count: UnreadCount, cap: Option<u32>) -> Option<String> {
    match (count.get(), cap) {
        (0, _) => None,
        (n, Some(cap)) if n > cap => Some(format!("{}+", cap)),
        (n, _) => Some(n.to_string()),
    }
}

/// Cut a message to `max` characters, appending an ellipsis when shortened
pub fn truncate_message(message: &str, max: Option<usize>) -> String {
    match max {
        Some(max) if message.chars().count() > max => {
            let mut short: String = message.chars().take(max).collect();
            short.push('…');
            short
        }
        _ => message.to_string(),
    }
}
