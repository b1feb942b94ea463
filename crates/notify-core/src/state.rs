//! Client State
//!
//! Last-fetched count and list plus per-item mark-read bookkeeping.
//! Lives for the page lifetime; nothing is persisted.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use crate::client::MarkReadOutcome;
use crate::config::ClientConfig;
use crate::models::{Notification, NotificationId, UnreadCount};
use crate::time_ago::format_time_ago;
use crate::view::{truncate_message, EntryView, ListContent};

/// Mark-read progress of one notification
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ItemStatus {
    #[default]
    Idle,
    Pending,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ListState {
    #[default]
    NotLoaded,
    Loaded(Vec<Notification>),
    Failed,
}

#[derive(Debug, Default)]
pub struct ClientState {
    unread: Option<UnreadCount>,
    list: ListState,
    statuses: HashMap<NotificationId, ItemStatus>,
    /// Ids whose read transition this page has seen confirmed.
    /// The read flag only ever goes false -> true, so these stay read.
    confirmed_read: HashSet<NotificationId>,
}

impl ClientState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unread(&self) -> Option<UnreadCount> {
        self.unread
    }

    pub fn status(&self, id: &NotificationId) -> ItemStatus {
        self.statuses.get(id).cloned().unwrap_or_default()
    }

    pub fn notification(&self, id: &NotificationId) -> Option<&Notification> {
        match &self.list {
            ListState::Loaded(items) => items.iter().find(|n| &n.id == id),
            _ => None,
        }
    }

    pub fn apply_count(&mut self, count: UnreadCount) {
        self.unread = Some(count);
    }

    /// Replace the list with a fresh server snapshot
    pub fn apply_list(&mut self, mut items: Vec<Notification>) {
        for item in items.iter_mut() {
            if self.confirmed_read.contains(&item.id) {
                item.is_read = true;
            }
        }

        self.statuses.retain(|id, status| match items.iter().find(|n| &n.id == id) {
            None => false,
            Some(n) => !(n.is_read && matches!(status, ItemStatus::Failed(_))),
        });

        self.list = ListState::Loaded(items);
    }

    pub fn fail_list(&mut self) {
        self.list = ListState::Failed;
        self.statuses.retain(|_, status| *status == ItemStatus::Pending);
    }

    /// Flag `id` as pending if a mark-read request should be sent for it,
    /// returning the notification to send it for
    pub fn begin_mark(&mut self, id: &NotificationId) -> Result<Notification, MarkReadOutcome> {
        let notification = match self.notification(id) {
            None => return Err(MarkReadOutcome::Unknown),
            Some(n) => n.clone(),
        };
        if notification.is_read || self.confirmed_read.contains(id) {
            return Err(MarkReadOutcome::AlreadyRead);
        }
        if self.status(id) == ItemStatus::Pending {
            return Err(MarkReadOutcome::InFlight);
        }
        self.statuses.insert(id.clone(), ItemStatus::Pending);
        Ok(notification)
    }

    /// Apply a server-confirmed read transition locally.
    ///
    /// The count drops by one even if a newer list already shows the item
    /// read; the list and the count are separate snapshots.
    /// Returns the new unread count, if one is known.
    pub fn confirm_read(&mut self, id: &NotificationId) -> Option<UnreadCount> {
        if let ListState::Loaded(items) = &mut self.list {
            if let Some(item) = items.iter_mut().find(|n| &n.id == id) {
                item.is_read = true;
            }
        }
        let newly_read = self.confirmed_read.insert(id.clone());
        self.statuses.remove(id);

        if newly_read {
            self.unread = self.unread.map(UnreadCount::decremented);
        }
        self.unread
    }

    pub fn fail_mark(&mut self, id: &NotificationId, label: String) {
        if self.notification(id).is_some() {
            self.statuses.insert(id.clone(), ItemStatus::Failed(label));
        } else {
            self.statuses.remove(id);
        }
    }

    /// Render model for the dropdown list
    pub fn list_content(&self, now: DateTime<Utc>, config: &ClientConfig) -> ListContent {
        match &self.list {
            ListState::NotLoaded => ListContent::Loading,
            ListState::Failed => ListContent::Failed,
            ListState::Loaded(items) if items.is_empty() => ListContent::Empty,
            ListState::Loaded(items) => ListContent::Entries(
                items
                    .iter()
                    .map(|n| {
                        let status = self.status(&n.id);
                        EntryView {
                            id: n.id.clone(),
                            message: truncate_message(&n.message, config.max_message_chars),
                            age: format_time_ago(n.created_at, now),
                            unread: !n.is_read,
                            link: n.related.as_ref().and_then(|r| r.href()),
                            pending: status == ItemStatus::Pending,
                            error: match status {
                                ItemStatus::Failed(label) => Some(label),
                                _ => None,
                            },
                        }
                    })
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, hour, 0, 0).unwrap()
    }

    fn loaded() -> ClientState {
        let mut state = ClientState::new();
        state.apply_count(UnreadCount::new(2));
        state.apply_list(vec![
            Notification::new(3u64, "Order #3 created", at(11)),
            Notification::new(2u64, "Order #2 created", at(10)),
            Notification::new(1u64, "Account approved", at(9)).read(),
        ]);
        state
    }

    #[test]
    fn test_begin_mark_outcomes() {
        let mut state = loaded();
        assert_eq!(state.begin_mark(&NotificationId::from(99)), Err(MarkReadOutcome::Unknown));
        assert_eq!(state.begin_mark(&NotificationId::from(1)), Err(MarkReadOutcome::AlreadyRead));
        assert_eq!(state.begin_mark(&NotificationId::from(3)).map(|n| n.id), Ok(NotificationId::from(3)));
        assert_eq!(state.begin_mark(&NotificationId::from(3)), Err(MarkReadOutcome::InFlight));
        assert_eq!(state.status(&NotificationId::from(3)), ItemStatus::Pending);
    }

    #[test]
    fn test_confirm_read_decrements_once() {
        let mut state = loaded();
        let id = NotificationId::from(3);
        state.begin_mark(&id).unwrap();
        assert_eq!(state.confirm_read(&id), Some(UnreadCount::new(1)));
        assert!(state.notification(&id).unwrap().is_read);
        assert_eq!(state.status(&id), ItemStatus::Idle);
        assert_eq!(state.begin_mark(&id), Err(MarkReadOutcome::AlreadyRead));
    }

    #[test]
    fn test_confirm_read_ignores_list_read_flag() {
        let mut state = loaded();
        let id = NotificationId::from(3);
        state.begin_mark(&id).unwrap();

        // Listed after the server applied the update, before the POST answered
        state.apply_list(vec![Notification::new(3u64, "Order #3 created", at(11)).read()]);
        assert_eq!(state.status(&id), ItemStatus::Pending);
        assert_eq!(state.confirm_read(&id), Some(UnreadCount::new(1)));
        assert_eq!(state.confirm_read(&id), Some(UnreadCount::new(1)));
    }

    #[test]
    fn test_confirmed_read_survives_stale_snapshot() {
        let mut state = loaded();
        let id = NotificationId::from(2);
        state.begin_mark(&id).unwrap();
        state.confirm_read(&id);

        // A list fetched before the server applied the transition
        state.apply_list(vec![Notification::new(2u64, "Order #2 created", at(10))]);
        assert!(state.notification(&id).unwrap().is_read);
    }

    #[test]
    fn test_apply_list_prunes_statuses() {
        let mut state = loaded();
        let gone = NotificationId::from(3);
        let kept = NotificationId::from(2);
        state.fail_mark(&gone, "Could not mark as read".into());
        state.fail_mark(&kept, "Could not mark as read".into());

        state.apply_list(vec![Notification::new(2u64, "Order #2 created", at(10))]);
        assert_eq!(state.status(&gone), ItemStatus::Idle);
        assert!(matches!(state.status(&kept), ItemStatus::Failed(_)));

        // Read elsewhere in the meantime: the stale error goes away
        state.apply_list(vec![Notification::new(2u64, "Order #2 created", at(10)).read()]);
        assert_eq!(state.status(&kept), ItemStatus::Idle);
    }

    #[test]
    fn test_list_content_variants() {
        let config = ClientConfig::default();
        let mut state = ClientState::new();
        assert_eq!(state.list_content(at(12), &config), ListContent::Loading);

        state.apply_list(Vec::new());
        assert_eq!(state.list_content(at(12), &config), ListContent::Empty);

        state.fail_list();
        assert_eq!(state.list_content(at(12), &config), ListContent::Failed);
    }

    #[test]
    fn test_list_content_entries() {
        let config = ClientConfig { max_message_chars: Some(5), ..Default::default() };
        let mut state = loaded();
        state.fail_mark(&NotificationId::from(2), "Could not mark as read".into());

        let content = state.list_content(at(12), &config);
        let entries = content.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].message, "Order…");
        assert_eq!(entries[0].age, "1h ago");
        assert!(entries[0].unread);
        assert_eq!(entries[1].error.as_deref(), Some("Could not mark as read"));
        assert!(!entries[2].unread);
        assert_eq!(entries[2].class(), "dropdown-item");
    }
}
