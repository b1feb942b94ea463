//! Notification Client
//!
//! Keeps the badge and dropdown approximately in sync with the service:
//! - the unread count is fail-silent (stale-on-error)
//! - the list is fail-visible (error placeholder)
//! - mark-read awaits confirmation, then applies the transition locally
//!
//! All methods take `&self` so one `Rc<NotificationClient>` can serve the poll
//! timer, the dropdown listener and click handlers at the same time. State is
//! never borrowed across an await point.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, error, info, warn};

use crate::api::NotificationApi;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::models::{NotificationId, UnreadCount};
use crate::sequence::RequestSequencer;
use crate::state::ClientState;
use crate::time_ago::{Clock, SystemClock};
use crate::view::{badge_label, BadgeTarget, ListTarget};

/// Result of a count or list refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The response was rendered
    Applied,
    /// A newer request was dispatched meanwhile; the response was dropped
    Stale,
    /// The request failed and the failure policy was applied
    Failed,
    /// No render target for this resource
    Disabled,
}

/// Result of a mark-read request that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkReadOutcome {
    /// The service confirmed the transition
    Marked,
    /// Already read; nothing sent
    AlreadyRead,
    /// A request for this notification is still pending; nothing sent
    InFlight,
    /// Not in the displayed list; nothing sent
    Unknown,
}

pub struct NotificationClient<A> {
    api: A,
    config: ClientConfig,
    badge: Option<Rc<dyn BadgeTarget>>,
    list: Option<Rc<dyn ListTarget>>,
    clock: Rc<dyn Clock>,
    state: RefCell<ClientState>,
    count_seq: RequestSequencer,
    list_seq: RequestSequencer,
    /// Mark-read requests sent and not yet answered
    marks_in_flight: Cell<usize>,
}

impl<A: NotificationApi> NotificationClient<A> {
    pub fn new(api: A, config: ClientConfig) -> Self {
        Self {
            api,
            config,
            badge: None,
            list: None,
            clock: Rc::new(SystemClock),
            state: RefCell::new(ClientState::new()),
            count_seq: RequestSequencer::new(),
            list_seq: RequestSequencer::new(),
            marks_in_flight: Cell::new(0),
        }
    }

    pub fn with_badge(mut self, badge: Rc<dyn BadgeTarget>) -> Self {
        self.badge = Some(badge);
        self
    }

    pub fn with_list(mut self, list: Rc<dyn ListTarget>) -> Self {
        self.list = Some(list);
        self
    }

    pub fn with_clock(mut self, clock: Rc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn has_badge(&self) -> bool {
        self.badge.is_some()
    }

    pub fn has_list(&self) -> bool {
        self.list.is_some()
    }

    /// Last unread count applied, if any
    pub fn unread(&self) -> Option<UnreadCount> {
        self.state.borrow().unread()
    }

    /// Fetch the unread count and update the badge.
    ///
    /// Failures are logged and leave the badge as it was. A count requested
    /// while a mark-read is unanswered may or may not include that change, so
    /// it is dropped like a stale one.
    pub async fn refresh_unread_count(&self) -> RefreshOutcome {
        if self.badge.is_none() {
            return RefreshOutcome::Disabled;
        }

        let ticket = self.count_seq.issue();
        let overlaps_mark = self.marks_in_flight.get() > 0;
        let result = self.api.unread_count().await;

        match result {
            Ok(count) => {
                if overlaps_mark || !self.count_seq.is_current(ticket) {
                    debug!("[Notifications] Dropping stale unread count {}", count.get());
                    return RefreshOutcome::Stale;
                }
                self.state.borrow_mut().apply_count(count);
                self.render_badge(count);
                RefreshOutcome::Applied
            }
            Err(e) => {
                error!("[Notifications] Error fetching unread count: {}", e);
                RefreshOutcome::Failed
            }
        }
    }

    /// Fetch the configured number of recent notifications
    pub async fn refresh_recent(&self) -> RefreshOutcome {
        self.refresh_notification_list(self.config.list_limit).await
    }

    /// Fetch at most `limit` recent notifications and render them.
    ///
    /// Failures are logged and replace the list with an error placeholder.
    pub async fn refresh_notification_list(&self, limit: usize) -> RefreshOutcome {
        if self.list.is_none() {
            return RefreshOutcome::Disabled;
        }

        let limit = self.config.effective_limit(limit);
        let ticket = self.list_seq.issue();
        let result = self.api.recent(limit).await;

        if !self.list_seq.is_current(ticket) {
            debug!("[Notifications] Dropping stale notification list response");
            return RefreshOutcome::Stale;
        }

        let outcome = match result {
            Ok(mut items) => {
                items.truncate(limit);
                debug!("[Notifications] Loaded {} notifications", items.len());
                self.state.borrow_mut().apply_list(items);
                RefreshOutcome::Applied
            }
            Err(e) => {
                error!("[Notifications] Error loading notifications: {}", e);
                self.state.borrow_mut().fail_list();
                RefreshOutcome::Failed
            }
        };
        self.render_list();
        outcome
    }

    /// Ask the service to mark `id` read and reconcile on confirmation.
    ///
    /// On success the entry loses its unread styling and the badge drops by
    /// one. On failure the entry stays unread and shows an error label.
    ///
    /// Counts in flight when the request is sent, or requested before it is
    /// answered, are dropped; the decrement applies to the count shown before.
    pub async fn mark_read(&self, id: &NotificationId) -> Result<MarkReadOutcome, ApiError> {
        let begun = self.state.borrow_mut().begin_mark(id);
        let notification = match begun {
            Ok(notification) => notification,
            Err(outcome) => {
                debug!("[Notifications] Not marking {} read: {:?}", id, outcome);
                return Ok(outcome);
            }
        };
        self.count_seq.invalidate();
        self.render_list();

        let result = {
            let _in_flight = InFlight::enter(&self.marks_in_flight);
            self.api.mark_read(&notification).await
        };

        match result {
            Ok(()) => {
                let count = self.state.borrow_mut().confirm_read(id);
                if let Some(count) = count {
                    self.render_badge(count);
                }
                self.render_list();
                info!("[Notifications] Marked {} as read", id);
                Ok(MarkReadOutcome::Marked)
            }
            Err(e) => {
                warn!("[Notifications] Error marking {} as read: {}", id, e);
                self.state.borrow_mut().fail_mark(id, e.item_label());
                self.render_list();
                Err(e)
            }
        }
    }

    /// Re-render the list, e.g. to refresh relative ages
    pub fn render_list(&self) {
        let Some(target) = self.list.as_ref() else {
            return;
        };
        let content = self.state.borrow().list_content(self.clock.now(), &self.config);
        target.render(&content);
    }

    fn render_badge(&self, count: UnreadCount) {
        let Some(badge) = self.badge.as_ref() else {
            return;
        };
        match badge_label(count, self.config.badge_cap) {
            Some(label) => badge.show(&label),
            None => badge.hide(),
        }
    }
}

/// Counts one unanswered mark-read request for as long as it lives
struct InFlight<'a>(&'a Cell<usize>);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a Cell<usize>) -> Self {
        counter.set(counter.get() + 1);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get().saturating_sub(1));
    }
}
