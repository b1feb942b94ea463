//! Notification Context
//!
//! Shared handle provided via Leptos Context API to the list components.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::debug;
use notify_core::{ListContent, ListTarget, NotificationClient, NotificationId};

use crate::commands::HttpNotificationApi;

pub type Client = NotificationClient<HttpNotificationApi>;

/// List target backed by a signal; the list component renders from it
pub struct SignalList {
    set_content: WriteSignal<ListContent>,
}

impl SignalList {
    pub fn new(set_content: WriteSignal<ListContent>) -> Self {
        Self { set_content }
    }
}

impl ListTarget for SignalList {
    fn render(&self, content: &ListContent) {
        self.set_content.set(content.clone());
    }
}

/// Widget-wide handles
#[derive(Clone, Copy)]
pub struct NotificationContext {
    /// What the dropdown list shows
    pub content: ReadSignal<ListContent>,
    /// The client is single-threaded, so it lives in local storage
    client: StoredValue<Rc<Client>, LocalStorage>,
}

impl NotificationContext {
    pub fn new(content: ReadSignal<ListContent>, client: Rc<Client>) -> Self {
        Self {
            content,
            client: StoredValue::new_local(client),
        }
    }

    /// Mark a notification read; the outcome is reflected in the list
    pub fn mark_read(&self, id: NotificationId) {
        let client = self.client.get_value();
        spawn_local(async move {
            if let Ok(outcome) = client.mark_read(&id).await {
                debug!("[Notifications] Click on {}: {:?}", id, outcome);
            }
        });
    }
}
