//! Notification List Component
//!
//! Dropdown contents: a placeholder or one entry per notification.

use leptos::prelude::*;
use notify_core::ListContent;

use super::NotificationEntry;

#[component]
pub fn NotificationList(content: ReadSignal<ListContent>) -> impl IntoView {
    move || match content.get() {
        ListContent::Entries(entries) => entries
            .into_iter()
            .map(|entry| view! { <NotificationEntry entry=entry /> })
            .collect_view()
            .into_any(),
        other => {
            let class = if other == ListContent::Failed { "px-3 py-2 text-danger" } else { "px-3 py-2 text-muted" };
            let text = other.placeholder().unwrap_or_default();
            view! { <div class=class>{text}</div> }.into_any()
        }
    }
}
