//! Notification Entry Component
//!
//! One dropdown row. Clicking it marks the notification read in place.

use leptos::prelude::*;
use notify_core::EntryView;

use crate::context::NotificationContext;

#[component]
pub fn NotificationEntry(entry: EntryView) -> impl IntoView {
    let ctx = use_context::<NotificationContext>().expect("NotificationContext should be provided");

    let id = entry.id.clone();
    let class = entry.class();
    let pending = entry.pending;

    view! {
        <div
            class=class
            class:pending=pending
            style="cursor: pointer;"
            on:click=move |ev: web_sys::MouseEvent| {
                ev.prevent_default();
                ctx.mark_read(id.clone());
            }
        >
            <div class="d-flex justify-content-between">
                <span>{entry.message}</span>
                <small class="text-muted">{entry.age}</small>
            </div>
            // Related order/product/user page
            {entry.link.map(|href| view! {
                <a class="small" href=href on:click=|ev: web_sys::MouseEvent| ev.stop_propagation()>"View"</a>
            })}
            {entry.error.map(|error| view! {
                <small class="d-block text-danger">{error}</small>
            })}
        </div>
    }
}
