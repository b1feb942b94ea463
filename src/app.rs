//! Notification Widget Bootstrap
//!
//! Finds the badge and list elements on the server-rendered page, builds the
//! client around them and starts the refresh schedule.

use std::rc::Rc;

use leptos::mount::mount_to;
use leptos::prelude::*;
use log::debug;
use notify_core::{ListContent, NotificationClient};

use crate::commands::HttpNotificationApi;
use crate::components::NotificationList;
use crate::context::{Client, NotificationContext, SignalList};
use crate::dom::{self, DomBadge};
use crate::poller;

pub fn start() {
    let badge = dom::element_by_id(dom::BADGE_ID);
    let list_host = dom::element_by_id(dom::LIST_ID);
    if badge.is_none() && list_host.is_none() {
        debug!("[Notifications] No notification widget on this page");
        return;
    }

    let config = dom::page_config();
    let api = HttpNotificationApi::new(config.clone(), dom::csrf_token);
    let mut client: Client = NotificationClient::new(api, config);
    if let Some(element) = badge {
        client = client.with_badge(Rc::new(DomBadge::new(element)));
    }

    match list_host {
        Some(host) => {
            // Drop whatever the server rendered as a placeholder
            host.set_inner_html("");
            mount_to(host, move || {
                let (content, set_content) = signal(ListContent::Loading);
                let client = Rc::new(client.with_list(Rc::new(SignalList::new(set_content))));
                provide_context(NotificationContext::new(content, client.clone()));
                poller::start(client);

                view! { <NotificationList content=content /> }
            })
            .forget();
        }
        None => poller::start(Rc::new(client)),
    }
}
