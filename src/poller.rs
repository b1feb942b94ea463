//! Refresh Triggers
//!
//! Browser side of the refresh schedule: a repeating timer for the count
//! and Bootstrap's dropdown event for the list.

use std::rc::Rc;
use std::time::Duration;

use gloo_timers::callback::Interval;
use leptos::task::spawn_local;
use log::{debug, info};
use notify_core::{schedule, Refresh, Triggers};

use crate::context::Client;
use crate::dom;

struct PageTriggers;

impl Triggers for PageTriggers {
    fn every(&self, period: Duration, mut task: Box<dyn FnMut()>) {
        let period_ms = u32::try_from(period.as_millis()).unwrap_or(u32::MAX);
        Interval::new(period_ms, move || task()).forget();
        info!("[Notifications] Polling unread count every {} ms", period_ms);
    }

    fn on_open(&self, task: Box<dyn FnMut()>) {
        match dom::element_by_id(dom::DROPDOWN_ID) {
            Some(trigger) => dom::on_dropdown_shown(&trigger, task),
            None => debug!("[Notifications] No dropdown toggle; list loads once"),
        }
    }
}

pub fn start(client: Rc<Client>) {
    let runner = client.clone();
    let run: Rc<dyn Fn(Refresh)> = Rc::new(move |refresh| {
        let client = runner.clone();
        spawn_local(async move {
            match refresh {
                Refresh::Count => {
                    client.refresh_unread_count().await;
                }
                Refresh::List => {
                    client.refresh_recent().await;
                }
            }
        });
    });

    schedule(&client, &PageTriggers, run);
}
