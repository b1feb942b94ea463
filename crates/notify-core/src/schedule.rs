//! Refresh Scheduling
//!
//! Count: once at start, then on the configured period.
//! List: once at start, then every time the dropdown opens.
//! The two triggers are independent; the client's sequencers sort out
//! responses that arrive out of order.

use std::rc::Rc;
use std::time::Duration;

use crate::api::NotificationApi;
use crate::client::NotificationClient;

/// Which refresh a trigger asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    Count,
    List,
}

/// Source of the periodic and dropdown-open triggers
pub trait Triggers {
    /// Run `task` every `period` for the page lifetime
    fn every(&self, period: Duration, task: Box<dyn FnMut()>);

    /// Run `task` each time the dropdown opens
    fn on_open(&self, task: Box<dyn FnMut()>);
}

/// Render the initial list state, run the start-up refreshes and register
/// the triggers for whichever targets the client has.
///
/// `run` starts a refresh; it should not block on the response.
pub fn schedule<A: NotificationApi>(client: &NotificationClient<A>, triggers: &dyn Triggers, run: Rc<dyn Fn(Refresh)>) {
    client.render_list();

    if client.has_badge() {
        run(Refresh::Count);
        let polled = run.clone();
        triggers.every(client.config().poll_interval(), Box::new(move || polled(Refresh::Count)));
    }

    if client.has_list() {
        run(Refresh::List);
        let opened = run.clone();
        triggers.on_open(Box::new(move || opened(Refresh::List)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use async_trait::async_trait;

    use crate::{ApiError, BadgeTarget, ClientConfig, ListContent, ListTarget, Notification, UnreadCount};

    struct UnusedApi;

    #[async_trait(?Send)]
    impl NotificationApi for UnusedApi {
        async fn unread_count(&self) -> Result<UnreadCount, ApiError> {
            Err(ApiError::Network("not scripted".into()))
        }

        async fn recent(&self, _limit: usize) -> Result<Vec<Notification>, ApiError> {
            Err(ApiError::Network("not scripted".into()))
        }

        async fn mark_read(&self, _notification: &Notification) -> Result<(), ApiError> {
            Err(ApiError::Network("not scripted".into()))
        }
    }

    struct Badge;

    impl BadgeTarget for Badge {
        fn show(&self, _label: &str) {}
        fn hide(&self) {}
    }

    #[derive(Default)]
    struct List(RefCell<Vec<ListContent>>);

    impl ListTarget for List {
        fn render(&self, content: &ListContent) {
            self.0.borrow_mut().push(content.clone());
        }
    }

    #[derive(Default)]
    struct ManualTriggers {
        periods: RefCell<Vec<Duration>>,
        ticks: RefCell<Vec<Box<dyn FnMut()>>>,
        opens: RefCell<Vec<Box<dyn FnMut()>>>,
    }

    impl ManualTriggers {
        fn tick(&self) {
            for task in self.ticks.borrow_mut().iter_mut() {
                task();
            }
        }

        fn open(&self) {
            for task in self.opens.borrow_mut().iter_mut() {
                task();
            }
        }
    }

    impl Triggers for ManualTriggers {
        fn every(&self, period: Duration, task: Box<dyn FnMut()>) {
            self.periods.borrow_mut().push(period);
            self.ticks.borrow_mut().push(task);
        }

        fn on_open(&self, task: Box<dyn FnMut()>) {
            self.opens.borrow_mut().push(task);
        }
    }

    fn recorder() -> (Rc<RefCell<Vec<Refresh>>>, Rc<dyn Fn(Refresh)>) {
        let runs = Rc::new(RefCell::new(Vec::new()));
        let sink = runs.clone();
        (runs, Rc::new(move |refresh| sink.borrow_mut().push(refresh)))
    }

    #[test]
    fn test_start_up_then_triggers() {
        let list = Rc::new(List::default());
        let client = NotificationClient::new(UnusedApi, ClientConfig { poll_interval_secs: 15, ..Default::default() })
            .with_badge(Rc::new(Badge))
            .with_list(list.clone());
        let triggers = ManualTriggers::default();
        let (runs, run) = recorder();

        schedule(&client, &triggers, run);
        assert_eq!(*runs.borrow(), [Refresh::Count, Refresh::List]);
        assert_eq!(*list.0.borrow(), [ListContent::Loading]);
        assert_eq!(*triggers.periods.borrow(), [Duration::from_secs(15)]);

        triggers.tick();
        triggers.tick();
        triggers.open();
        assert_eq!(
            *runs.borrow(),
            [Refresh::Count, Refresh::List, Refresh::Count, Refresh::Count, Refresh::List]
        );
    }

    #[test]
    fn test_badge_only_never_fetches_list() {
        let client = NotificationClient::new(UnusedApi, ClientConfig::default()).with_badge(Rc::new(Badge));
        let triggers = ManualTriggers::default();
        let (runs, run) = recorder();

        schedule(&client, &triggers, run);
        triggers.tick();
        assert_eq!(*runs.borrow(), [Refresh::Count, Refresh::Count]);
        assert!(triggers.opens.borrow().is_empty());
        assert_eq!(*triggers.periods.borrow(), [Duration::from_secs(30)]);
    }

    #[test]
    fn test_list_only_never_polls() {
        let client = NotificationClient::new(UnusedApi, ClientConfig::default()).with_list(Rc::new(List::default()));
        let triggers = ManualTriggers::default();
        let (runs, run) = recorder();

        schedule(&client, &triggers, run);
        triggers.open();
        assert_eq!(*runs.borrow(), [Refresh::List, Refresh::List]);
        assert!(triggers.ticks.borrow().is_empty());
    }
}
