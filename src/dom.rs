//! Page Elements
//!
//! Lookup of the server-rendered elements the widget attaches to, and the
//! badge target that writes straight to its element. Missing elements are
//! not errors: the page simply has no notification widget.

use log::{warn, Level};
use notify_core::{BadgeTarget, ClientConfig};
use rolling_logger::RollingLogger;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;

pub const BADGE_ID: &str = "notificationBadge";
pub const LIST_ID: &str = "notificationList";
pub const DROPDOWN_ID: &str = "notificationDropdown";
pub const CSRF_TOKEN_ID: &str = "csrf-token";
pub const CONFIG_ID: &str = "notification-config";

/// Bootstrap fires this on the toggle once the menu is visible
const DROPDOWN_SHOWN_EVENT: &str = "shown.bs.dropdown";

/// `window.notificationLog(level?)` returns the buffered log as text
const LOG_FUNCTION: &str = "notificationLog";

pub fn element_by_id(id: &str) -> Option<HtmlElement> {
    web_sys::window()?
        .document()?
        .get_element_by_id(id)?
        .dyn_into::<HtmlElement>()
        .ok()
}

/// Anti-forgery token embedded in the page
pub fn csrf_token() -> Option<String> {
    let text = web_sys::window()?
        .document()?
        .get_element_by_id(CSRF_TOKEN_ID)?
        .text_content()?;
    Some(text.trim().to_string())
}

/// Configuration from the optional JSON element, defaults otherwise
pub fn page_config() -> ClientConfig {
    let Some(raw) = element_by_id(CONFIG_ID).and_then(|el| el.text_content()) else {
        return ClientConfig::default();
    };
    ClientConfig::from_json(&raw).unwrap_or_else(|e| {
        warn!("[Notifications] {}; using defaults", e);
        ClientConfig::default()
    })
}

/// Run `handler` every time the dropdown behind `trigger` opens
pub fn on_dropdown_shown(trigger: &HtmlElement, handler: impl FnMut() + 'static) {
    let mut handler = handler;
    let on_shown = Closure::<dyn FnMut(web_sys::Event)>::new(move |_ev: web_sys::Event| handler());

    if let Err(e) = trigger.add_event_listener_with_callback(DROPDOWN_SHOWN_EVENT, on_shown.as_ref().unchecked_ref()) {
        warn!("[Notifications] Could not listen for dropdown: {:?}", e);
    }
    on_shown.forget();
}

/// Make the log buffer readable from the browser devtools.
///
/// The optional argument is a level name ("warn", "error", ...); anything
/// else returns every record.
pub fn expose_log(logger: &'static RollingLogger) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let dump = Closure::<dyn Fn(JsValue) -> String>::new(move |level: JsValue| {
        let level = level.as_string().and_then(|l| l.parse::<Level>().ok()).unwrap_or(Level::Trace);
        logger.dump(level)
    });

    if let Err(e) = js_sys::Reflect::set(&window, &JsValue::from_str(LOG_FUNCTION), dump.as_ref()) {
        warn!("[Notifications] Could not expose log buffer: {:?}", e);
    }
    dump.forget();
}

/// Badge element: text is the label, visibility via `display`
pub struct DomBadge {
    element: HtmlElement,
}

impl DomBadge {
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }

    fn set_display(&self, value: &str) {
        if let Err(e) = self.element.style().set_property("display", value) {
            warn!("[Notifications] Could not update badge: {:?}", e);
        }
    }
}

impl BadgeTarget for DomBadge {
    fn show(&self, label: &str) {
        self.element.set_text_content(Some(label));
        self.set_display("block");
    }

    fn hide(&self) {
        self.set_display("none");
    }
}
