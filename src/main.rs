#![allow(warnings)]
//! Notification Bell Frontend Entry Point

mod app;
mod commands;
mod components;
mod context;
mod dom;
mod poller;

use log::LevelFilter;
use rolling_logger::{RollingLogger, DEFAULT_CAPACITY};

fn main() {
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) { LevelFilter::Debug } else { LevelFilter::Info };
    match RollingLogger::new(DEFAULT_CAPACITY, level).install() {
        Ok(logger) => dom::expose_log(logger),
        Err(e) => web_sys::console::error_1(&format!("[Notifications] Logger already installed: {}", e).into()),
    }

    app::start();
}
