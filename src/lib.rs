// Library target for the integration tests under tests/. The binary entry
// point is main.rs; most UI code is only reached from there.
#![allow(dead_code)]

pub mod config;
pub mod document;
pub mod error;
pub mod session;
pub mod store;

mod app;
mod event;
mod ui;
