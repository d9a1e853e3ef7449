//! BioConceptVec explorer web client and server.
//!
//! This crate provides the Leptos application: the root component with its
//! navigation bar and route table, the home and explore pages, and the
//! backend heartbeat that keeps the serverless API warm while a tab is open.

#![allow(non_snake_case)]

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod heartbeat;
pub mod pages;
pub mod state;
pub mod theme;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::App;
    console_error_panic_hook::set_once();
    // A second init only fails if a logger is already installed.
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(App);
}
