//! Persistent navigation bar.

use bioconceptvec_core::NavItem;
use leptos::prelude::*;
use leptos_router::{components::A, hooks::use_location};

/// Status indicator derived from the loading flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// A backend request is in progress (or the backend is cold-starting).
    Busy,
    /// Nothing pending.
    Idle,
}

impl ConnectionStatus {
    /// Maps the loading flag to a status.
    #[must_use]
    pub fn from_loading(loading: bool) -> Self {
        if loading { Self::Busy } else { Self::Idle }
    }

    /// Short text shown in the bar.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Busy => "Loading…",
            Self::Idle => "Ready",
        }
    }

    /// Tooltip text.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Busy => "Waiting for the explorer backend",
            Self::Idle => "No requests pending",
        }
    }

    /// CSS classes for the indicator.
    #[must_use]
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Busy => "status status-busy",
            Self::Idle => "status status-idle",
        }
    }
}

/// Header with navigation links and the connectivity indicator.
///
/// Purely presentational: `loading` is read, never written.
#[component]
pub fn Navbar(nav_items: Vec<NavItem>, #[prop(into)] loading: Signal<bool>) -> impl IntoView {
    let pathname = use_location().pathname;
    let links = nav_items
        .into_iter()
        .map(|item| {
            let href = item.href.to_string();
            let label = item.label.to_string();
            let class = move || {
                if item.is_active(&pathname.get()) {
                    "nav-item active"
                } else {
                    "nav-item"
                }
            };
            view! {
                <li class=class>
                    <A href=href>{label}</A>
                </li>
            }
        })
        .collect_view();

    view! {
        <header class="navbar">
            <div class="navbar-left">
                <a href="/" class="logo">"BioConceptVec Explorer"</a>
            </div>
            <nav class="navbar-links">
                <ul class="nav-list">{links}</ul>
            </nav>
            <div class="navbar-right">
                {move || {
                    let status = ConnectionStatus::from_loading(loading.get());
                    view! {
                        <span class=status.css_class() title=status.description()>
                            {status.label()}
                        </span>
                    }
                }}
            </div>
        </header>
    }
}
