//! Main Leptos application component and routing.

use crate::{
    components::Navbar,
    config::ClientConfig,
    heartbeat::{HeartbeatLauncher, HeartbeatSlot},
    pages::{ExplorePage, HomePage, NotFoundPage},
    state::LoadingState,
    theme::ColorMode,
};
use bioconceptvec_core::{EXPLORE_SEGMENT, HOME_SEGMENT, Page, default_nav_items, explorer_routes};
use leptos::prelude::*;
use leptos_meta::{Html, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
    hooks::use_location,
};

/// Server function returning the settings the browser needs.
#[server]
pub async fn get_client_config() -> Result<ClientConfig, ServerFnError> {
    use axum::Extension;

    let Extension(config): Extension<ClientConfig> = leptos_axum::extract().await?;
    Ok(config)
}

/// The main application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let loading = LoadingState::new();
    let slot = HeartbeatSlot::default();
    let client_config = Resource::new(|| (), |_| get_client_config());

    // Effects only run in the browser, so the prober and its HTTP client are
    // never built during server rendering.
    Effect::new({
        let slot = slot.clone();
        move |launcher: Option<Option<HeartbeatLauncher>>| {
            let launcher = launcher.flatten();
            let Some(result) = client_config.get() else {
                return launcher;
            };
            let config = result.unwrap_or_else(|e| {
                tracing::warn!(error = %e, "failed to load client config, using defaults");
                ClientConfig::default()
            });

            let launcher = launcher.unwrap_or_else(|| HeartbeatLauncher::new(slot.clone()));
            launcher.ensure_started(&config.heartbeat);
            Some(launcher)
        }
    });

    on_cleanup(move || {
        slot.cancel();
    });

    view! {
        <Html attr:data-theme=ColorMode::default().as_str()/>
        <Title text="BioConceptVec Explorer"/>
        <Router>
            <Navbar nav_items=default_nav_items() loading=loading.signal()/>
            <main class="container">
                // Declared so the server renders these paths; the route table
                // still picks the page.
                <Routes fallback=move || view! { <RoutedPage loading/> }>
                    <Route path=StaticSegment(HOME_SEGMENT) view=move || view! { <RoutedPage loading/> }/>
                    <Route path=StaticSegment(EXPLORE_SEGMENT) view=move || view! { <RoutedPage loading/> }/>
                </Routes>
            </main>
        </Router>
    }
}

/// Mounts exactly one page for the current location.
#[component]
fn RoutedPage(loading: LoadingState) -> impl IntoView {
    let routes = explorer_routes();
    let pathname = use_location().pathname;
    let page = Memo::new(move |_| {
        let page = *routes.resolve(&pathname.get());
        tracing::debug!(%page, "page resolved");
        page
    });

    move || match page.get() {
        Page::Home => view! { <HomePage/> }.into_any(),
        Page::Explore => view! { <ExplorePage loading/> }.into_any(),
        Page::NotFound => view! { <NotFoundPage/> }.into_any(),
    }
}
