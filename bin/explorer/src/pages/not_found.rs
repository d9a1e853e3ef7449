//! Catch-all view for unknown paths.

use leptos::prelude::*;

/// The "404" text shown for any unmatched path.
#[component]
pub fn NotFoundPage() -> impl IntoView {
    #[cfg(feature = "ssr")]
    {
        if let Some(response) = use_context::<leptos_axum::ResponseOptions>() {
            response.set_status(axum::http::StatusCode::NOT_FOUND);
        }
    }

    view! { <p class="not-found">"404"</p> }
}
