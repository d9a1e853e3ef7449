//! Home page component.

use leptos::prelude::*;
use leptos_router::components::A;

/// The home page component.
#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="home-page">
            <h1>"BioConceptVec Explorer"</h1>
            <p>
                "Explore a shared embedding space of genes, chemicals, diseases, "
                "mutations and SNPs. Pick a concept, find its nearest neighbours, "
                "then search for analogies of the form "
                <code>"concept + X - Y = Z"</code>"."
            </p>
            <A href="/explore">"Start exploring"</A>
        </div>
    }
}
