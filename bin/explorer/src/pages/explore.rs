//! Concept exploration: similar-concept lookup followed by a free variable search.

use crate::state::LoadingState;
use bioconceptvec_api::{
    ConceptMatch, FreeVarQuery, FreeVarRow, RESULTS_FILE_NAME, THRESHOLD_CHOICES, results_data_url,
};
use leptos::prelude::*;

/// Number of similar concepts offered for selection.
const TOP_K: u32 = 5;

/// Server function returning the concepts most similar to `query`.
#[server]
pub async fn find_similar_concepts(query: String) -> Result<Vec<ConceptMatch>, ServerFnError> {
    use crate::error::ExploreError;
    use axum::Extension;
    use bioconceptvec_api::ExplorerClient;

    if query.trim().is_empty() {
        return Err(ExploreError::EmptyQuery.into_server_error());
    }

    let Extension(client): Extension<ExplorerClient> = leptos_axum::extract().await?;

    client.similar_concepts(&query, TOP_K).await.map_err(|e| {
        tracing::warn!(error = %e, query = %query, "similar concept lookup failed");
        ExploreError::BackendUnavailable {
            details: e.to_string(),
        }
        .into_server_error()
    })
}

/// Server function running a free variable search.
#[server]
pub async fn search_free_variables(search: FreeVarQuery) -> Result<Vec<FreeVarRow>, ServerFnError> {
    use crate::error::ExploreError;
    use axum::Extension;
    use bioconceptvec_api::ExplorerClient;

    search
        .validate()
        .map_err(|e| ExploreError::from(e).into_server_error())?;

    let Extension(client): Extension<ExplorerClient> = leptos_axum::extract().await?;

    client.free_var_search(&search).await.map_err(|e| {
        tracing::warn!(error = %e, concept = %search.concept, "free variable search failed");
        ExploreError::BackendUnavailable {
            details: e.to_string(),
        }
        .into_server_error()
    })
}

/// Parses a threshold option value, falling back to 0.
fn parse_threshold(value: &str) -> f64 {
    value
        .parse::<f64>()
        .ok()
        .filter(|t| (0.0..=1.0).contains(t))
        .unwrap_or(0.0)
}

/// The explore page.
///
/// Every backend call goes through `loading.track` so the navigation bar shows
/// the request in flight.
#[component]
pub fn ExplorePage(loading: LoadingState) -> impl IntoView {
    let (query, set_query) = signal(String::new());
    let (selection, set_selection) = signal(String::new());
    let (confirmed, set_confirmed) = signal(Option::<String>::None);
    let (threshold, set_threshold) = signal(0.0_f64);
    let (use_gpt, set_use_gpt) = signal(false);

    let lookup = Action::new(move |query: &String| {
        let query = query.clone();
        loading.track(find_similar_concepts(query))
    });
    let search = Action::new(move |search: &FreeVarQuery| {
        let search = search.clone();
        loading.track(search_free_variables(search))
    });

    // A fresh lookup resets the selection to its best match.
    Effect::new(move || {
        if let Some(Ok(matches)) = lookup.value().get() {
            set_selection.set(matches.first().map(ConceptMatch::label).unwrap_or_default());
            set_confirmed.set(None);
        }
    });

    let on_lookup = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        lookup.dispatch(query.get_untracked());
    };

    let on_confirm = move |_| {
        let label = selection.get_untracked();
        set_confirmed.set(ConceptMatch::parse_selection(&label).map(str::to_string));
    };

    let on_search = move |_| {
        if let Some(concept) = confirmed.get_untracked() {
            search.dispatch(
                FreeVarQuery::new(concept)
                    .with_threshold(threshold.get_untracked())
                    .with_gpt(use_gpt.get_untracked()),
            );
        }
    };

    view! {
        <div class="explore-page">
            <h1>"Explore concepts"</h1>

            <form class="concept-form" on:submit=on_lookup>
                <label for="concept-query">"Enter a concept"</label>
                <input
                    id="concept-query"
                    type="text"
                    placeholder="e.g. diabetes"
                    prop:value=query
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                />
                <button type="submit" disabled=move || lookup.pending().get()>
                    "Search"
                </button>
            </form>

            {move || {
                lookup.value().get().map(|result| match result {
                    Ok(matches) if matches.is_empty() => view! {
                        <p class="notice">"No similar concepts found. Please try again."</p>
                    }.into_any(),
                    Ok(matches) => view! {
                        <div class="concept-select">
                            <label for="concept-choice">"Similar concepts"</label>
                            <select
                                id="concept-choice"
                                on:change=move |ev| set_selection.set(event_target_value(&ev))
                            >
                                {matches.into_iter().map(|m| {
                                    let label = m.label();
                                    let selected = {
                                        let label = label.clone();
                                        move || selection.get() == label
                                    };
                                    view! {
                                        <option value=label.clone() selected=selected>{label.clone()}</option>
                                    }
                                }).collect_view()}
                            </select>
                            <button type="button" on:click=on_confirm>"Confirm Concept"</button>
                        </div>
                    }.into_any(),
                    Err(e) => view! {
                        <p class="error">{e.to_string()}</p>
                    }.into_any(),
                })
            }}

            {move || {
                confirmed.get().map(|concept| view! {
                    <section class="free-var">
                        <p class="selected">"You selected: " {concept.clone()}</p>
                        <p class="expression">{format!("{concept} + X - Y = Z")}</p>

                        <div class="free-var-controls">
                            <label for="threshold">"Similarity threshold"</label>
                            <select
                                id="threshold"
                                on:change=move |ev| set_threshold.set(parse_threshold(&event_target_value(&ev)))
                            >
                                {THRESHOLD_CHOICES.iter().map(|t| {
                                    let t = *t;
                                    view! {
                                        <option value=t.to_string() selected=move || threshold.get() == t>
                                            {format!("{t:.1}")}
                                        </option>
                                    }
                                }).collect_view()}
                            </select>

                            <label class="checkbox">
                                <input
                                    type="checkbox"
                                    prop:checked=use_gpt
                                    on:change=move |ev| set_use_gpt.set(event_target_checked(&ev))
                                />
                                "Explain results with GPT-4"
                            </label>

                            <button
                                type="button"
                                disabled=move || search.pending().get()
                                on:click=on_search
                            >
                                "Submit Threshold"
                            </button>
                        </div>
                    </section>
                })
            }}

            <Show when=move || search.pending().get()>
                <p class="notice">"Please wait while we process your request..."</p>
            </Show>

            {move || {
                search.value().get().map(|result| match result {
                    Ok(rows) => view! { <ResultsTable rows/> }.into_any(),
                    Err(e) => view! { <p class="error">{e.to_string()}</p> }.into_any(),
                })
            }}
        </div>
    }
}

/// Results of a free variable search with a CSV download link.
///
/// Columns come from the first row.
#[component]
fn ResultsTable(rows: Vec<FreeVarRow>) -> impl IntoView {
    if rows.is_empty() {
        return view! { <p class="notice">"No results above this threshold."</p> }.into_any();
    }

    let download = match results_data_url(&rows) {
        Ok(href) => Some(view! {
            <a class="download-link" href=href download=RESULTS_FILE_NAME>"Download CSV"</a>
        }),
        Err(e) => {
            tracing::warn!(error = %e, "results not exportable");
            None
        }
    };

    let columns: Vec<String> = rows[0].columns().map(str::to_string).collect();
    let header = columns
        .iter()
        .map(|c| view! { <th>{c.clone()}</th> })
        .collect_view();
    let body = rows
        .iter()
        .map(|row| {
            let cells = columns
                .iter()
                .map(|c| view! { <td>{row.cell(c)}</td> })
                .collect_view();
            view! { <tr>{cells}</tr> }
        })
        .collect_view();

    view! {
        <div class="results">
            <p>"Here are the results:"</p>
            {download}
            <table class="results-table">
                <thead><tr>{header}</tr></thead>
                <tbody>{body}</tbody>
            </table>
        </div>
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_options_parse() {
        assert_eq!(parse_threshold("0.3"), 0.3);
        assert_eq!(parse_threshold("1"), 1.0);
    }

    #[test]
    fn bad_threshold_falls_back_to_zero() {
        assert_eq!(parse_threshold(""), 0.0);
        assert_eq!(parse_threshold("1.5"), 0.0);
        assert_eq!(parse_threshold("-0.1"), 0.0);
    }
}
