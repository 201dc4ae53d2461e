use leptos::*;

use crate::{
    datasets::{DatasetAction, DatasetListView, DatasetRow},
    runtime_context::use_explorer_runtime,
};

#[component]
/// Dataset list with search and a JSON payload viewer.
pub fn DatasetsPage() -> impl IntoView {
    let runtime = use_explorer_runtime();
    let query = create_rw_signal(String::new());
    let search =
        move || runtime.dispatch_dataset_action(DatasetAction::Load(query.get_untracked()));
    let list = create_memo(move |_| runtime.datasets.with(|state| state.list.clone()));
    let viewing = create_memo(move |_| runtime.datasets.with(|state| state.viewing.clone()));

    runtime.dispatch_dataset_action(DatasetAction::Load(String::new()));

    view! {
        <section class="datasets-page">
            <div class="search-bar">
                <input
                    type="text"
                    class="search-input"
                    placeholder="Search datasets by id or name..."
                    prop:value=move || query.get()
                    on:input=move |ev| query.set(event_target_value(&ev))
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            search();
                        }
                    }
                />
                <button type="button" class="search-btn" on:click=move |_| search()>
                    "Search"
                </button>
            </div>

            <table class="dataset-table">
                <thead>
                    <tr>
                        <th>"ID"</th>
                        <th>"Type"</th>
                        <th>"Name"</th>
                        <th>"Action"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || match list.get() {
                        DatasetListView::Message(message) => view! {
                            <tr class="table-message">
                                <td colspan="4">{message}</td>
                            </tr>
                        }
                        .into_view(),
                        DatasetListView::Rows(rows) => rows
                            .into_iter()
                            .map(|row| view! { <DatasetListRow row=row /> })
                            .collect_view(),
                    }}
                </tbody>
            </table>

            {move || {
                viewing
                    .get()
                    .map(|dataset| {
                        view! {
                            <div class="json-viewer">
                                <div class="json-viewer-header">
                                    <span class="json-viewer-title">{dataset.title()}</span>
                                    <button
                                        type="button"
                                        class="file-action-btn"
                                        on:click=move |_| runtime.dispatch_dataset_action(DatasetAction::Copy)
                                    >
                                        "Copy JSON"
                                    </button>
                                    <button
                                        type="button"
                                        class="file-action-btn"
                                        on:click=move |_| runtime.dispatch_dataset_action(DatasetAction::Download)
                                    >
                                        "Download JSON"
                                    </button>
                                </div>
                                <pre class="json-output">{dataset.pretty}</pre>
                            </div>
                        }
                    })
            }}
        </section>
    }
}

#[component]
fn DatasetListRow(row: DatasetRow) -> impl IntoView {
    let runtime = use_explorer_runtime();
    let id = row.id;

    view! {
        <tr>
            <td>{row.id}</td>
            <td>{row.type_label}</td>
            <td title=row.created>{row.name}</td>
            <td>
                <button
                    type="button"
                    class="file-action-btn"
                    on:click=move |_| runtime.dispatch_dataset_action(DatasetAction::View(id))
                >
                    "View JSON"
                </button>
            </td>
        </tr>
    }
}
