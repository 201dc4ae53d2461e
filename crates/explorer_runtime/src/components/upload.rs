use explorer_host_web::{read_file_text, read_file_upload};
use leptos::{html, *};

use crate::{
    runtime_context::use_explorer_runtime,
    upload::{show_notice, submit_json, upload_file, UploadMode, UploadReceipt},
};

#[component]
/// File upload widget with a raw-JSON alternative.
pub fn UploadPage() -> impl IntoView {
    let uploads = use_explorer_runtime().uploads;
    let mode = create_memo(move |_| uploads.with(|session| session.mode));
    let set_mode = move |next: UploadMode| uploads.update(|session| session.mode = next);

    view! {
        <section class="upload-page">
            <div class="upload-mode-switch">
                <button
                    type="button"
                    class=move || if mode.get() == UploadMode::File { "mode-btn active" } else { "mode-btn" }
                    on:click=move |_| set_mode(UploadMode::File)
                >
                    "Upload file"
                </button>
                <button
                    type="button"
                    class=move || if mode.get() == UploadMode::Json { "mode-btn active" } else { "mode-btn" }
                    on:click=move |_| set_mode(UploadMode::Json)
                >
                    "Paste JSON"
                </button>
            </div>
            {move || match mode.get() {
                UploadMode::File => view! { <FileUploadPanel /> }.into_view(),
                UploadMode::Json => view! { <JsonUploadPanel /> }.into_view(),
            }}
        </section>
    }
}

#[component]
fn FileUploadPanel() -> impl IntoView {
    let runtime = use_explorer_runtime();
    let uploads = runtime.uploads;
    let dragging = create_rw_signal(false);
    let details_open = create_rw_signal(false);
    let file_input = create_node_ref::<html::Input>();

    let choose = move |file: web_sys::File| {
        spawn_local(async move {
            match read_file_upload(&file).await {
                Ok(selected) => {
                    details_open.set(false);
                    uploads.update(|session| session.file.select(selected));
                }
                Err(err) => logging::warn!("reading selected file failed: {err}"),
            }
        });
    };

    let start_upload = move |_| {
        let Some(file) = uploads.try_update(|session| session.file.begin()).flatten() else {
            return;
        };
        let host = runtime.host_services();
        spawn_local(async move {
            let outcome = upload_file(&host, &file).await;
            if let Some(notice) =
                uploads.try_update(|session| session.file.finish(&file.file_name, outcome))
            {
                show_notice(&host, &notice).await;
            }
        });
    };

    view! {
        <div class="upload-container">
            <div
                class=move || if dragging.get() { "drop-zone dragging" } else { "drop-zone" }
                on:dragenter=move |ev: web_sys::DragEvent| {
                    ev.prevent_default();
                    dragging.set(true);
                }
                on:dragover=move |ev: web_sys::DragEvent| ev.prevent_default()
                on:dragleave=move |ev: web_sys::DragEvent| {
                    ev.prevent_default();
                    dragging.set(false);
                }
                on:drop=move |ev: web_sys::DragEvent| {
                    ev.prevent_default();
                    dragging.set(false);
                    if let Some(file) = ev
                        .data_transfer()
                        .and_then(|transfer| transfer.files())
                        .and_then(|files| files.get(0))
                    {
                        choose(file);
                    }
                }
            >
                <p>"Drag and drop a file here, or"</p>
                <button
                    type="button"
                    class="browse-btn"
                    on:click=move |_| {
                        if let Some(input) = file_input.get() {
                            input.click();
                        }
                    }
                >
                    "Browse"
                </button>
                <input
                    node_ref=file_input
                    type="file"
                    class="hidden-input"
                    on:change=move |ev| {
                        let input = event_target::<web_sys::HtmlInputElement>(&ev);
                        if let Some(file) = input.files().and_then(|files| files.get(0)) {
                            choose(file);
                        }
                    }
                />
                <p class="file-name">
                    {move || {
                        uploads
                            .with(|session| session.file.selected_name().map(str::to_string))
                            .unwrap_or_else(|| "No file selected".to_string())
                    }}
                </p>
            </div>

            <button
                type="button"
                class="upload-btn"
                prop:disabled=move || !uploads.with(|session| session.file.can_upload())
                on:click=start_upload
            >
                {move || if uploads.with(|session| session.file.in_flight) { "Uploading..." } else { "Upload" }}
            </button>

            {move || {
                uploads
                    .with(|session| session.file.receipt.clone())
                    .map(|receipt| view! { <UploadResult receipt=receipt details_open=details_open /> })
            }}
        </div>
    }
}

#[component]
fn UploadResult(receipt: UploadReceipt, details_open: RwSignal<bool>) -> impl IntoView {
    match receipt {
        UploadReceipt::Stored {
            id,
            stored_as,
            category,
            view_url,
        } => view! {
            <div class="upload-results">
                <div class="uploaded-name">{stored_as.clone()}</div>
                {view_url.map(|url| {
                    view! {
                        <a class="view-link" href=url target="_blank" rel="noopener">
                            "View file"
                        </a>
                    }
                })}
                <button
                    type="button"
                    class="details-toggle"
                    on:click=move |_| details_open.update(|open| *open = !*open)
                >
                    {move || if details_open.get() { "Details ▲" } else { "Details ▼" }}
                </button>
                <Show when=move || details_open.get() fallback=|| ()>
                    <dl class="details-content">
                        <dt>"Stored as"</dt>
                        <dd>{stored_as.clone()}</dd>
                        <dt>"Category"</dt>
                        <dd>{category.clone()}</dd>
                        <dt>"File ID"</dt>
                        <dd>{id.to_string()}</dd>
                    </dl>
                </Show>
            </div>
        }
        .into_view(),
        UploadReceipt::Acknowledged(ack) => view! {
            <div class="upload-results">
                <pre class="json-output">{ack}</pre>
            </div>
        }
        .into_view(),
    }
}

#[component]
fn JsonUploadPanel() -> impl IntoView {
    let runtime = use_explorer_runtime();
    let uploads = runtime.uploads;
    let file_input = create_node_ref::<html::Input>();

    let load_file = move |ev: web_sys::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        spawn_local(async move {
            match read_file_text(&file).await {
                Ok(contents) => uploads.update(|session| session.json_text = contents),
                Err(err) => logging::warn!("reading json file failed: {err}"),
            }
        });
    };

    let submit = move |_| {
        let Some(raw) = uploads
            .try_update(|session| session.json.begin().then(|| session.json_text.clone()))
            .flatten()
        else {
            return;
        };
        let host = runtime.host_services();
        spawn_local(async move {
            let outcome = submit_json(&host, &raw).await;
            if let Some(notice) = uploads.try_update(|session| session.json.finish(outcome)) {
                show_notice(&host, &notice).await;
            }
        });
    };

    view! {
        <div class="json-upload-section">
            <textarea
                class="json-textarea"
                placeholder="Paste JSON here..."
                prop:value=move || uploads.with(|session| session.json_text.clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    uploads.update(|session| session.json_text = value);
                }
            ></textarea>
            <div class="json-actions">
                <button
                    type="button"
                    class="browse-btn"
                    on:click=move |_| {
                        if let Some(input) = file_input.get() {
                            input.click();
                        }
                    }
                >
                    "Load .json file"
                </button>
                <input
                    node_ref=file_input
                    type="file"
                    accept=".json,application/json"
                    class="hidden-input"
                    on:change=load_file
                />
                <button
                    type="button"
                    class="upload-btn"
                    prop:disabled=move || uploads.with(|session| session.json.in_flight)
                    on:click=submit
                >
                    "Upload JSON"
                </button>
            </div>
            {move || {
                uploads.with(|session| session.json.response.clone()).map(|response| {
                    view! {
                        <div class="json-result">
                            <pre class="json-output">{response}</pre>
                        </div>
                    }
                })
            }}
        </div>
    }
}
