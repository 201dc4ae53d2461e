use leptos::*;

use crate::{
    model::{FolderKey, TreeStatus},
    reducer::ExplorerAction,
    runtime_context::use_explorer_runtime,
    table::{TableContent, TableRow},
    tree::{CategoryNode, CategoryNodeKind},
};

#[component]
/// Folder tree, search box and record table.
pub fn ExplorerPage() -> impl IntoView {
    let runtime = use_explorer_runtime();
    let query = create_rw_signal(String::new());
    let submit =
        move || runtime.dispatch_action(ExplorerAction::SubmitSearch(query.get_untracked()));

    runtime.dispatch_action(ExplorerAction::Boot);

    view! {
        <div class="explorer-workspace">
            <aside class="explorer-tree" aria-label="Folder tree">
                <div class="tree-header">
                    <span>"Folders"</span>
                    <button
                        type="button"
                        class="tree-refresh"
                        on:click=move |_| runtime.dispatch_action(ExplorerAction::Refresh)
                    >
                        "Refresh"
                    </button>
                </div>
                <FolderTree />
            </aside>

            <section class="explorer-pane">
                <div class="search-bar">
                    <input
                        type="text"
                        class="search-input"
                        placeholder="Search files..."
                        prop:value=move || query.get()
                        on:input=move |ev| query.set(event_target_value(&ev))
                        on:keydown=move |ev: web_sys::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                submit();
                            }
                        }
                    />
                    <button type="button" class="search-btn" on:click=move |_| submit()>
                        "Search"
                    </button>
                </div>
                <RecordTable />
            </section>
        </div>
    }
}

#[component]
fn FolderTree() -> impl IntoView {
    let runtime = use_explorer_runtime();
    let tree = create_memo(move |_| runtime.state.with(|state| state.tree.clone()));
    let status = create_memo(move |_| runtime.state.with(|state| state.tree_status.clone()));

    view! {
        {move || match status.get() {
            TreeStatus::Loading => Some(view! { <div class="tree-status">"Loading folders..."</div> }),
            TreeStatus::Failed(_) => {
                Some(view! { <div class="tree-status tree-error">"Error loading folders."</div> })
            }
            TreeStatus::Ready => None,
        }}
        {move || {
            let tree = tree.get();
            match tree.placeholder() {
                Some(placeholder) => view! { <p class="tree-empty">{placeholder}</p> }.into_view(),
                None => view! {
                    <ul class="tree-list">
                        {tree
                            .categories
                            .into_iter()
                            .map(|category| view! { <CategoryItem category=category /> })
                            .collect_view()}
                    </ul>
                }
                .into_view(),
            }
        }}
    }
}

#[component]
fn CategoryItem(category: CategoryNode) -> impl IntoView {
    let runtime = use_explorer_runtime();
    let CategoryNode { name, kind } = category;

    match kind {
        CategoryNodeKind::Leaf { key, records } => view! {
            <li>
                <FolderButton folder=key label=name count=records.len() />
            </li>
        }
        .into_view(),
        CategoryNodeKind::Group { expanded, children } => {
            let toggle_name = name.clone();
            view! {
                <li class="tree-group">
                    <button
                        type="button"
                        class="tree-node tree-group-label"
                        aria-expanded=expanded.to_string()
                        on:click=move |_| {
                            runtime.dispatch_action(ExplorerAction::ToggleCategory(toggle_name.clone()))
                        }
                    >
                        <span class="tree-glyph">{if expanded { "▾" } else { "▸" }}</span>
                        <span>{name}</span>
                    </button>
                    {expanded
                        .then(|| {
                            view! {
                                <ul class="tree-children">
                                    {children
                                        .into_iter()
                                        .map(|child| {
                                            let label = child.label();
                                            view! {
                                                <li>
                                                    <FolderButton
                                                        folder=child.key
                                                        label=label
                                                        count=child.records.len()
                                                    />
                                                </li>
                                            }
                                        })
                                        .collect_view()}
                                </ul>
                            }
                        })}
                </li>
            }
            .into_view()
        }
    }
}

#[component]
fn FolderButton(folder: FolderKey, label: String, count: usize) -> impl IntoView {
    let runtime = use_explorer_runtime();
    let active_key = folder.clone();
    let is_active =
        Signal::derive(move || runtime.state.with(|state| state.selection.is_active(&active_key)));

    view! {
        <button
            type="button"
            class=move || if is_active.get() { "tree-node active" } else { "tree-node" }
            on:click=move |_| runtime.dispatch_action(ExplorerAction::SelectFolder(folder.clone()))
        >
            <span class="tree-glyph">"📂"</span>
            <span>{label}</span>
            <span class="tree-count">{count}</span>
        </button>
    }
}

#[component]
fn RecordTable() -> impl IntoView {
    let runtime = use_explorer_runtime();
    let content = create_memo(move |_| runtime.state.with(|state| state.table.content().clone()));

    view! {
        <div class="explorer-listwrap">
            <table class="explorer-list" aria-label="Files">
                <thead>
                    <tr>
                        <th>"Name"</th>
                        <th>"Type"</th>
                        <th>"Size"</th>
                        <th>"Created"</th>
                        <th>"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        content.with(|content| match content {
                            TableContent::Message(message) => Some(view! {
                                <tr class="table-message">
                                    <td colspan="5">{message.text()}</td>
                                </tr>
                            }),
                            TableContent::Rows(_) => None,
                        })
                    }}
                    <For
                        each=move || {
                            content.with(|content| match content {
                                TableContent::Rows(rows) => rows.clone(),
                                TableContent::Message(_) => Vec::new(),
                            })
                        }
                        key=|row| row.key
                        let:row
                    >
                        <RecordRow row=row />
                    </For>
                </tbody>
            </table>
        </div>
    }
}

#[component]
fn RecordRow(row: TableRow) -> impl IntoView {
    let runtime = use_explorer_runtime();

    view! {
        <tr>
            <td>
                <span class="file-icon">{row.icon}</span>
                " "
                {row.name}
            </td>
            <td>{row.kind}</td>
            <td>{row.size}</td>
            <td>{row.created}</td>
            <td class="file-actions">
                {row
                    .actions
                    .into_iter()
                    .map(|action| {
                        let label = action.action.label();
                        view! {
                            <button
                                type="button"
                                class="file-action-btn"
                                on:click=move |_| {
                                    runtime.dispatch_action(ExplorerAction::ActivateRow(action.clone()))
                                }
                            >
                                {label}
                            </button>
                        }
                    })
                    .collect_view()}
            </td>
        </tr>
    }
}
