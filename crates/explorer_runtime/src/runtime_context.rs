//! Runtime provider and context wiring for the explorer pages.
//!
//! The provider owns the reducer containers and effect queues for the explorer and dataset
//! views. Page composition lives in [`crate::components`].

use explorer_host::HostServices;
use leptos::*;

use crate::{
    datasets::{reduce_datasets, DatasetAction, DatasetEffect, DatasetViewerState},
    effect_executor,
    model::ExplorerState,
    reducer::{reduce_explorer, ExplorerAction, RuntimeEffect},
    upload::UploadSession,
};

#[derive(Clone, Copy)]
/// Leptos context for reading explorer state and dispatching actions.
pub struct ExplorerRuntimeContext {
    /// Injected host service bundle.
    pub host: StoredValue<HostServices>,
    /// Explorer session state.
    pub state: RwSignal<ExplorerState>,
    /// Queue of explorer effects awaiting execution.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Dataset page state.
    pub datasets: RwSignal<DatasetViewerState>,
    /// Queue of dataset effects awaiting execution.
    pub dataset_effects: RwSignal<Vec<DatasetEffect>>,
    /// Upload controls, kept across mode switches and page changes.
    pub uploads: RwSignal<UploadSession>,
    /// Explorer reducer dispatch.
    pub dispatch: Callback<ExplorerAction>,
    /// Dataset reducer dispatch.
    pub dispatch_dataset: Callback<DatasetAction>,
}

impl ExplorerRuntimeContext {
    /// Dispatches an explorer action.
    pub fn dispatch_action(&self, action: ExplorerAction) {
        self.dispatch.call(action);
    }

    /// Dispatches a dataset viewer action.
    pub fn dispatch_dataset_action(&self, action: DatasetAction) {
        self.dispatch_dataset.call(action);
    }

    /// Clone of the host bundle for use inside spawned tasks.
    pub fn host_services(&self) -> HostServices {
        self.host.get_value()
    }
}

#[component]
/// Provides [`ExplorerRuntimeContext`] to descendant components.
pub fn ExplorerProvider(
    /// Host bundle assembled by the entry layer.
    host_services: HostServices,
    children: Children,
) -> impl IntoView {
    let host = store_value(host_services);
    let state = create_rw_signal(ExplorerState::default());
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());
    let datasets = create_rw_signal(DatasetViewerState::default());
    let dataset_effects = create_rw_signal(Vec::<DatasetEffect>::new());
    let uploads = create_rw_signal(UploadSession::default());

    let dispatch = Callback::new(move |action: ExplorerAction| {
        let mut next = state.get_untracked();
        let previous = next.clone();
        match reduce_explorer(&mut next, action) {
            Ok(new_effects) => {
                if next != previous {
                    state.set(next);
                }
                if !new_effects.is_empty() {
                    effects.update(|queue| queue.extend(new_effects));
                }
            }
            Err(err) => logging::warn!("explorer reducer error: {err}"),
        }
    });

    let dispatch_dataset = Callback::new(move |action: DatasetAction| {
        let mut next = datasets.get_untracked();
        let new_effects = reduce_datasets(&mut next, action);
        datasets.set(next);
        if !new_effects.is_empty() {
            dataset_effects.update(|queue| queue.extend(new_effects));
        }
    });

    let runtime = ExplorerRuntimeContext {
        host,
        state,
        effects,
        datasets,
        dataset_effects,
        uploads,
        dispatch,
        dispatch_dataset,
    };

    provide_context(runtime);
    effect_executor::install(runtime);

    children().into_view()
}

/// Returns the current [`ExplorerRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`ExplorerProvider`].
pub fn use_explorer_runtime() -> ExplorerRuntimeContext {
    use_context::<ExplorerRuntimeContext>().expect("ExplorerRuntimeContext not provided")
}
