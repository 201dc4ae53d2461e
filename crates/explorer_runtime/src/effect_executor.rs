//! Effect-queue executor for reducer-emitted side effects.

use leptos::*;

use crate::{
    datasets::run_dataset_effect, host::run_runtime_effect,
    runtime_context::ExplorerRuntimeContext,
};

/// Installs executors that drain both effect queues in order.
///
/// Each effect runs as its own task and feeds its outcome back through the matching dispatch.
pub fn install(runtime: ExplorerRuntimeContext) {
    // Clear the queue before spawning so actions dispatched by finished tasks enqueue a fresh batch.
    create_effect(move |_| {
        let queued = runtime.effects.get();
        if queued.is_empty() {
            return;
        }
        runtime.effects.set(Vec::new());

        for effect in queued {
            let host = runtime.host_services();
            spawn_local(async move {
                if let Some(next) = run_runtime_effect(&host, effect).await {
                    runtime.dispatch_action(next);
                }
            });
        }
    });

    create_effect(move |_| {
        let queued = runtime.dataset_effects.get();
        if queued.is_empty() {
            return;
        }
        runtime.dataset_effects.set(Vec::new());

        for effect in queued {
            let host = runtime.host_services();
            spawn_local(async move {
                if let Some(next) = run_dataset_effect(&host, effect).await {
                    runtime.dispatch_dataset_action(next);
                }
            });
        }
    });
}
