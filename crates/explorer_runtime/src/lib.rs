//! View/state synchronization core for the storage explorer.
//!
//! Pure pieces (formatting, tree and table view models, reducers, controllers) are usable and
//! tested natively; [`components`] and [`runtime_context`] bind them to Leptos.

pub mod components;
pub mod datasets;
mod effect_executor;
pub mod format;
pub mod host;
pub mod model;
pub mod reducer;
pub mod runtime_context;
pub mod table;
pub mod tree;
pub mod upload;

pub use components::{DatasetsPage, ExplorerPage, UploadPage};
pub use datasets::{reduce_datasets, DatasetAction, DatasetEffect, DatasetViewerState};
pub use model::*;
pub use reducer::{reduce_explorer, ExplorerAction, ReducerError, RuntimeEffect};
pub use runtime_context::{use_explorer_runtime, ExplorerProvider, ExplorerRuntimeContext};
