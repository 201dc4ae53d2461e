//! Leptos page components for the explorer, upload and dataset routes.

mod datasets;
mod explorer;
mod upload;

pub use datasets::DatasetsPage;
pub use explorer::ExplorerPage;
pub use upload::UploadPage;
