use explorer_host::ServiceConfig;
use explorer_host_web::build_host_services;
use explorer_runtime::{DatasetsPage, ExplorerPage, ExplorerProvider, UploadPage};
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();
    let host_services = build_host_services(ServiceConfig::from_build_env());

    view! {
        <Title text="Storage Explorer" />
        <Meta name="description" content="Browser client for stored files and JSON datasets." />

        <ExplorerProvider host_services=host_services>
            <Router>
                <nav class="site-nav">
                    <A href="/" exact=true>"Explorer"</A>
                    <A href="/upload">"Upload"</A>
                    <A href="/datasets">"Datasets"</A>
                </nav>
                <main class="site-root">
                    <Routes>
                        <Route path="" view=ExplorerPage />
                        <Route path="/upload" view=UploadPage />
                        <Route path="/datasets" view=DatasetsPage />
                    </Routes>
                </main>
            </Router>
        </ExplorerProvider>
    }
}
