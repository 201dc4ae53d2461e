//! Service base-address configuration and the endpoint table consumed by the client.

use crate::records::RecordId;

/// Service base address used when no build-time override is present.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
/// Build-time environment variable that overrides [`DEFAULT_API_BASE`].
pub const API_BASE_ENV: &str = "EXPLORER_API_BASE";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Fixed storage-service address for the lifetime of the client.
pub struct ServiceConfig {
    /// Scheme, host and optional path prefix, without a trailing slash.
    pub base_url: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

impl ServiceConfig {
    /// Builds a config for `base_url`, dropping trailing slashes.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = if trimmed.is_empty() {
            DEFAULT_API_BASE.to_string()
        } else {
            trimmed.to_string()
        };
        Self { base_url }
    }

    /// Reads the base address baked in at compile time through [`API_BASE_ENV`].
    pub fn from_build_env() -> Self {
        match option_env!("EXPLORER_API_BASE") {
            Some(base) => Self::new(base),
            None => Self::default(),
        }
    }

    /// Absolute URL for `endpoint` (query parameters are attached by the transport).
    pub fn url(&self, endpoint: &Endpoint<'_>) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// HTTP method used by an [`Endpoint`].
pub enum EndpointMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `DELETE`
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Remote endpoints consumed by the explorer, upload and dataset views.
pub enum Endpoint<'a> {
    /// `GET /files/tree`
    FileTree,
    /// `GET /search?query=<q>`
    Search,
    /// `GET /view/{id}`
    View(&'a RecordId),
    /// `GET /download/{id}`
    Download(&'a RecordId),
    /// `DELETE /delete/{id}`
    Delete(&'a RecordId),
    /// `POST /upload` (multipart, field `file`)
    Upload,
    /// `POST /json/upload` (raw JSON body)
    JsonUpload,
    /// `GET /json/datasets[?query=<q>]`
    Datasets,
    /// `GET /json/{id}`
    Dataset(i64),
}

impl Endpoint<'_> {
    /// Path component relative to [`ServiceConfig::base_url`].
    pub fn path(&self) -> String {
        match self {
            Self::FileTree => "/files/tree".to_string(),
            Self::Search => "/search".to_string(),
            Self::View(id) => format!("/view/{}", encode_segment(id)),
            Self::Download(id) => format!("/download/{}", encode_segment(id)),
            Self::Delete(id) => format!("/delete/{}", encode_segment(id)),
            Self::Upload => "/upload".to_string(),
            Self::JsonUpload => "/json/upload".to_string(),
            Self::Datasets => "/json/datasets".to_string(),
            Self::Dataset(id) => format!("/json/{id}"),
        }
    }

    /// HTTP method for the endpoint.
    pub const fn method(&self) -> EndpointMethod {
        match self {
            Self::Delete(_) => EndpointMethod::Delete,
            Self::Upload | Self::JsonUpload => EndpointMethod::Post,
            _ => EndpointMethod::Get,
        }
    }
}

/// Percent-encodes an identifier so it always stays one path segment.
fn encode_segment(id: &RecordId) -> String {
    urlencoding::encode(id.as_str()).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_normalizes_base_address() {
        assert_eq!(ServiceConfig::default().base_url, DEFAULT_API_BASE);
        assert_eq!(
            ServiceConfig::new("https://files.example.test/api//").base_url,
            "https://files.example.test/api"
        );
        assert_eq!(ServiceConfig::new("   ").base_url, DEFAULT_API_BASE);
    }

    #[test]
    fn endpoints_map_to_service_routes() {
        let config = ServiceConfig::default();
        let id = RecordId::from(42);
        let cases = [
            (Endpoint::FileTree, "http://localhost:8000/files/tree", EndpointMethod::Get),
            (Endpoint::Search, "http://localhost:8000/search", EndpointMethod::Get),
            (Endpoint::View(&id), "http://localhost:8000/view/42", EndpointMethod::Get),
            (
                Endpoint::Download(&id),
                "http://localhost:8000/download/42",
                EndpointMethod::Get,
            ),
            (
                Endpoint::Delete(&id),
                "http://localhost:8000/delete/42",
                EndpointMethod::Delete,
            ),
            (Endpoint::Upload, "http://localhost:8000/upload", EndpointMethod::Post),
            (
                Endpoint::JsonUpload,
                "http://localhost:8000/json/upload",
                EndpointMethod::Post,
            ),
            (
                Endpoint::Datasets,
                "http://localhost:8000/json/datasets",
                EndpointMethod::Get,
            ),
            (Endpoint::Dataset(7), "http://localhost:8000/json/7", EndpointMethod::Get),
        ];

        for (endpoint, url, method) in cases {
            assert_eq!(config.url(&endpoint), url, "endpoint={endpoint:?}");
            assert_eq!(endpoint.method(), method, "endpoint={endpoint:?}");
        }
    }

    #[test]
    fn record_ids_are_encoded_as_a_single_path_segment() {
        let config = ServiceConfig::default();
        let id = RecordId::from("a/b?c#d e");
        assert_eq!(
            config.url(&Endpoint::View(&id)),
            "http://localhost:8000/view/a%2Fb%3Fc%23d%20e"
        );
        assert_eq!(
            config.url(&Endpoint::Delete(&id)),
            "http://localhost:8000/delete/a%2Fb%3Fc%23d%20e"
        );
        assert_eq!(Endpoint::Download(&RecordId::from(42)).path(), "/download/42");
    }
}
