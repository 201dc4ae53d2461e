//! Storage-service client over HTTP (browser `fetch` on wasm32 via reqwest).

use explorer_host::{
    DatasetPayload, DatasetSummary, Endpoint, EndpointMethod, FileTree, FileUpload, Record,
    RecordId, ResolvedUrl, ServiceConfig, StorageError, StorageFuture, StorageService,
    UploadResponse,
};
use reqwest::{header::CONTENT_TYPE, multipart, Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, Clone)]
/// [`StorageService`] implementation that talks to the remote service at a fixed base address.
///
/// No timeouts and no retries are applied; a non-success status is reported as
/// [`StorageError::Status`] with the response body attached.
pub struct HttpStorageService {
    client: Client,
    config: ServiceConfig,
}

impl HttpStorageService {
    /// Creates a client for `config.base_url`.
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Service address this client targets.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    fn request(&self, endpoint: &Endpoint<'_>) -> RequestBuilder {
        let url = self.config.url(endpoint);
        match endpoint.method() {
            EndpointMethod::Get => self.client.get(url),
            EndpointMethod::Post => self.client.post(url),
            EndpointMethod::Delete => self.client.delete(url),
        }
    }

    fn search_request(&self, query: &str) -> RequestBuilder {
        self.request(&Endpoint::Search).query(&[("query", query)])
    }

    fn datasets_request(&self, query: Option<&str>) -> RequestBuilder {
        let request = self.request(&Endpoint::Datasets);
        match query {
            Some(query) => request.query(&[("query", query)]),
            None => request,
        }
    }

    fn json_upload_request(&self, raw: &str) -> RequestBuilder {
        self.request(&Endpoint::JsonUpload)
            .header(CONTENT_TYPE, "application/json")
            .body(raw.to_string())
    }

    fn file_upload_request(&self, file: &FileUpload) -> Result<RequestBuilder, StorageError> {
        let mut part = multipart::Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
        if let Some(content_type) = file.content_type.as_deref().filter(|ct| !ct.is_empty()) {
            part = part
                .mime_str(content_type)
                .map_err(|err| StorageError::MalformedInput(err.to_string()))?;
        }
        let form = multipart::Form::new().part("file", part);
        Ok(self.request(&Endpoint::Upload).multipart(form))
    }
}

async fn send(request: RequestBuilder) -> Result<Response, StorageError> {
    let response = request
        .send()
        .await
        .map_err(|err| StorageError::Transport(err.to_string()))?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(StorageError::Status {
        status: status.as_u16(),
        body,
    })
}

async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, StorageError> {
    let response = send(request).await?;
    let text = response
        .text()
        .await
        .map_err(|err| StorageError::Transport(err.to_string()))?;
    Ok(serde_json::from_str(&text)?)
}

impl StorageService for HttpStorageService {
    fn load_tree<'a>(&'a self) -> StorageFuture<'a, Result<FileTree, StorageError>> {
        Box::pin(async move { send_json(self.request(&Endpoint::FileTree)).await })
    }

    fn search<'a>(&'a self, query: &'a str) -> StorageFuture<'a, Result<Vec<Record>, StorageError>> {
        Box::pin(async move { send_json(self.search_request(query)).await })
    }

    fn view_url<'a>(
        &'a self,
        id: &'a RecordId,
    ) -> StorageFuture<'a, Result<ResolvedUrl, StorageError>> {
        Box::pin(async move { send_json(self.request(&Endpoint::View(id))).await })
    }

    fn download_url<'a>(
        &'a self,
        id: &'a RecordId,
    ) -> StorageFuture<'a, Result<ResolvedUrl, StorageError>> {
        Box::pin(async move { send_json(self.request(&Endpoint::Download(id))).await })
    }

    fn delete<'a>(&'a self, id: &'a RecordId) -> StorageFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            send(self.request(&Endpoint::Delete(id))).await?;
            Ok(())
        })
    }

    fn upload_file<'a>(
        &'a self,
        file: &'a FileUpload,
    ) -> StorageFuture<'a, Result<UploadResponse, StorageError>> {
        Box::pin(async move {
            let body: Value = send_json(self.file_upload_request(file)?).await?;
            Ok(UploadResponse::from_value(body))
        })
    }

    fn upload_json<'a>(&'a self, raw: &'a str) -> StorageFuture<'a, Result<Value, StorageError>> {
        Box::pin(async move { send_json(self.json_upload_request(raw)).await })
    }

    fn list_datasets<'a>(
        &'a self,
        query: Option<&'a str>,
    ) -> StorageFuture<'a, Result<Vec<DatasetSummary>, StorageError>> {
        Box::pin(async move { send_json(self.datasets_request(query)).await })
    }

    fn dataset<'a>(&'a self, id: i64) -> StorageFuture<'a, Result<DatasetPayload, StorageError>> {
        Box::pin(async move { send_json(self.request(&Endpoint::Dataset(id))).await })
    }
}
