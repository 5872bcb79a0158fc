//! HTTP client for the tag and framework service

use crate::{ClientConfig, ClientError, ClientResult};
use async_trait::async_trait;
use curio_engine::{FrameworkStore, TagStore};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::models::{AssetTag, BulkPolicy, BulkTagRequest, FrameworkFilter, TagFramework};

/// HTTP client implementing the engine's collaborator contracts
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        let base_url = Url::parse(config.base_url.trim())
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(config.base_url.clone()));
        }

        Ok(Self {
            client,
            base_url,
            token: config.token.clone(),
        })
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Base URL extended by `segments`, each percent-encoded as one segment
    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// GET and unwrap the envelope payload
    pub async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> ClientResult<T> {
        let request = self.authorize(self.client.get(self.endpoint(segments)?));
        let response = request.send().await?;
        Self::payload(Self::handle_response(response).await?)
    }

    /// GET with query parameters
    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        query: &Q,
    ) -> ClientResult<T> {
        let request = self.authorize(self.client.get(self.endpoint(segments)?).query(query));
        let response = request.send().await?;
        Self::payload(Self::handle_response(response).await?)
    }

    /// PUT a JSON body, ignoring any payload
    pub async fn put<B: Serialize + ?Sized>(&self, segments: &[&str], body: &B) -> ClientResult<()> {
        let request = self.authorize(self.client.put(self.endpoint(segments)?).json(body));
        let response = request.send().await?;
        Self::handle_ack(response).await
    }

    /// POST a JSON body, ignoring any payload
    pub async fn post<B: Serialize + ?Sized>(&self, segments: &[&str], body: &B) -> ClientResult<()> {
        let request = self.authorize(self.client.post(self.endpoint(segments)?).json(body));
        let response = request.send().await?;
        Self::handle_ack(response).await
    }

    fn payload<T>(envelope: ApiResponse<T>) -> ClientResult<T> {
        envelope
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing response data".to_string()))
    }

    /// Body of a successful response
    ///
    /// Error statuses carrying an envelope keep its code. Bare error statuses
    /// are mapped by status.
    async fn success_text(response: Response) -> ClientResult<String> {
        let status = response.status();
        let text = response.text().await?;
        if status.is_success() {
            return Ok(text);
        }

        if let Ok(envelope) = serde_json::from_str::<ApiResponse<Value>>(&text)
            && envelope.code.is_some()
        {
            return Err(envelope.into_error().into());
        }
        let message = if text.trim().is_empty() {
            status.to_string()
        } else {
            text
        };
        Err(ClientError::Api {
            code: ErrorCode::from_http_status(status),
            message,
            details: None,
        })
    }

    fn decode<T: DeserializeOwned>(text: &str) -> ClientResult<ApiResponse<T>> {
        let envelope: ApiResponse<T> = serde_json::from_str(text)?;
        if !envelope.is_success() {
            return Err(envelope.into_error().into());
        }
        Ok(envelope)
    }

    /// Decode the response envelope
    async fn handle_response<T: DeserializeOwned>(
        response: Response,
    ) -> ClientResult<ApiResponse<T>> {
        let text = Self::success_text(response).await?;
        Self::decode(&text)
    }

    /// Accept a write: an empty success body (204) is enough, otherwise the
    /// envelope must report success
    async fn handle_ack(response: Response) -> ClientResult<()> {
        let text = Self::success_text(response).await?;
        if text.trim().is_empty() {
            return Ok(());
        }
        Self::decode::<Value>(&text).map(|_| ())
    }

    // ========== Frameworks ==========

    pub async fn framework(&self, id: &str) -> ClientResult<TagFramework> {
        self.get(&["api", "frameworks", id]).await
    }

    pub async fn frameworks(&self, filter: &FrameworkFilter) -> ClientResult<Vec<TagFramework>> {
        self.get_with_query(&["api", "frameworks"], filter).await
    }

    // ========== Tags ==========

    pub async fn file_tags(&self, file_id: &str) -> ClientResult<Vec<AssetTag>> {
        self.get(&["api", "files", file_id, "tags"]).await
    }

    pub async fn replace_file_tags(&self, file_id: &str, tags: &[AssetTag]) -> ClientResult<()> {
        self.put(&["api", "files", file_id, "tags"], tags).await
    }

    pub async fn bulk_tags(&self, request: &BulkTagRequest) -> ClientResult<()> {
        self.post(&["api", "tags", "bulk"], request).await
    }
}

fn remote_failure(operation: &str, err: ClientError) -> AppError {
    let err = AppError::from(err);
    tracing::error!(operation, code = err.code.code(), error = %err, "Remote call failed");
    err
}

#[async_trait]
impl FrameworkStore for HttpClient {
    async fn fetch_framework(&self, id: &str) -> AppResult<TagFramework> {
        match self.framework(id).await {
            Ok(framework) => Ok(framework),
            // a bare 404 on this route means the framework itself is unknown
            Err(ClientError::Api {
                code: ErrorCode::NotFound,
                ..
            }) => Err(AppError::framework_not_found(id)),
            Err(e) => Err(remote_failure("fetch_framework", e)),
        }
    }

    async fn fetch_framework_list(&self, filter: &FrameworkFilter) -> AppResult<Vec<TagFramework>> {
        self.frameworks(filter)
            .await
            .map_err(|e| remote_failure("fetch_framework_list", e))
    }
}

#[async_trait]
impl TagStore for HttpClient {
    async fn fetch_tags(&self, file_id: &str) -> AppResult<Vec<AssetTag>> {
        self.file_tags(file_id)
            .await
            .map_err(|e| remote_failure("fetch_tags", e))
    }

    async fn persist_tags(&self, file_id: &str, tags: &[AssetTag]) -> AppResult<()> {
        self.replace_file_tags(file_id, tags)
            .await
            .map_err(|e| remote_failure("persist_tags", e))
    }

    async fn persist_tags_bulk(
        &self,
        file_ids: &[String],
        tags: &[AssetTag],
        policy: BulkPolicy,
    ) -> AppResult<()> {
        let request = BulkTagRequest {
            file_ids: file_ids.to_vec(),
            tags: tags.to_vec(),
            policy,
        };
        self.bulk_tags(&request)
            .await
            .map_err(|e| remote_failure("persist_tags_bulk", e))
    }
}
