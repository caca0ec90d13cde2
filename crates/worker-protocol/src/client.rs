//! HTTP client for the worker service.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::error::{WorkerError, WorkerResult};
use crate::types::{RenderRequest, RenderResponse, SampleRequest, SampleResponse};

/// Longest worker error body kept in a `WorkerError::Status`.
const MAX_ERROR_BODY: usize = 512;

/// Operations the worker answers.
///
/// One call is one request: implementations must not retry, cache, or batch.
#[async_trait]
pub trait MapWorker: Send + Sync {
    /// Render a variable as an overlay image.
    async fn render(&self, request: &RenderRequest) -> WorkerResult<RenderResponse>;

    /// Read a variable at a single point.
    async fn sample(&self, request: &SampleRequest) -> WorkerResult<SampleResponse>;
}

/// `MapWorker` backed by a single worker reachable over HTTP.
#[derive(Debug, Clone)]
pub struct HttpWorkerClient {
    client: Client,
    base_url: String,
}

impl HttpWorkerClient {
    /// Create a client for the worker at `base_url` (e.g. `http://localhost:5001`).
    ///
    /// No overall request timeout is set here; callers bound each call with
    /// their own deadline.
    pub fn new(base_url: &str) -> WorkerResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .tcp_nodelay(true)
            .build()
            .map_err(|e| WorkerError::Unreachable(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn post_json<Req, Resp>(&self, path: &str, body: &Req) -> WorkerResult<Resp>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = self.endpoint(path);
        let started = Instant::now();

        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();

        debug!(
            url = %url,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Worker responded"
        );

        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            truncate_utf8(&mut body, MAX_ERROR_BODY);
            return Err(WorkerError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl MapWorker for HttpWorkerClient {
    async fn render(&self, request: &RenderRequest) -> WorkerResult<RenderResponse> {
        let response: RenderResponse = self.post_json("render", request).await?;
        response.bounds.validate()?;
        Ok(response)
    }

    async fn sample(&self, request: &SampleRequest) -> WorkerResult<SampleResponse> {
        self.post_json("sample", request).await
    }
}

fn truncate_utf8(s: &mut String, max: usize) {
    if s.len() <= max {
        return;
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    s.truncate(cut);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let client = HttpWorkerClient::new("http://localhost:5001/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5001");
        assert_eq!(client.endpoint("render"), "http://localhost:5001/render");

        let client = HttpWorkerClient::new("http://worker:8000/api").unwrap();
        assert_eq!(client.endpoint("sample"), "http://worker:8000/api/sample");
    }

    #[test]
    fn test_truncate_utf8() {
        let mut s = "ab°c".to_string();
        truncate_utf8(&mut s, 3);
        assert_eq!(s, "ab");

        let mut s = "short".to_string();
        truncate_utf8(&mut s, 512);
        assert_eq!(s, "short");
    }
}
