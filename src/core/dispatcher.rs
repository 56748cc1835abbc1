use crate::config::HarnessConfig;
use crate::core::{ApiResponse, Dispatch, HttpMethod, ResponseLog};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;

/// 對固定 base URL 發送單一請求的 Dispatcher
pub struct RequestDispatcher<L: ResponseLog> {
    config: HarnessConfig,
    client: Client,
    log: L,
}

impl<L: ResponseLog> RequestDispatcher<L> {
    pub fn new(config: HarnessConfig, log: L) -> Self {
        Self::with_client(config, log, Client::new())
    }

    pub fn with_client(config: HarnessConfig, log: L, client: Client) -> Self {
        Self {
            config,
            client,
            log,
        }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    /// Parses `method` first, so an unsupported verb never reaches the network.
    pub async fn send_request(
        &self,
        method: &str,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<ApiResponse> {
        let method: HttpMethod = method.parse()?;
        self.dispatch(method, path, body).await
    }
}

#[async_trait]
impl<L: ResponseLog> Dispatch for RequestDispatcher<L> {
    async fn dispatch(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<ApiResponse> {
        let url = self.config.url_for(path);

        let mut request = match method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        // 固定標頭
        for (name, value) in self.config.headers() {
            request = request.header(name, value);
        }

        // GET / DELETE 忽略 body
        if method.carries_body() {
            if let Some(body) = body {
                request = request.json(body);
            }
        }

        tracing::debug!("📡 Sending {} request to {}", method, url);

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::info!("{} Response: {}", method, body);
        tracing::debug!("📡 {} {} -> {}", method, path, status);

        self.log.append(method, &body)?;

        Ok(ApiResponse { status, body })
    }
}
