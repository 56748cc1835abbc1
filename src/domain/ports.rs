use crate::domain::model::{ApiResponse, HttpMethod};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 每次請求寫一行 `<METHOD> Response: <body>` 的輸出端
pub trait ResponseLog: Send + Sync {
    fn append(&self, method: HttpMethod, body: &str) -> Result<()>;
}

#[async_trait]
pub trait Dispatch: Send + Sync {
    async fn dispatch(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<ApiResponse>;
}
