use crate::domain::chat::{ChatReply, ChatRequest};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 鍵值偏好設定儲存（對應瀏覽器的 local storage）
pub trait PreferenceStore: Send + Sync {
    fn read(&self, key: &str) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
    fn write(
        &self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn bind_address(&self) -> &str;
    fn content_path(&self) -> Option<&str>;
    fn preferences_path(&self) -> &str;
    fn chat_enabled(&self) -> bool;
    fn chat_model(&self) -> &str;
    fn chat_base_url(&self) -> &str;
    fn chat_timeout_seconds(&self) -> u64;
    fn api_key(&self) -> Option<String>;
}

/// Any chat-completion service that accepts a system prompt plus turns.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    fn model(&self) -> &str;

    async fn generate(&self, request: ChatRequest) -> Result<ChatReply>;
}
