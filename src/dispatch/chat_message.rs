use anyhow::Result;
use async_trait::async_trait;

/// A received chat message, as seen by command handlers and hooks.
#[async_trait]
pub trait ChatMessage: Send + Sync {
    /// Full text of the message.
    fn content(&self) -> &str;

    fn author(&self) -> &str;

    /// How replies refer to the author.
    fn author_mention(&self) -> String {
        format!("@{}", self.author())
    }

    fn is_from_bot(&self) -> bool {
        false
    }

    async fn reply(&self, content: &str) -> Result<()>;

    async fn delete(&self) -> Result<()>;
}
