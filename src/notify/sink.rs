use crate::dump::DumpResult;
use crate::error::Result;
use async_trait::async_trait;

/// Receives the completion notice of a verified dump.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn publish(&self, result: &DumpResult) -> Result<()>;
    fn name(&self) -> &'static str;
}
