use super::sink::NotificationSink;
use crate::dump::DumpResult;
use crate::error::Result;
use async_trait::async_trait;
use tracing::info;

pub struct LogSink;

#[async_trait]
impl NotificationSink for LogSink {
    async fn publish(&self, result: &DumpResult) -> Result<()> {
        info!(
            database = %result.database,
            filename = %result.filename,
            relative_path = %result.relative_path,
            file_path = %result.file_path.display(),
            file_size = result.file_size,
            created_at = %result.created_at.to_rfc3339(),
            "database.dump.created"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
