mod log;
mod sink;
mod webhook;

pub use self::log::LogSink;
pub use sink::NotificationSink;
pub use webhook::WebhookSink;

use crate::config::NotifyConfig;
use crate::dump::DumpResult;
use crate::error::Result;
use tracing::{debug, warn};

pub fn create_sinks(config: &NotifyConfig) -> Result<Vec<Box<dyn NotificationSink>>> {
    let mut sinks: Vec<Box<dyn NotificationSink>> = Vec::new();

    if config.log {
        sinks.push(Box::new(LogSink));
    }
    for hook in &config.webhooks {
        sinks.push(Box::new(WebhookSink::new(hook)?));
    }

    Ok(sinks)
}

/// Delivers to every sink in order. A failing sink is logged and
/// skipped; returns how many sinks accepted the notice.
pub async fn publish_all(sinks: &[Box<dyn NotificationSink>], result: &DumpResult) -> usize {
    let mut delivered = 0;

    for sink in sinks {
        match sink.publish(result).await {
            Ok(()) => {
                debug!("Notified {}", sink.name());
                delivered += 1;
            }
            Err(e) => warn!("Failed to notify {}: {}", sink.name(), e),
        }
    }

    delivered
}
