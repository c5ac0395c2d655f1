use super::sink::NotificationSink;
use crate::config::WebhookConfig;
use crate::dump::DumpResult;
use crate::error::{DumpError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// POSTs the dump result as JSON to a listener, e.g. a cold-storage
/// uploader.
pub struct WebhookSink {
    url: String,
    client: Client,
}

impl WebhookSink {
    pub fn new(config: &WebhookConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("sql-dump-notify/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            url: config.url.clone(),
            client,
        })
    }
}

#[async_trait]
impl NotificationSink for WebhookSink {
    async fn publish(&self, result: &DumpResult) -> Result<()> {
        debug!("Posting dump notification to {}", self.url);

        let response = self.client.post(&self.url).json(result).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(DumpError::Notification {
                sink: self.name().to_string(),
                message: format!("{} responded {} - {}", self.url, status, text),
            });
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "webhook"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use std::path::PathBuf;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Accepts one request, answers with `status_line` and hands back the
    /// request body.
    async fn serve_once(status_line: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/hooks/dump", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];

            let body_start = loop {
                let n = socket.read(&mut chunk).await.unwrap();
                assert!(n > 0, "connection closed before headers");
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
            };
            let head = String::from_utf8_lossy(&buf[..body_start]).to_lowercase();
            let content_length: usize = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .map(|v| v.trim().parse().unwrap())
                .unwrap_or(0);
            while buf.len() < body_start + content_length {
                let n = socket.read(&mut chunk).await.unwrap();
                assert!(n > 0, "connection closed before body");
                buf.extend_from_slice(&chunk[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\ncontent-length: 4\r\nconnection: close\r\n\r\nbody",
                status_line
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();

            String::from_utf8(buf[body_start..body_start + content_length].to_vec()).unwrap()
        });

        (url, handle)
    }

    fn sample() -> DumpResult {
        DumpResult {
            file_path: PathBuf::from("/srv/storage/app/dumps/shop_2024-03-07_14-05-09.sql"),
            relative_path: "dumps/shop_2024-03-07_14-05-09.sql".to_string(),
            filename: "shop_2024-03-07_14-05-09.sql".to_string(),
            database: "shop".to_string(),
            file_size: 2048,
            created_at: Local.with_ymd_and_hms(2024, 3, 7, 14, 5, 9).unwrap(),
        }
    }

    fn sink_for(url: String) -> WebhookSink {
        WebhookSink::new(&WebhookConfig {
            url,
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_posts_dump_result_as_json() {
        let (url, server) = serve_once("200 OK").await;

        sink_for(url).publish(&sample()).await.unwrap();

        let body: serde_json::Value = serde_json::from_str(&server.await.unwrap()).unwrap();
        assert_eq!(body["database"], "shop");
        assert_eq!(body["filename"], "shop_2024-03-07_14-05-09.sql");
        assert_eq!(body["relative_path"], "dumps/shop_2024-03-07_14-05-09.sql");
        assert_eq!(body["file_path"], "/srv/storage/app/dumps/shop_2024-03-07_14-05-09.sql");
        assert_eq!(body["file_size"], 2048);
        assert!(body["created_at"].as_str().unwrap().starts_with("2024-03-07T14:05:09"));
    }

    #[tokio::test]
    async fn test_error_status_is_notification_error() {
        let (url, server) = serve_once("500 Internal Server Error").await;

        let err = sink_for(url).publish(&sample()).await.unwrap_err();

        match err {
            DumpError::Notification { sink, message } => {
                assert_eq!(sink, "webhook");
                assert!(message.contains("500"));
            }
            other => panic!("unexpected error: {}", other),
        }
        server.await.unwrap();
    }
}
