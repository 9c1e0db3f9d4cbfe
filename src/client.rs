//! 解析サーバへの送信（reqwest）

use std::time::Duration;

use interior_style_common::{SubmissionOutcome, UploadRequest};
use reqwest::multipart::{Form, Part};

use crate::error::Result;
use crate::scanner::LocalImage;

pub struct UploadClient {
    http: reqwest::Client,
    endpoint: String,
}

impl UploadClient {
    pub fn new(endpoint: &str, timeout_seconds: u64) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    /// POSTを1回発行する。接続失敗なども SubmissionOutcome::Transport として返す
    pub async fn submit(&self, request: &UploadRequest<LocalImage>) -> SubmissionOutcome {
        match self.send(request).await {
            Ok((status, body)) => SubmissionOutcome::Response { status, body },
            Err(e) => SubmissionOutcome::Transport(e.to_string()),
        }
    }

    async fn send(&self, request: &UploadRequest<LocalImage>) -> reqwest::Result<(u16, String)> {
        let part = Part::bytes(request.file.bytes.to_vec())
            .file_name(request.file_name.clone())
            .mime_str(&request.mime_type)?;
        let form = Form::new().part(request.field, part);

        let url = self.url_for(request.path);
        let response = self.http.post(&url).multipart(form).send().await?;
        let status = response.status();
        tracing::debug!("POST {} -> {}", url, status);

        let body = match response.text().await {
            Ok(body) => body,
            // エラーレスポンスのボディは通知の補足にしか使わない
            Err(_) if !status.is_success() => String::new(),
            Err(e) => return Err(e),
        };

        Ok((status.as_u16(), body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_trims_trailing_slash() {
        let client = UploadClient::new("http://localhost:8000/", 5).unwrap();
        assert_eq!(client.url_for("/upload"), "http://localhost:8000/upload");
    }
}
