use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use crate::application::ports::{AudioFetcher, FetchError};
use crate::domain::{StagedAudio, StagingToken};
use crate::infrastructure::staging::StagingArea;

/// Fetches a remote audio resource over HTTP and stages it to local disk.
///
/// One GET, no retries. The response must carry a 2xx status and a
/// `Content-Type` indicating audio; the subtype becomes the staged file's
/// extension.
pub struct HttpAudioFetcher {
    client: reqwest::Client,
    staging: Arc<StagingArea>,
}

impl HttpAudioFetcher {
    pub fn new(staging: Arc<StagingArea>) -> Self {
        Self {
            client: reqwest::Client::new(),
            staging,
        }
    }
}

#[async_trait]
impl AudioFetcher for HttpAudioFetcher {
    async fn fetch(&self, url: &str) -> Result<StagedAudio, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::DownloadFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            return Err(FetchError::DownloadFailed(format!(
                "status {}",
                response.status()
            )));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if !content_type.contains("audio") {
            return Err(FetchError::UnsupportedMedia(content_type));
        }

        let subtype = media_subtype(&content_type);

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::DownloadFailed(format!("body: {}", e)))?;

        let token = StagingToken::mint();
        let path = self.staging.path_for("audio", &token, &subtype);
        self.staging
            .write(&path, &body)
            .await
            .map_err(|e| FetchError::StagingFailed(e.to_string()))?;

        tracing::debug!(
            bytes = body.len(),
            subtype = %subtype,
            path = %path.display(),
            "Remote audio staged"
        );

        Ok(StagedAudio::new(path, subtype))
    }
}

/// `audio/ogg; codecs=opus` -> `ogg`
fn media_subtype(content_type: &str) -> String {
    content_type
        .rsplit('/')
        .next()
        .unwrap_or(content_type)
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}
