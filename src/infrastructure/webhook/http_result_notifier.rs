use async_trait::async_trait;

use crate::application::ports::{JobOutcome, NotifyError, ResultNotifier};

/// Delivers a job's terminal result as one JSON POST to the callback address.
/// The response body is ignored; a non-success status is reported to the
/// caller only so it can be logged.
pub struct HttpResultNotifier {
    client: reqwest::Client,
}

impl HttpResultNotifier {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpResultNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResultNotifier for HttpResultNotifier {
    async fn deliver(&self, callback_url: &str, outcome: &JobOutcome) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(callback_url)
            .json(outcome)
            .send()
            .await
            .map_err(|e| NotifyError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(NotifyError::RejectedStatus(response.status().as_u16()));
        }

        tracing::debug!(callback_url = %callback_url, "Webhook delivered");

        Ok(())
    }
}
