//! Notification fan-out for new submissions.
//!
//! Every submission is logged. When a webhook URL is configured the
//! submission is also POSTed there as JSON. Delivery problems are logged and
//! never surface to the submitter.

use crate::submissions::types::Submission;
use reqwest::Client;
use std::time::Duration;

const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Logged,
    Delivered,
    Failed,
}

pub struct Notifier {
    client: Client,
    webhook_url: Option<String>,
}

impl Notifier {
    pub fn new(client: Client, webhook_url: Option<String>) -> Self {
        Self {
            client,
            webhook_url,
        }
    }

    pub async fn notify(&self, submission: &Submission) -> Delivery {
        tracing::info!(
            id = %submission.id,
            name = %submission.name,
            url = %submission.url,
            category = %submission.category,
            pricing_type = %submission.pricing_type,
            "New tool submission"
        );

        let Some(webhook_url) = self.webhook_url.as_deref() else {
            return Delivery::Logged;
        };

        let result = self
            .client
            .post(webhook_url)
            .timeout(WEBHOOK_TIMEOUT)
            .json(submission)
            .send()
            .await
            .and_then(|response| response.error_for_status());

        match result {
            Ok(_) => {
                tracing::debug!(id = %submission.id, "Submission webhook delivered");
                Delivery::Delivered
            }
            Err(e) => {
                tracing::warn!(id = %submission.id, error = %e, "Submission webhook failed");
                Delivery::Failed
            }
        }
    }
}
