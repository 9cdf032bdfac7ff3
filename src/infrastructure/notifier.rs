use crate::domain::ports::Notifier;
use crate::domain::submission::NotificationPayload;
use crate::error::DispatchError;
use async_trait::async_trait;
use serde::Serialize;

const NOTIFIER_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Notification relay client.
///
/// Posts the payload as template parameters for a predefined remote
/// template, addressed by service id + template id and authenticated by
/// the public key. Success/failure is judged by status alone. No
/// request timeout, matching the media host client.
pub struct HttpNotifier {
    http_client: reqwest::Client,
    url: String,
    service_id: String,
    template_id: String,
    public_key: String,
}

#[derive(Serialize)]
struct DispatchEnvelope<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a NotificationPayload,
}

impl HttpNotifier {
    pub fn new(
        service_id: impl Into<String>,
        template_id: impl Into<String>,
        public_key: impl Into<String>,
    ) -> Result<Self, DispatchError> {
        Self::with_url(NOTIFIER_URL, service_id, template_id, public_key)
    }

    pub fn with_url(
        url: impl Into<String>,
        service_id: impl Into<String>,
        template_id: impl Into<String>,
        public_key: impl Into<String>,
    ) -> Result<Self, DispatchError> {
        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| DispatchError::Unreachable(e.to_string()))?;

        Ok(Self {
            http_client,
            url: url.into(),
            service_id: service_id.into(),
            template_id: template_id.into(),
            public_key: public_key.into(),
        })
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn dispatch(&self, payload: &NotificationPayload) -> Result<(), DispatchError> {
        let envelope = DispatchEnvelope {
            service_id: &self.service_id,
            template_id: &self.template_id,
            user_id: &self.public_key,
            template_params: payload,
        };

        tracing::debug!(service_id = %self.service_id, "dispatching notification");

        let response = self
            .http_client
            .post(&self.url)
            .json(&envelope)
            .send()
            .await
            .map_err(|e| DispatchError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DispatchError::Rejected(status.as_u16()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let notifier = HttpNotifier::new("service_x", "template_y", "key_z");
        assert!(notifier.is_ok());
    }

    #[test]
    fn test_envelope_shape() {
        let payload = NotificationPayload {
            recipient: "DESK".to_string(),
            sender_name: "Alice".to_string(),
            sender_email: "alice@example.com".to_string(),
            message: "hi".to_string(),
            remote_url: String::new(),
            submitted_at: "2026-01-01 00:00:00".to_string(),
        };
        let envelope = DispatchEnvelope {
            service_id: "service_x",
            template_id: "template_y",
            user_id: "key_z",
            template_params: &payload,
        };

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["service_id"], "service_x");
        assert_eq!(value["template_id"], "template_y");
        assert_eq!(value["user_id"], "key_z");
        assert_eq!(value["template_params"]["from_name"], "Alice");
    }
}
