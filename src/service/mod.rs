use crate::{
    config::MailConfig,
    dto::ContactForm,
    error::RelayError,
    mailer::{EmailSender, SendError},
    models::{RelayRequest, Submission},
};

use std::sync::Arc;

#[derive(Clone)]
pub struct ContactService {
    sender: Arc<dyn EmailSender>,
    from: String,
    to: String,
}

impl ContactService {
    pub fn new(sender: Arc<dyn EmailSender>, config: &MailConfig) -> Self {
        Self {
            sender,
            from: config.from.clone(),
            to: config.to.clone(),
        }
    }

    /// Validates the form and makes exactly one attempt to send it on.
    pub async fn relay(&self, form: ContactForm) -> Result<(), RelayError> {
        let submission = Submission::try_from(form)?;
        let request = RelayRequest::new(&self.from, &self.to, submission);

        tracing::info!(
            "Relaying contact message with reply-to '{}'",
            request.reply_to
        );

        match self.sender.send(&request).await {
            Ok(()) => {
                tracing::info!("Contact message from '{}' sent", request.reply_to);
                Ok(())
            }
            Err(SendError::Rejected { status, body }) => {
                tracing::error!("Email provider rejected message with status {}", status);
                if body.is_empty() {
                    Err(RelayError::ProviderRejected(format!(
                        "Email provider responded with {status}"
                    )))
                } else {
                    Err(RelayError::ProviderRejected(body))
                }
            }
            Err(e @ SendError::Transport(_)) => {
                tracing::error!("Failed to reach email provider: {e}");
                Err(RelayError::fault())
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{FakeSender, Outcome};
    use super::*;

    use axum::http::StatusCode;

    fn mail_config() -> MailConfig {
        MailConfig {
            api_url: "http://unused".to_string(),
            api_key: "re_test".to_string(),
            from: "Portfolio <contact@example.com>".to_string(),
            to: "me@example.com".to_string(),
            timeout: None,
        }
    }

    fn form(name: &str, email: &str, message: &str) -> ContactForm {
        ContactForm {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            message: Some(message.to_string()),
        }
    }

    fn service(outcome: Outcome) -> (ContactService, Arc<FakeSender>) {
        let sender = Arc::new(FakeSender::new(outcome));
        (ContactService::new(sender.clone(), &mail_config()), sender)
    }

    #[tokio::test]
    async fn valid_submission_is_sent_once() {
        let (service, sender) = service(Outcome::Accept);

        service
            .relay(form("Ada", "ada@example.com", "Hi"))
            .await
            .unwrap();

        let sent = sender.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].reply_to, "ada@example.com");
        assert!(sent[0].subject.contains("Ada"));
        assert_eq!(sent[0].from, "Portfolio <contact@example.com>");
        assert_eq!(sent[0].to, "me@example.com");
    }

    #[tokio::test]
    async fn invalid_submission_makes_no_call() {
        let (service, sender) = service(Outcome::Accept);

        let err = service
            .relay(form("", "ada@example.com", "Hi"))
            .await
            .unwrap_err();

        assert!(matches!(err, RelayError::ValidationFailed));
        assert_eq!(sender.calls(), 0);
    }

    #[tokio::test]
    async fn rejection_carries_provider_text() {
        let (service, sender) = service(Outcome::Reject(
            StatusCode::SERVICE_UNAVAILABLE,
            "rate limited",
        ));

        let err = service
            .relay(form("Ada", "ada@example.com", "Hi"))
            .await
            .unwrap_err();

        assert!(matches!(err, RelayError::ProviderRejected(_)));
        assert!(err.detail().contains("rate limited"));
        assert_eq!(sender.calls(), 1);
    }

    #[tokio::test]
    async fn empty_rejection_body_falls_back_to_status() {
        let (service, _sender) = service(Outcome::Reject(StatusCode::BAD_GATEWAY, ""));

        let err = service
            .relay(form("Ada", "ada@example.com", "Hi"))
            .await
            .unwrap_err();

        assert!(err.detail().contains("502"));
    }

    #[tokio::test]
    async fn transport_fault_is_generic() {
        let (service, _sender) = service(Outcome::Fault);

        let err = service
            .relay(form("Ada", "ada@example.com", "Hi"))
            .await
            .unwrap_err();

        assert!(matches!(err, RelayError::RelayFault(_)));
        assert_eq!(err.detail(), crate::error::FAULT_MESSAGE);
        assert!(!err.detail().contains("connection reset"));
    }

    #[tokio::test]
    async fn every_call_is_a_new_attempt() {
        let (service, sender) = service(Outcome::Reject(
            StatusCode::SERVICE_UNAVAILABLE,
            "rate limited",
        ));

        for _ in 0..2 {
            assert!(service
                .relay(form("Ada", "ada@example.com", "Hi"))
                .await
                .is_err());
        }

        assert_eq!(sender.calls(), 2);
    }
}
