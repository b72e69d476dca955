use serde::Serialize;

use crate::{dto::ContactForm, error::RelayError};

/// A contact submission whose three fields are known to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl TryFrom<ContactForm> for Submission {
    type Error = RelayError;

    fn try_from(form: ContactForm) -> Result<Self, Self::Error> {
        let required = |field: Option<String>| field.filter(|v| !v.is_empty());

        match (
            required(form.name),
            required(form.email),
            required(form.message),
        ) {
            (Some(name), Some(email), Some(message)) => Ok(Self {
                name,
                email,
                message,
            }),
            _ => Err(RelayError::ValidationFailed),
        }
    }
}

/// Payload handed to the email provider. Field names match its JSON API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelayRequest {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
    pub reply_to: String,
}

impl RelayRequest {
    pub fn new(from: &str, to: &str, submission: Submission) -> Self {
        let Submission {
            name,
            email,
            message,
        } = submission;

        Self {
            from: from.to_string(),
            to: to.to_string(),
            subject: format!("New message from {name}"),
            text: format!("Name: {name}\nEmail: {email}\n\n{message}"),
            reply_to: email,
        }
    }
}
