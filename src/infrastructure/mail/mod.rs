//! Outgoing mail adapters

use std::sync::Mutex;

use async_trait::async_trait;
use tracing::info;

use crate::domain::{DomainResult, Mailer};

/// Mailer that writes the message to the log instead of sending it
#[derive(Debug, Default, Clone)]
pub struct LoggingMailer;

#[async_trait]
impl Mailer for LoggingMailer {
    async fn send_password_reset(&self, email: &str, token: &str) -> DomainResult<()> {
        info!(to = %email, "Password reset requested, token: {}", token);
        Ok(())
    }
}

/// A delivered password-reset message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentResetMail {
    pub email: String,
    pub token: String,
}

/// Mailer that keeps every message in memory
#[derive(Debug, Default)]
pub struct InMemoryMailer {
    outbox: Mutex<Vec<SentResetMail>>,
}

impl InMemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentResetMail> {
        self.outbox
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl Mailer for InMemoryMailer {
    async fn send_password_reset(&self, email: &str, token: &str) -> DomainResult<()> {
        self.outbox
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(SentResetMail {
                email: email.to_string(),
                token: token.to_string(),
            });
        Ok(())
    }
}
