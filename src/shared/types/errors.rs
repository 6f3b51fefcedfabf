use thiserror::Error;

/// Errors raised by domain and application services.
///
/// `NotAuthorized` deliberately covers a missing resource, a caller without
/// permission and a booking conflict; the message tells them apart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("{0}")]
    NotAuthorized(String),

    #[error("{0}")]
    Permission(String),

    #[error("{0}")]
    InvalidParam(String),

    #[error("{0}")]
    Query(String),

    #[error("{0}")]
    Login(String),

    #[error("Database error: {0}")]
    Storage(String),

    #[error("Crypto error: {0}")]
    Crypto(String),
}

impl DomainError {
    pub fn not_authorized(msg: impl Into<String>) -> Self {
        Self::NotAuthorized(msg.into())
    }

    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    pub fn invalid_param(msg: impl Into<String>) -> Self {
        Self::InvalidParam(msg.into())
    }

    /// Whether this error came from the storage layer rather than a rule.
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Crypto(_))
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        Self::Storage(e.to_string())
    }
}

impl From<bcrypt::BcryptError> for DomainError {
    fn from(e: bcrypt::BcryptError) -> Self {
        Self::Crypto(e.to_string())
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_keeps_the_user_facing_message() {
        let e = DomainError::not_authorized("Barbearia não encontrada.");
        assert_eq!(e.to_string(), "Barbearia não encontrada.");
    }

    #[test]
    fn storage_errors_are_prefixed() {
        let e = DomainError::from(sea_orm::DbErr::Custom("disk full".into()));
        assert!(e.to_string().starts_with("Database error:"));
        assert!(e.is_infrastructure());
        assert!(!DomainError::query("x").is_infrastructure());
    }
}
