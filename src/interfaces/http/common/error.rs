//! Translation of domain errors into HTTP responses

use axum::{http::StatusCode, Json};
use tracing::error;

use super::ApiResponse;
use crate::domain::DomainError;

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ApiResponse<()>>);

pub fn status_for(e: &DomainError) -> StatusCode {
    match e {
        DomainError::NotAuthorized(_) | DomainError::Permission(_) => StatusCode::FORBIDDEN,
        DomainError::InvalidParam(_) | DomainError::Query(_) => StatusCode::BAD_REQUEST,
        DomainError::Login(_) => StatusCode::UNAUTHORIZED,
        DomainError::Storage(_) | DomainError::Crypto(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Map a domain error to its status and envelope. Infrastructure details
/// are logged, not returned.
pub fn domain_error(e: DomainError) -> ApiError {
    let status = status_for(&e);
    let message = if e.is_infrastructure() {
        error!(error = %e, "Request failed");
        "Erro interno do servidor.".to_string()
    } else {
        e.to_string()
    };
    (status, Json(ApiResponse::error(message)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_its_status() {
        let cases = [
            (DomainError::not_authorized("x"), StatusCode::FORBIDDEN),
            (DomainError::Permission("x".into()), StatusCode::FORBIDDEN),
            (DomainError::invalid_param("x"), StatusCode::BAD_REQUEST),
            (DomainError::query("x"), StatusCode::BAD_REQUEST),
            (DomainError::Login("x".into()), StatusCode::UNAUTHORIZED),
            (DomainError::Storage("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (DomainError::Crypto("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(status_for(&err), status, "{:?}", err);
        }
    }

    #[test]
    fn storage_details_stay_in_the_log() {
        let (status, Json(body)) = domain_error(DomainError::Storage("disk I/O".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.as_deref(), Some("Erro interno do servidor."));

        let (_, Json(body)) = domain_error(DomainError::query("Serviço já cadastrado."));
        assert_eq!(body.error.as_deref(), Some("Serviço já cadastrado."));
    }
}
