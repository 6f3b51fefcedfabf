//! Authentication middleware for Axum
//!
//! `auth_middleware` runs on every route. A valid bearer token puts an
//! `AuthenticatedUser` into the request extensions; a request without a
//! token passes through untouched and protected handlers reject it when
//! they extract `AuthenticatedUser`.

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{header, request::Parts, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::UserRole;
use crate::infrastructure::crypto::jwt::{verify_token, JwtConfig, TokenClaims};
use crate::interfaces::http::common::ApiResponse;

/// Authentication error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match self {
            AuthError::MissingToken => "Token de autenticação não informado.",
            AuthError::InvalidToken => "Token de autenticação inválido.",
        };
        (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<()>::error(message)),
        )
            .into_response()
    }
}

/// Authentication state containing the JWT config
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
}

/// Caller identity taken from a verified JWT
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub email: String,
    pub role: UserRole,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: TokenClaims) -> Option<Self> {
        Some(Self {
            user_id: claims.user_id()?,
            email: claims.email,
            role: UserRole::parse(&claims.role),
        })
    }

    pub fn is_shop_owner(&self) -> bool {
        self.role == UserRole::ShopOwner
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AuthError::MissingToken)
    }
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

/// JWT authentication middleware
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(String::from);

    let Some(auth_header) = auth_header else {
        return next.run(request).await;
    };

    let Some(token) = extract_token(&auth_header) else {
        return AuthError::InvalidToken.into_response();
    };

    let user = verify_token(token, &auth_state.jwt_config)
        .ok()
        .and_then(AuthenticatedUser::from_claims);

    match user {
        Some(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        None => AuthError::InvalidToken.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware, routing::get, Router};
    use tower::ServiceExt;

    use crate::infrastructure::crypto::jwt::create_token;

    async fn whoami(user: AuthenticatedUser) -> String {
        format!("{}:{}", user.user_id, user.role)
    }

    async fn public() -> &'static str {
        "public"
    }

    fn app(config: JwtConfig) -> Router {
        Router::new()
            .route("/me", get(whoami))
            .route("/public", get(public))
            .layer(middleware::from_fn_with_state(
                AuthState { jwt_config: config },
                auth_middleware,
            ))
    }

    fn get_with(uri: &str, auth: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(auth) = auth {
            builder = builder.header(header::AUTHORIZATION, auth);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn valid_token_reaches_protected_handler() {
        let config = JwtConfig::new("secret", 1);
        let token = create_token(7, "o@x.com", "shop_owner", &config).unwrap();

        let resp = app(config)
            .oneshot(get_with("/me", Some(&format!("Bearer {}", token))))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"7:shop_owner");
    }

    #[tokio::test]
    async fn missing_token_only_blocks_protected_routes() {
        let config = JwtConfig::new("secret", 1);

        let resp = app(config.clone()).oneshot(get_with("/me", None)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = app(config).oneshot(get_with("/public", None)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let resp = app(JwtConfig::new("secret", 1))
            .oneshot(get_with("/public", Some("Bearer not.a.jwt")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
