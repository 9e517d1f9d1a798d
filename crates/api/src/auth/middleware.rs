// Authentication middleware and extractors
// Decision: Support both cookie-based (browser) and header-based (API) auth; the cookie wins
// Decision: The guard only verifies the token; it never touches the credential store

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use axum_extra::extract::CookieJar;
use eventhub_core::Error;
use std::sync::Arc;
use uuid::Uuid;

use super::{config::TOKEN_COOKIE, jwt::TokenService};
use crate::api::error::ApiError;

/// Authenticated identity extracted from a verified access token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    /// User ID
    pub id: Uuid,
}

/// Auth state shared across routes
#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<TokenService>,
}

impl AuthState {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }
}

/// Helper trait for extracting AuthState from application state
pub trait FromRef<T> {
    fn from_ref(input: &T) -> Self;
}

impl FromRef<AuthState> for AuthState {
    fn from_ref(input: &AuthState) -> Self {
        input.clone()
    }
}

/// Extractor for authenticated user
/// This is required - returns 401 if not authenticated, before the handler runs
#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);
        authenticate(&parts.headers, &auth_state.tokens).map_err(ApiError::from)
    }
}

/// Find the request's token: `token` cookie first, then `Authorization: Bearer`
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(TOKEN_COOKIE) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Authenticate a request from its headers
pub fn authenticate(headers: &HeaderMap, tokens: &TokenService) -> Result<AuthUser, Error> {
    let Some(token) = extract_token(headers) else {
        tracing::debug!(reason = "missing credential", "Rejected unauthenticated request");
        return Err(Error::missing_credential());
    };

    match tokens.verify_access(&token) {
        Ok(id) => Ok(AuthUser { id }),
        Err(_) => {
            tracing::warn!(reason = "invalid credential", "Rejected request with invalid token");
            Err(Error::invalid_credential())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::config::JwtConfig;
    use axum::http::HeaderValue;
    use eventhub_core::UnauthorizedReason;

    fn service() -> TokenService {
        TokenService::new(JwtConfig::new("middleware-test-secret-0123456789abcdef"))
    }

    fn headers(pairs: &[(header::HeaderName, String)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(name.clone(), HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn test_missing_credential() {
        let result = authenticate(&HeaderMap::new(), &service());
        assert!(matches!(
            result,
            Err(Error::Unauthorized(UnauthorizedReason::MissingCredential))
        ));
    }

    #[test]
    fn test_bearer_token_accepted() {
        let service = service();
        let user_id = Uuid::now_v7();
        let pair = service.issue_token_pair(user_id).unwrap();

        let headers = headers(&[(
            header::AUTHORIZATION,
            format!("Bearer {}", pair.access_token),
        )]);
        let user = authenticate(&headers, &service).unwrap();
        assert_eq!(user.id, user_id);
    }

    #[test]
    fn test_cookie_takes_precedence_over_header() {
        let service = service();
        let cookie_user = Uuid::now_v7();
        let header_user = Uuid::now_v7();
        let cookie_pair = service.issue_token_pair(cookie_user).unwrap();
        let header_pair = service.issue_token_pair(header_user).unwrap();

        let headers = headers(&[
            (
                header::COOKIE,
                format!("{}={}", TOKEN_COOKIE, cookie_pair.access_token),
            ),
            (
                header::AUTHORIZATION,
                format!("Bearer {}", header_pair.access_token),
            ),
        ]);
        assert_eq!(authenticate(&headers, &service).unwrap().id, cookie_user);
    }

    #[test]
    fn test_empty_cookie_falls_back_to_header() {
        let service = service();
        let user_id = Uuid::now_v7();
        let pair = service.issue_token_pair(user_id).unwrap();

        let headers = headers(&[
            (header::COOKIE, format!("{}=", TOKEN_COOKIE)),
            (
                header::AUTHORIZATION,
                format!("Bearer {}", pair.access_token),
            ),
        ]);
        assert_eq!(authenticate(&headers, &service).unwrap().id, user_id);
    }

    #[test]
    fn test_invalid_credential() {
        let headers = headers(&[(header::AUTHORIZATION, "Bearer not-a-jwt".to_string())]);
        assert!(matches!(
            authenticate(&headers, &service()),
            Err(Error::Unauthorized(UnauthorizedReason::InvalidCredential))
        ));
    }

    #[test]
    fn test_refresh_token_does_not_authenticate() {
        let service = service();
        let pair = service.issue_token_pair(Uuid::now_v7()).unwrap();
        let headers = headers(&[(
            header::AUTHORIZATION,
            format!("Bearer {}", pair.refresh_token),
        )]);
        assert!(matches!(
            authenticate(&headers, &service),
            Err(Error::Unauthorized(UnauthorizedReason::InvalidCredential))
        ));
    }

    #[test]
    fn test_non_bearer_scheme_is_missing() {
        let basic = headers(&[(header::AUTHORIZATION, "Basic dXNlcjpwYXNz".to_string())]);
        assert_eq!(extract_token(&basic), None);
        let blank = headers(&[(header::AUTHORIZATION, "Bearer   ".to_string())]);
        assert_eq!(extract_token(&blank), None);
    }
}
