//! Axum extractor for RequestContext.

use std::convert::Infallible;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, HeaderMap},
};
use uuid::Uuid;

use calshare_auth::{AuthState, OptionalUser};

use super::types::{RequestContext, RequestId};

/// Header carrying the sharing code a caller presents.
pub const SHARING_CODE_HEADER: &str = "sharing_code";

fn extract_request_id(headers: &HeaderMap) -> RequestId {
    headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .map(RequestId::from_uuid)
        .unwrap_or_else(RequestId::new)
}

fn extract_sharing_code(headers: &HeaderMap) -> Option<String> {
    headers
        .get(SHARING_CODE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl<S> FromRequestParts<S> for RequestContext
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let OptionalUser(user_id) = OptionalUser::from_request_parts(parts, state).await?;

        Ok(RequestContext {
            user_id,
            sharing_code: extract_sharing_code(&parts.headers),
            request_id: extract_request_id(&parts.headers),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header::AUTHORIZATION, Request};
    use calshare_auth::AuthConfig;

    #[test]
    fn test_extract_request_id_from_header() {
        let mut headers = HeaderMap::new();
        let id = "550e8400-e29b-41d4-a716-446655440000";
        headers.insert("x-request-id", id.parse().unwrap());

        let request_id = extract_request_id(&headers);
        assert_eq!(request_id.to_string(), id);
    }

    #[test]
    fn test_extract_request_id_generates_when_invalid() {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", "not-a-uuid".parse().unwrap());

        let request_id = extract_request_id(&headers);

        Uuid::parse_str(&request_id.to_string()).expect("Should be valid UUID");
    }

    #[test]
    fn test_extract_sharing_code() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_sharing_code(&headers), None);

        headers.insert(SHARING_CODE_HEADER, "  ".parse().unwrap());
        assert_eq!(extract_sharing_code(&headers), None);

        headers.insert(SHARING_CODE_HEADER, "abc".parse().unwrap());
        assert_eq!(extract_sharing_code(&headers), Some("abc".to_string()));
    }

    #[tokio::test]
    async fn test_context_from_request() {
        let auth = AuthState::new(AuthConfig::new("test-secret"));
        let user_id = Uuid::new_v4();
        let token = auth.issue_token(user_id).unwrap();
        let (mut parts, _) = Request::builder()
            .uri("/api/calendars")
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .header(SHARING_CODE_HEADER, "some-code")
            .body(())
            .unwrap()
            .into_parts();

        let ctx = RequestContext::from_request_parts(&mut parts, &auth)
            .await
            .unwrap();

        assert_eq!(ctx.user_id, Some(user_id));
        assert_eq!(ctx.sharing_code.as_deref(), Some("some-code"));
    }

    #[tokio::test]
    async fn test_context_with_bad_token_is_anonymous() {
        let auth = AuthState::new(AuthConfig::new("test-secret"));
        let (mut parts, _) = Request::builder()
            .uri("/api/calendars")
            .header(AUTHORIZATION, "Bearer garbage")
            .body(())
            .unwrap()
            .into_parts();

        let ctx = RequestContext::from_request_parts(&mut parts, &auth)
            .await
            .unwrap();

        assert_eq!(ctx.user_id, None);
        assert_eq!(ctx.sharing_code, None);
    }
}
