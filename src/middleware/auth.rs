use axum::Json;
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, StatusCode, request::Parts};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use subtle::ConstantTimeEq;

use crate::router::NavigatorState;

/// Ensure the inbound request carries the import key, when one is configured.
/// Accepts either:
/// - Header: `x-import-key: ...`
/// - Header: `Authorization: Bearer ...`
/// - Query string: `?key=...`
pub fn ensure_authorized(
    headers: &HeaderMap,
    query: Option<&str>,
    expected: Option<&str>,
) -> Result<(), Response> {
    let Some(expected) = expected else {
        return Ok(());
    };
    let is_expected =
        |candidate: &str| bool::from(candidate.as_bytes().ct_eq(expected.as_bytes()));

    // 1) header: x-import-key
    if let Some(hv) = headers.get("x-import-key").and_then(|v| v.to_str().ok())
        && is_expected(hv)
    {
        return Ok(());
    }

    // 2) header: Authorization: Bearer <key>
    if let Some(auth) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
        let auth = auth.trim();
        if let Some(token) = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
            && is_expected(token)
        {
            return Ok(());
        }
    }

    // 3) query: key=...
    if let Some(qs) = query {
        for (k, v) in url::form_urlencoded::parse(qs.as_bytes()) {
            if k == "key" && is_expected(v.as_ref()) {
                return Ok(());
            }
        }
    }

    Err((
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": "unauthorized", "reason": "invalid or missing key"})),
    )
        .into_response())
}

#[derive(Debug, Clone, Copy)]
pub struct RequireImportKey;

impl FromRequestParts<NavigatorState> for RequireImportKey {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &NavigatorState,
    ) -> Result<Self, Self::Rejection> {
        ensure_authorized(&parts.headers, parts.uri.query(), state.import_key())?;
        Ok(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn no_configured_key_lets_everything_through() {
        assert!(ensure_authorized(&HeaderMap::new(), None, None).is_ok());
    }

    #[test]
    fn key_accepted_from_header_bearer_or_query() {
        let mut headers = HeaderMap::new();
        headers.insert("x-import-key", HeaderValue::from_static("pwd"));
        assert!(ensure_authorized(&headers, None, Some("pwd")).is_ok());

        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer pwd"));
        assert!(ensure_authorized(&headers, None, Some("pwd")).is_ok());

        assert!(ensure_authorized(&HeaderMap::new(), Some("a=1&key=pwd"), Some("pwd")).is_ok());
    }

    #[test]
    fn wrong_or_missing_key_is_unauthorized() {
        let resp = ensure_authorized(&HeaderMap::new(), Some("key=nope"), Some("pwd")).unwrap_err();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let resp = ensure_authorized(&HeaderMap::new(), None, Some("pwd")).unwrap_err();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
