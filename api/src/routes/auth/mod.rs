//! Authentication endpoints.

pub mod login;
pub mod refresh;
pub mod revoke;
pub mod verify;

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse};

use am_core::services::auth::RequestContext;

use crate::dto::ErrorResponse;

/// Extracts the bearer token from the Authorization header.
pub(crate) fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// 401 for requests that need a bearer token and did not send one.
pub(crate) fn missing_bearer() -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse::new(
        "TOKEN_MISSING",
        "Authorization header with a bearer token is required",
    ))
}

/// Builds the request metadata recorded with issued tokens and audit entries.
pub(crate) fn request_context(
    req: &HttpRequest,
    device_name: Option<String>,
    device_fingerprint: Option<String>,
) -> RequestContext {
    RequestContext {
        device_name,
        device_fingerprint,
        source_ip: req.peer_addr().map(|addr| addr.ip().to_string()),
        user_agent: req
            .headers()
            .get(header::USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_bearer_token_extraction() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer abc.def.ghi"))
            .to_http_request();
        assert_eq!(bearer_token(&req), Some("abc.def.ghi"));
    }

    #[test]
    fn test_bearer_token_rejects_other_schemes() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Basic dXNlcjpwdw=="))
            .to_http_request();
        assert_eq!(bearer_token(&req), None);

        let req = TestRequest::default().to_http_request();
        assert_eq!(bearer_token(&req), None);
    }

    #[test]
    fn test_bearer_token_rejects_empty_value() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer "))
            .to_http_request();
        assert_eq!(bearer_token(&req), None);
    }

    #[test]
    fn test_request_context_captures_user_agent() {
        let req = TestRequest::default()
            .insert_header((header::USER_AGENT, "authmint-cli/1.0"))
            .to_http_request();
        let ctx = request_context(&req, Some("laptop".to_string()), None);
        assert_eq!(ctx.user_agent.as_deref(), Some("authmint-cli/1.0"));
        assert_eq!(ctx.device_name.as_deref(), Some("laptop"));
    }
}
