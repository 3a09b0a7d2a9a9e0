use actix_web::HttpRequest;
use actix_web::http::header;
use subtle::ConstantTimeEq;

use crate::errors::ProxyError;

fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

fn presented_token(authorization: &str) -> &str {
    let authorization = authorization.trim();
    authorization
        .strip_prefix("Bearer ")
        .or_else(|| authorization.strip_prefix("bearer "))
        .unwrap_or(authorization)
        .trim()
}

/// Checks the Authorization header against the configured key. With no key
/// configured every request is let through.
pub fn authorize(request: &HttpRequest, api_key: Option<&str>) -> Result<(), ProxyError> {
    let Some(api_key) = api_key else {
        return Ok(());
    };

    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(presented_token)
        .is_some_and(|token| constant_time_compare(token, api_key));

    if authorized {
        Ok(())
    } else {
        log::info!("rejected request with missing or incorrect API key");
        Err(ProxyError::AuthenticationError(
            "Incorrect API key provided.".to_string(),
        ))
    }
}
