use axum::{extract::Request, http::header::AUTHORIZATION, middleware::Next, response::Response};

/// Candidate token pulled from the Authorization header. Present on every
/// request; extraction never rejects, it only annotates.
#[derive(Clone, Debug, Default)]
pub struct BearerToken(pub Option<String>);

/// Stage one of the gate. Runs on all routes, public ones included, so a
/// login handler can see the header without going through enforcement.
pub async fn token_extractor(mut request: Request, next: Next) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(strip_bearer);
    request.extensions_mut().insert(BearerToken(token));
    next.run(request).await
}

/// Case-insensitive `bearer ` prefix strip. Anything else, including a
/// bare scheme with no token, yields no candidate.
fn strip_bearer(header: &str) -> Option<String> {
    const SCHEME: &str = "bearer ";
    let prefix = header.get(..SCHEME.len())?;
    if prefix.eq_ignore_ascii_case(SCHEME) && header.len() > SCHEME.len() {
        Some(header[SCHEME.len()..].to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::strip_bearer;

    #[test]
    fn scheme_keyword_is_case_insensitive() {
        assert_eq!(strip_bearer("bearer abc").as_deref(), Some("abc"));
        assert_eq!(strip_bearer("Bearer abc").as_deref(), Some("abc"));
        assert_eq!(strip_bearer("BEARER abc").as_deref(), Some("abc"));
    }

    #[test]
    fn other_schemes_yield_no_candidate() {
        assert!(strip_bearer("Basic abc").is_none());
        assert!(strip_bearer("token abc").is_none());
        assert!(strip_bearer("").is_none());
    }

    #[test]
    fn bare_scheme_yields_no_candidate() {
        assert!(strip_bearer("bearer").is_none());
        assert!(strip_bearer("bearer ").is_none());
    }
}
