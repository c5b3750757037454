//! Session cookie helpers.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "questlearn_session";

/// `Set-Cookie` value storing `token` for `max_age_secs`.
pub fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie =
        format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that removes the session cookie.
pub fn clear_session_cookie(secure: bool) -> String {
    session_cookie("", 0, secure)
}

/// Read the session token from the request's `Cookie` headers.
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn cookie_carries_flags() {
        let cookie = session_cookie("abc", 60, true);
        assert!(cookie.starts_with("questlearn_session=abc;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=60"));
        assert!(cookie.ends_with("; Secure"));
        assert!(!session_cookie("abc", 60, false).contains("Secure"));
    }

    #[test]
    fn clearing_expires_immediately() {
        assert!(clear_session_cookie(false).contains("Max-Age=0"));
    }

    #[test]
    fn token_found_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(
            COOKIE,
            HeaderValue::from_static("lang=en; questlearn_session=tok.en.sig"),
        );
        assert_eq!(session_token(&headers), Some("tok.en.sig"));
    }

    #[test]
    fn empty_or_missing_cookie_is_none() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_token(&headers), None);
        headers.insert(COOKIE, HeaderValue::from_static("questlearn_session="));
        assert_eq!(session_token(&headers), None);
    }
}
