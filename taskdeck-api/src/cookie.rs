/// Refresh token cookie handling
///
/// The refresh token travels only in an HttpOnly cookie scoped to `/`.
/// In production the cookie is `Secure; SameSite=None` so a frontend on a
/// different origin can send it; in development it is `SameSite=Lax`.

use axum::http::{header, HeaderMap};

/// Cookie name carrying the refresh token
pub const REFRESH_COOKIE: &str = "refreshToken";

/// Lifetime of the cookie, matching the refresh token (7 days)
pub const REFRESH_COOKIE_MAX_AGE: i64 = 7 * 24 * 60 * 60;

/// Builds the `Set-Cookie` value that stores a refresh token
pub fn refresh_cookie(token: &str, production: bool) -> String {
    build_cookie(token, REFRESH_COOKIE_MAX_AGE, production)
}

/// Builds the `Set-Cookie` value that deletes the refresh token
pub fn clear_refresh_cookie(production: bool) -> String {
    build_cookie("", 0, production)
}

fn build_cookie(value: &str, max_age: i64, production: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly",
        REFRESH_COOKIE, value, max_age
    );

    if production {
        cookie.push_str("; Secure; SameSite=None");
    } else {
        cookie.push_str("; SameSite=Lax");
    }

    cookie
}

/// Reads a cookie value from the request's `Cookie` headers
///
/// Returns `None` for a missing or empty cookie.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"'))
        .filter(|value| !value.is_empty())
}
