//! Session-cookie authentication extractors.
//!
//! The session token travels in the `senpai_session` cookie. Extractors
//! resolve it against the server-side session store:
//!
//! - [`CurrentUser`]: any valid session
//! - [`AdminUser`]: a valid session whose user holds the admin handle
//!
//! Both reject with the uniform 401 body on any failure.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, HeaderMap};

use senpai_types::error::AuthError;
use senpai_types::user::User;

use crate::http::error::AppError;
use crate::state::AppState;

/// Cookie carrying the opaque session token.
pub const SESSION_COOKIE: &str = "senpai_session";

/// Extract the session token from the request's Cookie header.
pub(crate) fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

/// Authenticated request marker. Extracting this resolves the session
/// cookie to its user.
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token =
            session_token(&parts.headers).ok_or(AppError::Auth(AuthError::Unauthorized))?;
        let user = state.auth_service.session_user(&token).await?;
        Ok(CurrentUser(user))
    }
}

/// Admin request marker. Extracting this resolves the session cookie and
/// requires the admin handle.
pub struct AdminUser(pub User);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token =
            session_token(&parts.headers).ok_or(AppError::Auth(AuthError::Unauthorized))?;
        let user = state.auth_service.authorize_admin(&token).await?;
        Ok(AdminUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn token_is_extracted_from_the_session_cookie() {
        let headers = headers_with_cookie("senpai_session=abc123");
        assert_eq!(session_token(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn token_is_found_among_other_cookies() {
        let headers = headers_with_cookie("theme=dark; senpai_session=abc123; lang=en");
        assert_eq!(session_token(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn missing_cookie_yields_none() {
        assert!(session_token(&HeaderMap::new()).is_none());
        let headers = headers_with_cookie("theme=dark");
        assert!(session_token(&headers).is_none());
    }

    #[test]
    fn similarly_named_cookie_does_not_match() {
        let headers = headers_with_cookie("senpai_session_old=abc123");
        assert!(session_token(&headers).is_none());
    }
}
