//! Stores the session token issued by the session service in a private cookie.

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use time::{Duration, OffsetDateTime};

use crate::external::SessionToken;

pub(crate) const COOKIE_SESSION: &str = "session";
/// How long a session cookie lasts without "Remember me".
pub(crate) const DEFAULT_COOKIE_DURATION: Duration = Duration::hours(1);
/// How long a session cookie lasts with "Remember me".
pub(crate) const REMEMBER_ME_COOKIE_DURATION: Duration = Duration::days(7);

/// Add the session cookie to the cookie jar, expiring `duration` from now.
///
/// Returns the cookie jar with the cookie added.
pub(crate) fn set_session_cookie(
    jar: PrivateCookieJar,
    token: &SessionToken,
    duration: Duration,
) -> PrivateCookieJar {
    let expiry = OffsetDateTime::now_utc().saturating_add(duration);

    jar.add(
        Cookie::build((COOKIE_SESSION, token.as_str().to_owned()))
            .expires(expiry)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    )
}

/// Get the session token from the cookie jar, if there is one.
pub(crate) fn get_session_token(jar: &PrivateCookieJar) -> Option<SessionToken> {
    jar.get(COOKIE_SESSION)
        .map(|cookie| cookie.value().to_owned())
        .filter(|token| !token.is_empty() && token != "deleted")
        .map(SessionToken::new)
}

/// Set the session cookie to an invalid value and set its max age to zero, which should delete
/// the cookie on the client side.
pub(crate) fn invalidate_session_cookie(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.add(
        Cookie::build((COOKIE_SESSION, "deleted"))
            .expires(OffsetDateTime::UNIX_EPOCH)
            .max_age(Duration::ZERO)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    )
}
