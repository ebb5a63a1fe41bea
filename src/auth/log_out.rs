//! Log-out route handler that ends the session, invalidates the session cookie and redirects users.

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};

use crate::{AppState, endpoints, external::SessionService};

use super::cookie::{get_session_token, invalidate_session_cookie};

/// The state needed to log out.
#[derive(Clone)]
pub struct LogOutState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// Ends the session.
    pub session_service: Arc<dyn SessionService>,
}

impl FromRef<AppState> for LogOutState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            session_service: state.collaborators.session.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<LogOutState> for Key {
    fn from_ref(state: &LogOutState) -> Self {
        state.cookie_key.clone()
    }
}

/// Tell the session service to end the session, invalidate the session cookie
/// and redirect the client to the log-in page.
///
/// The session service is not waited on.
pub async fn get_log_out(State(state): State<LogOutState>, jar: PrivateCookieJar) -> Response {
    let token = get_session_token(&jar);
    let session_service = state.session_service.clone();

    tokio::task::spawn_blocking(move || match session_service.log_out(token.as_ref()) {
        Ok(()) => tracing::info!("Logged out (session present: {})", token.is_some()),
        Err(error) => tracing::error!("Could not end session: {error}"),
    });

    let jar = invalidate_session_cookie(jar);

    (jar, Redirect::to(endpoints::LOG_IN_VIEW)).into_response()
}
