//! Implements a struct that holds the state of the web server.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};
use time::Duration;

use crate::{
    auth::DEFAULT_COOKIE_DURATION, banner::TransientBanner, dashboard::AccountOverview,
    data_package::Catalog, external::Collaborators, settings::Settings, timezone::Clock,
    transaction::TransactionStore,
};

/// The state of the web server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,

    /// How long a session cookie lasts when "Remember me" is not ticked.
    pub cookie_duration: Duration,

    /// Where to get today's date from for the date range filters.
    pub clock: Clock,

    /// The customer's transactions.
    pub transactions: Arc<TransactionStore>,

    /// The usage, package and balance shown on the dashboard.
    pub account: Arc<AccountOverview>,

    /// The packages and payment methods available for purchase.
    pub catalog: Arc<Catalog>,

    /// The customer's current settings.
    pub settings: Arc<Mutex<Settings>>,

    /// The "settings saved" confirmation banner.
    pub saved_banner: TransientBanner,

    /// The external services that side effects are forwarded to.
    pub collaborators: Collaborators,
}

impl AppState {
    /// Create a new [AppState] with the built-in catalog and the default
    /// customer profile.
    pub fn new(
        cookie_secret: &str,
        clock: Clock,
        transactions: TransactionStore,
        collaborators: Collaborators,
    ) -> Self {
        Self {
            cookie_key: create_cookie_key(cookie_secret),
            cookie_duration: DEFAULT_COOKIE_DURATION,
            clock,
            transactions: Arc::new(transactions),
            account: Arc::new(AccountOverview::sample()),
            catalog: Arc::new(Catalog::builtin()),
            settings: Arc::new(Mutex::new(Settings::sample())),
            saved_banner: TransientBanner::default(),
            collaborators,
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Create a signing key for cookies from a `secret`s string.
pub fn create_cookie_key(secret: &str) -> Key {
    let hash = Sha512::digest(secret);

    Key::from(&hash)
}
