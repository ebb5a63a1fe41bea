//! DataNet is a self-service portal for a mobile data provider.
//!
//! This library provides a web server that directly serves HTML pages: a
//! dashboard with the customer's data usage, data package purchases, a
//! filterable transaction history, account settings, and the log-in and
//! registration pages.
//!
//! All data is held in memory. Purchases, exports, profile updates and
//! session handling are forwarded to the collaborator traits in [external],
//! which the host application implements.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod auth;
mod banner;
mod dashboard;
mod data_package;
mod endpoints;
mod error;
pub mod external;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod routing;
mod settings;
mod timezone;
mod transaction;
mod usage;
mod validation;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use banner::{ScheduledCallback, TransientBanner};
pub use dashboard::AccountOverview;
pub use data_package::{Catalog, DataPackage, PackageId, PaymentMethod, PaymentMethodId};
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use navigation::View;
pub use routing::build_router;
pub use settings::{CommunicationPreferences, PersonalInfo, PrivacyPreferences, Settings};
pub use timezone::Clock;
pub use transaction::{
    DateRangeFilter, ExportFormat, FilterState, StatusFilter, Transaction, TransactionId,
    TransactionStatus, TransactionStore, date_range_cutoff, filter_transactions,
};
pub use usage::{GAUGE_RADIUS, GaugeGeometry, UsageSnapshot, usage_ratio};
pub use validation::ValidationError;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
