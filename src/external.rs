//! Interfaces to the services the portal forwards side effects to.
//!
//! The portal does not implement billing, exports, profile storage or
//! sessions. Route handlers call these traits instead and report the result.
//! [Collaborators::logging] provides stand-ins that only log each request.

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use crate::{
    data_package::{PackageId, PaymentMethodId},
    settings::Settings,
    transaction::{ExportFormat, FilterState, Transaction},
};

/// A failure reported by, or while reaching, an external service.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ExternalServiceError {
    /// The service could not be reached.
    #[error("the {service} is unavailable")]
    Unavailable {
        /// The service that failed.
        service: &'static str,
    },

    /// The service handled the request and refused it.
    #[error("the {service} rejected the request: {reason}")]
    Rejected {
        /// The service that failed.
        service: &'static str,
        /// The reason given by the service.
        reason: String,
    },
}

impl ExternalServiceError {
    /// The name of the service that failed.
    pub fn service(&self) -> &'static str {
        match self {
            ExternalServiceError::Unavailable { service } => service,
            ExternalServiceError::Rejected { service, .. } => service,
        }
    }
}

/// The rows and format for an export of the transaction history.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    /// The requested file format.
    pub format: ExportFormat,
    /// The filter that produced `transactions`.
    pub filter: FilterState,
    /// The transactions currently shown to the user.
    pub transactions: Vec<Transaction>,
}

/// Produces PDF and spreadsheet exports of the transaction history.
pub trait ExportService: Send + Sync {
    /// Start an export. The portal does not wait for the file.
    fn export(&self, request: ExportRequest) -> Result<(), ExternalServiceError>;
}

/// A request to buy a data package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseOrder {
    /// The package being bought.
    pub package_id: PackageId,
    /// How the customer pays.
    pub payment_method_id: PaymentMethodId,
}

/// The billing service's acknowledgement of an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConfirmation {
    /// The reference the customer can quote to support.
    pub order_reference: String,
}

/// Places data package orders.
pub trait BillingService: Send + Sync {
    /// Place `order` and return its confirmation.
    fn purchase(&self, order: &PurchaseOrder) -> Result<OrderConfirmation, ExternalServiceError>;
}

/// Stores the customer's profile and preferences.
pub trait ProfileService: Send + Sync {
    /// Save validated settings. `new_password` is set when the customer
    /// asked to change their password.
    fn save_settings(
        &self,
        settings: &Settings,
        new_password: Option<&str>,
    ) -> Result<(), ExternalServiceError>;
}

/// A username and password pair entered on the log-in or registration page.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// The customer's username.
    pub username: String,
    /// The plain text password as entered.
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}

/// An opaque token issued by the session service after logging in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a token string issued by the session service.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The token as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Logs customers in and out and creates new accounts.
pub trait SessionService: Send + Sync {
    /// Check `credentials` and start a session.
    fn log_in(&self, credentials: &Credentials) -> Result<SessionToken, ExternalServiceError>;

    /// Create a new account.
    fn register(&self, credentials: &Credentials) -> Result<(), ExternalServiceError>;

    /// End the session identified by `token`, if any.
    fn log_out(&self, token: Option<&SessionToken>) -> Result<(), ExternalServiceError>;
}

/// The set of external services used by the route handlers.
#[derive(Clone)]
pub struct Collaborators {
    /// Receives export requests.
    pub export: Arc<dyn ExportService>,
    /// Receives purchase orders.
    pub billing: Arc<dyn BillingService>,
    /// Receives saved settings.
    pub profile: Arc<dyn ProfileService>,
    /// Handles log-in, registration and log-out.
    pub session: Arc<dyn SessionService>,
}

impl Collaborators {
    /// Collaborators that accept every request and log it.
    pub fn logging() -> Self {
        let stub = Arc::new(LoggingCollaborator::default());

        Self {
            export: stub.clone(),
            billing: stub.clone(),
            profile: stub.clone(),
            session: stub,
        }
    }
}

impl fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}

/// A stand-in for every external service that logs requests and always succeeds.
#[derive(Debug, Default)]
pub struct LoggingCollaborator {
    next_reference: AtomicU64,
}

impl LoggingCollaborator {
    fn next_reference(&self) -> u64 {
        self.next_reference.fetch_add(1, Ordering::Relaxed) + 1
    }
}

impl ExportService for LoggingCollaborator {
    fn export(&self, request: ExportRequest) -> Result<(), ExternalServiceError> {
        tracing::info!(
            "Export requested: {} with {} transactions (status: {}, range: {})",
            request.format.label(),
            request.transactions.len(),
            request.filter.status.as_query_value(),
            request.filter.date_range.as_query_value(),
        );

        Ok(())
    }
}

impl BillingService for LoggingCollaborator {
    fn purchase(&self, order: &PurchaseOrder) -> Result<OrderConfirmation, ExternalServiceError> {
        let order_reference = format!("ORD-{:06}", self.next_reference());
        tracing::info!(
            "Purchase requested: package {} paid with {} ({order_reference})",
            order.package_id,
            order.payment_method_id
        );

        Ok(OrderConfirmation { order_reference })
    }
}

impl ProfileService for LoggingCollaborator {
    fn save_settings(
        &self,
        settings: &Settings,
        new_password: Option<&str>,
    ) -> Result<(), ExternalServiceError> {
        tracing::info!(
            "Saving settings: {settings:?}, password changed: {}",
            new_password.is_some()
        );

        Ok(())
    }
}

impl SessionService for LoggingCollaborator {
    fn log_in(&self, credentials: &Credentials) -> Result<SessionToken, ExternalServiceError> {
        tracing::info!("Log in requested for {}", credentials.username);

        Ok(SessionToken::new(format!(
            "session-{:06}",
            self.next_reference()
        )))
    }

    fn register(&self, credentials: &Credentials) -> Result<(), ExternalServiceError> {
        tracing::info!("Registration requested for {}", credentials.username);

        Ok(())
    }

    fn log_out(&self, token: Option<&SessionToken>) -> Result<(), ExternalServiceError> {
        tracing::info!("Log out requested (session present: {})", token.is_some());

        Ok(())
    }
}
