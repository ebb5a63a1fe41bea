//! Defines the endpoint for buying a data package.

use std::sync::Arc;

use axum::{
    Form,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    AppState, Error,
    alert::Alert,
    external::{BillingService, PurchaseOrder},
};

use super::catalog::Catalog;

/// The state needed to place an order.
#[derive(Clone)]
pub struct PurchaseState {
    /// The packages and payment methods that may be ordered.
    pub catalog: Arc<Catalog>,
    /// Receives the order.
    pub billing: Arc<dyn BillingService>,
}

impl FromRef<AppState> for PurchaseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            catalog: state.catalog.clone(),
            billing: state.collaborators.billing.clone(),
        }
    }
}

/// The selection submitted from the purchase page.
#[derive(Debug, Deserialize)]
pub struct PurchaseForm {
    /// The ID of the package to buy.
    pub package: String,
    /// The ID of the payment method.
    pub payment_method: String,
}

/// Place an order for the selected package with the billing service.
///
/// Unknown packages or payment methods are rejected without contacting the
/// billing service.
pub async fn purchase_endpoint(
    State(state): State<PurchaseState>,
    Form(form): Form<PurchaseForm>,
) -> Response {
    let selection = state.catalog.find_package(&form.package).and_then(|package| {
        state
            .catalog
            .find_payment_method(&form.payment_method)
            .map(|method| (package, method))
    });
    let (package, payment_method) = match selection {
        Ok(selection) => selection,
        Err(error) => return Error::from(error).into_alert_response(),
    };

    let order = PurchaseOrder {
        package_id: package.id.clone(),
        payment_method_id: payment_method.id.clone(),
    };

    match state.billing.purchase(&order) {
        Ok(confirmation) => {
            tracing::info!(
                "Placed order {} for package {}",
                confirmation.order_reference,
                package.id
            );

            Alert::Success {
                message: format!(
                    "Purchasing {} package with {}",
                    package.name, payment_method.name
                ),
                details: format!("Order reference: {}", confirmation.order_reference),
            }
            .into_response()
        }
        Err(error) => {
            tracing::error!("Could not place order for package {}: {error}", package.id);
            Error::from(error).into_alert_response()
        }
    }
}
