//! Defines the route handlers for the data package purchase page and the
//! selected package summary.

use std::sync::Arc;

use axum::{
    extract::{FromRef, Query, State},
    response::{Html, IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE, FORM_RADIO_INPUT_STYLE,
        FORM_RADIO_LABEL_STYLE, PAGE_CONTAINER_STYLE, base, format_rupiah, loading_spinner,
    },
    navigation::{NavBar, View},
};

use super::catalog::{Catalog, DataPackage, PaymentMethod};

/// The state needed for the purchase page.
#[derive(Debug, Clone)]
pub struct DataPackagesState {
    /// The packages and payment methods on offer.
    pub catalog: Arc<Catalog>,
}

impl FromRef<AppState> for DataPackagesState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            catalog: state.catalog.clone(),
        }
    }
}

/// The current selection on the purchase page.
#[derive(Debug, Default, Deserialize)]
pub struct SelectionQuery {
    /// The selected package ID.
    pub package: Option<String>,
    /// The selected payment method ID.
    pub payment_method: Option<String>,
}

/// Render the purchase page with the requested package preselected.
///
/// Missing or unknown IDs fall back to the default selection.
pub async fn get_data_packages_page(
    State(state): State<DataPackagesState>,
    Query(query): Query<SelectionQuery>,
) -> Response {
    let catalog = &state.catalog;
    let (Some(package), Some(payment_method)) = (
        catalog.package_or_default(query.package.as_deref()),
        catalog.payment_method_or_default(query.payment_method.as_deref()),
    ) else {
        tracing::error!("The catalog has no packages or payment methods");
        return crate::Error::NotFound.into_response();
    };

    Html(data_packages_view(catalog, package, payment_method).into_string()).into_response()
}

/// Render the summary of the selected package and payment method.
pub async fn get_package_summary(
    State(state): State<DataPackagesState>,
    Query(query): Query<SelectionQuery>,
) -> Response {
    let catalog = &state.catalog;

    match (
        catalog.package_or_default(query.package.as_deref()),
        catalog.payment_method_or_default(query.payment_method.as_deref()),
    ) {
        (Some(package), Some(payment_method)) => {
            Html(package_summary(package, payment_method).into_string()).into_response()
        }
        _ => crate::Error::NotFound.into_response(),
    }
}

fn data_packages_view(
    catalog: &Catalog,
    selected_package: &DataPackage,
    selected_payment_method: &PaymentMethod,
) -> Markup {
    let nav_bar = NavBar::new(View::DataPackages).into_html();
    let spinner = loading_spinner();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            form
                id="purchase-form"
                class="w-full max-w-4xl space-y-6"
                hx-post=(endpoints::PURCHASE_API)
                hx-target="#alert-container"
                hx-target-error="#alert-container"
                hx-indicator="#indicator"
            {
                h2 class="text-2xl font-bold" { "Purchase Data Package" }

                div
                    hx-get=(endpoints::PACKAGE_SUMMARY_API)
                    hx-trigger="change"
                    hx-include="#purchase-form"
                    hx-target="#package-summary"
                    hx-swap="outerHTML"
                    class="space-y-6"
                {
                    fieldset
                    {
                        legend class="sr-only" { "Data package" }

                        div class="grid grid-cols-1 md:grid-cols-3 gap-6"
                        {
                            @for package in catalog.packages() {
                                (package_option(package, package.id == selected_package.id))
                            }
                        }
                    }

                    (package_summary(selected_package, selected_payment_method))

                    fieldset class=(CARD_STYLE)
                    {
                        legend class="text-lg font-semibold mb-4" { "Payment Method" }

                        div class="flex flex-col gap-3"
                        {
                            @for method in catalog.payment_methods() {
                                (payment_method_option(method, method.id == selected_payment_method.id))
                            }
                        }
                    }
                }

                button type="submit" id="indicator" class=(BUTTON_PRIMARY_STYLE)
                {
                    span class="htmx-indicator" { (spinner) }
                    "Confirm Purchase"
                }
            }
        }
    };

    base(View::DataPackages.title(), &content)
}

fn package_option(package: &DataPackage, is_selected: bool) -> Markup {
    let input_id = format!("package-{}", package.id);

    html! {
        div class="relative flex"
        {
            input
                type="radio"
                name="package"
                id=(input_id)
                value=(package.id)
                checked[is_selected]
                required
                class={ "sr-only " (FORM_RADIO_INPUT_STYLE) };

            label for=(input_id) class={ "block p-6 " (FORM_RADIO_LABEL_STYLE) }
            {
                @if package.recommended {
                    span
                        class="absolute -top-3 left-1/2 -translate-x-1/2 bg-blue-500
                        text-white text-xs px-3 py-1 rounded-full"
                    {
                        "Recommended"
                    }
                }

                span class="block text-lg font-semibold mb-2" { (package.name) }
                span class="block text-3xl font-bold text-blue-600 mb-2" { (package.data_label()) }
                span class="block text-gray-600 mb-4" { (package.duration_label()) }
                span class="block text-xl font-semibold" { (format_rupiah(package.price)) }
            }
        }
    }
}

fn payment_method_option(method: &PaymentMethod, is_selected: bool) -> Markup {
    let input_id = format!("payment-{}", method.id);

    html! {
        div class="flex items-center gap-3"
        {
            input
                type="radio"
                name="payment_method"
                id=(input_id)
                value=(method.id)
                checked[is_selected]
                required
                class=(FORM_RADIO_INPUT_STYLE);

            label for=(input_id) class=(FORM_RADIO_LABEL_STYLE) { (method.name) }
        }
    }
}

fn package_summary(package: &DataPackage, payment_method: &PaymentMethod) -> Markup {
    html! {
        section id="package-summary" class=(CARD_STYLE) data-package-id=(package.id)
        {
            h3 class="text-lg font-semibold mb-4" { "Selected Package" }

            div class="flex justify-between items-center"
            {
                div
                {
                    p class="text-xl font-semibold" { (package.name) " Package" }
                    p class="text-gray-600 dark:text-gray-400"
                    {
                        (package.data_label()) " | " (package.duration_label())
                    }
                    p class=(FORM_LABEL_STYLE) { "Paying with " (payment_method.name) }
                }

                p class="text-2xl font-bold text-blue-600" { (format_rupiah(package.price)) }
            }
        }
    }
}
