//! Dashboard HTTP handler and view rendering.

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    response::{Html, IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState,
    data_package::{Catalog, DataPackage},
    html::{PAGE_CONTAINER_STYLE, base},
    navigation::{NavBar, View},
    transaction::{Transaction, TransactionStore},
};

use super::{
    account::AccountOverview,
    cards::{
        active_package_card, balance_card, recent_transactions_card, recommendations_card,
        usage_card,
    },
};

/// How many of the latest transactions to show.
const RECENT_TRANSACTION_COUNT: usize = 3;
/// How many upgrade packages to recommend.
const RECOMMENDATION_COUNT: usize = 2;

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The usage, package and balance to display.
    pub account: Arc<AccountOverview>,
    /// The source of the recent transactions.
    pub transactions: Arc<TransactionStore>,
    /// The source of the recommended packages.
    pub catalog: Arc<Catalog>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            account: state.account.clone(),
            transactions: state.transactions.clone(),
            catalog: state.catalog.clone(),
        }
    }
}

/// Display the customer's account overview.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Response {
    let recent = state.transactions.recent(RECENT_TRANSACTION_COUNT);
    let recommendations = state.catalog.upgrades(RECOMMENDATION_COUNT);

    Html(dashboard_view(&state.account, recent, &recommendations).into_string()).into_response()
}

fn dashboard_view(
    account: &AccountOverview,
    recent: &[Transaction],
    recommendations: &[&DataPackage],
) -> Markup {
    let nav_bar = NavBar::new(View::Dashboard).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-screen-xl space-y-6"
            {
                div
                {
                    h1 class="text-3xl font-bold" { "Welcome back, " (account.customer_name) }
                    p class="text-gray-600 dark:text-gray-400"
                    {
                        "Here's an overview of your data usage and account"
                    }
                }

                div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6"
                {
                    (usage_card(account))
                    (active_package_card(account))
                    (balance_card(account))
                    (recent_transactions_card(recent))
                    (recommendations_card(recommendations))
                }
            }
        }
    };

    base(View::Dashboard.title(), &content)
}
