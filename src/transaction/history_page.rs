//! Defines the route handler for the transaction history page and its
//! filterable table.

use std::sync::Arc;

use axum::{
    extract::{FromRef, Query, State},
    response::{Html, IntoResponse, Response},
};
use axum_htmx::HxRequest;
use maud::{Markup, html};
use time::Date;

use crate::{
    AppState, endpoints,
    html::{
        BUTTON_SECONDARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE, FORM_SELECT_STYLE,
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
        format_rupiah, truncate_text,
    },
    navigation::{NavBar, View},
    timezone::Clock,
};

use super::{
    core::{Transaction, TransactionStatus, TransactionStore},
    export::ExportFormat,
    filter::{DateRangeFilter, FilterQuery, FilterState, StatusFilter, filter_transactions},
};

/// The max number of graphemes to display in the description column before
/// truncating and displaying ellipses.
const MAX_DESCRIPTION_GRAPHEMES: usize = 32;

/// The ID of the element swapped when a filter changes.
const TABLE_ID: &str = "transaction-table";

/// The state needed for the transaction history page.
#[derive(Debug, Clone)]
pub struct TransactionHistoryState {
    /// Where to get today's date from for the date range filter.
    pub clock: Clock,
    /// The transactions to filter.
    pub transactions: Arc<TransactionStore>,
}

impl FromRef<AppState> for TransactionHistoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            clock: state.clock.clone(),
            transactions: state.transactions.clone(),
        }
    }
}

/// Render the transaction history.
///
/// htmx requests, which are sent when a filter changes, only get the table.
pub async fn get_transaction_history_page(
    State(state): State<TransactionHistoryState>,
    HxRequest(is_htmx_request): HxRequest,
    Query(query): Query<FilterQuery>,
) -> Response {
    let filter = FilterState::from(query);
    let today = match state.clock.today() {
        Ok(today) => today,
        Err(error) => return error.into_response(),
    };

    let table = transaction_table(state.transactions.all(), &filter, today);

    if is_htmx_request {
        return Html(table.into_string()).into_response();
    }

    Html(transaction_history_view(&filter, &table).into_string()).into_response()
}

fn transaction_history_view(filter: &FilterState, table: &Markup) -> Markup {
    let nav_bar = NavBar::new(View::TransactionHistory).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-5xl space-y-6"
            {
                h2 class="text-2xl font-bold" { "Transaction History" }

                div class=(CARD_STYLE)
                {
                    div class="flex flex-col md:flex-row md:items-end md:justify-between gap-4"
                    {
                        (filter_form(filter))
                        (export_form())
                    }
                }

                div class=(CARD_STYLE) { (table) }
            }
        }
    };

    base(View::TransactionHistory.title(), &content)
}

fn filter_form(filter: &FilterState) -> Markup {
    html! {
        form
            id="transaction-filters"
            class="flex flex-col sm:flex-row gap-4"
            hx-get=(endpoints::TRANSACTION_HISTORY_VIEW)
            hx-trigger="change"
            hx-target={ "#" (TABLE_ID) }
            hx-swap="outerHTML"
            hx-push-url="true"
        {
            div
            {
                label for="status-filter" class=(FORM_LABEL_STYLE) { "Status" }
                select id="status-filter" name="status" class=(FORM_SELECT_STYLE)
                {
                    @for option in StatusFilter::ALL {
                        option
                            value=(option.as_query_value())
                            selected[option == filter.status]
                        {
                            (option.label())
                        }
                    }
                }
            }

            div
            {
                label for="date-filter" class=(FORM_LABEL_STYLE) { "Date Range" }
                select id="date-filter" name="range" class=(FORM_SELECT_STYLE)
                {
                    @for option in DateRangeFilter::ALL {
                        option
                            value=(option.as_query_value())
                            selected[option == filter.date_range]
                        {
                            (option.label())
                        }
                    }
                }
            }
        }
    }
}

fn export_form() -> Markup {
    html! {
        form
            id="export-form"
            class="flex gap-2"
            hx-post=(endpoints::EXPORT_API)
            hx-include="#transaction-filters"
            hx-target="#alert-container"
            hx-target-error="#alert-container"
        {
            @for format in [ExportFormat::Pdf, ExportFormat::Excel] {
                button
                    type="submit"
                    name="format"
                    value=(format.as_form_value())
                    class=(BUTTON_SECONDARY_STYLE)
                {
                    "Export " (format.label())
                }
            }
        }
    }
}

/// The table of transactions that pass `filter`, or a placeholder row if none do.
fn transaction_table(transactions: &[Transaction], filter: &FilterState, today: Date) -> Markup {
    let rows = filter_transactions(transactions, filter, today);

    html! {
        div id=(TABLE_ID) class="relative overflow-x-auto"
        {
            table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Transaction ID" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Status" }
                    }
                }

                tbody
                {
                    @for transaction in &rows {
                        (transaction_row(transaction))
                    }

                    @if rows.is_empty() {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td colspan="5" class="px-6 py-4 text-center"
                            {
                                "No transactions match the selected filters."
                            }
                        }
                    }
                }
            }
        }
    }
}

fn transaction_row(transaction: &Transaction) -> Markup {
    let (description, tooltip) = format_description(&transaction.description);

    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-id=(transaction.id)
        {
            td class=(TABLE_CELL_STYLE) { (transaction.id) }
            td class=(TABLE_CELL_STYLE) title=[tooltip] { (description) }
            td class=(TABLE_CELL_STYLE) { (transaction.date) }
            td class=(TABLE_CELL_STYLE) { (format_rupiah(transaction.amount)) }
            td class=(TABLE_CELL_STYLE)
            {
                span
                    class=(status_badge_style(transaction.status))
                    data-status=(transaction.status)
                {
                    (status_label(transaction.status))
                }
            }
        }
    }
}

/// Truncate long descriptions, returning the full text as a tooltip if truncated.
fn format_description(description: &str) -> (String, Option<&str>) {
    let truncated = truncate_text(description, MAX_DESCRIPTION_GRAPHEMES);

    if truncated == description {
        (truncated, None)
    } else {
        (truncated, Some(description))
    }
}

fn status_label(status: TransactionStatus) -> &'static str {
    match status {
        TransactionStatus::Success => "Success",
        TransactionStatus::Pending => "Pending",
        TransactionStatus::Failed => "Failed",
    }
}

fn status_badge_style(status: TransactionStatus) -> &'static str {
    match status {
        TransactionStatus::Success => {
            "px-2 py-1 text-xs font-semibold rounded-full bg-green-100 text-green-800"
        }
        TransactionStatus::Pending => {
            "px-2 py-1 text-xs font-semibold rounded-full bg-yellow-100 text-yellow-800"
        }
        TransactionStatus::Failed => {
            "px-2 py-1 text-xs font-semibold rounded-full bg-red-100 text-red-800"
        }
    }
}

#[cfg(test)]
mod history_page_tests {
    use std::sync::Arc;

    use axum::{
        extract::{Query, State},
        response::Response,
    };
    use axum_htmx::HxRequest;
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        endpoints,
        test_utils::{
            TEST_TODAY, assert_hx_endpoint, assert_status_ok, assert_valid_html, must_get_form,
            parse_html_document, parse_html_fragment, select_all_text,
        },
        timezone::Clock,
        transaction::{
            core::{Transaction, TransactionStatus, TransactionStore},
            filter::FilterQuery,
        },
    };

    use super::{TransactionHistoryState, get_transaction_history_page};

    fn sample_state() -> TransactionHistoryState {
        TransactionHistoryState {
            clock: Clock::Fixed(TEST_TODAY),
            transactions: Arc::new(TransactionStore::sample()),
        }
    }

    async fn get_page(
        state: TransactionHistoryState,
        is_htmx: bool,
        status: Option<&str>,
        range: Option<&str>,
    ) -> Response {
        get_transaction_history_page(
            State(state),
            HxRequest(is_htmx),
            Query(FilterQuery {
                status: status.map(str::to_owned),
                range: range.map(str::to_owned),
            }),
        )
        .await
    }

    #[track_caller]
    fn row_ids(html: &Html) -> Vec<String> {
        html.select(&Selector::parse("tr[data-transaction-id]").unwrap())
            .filter_map(|row| row.value().attr("data-transaction-id"))
            .map(str::to_owned)
            .collect()
    }

    #[track_caller]
    fn selected_value(html: &Html, select_id: &str) -> String {
        let selector = Selector::parse(&format!("#{select_id} option[selected]")).unwrap();

        html.select(&selector)
            .next()
            .and_then(|option| option.value().attr("value"))
            .unwrap_or_else(|| panic!("no option selected in #{select_id}"))
            .to_owned()
    }

    #[tokio::test]
    async fn default_filter_shows_last_30_days() {
        let response = get_page(sample_state(), false, None, None).await;

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert_eq!(row_ids(&html), ["TXN123456", "TXN123457"]);
        assert_eq!(selected_value(&html, "status-filter"), "all");
        assert_eq!(selected_value(&html, "date-filter"), "last30days");
    }

    #[tokio::test]
    async fn page_has_filter_and_export_forms() {
        let response = get_page(sample_state(), false, None, None).await;

        let html = parse_html_document(response).await;
        let filters = must_get_form(&html, "#transaction-filters");
        assert_hx_endpoint(&filters, endpoints::TRANSACTION_HISTORY_VIEW, "hx-get");
        let export = must_get_form(&html, "#export-form");
        assert_hx_endpoint(&export, endpoints::EXPORT_API, "hx-post");
        assert_eq!(
            select_all_text(&html, "#export-form button"),
            ["Export PDF", "Export Excel"]
        );
    }

    #[tokio::test]
    async fn htmx_request_gets_only_the_table() {
        let response = get_page(sample_state(), true, Some("success"), Some("all-time")).await;

        let html = parse_html_fragment(response).await;
        assert!(
            html.select(&Selector::parse("nav").unwrap()).next().is_none(),
            "fragment should not include the nav bar"
        );
        assert_eq!(
            row_ids(&html),
            [
                "TXN123456",
                "TXN123457",
                "TXN123459",
                "TXN123461",
                "TXN123462",
                "TXN123463"
            ]
        );
    }

    #[tokio::test]
    async fn rows_show_formatted_values() {
        let response = get_page(sample_state(), true, Some("pending"), Some("all-time")).await;

        let html = parse_html_fragment(response).await;
        assert_eq!(
            select_all_text(&html, "tr[data-transaction-id] td"),
            [
                "TXN123458",
                "5GB Data Package",
                "2025-07-05",
                "Rp50.000",
                "Pending"
            ]
        );
        let badge = html
            .select(&Selector::parse("span[data-status]").unwrap())
            .next()
            .unwrap();
        assert_eq!(badge.value().attr("data-status"), Some("pending"));
        assert!(badge.value().attr("class").unwrap().contains("yellow"));
    }

    #[tokio::test]
    async fn empty_result_shows_message() {
        let response = get_page(sample_state(), true, Some("pending"), Some("last7days")).await;

        let html = parse_html_fragment(response).await;
        assert!(row_ids(&html).is_empty());
        assert_eq!(
            select_all_text(&html, "tbody td"),
            ["No transactions match the selected filters."]
        );
    }

    #[tokio::test]
    async fn unknown_values_are_normalised() {
        let response = get_page(sample_state(), false, Some("refunded"), Some("forever")).await;

        let html = parse_html_document(response).await;
        assert_eq!(selected_value(&html, "status-filter"), "all");
        assert_eq!(selected_value(&html, "date-filter"), "all-time");
        assert_eq!(row_ids(&html).len(), 8);
    }

    #[tokio::test]
    async fn long_descriptions_are_truncated_with_tooltip() {
        let description = "Unlimited Night Owl Streaming Data Package Bundle";
        let state = TransactionHistoryState {
            clock: Clock::Fixed(date!(2025-06-15)),
            transactions: Arc::new(
                TransactionStore::new(vec![Transaction::new(
                    "T1",
                    description,
                    date!(2025-06-10),
                    75_000,
                    TransactionStatus::Failed,
                )])
                .unwrap(),
            ),
        };

        let response = get_page(state, true, None, None).await;

        let html = parse_html_fragment(response).await;
        let cell = html
            .select(&Selector::parse("td[title]").unwrap())
            .next()
            .expect("truncated cell should have a tooltip");
        assert_eq!(cell.value().attr("title"), Some(description));
        let text = cell.text().collect::<String>();
        assert!(text.ends_with("..."), "got {text:?}");
        assert_eq!(text.chars().count(), 32);
    }

    #[tokio::test]
    async fn invalid_timezone_renders_error_page() {
        let state = TransactionHistoryState {
            clock: Clock::system("Not/A_Zone"),
            transactions: Arc::new(TransactionStore::sample()),
        };

        let response = get_page(state, false, None, None).await;

        assert_eq!(response.status(), 500);
    }
}
