//! Card components for the dashboard.

use maud::{Markup, html};
use time::macros::format_description;

use crate::{
    data_package::DataPackage,
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, CARD_STYLE, LINK_STYLE, format_date_label, format_rupiah},
    transaction::Transaction,
    usage::{format_gigabytes, usage_gauge},
};

use super::account::AccountOverview;

const CARD_TITLE_STYLE: &str = "text-lg font-semibold mb-4";

pub(super) fn usage_card(account: &AccountOverview) -> Markup {
    html! {
        section id="usage-card" class=(CARD_STYLE)
        {
            h2 class=(CARD_TITLE_STYLE) { "Current Data Usage" }
            (usage_gauge(&account.usage))
        }
    }
}

pub(super) fn active_package_card(account: &AccountOverview) -> Markup {
    let expiry = account
        .expires_on
        .format(format_description!("[day]/[month]/[year]"))
        .unwrap_or_else(|_| account.expires_on.to_string());

    html! {
        section id="active-package-card" class=(CARD_STYLE)
        {
            h2 class=(CARD_TITLE_STYLE) { "Active Package" }

            div class="space-y-2"
            {
                p class="text-xl font-bold text-blue-600 dark:text-blue-400"
                {
                    (account.active_package)
                }
                p class="text-gray-600 dark:text-gray-300"
                {
                    (format_gigabytes(account.usage.remaining())) " remaining"
                }
                p class="text-sm text-gray-500 dark:text-gray-400"
                {
                    "Valid until: " (expiry)
                }
                a
                    href=(endpoints::DATA_PACKAGES_VIEW)
                    class={ "block mt-4 text-center " (BUTTON_PRIMARY_STYLE) }
                {
                    "Manage Package"
                }
            }
        }
    }
}

pub(super) fn balance_card(account: &AccountOverview) -> Markup {
    html! {
        section id="balance-card" class=(CARD_STYLE)
        {
            h2 class=(CARD_TITLE_STYLE) { "Account Balance" }
            p class="text-3xl font-bold text-green-600 dark:text-green-400"
            {
                (format_rupiah(account.balance))
            }
        }
    }
}

pub(super) fn recent_transactions_card(transactions: &[Transaction]) -> Markup {
    html! {
        section id="recent-transactions" class={ (CARD_STYLE) " md:col-span-2" }
        {
            div class="flex justify-between items-center mb-4"
            {
                h2 class="text-lg font-semibold" { "Recent Transactions" }
                a href=(endpoints::TRANSACTION_HISTORY_VIEW) class=(LINK_STYLE) { "View All" }
            }

            @if transactions.is_empty() {
                p class="text-gray-500 dark:text-gray-400" { "No transactions yet." }
            }

            ul class="space-y-3"
            {
                @for transaction in transactions {
                    li
                        class="flex justify-between items-center py-2 border-b
                        border-gray-100 dark:border-gray-700 last:border-0"
                        data-transaction-id=(transaction.id)
                    {
                        div
                        {
                            p class="font-medium" { (transaction.id) }
                            p class="text-sm text-gray-500 dark:text-gray-400"
                            {
                                (format_date_label(transaction.date))
                            }
                        }
                        p class="font-semibold" { (format_rupiah(transaction.amount)) }
                    }
                }
            }
        }
    }
}

pub(super) fn recommendations_card(packages: &[&DataPackage]) -> Markup {
    html! {
        section id="recommendations" class=(CARD_STYLE)
        {
            h2 class=(CARD_TITLE_STYLE) { "Recommended for You" }

            div class="space-y-4"
            {
                @for package in packages {
                    div
                        class="border border-gray-200 dark:border-gray-700 rounded-lg p-4"
                        data-package-id=(package.id)
                    {
                        p class="font-semibold" { (package.name) }
                        p class="text-sm text-gray-600 dark:text-gray-300"
                        {
                            (package.data_label()) " | " (package.duration_label())
                        }
                        div class="flex justify-between items-center mt-2"
                        {
                            span class="font-bold text-blue-600 dark:text-blue-400"
                            {
                                (format_rupiah(package.price))
                            }
                            a
                                href={ (endpoints::DATA_PACKAGES_VIEW) "?package=" (package.id) }
                                class="px-3 py-1 bg-blue-600 text-white text-sm rounded hover:bg-blue-700"
                            {
                                "Buy Now"
                            }
                        }
                    }
                }
            }
        }
    }
}
