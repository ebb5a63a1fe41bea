//! The customer's transaction history: the transaction store, the status and
//! date range filters, the history page and exports.

mod core;
mod export;
mod filter;
mod history_page;

pub use core::{Transaction, TransactionId, TransactionStatus, TransactionStore};
pub use export::{ExportFormat, export_transactions_endpoint};
pub use filter::{
    DateRangeFilter, FilterState, StatusFilter, date_range_cutoff, filter_transactions,
};
pub use history_page::get_transaction_history_page;
