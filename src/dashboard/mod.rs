//! Dashboard module
//!
//! Provides an overview page showing the customer's data usage, active
//! package, balance, recent transactions and recommended upgrades.

mod account;
mod cards;
mod handlers;

pub use account::AccountOverview;
pub use handlers::get_dashboard_page;
