//! The account summary shown on the dashboard.

use time::{Date, macros::date};

use crate::usage::UsageSnapshot;

/// The customer's usage, active package and balance.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountOverview {
    /// The name used in the greeting.
    pub customer_name: String,
    /// Data used out of the active package's quota.
    pub usage: UsageSnapshot,
    /// The name of the active data package.
    pub active_package: String,
    /// The last day the active package can be used.
    pub expires_on: Date,
    /// Prepaid balance in rupiah.
    pub balance: u64,
}

impl AccountOverview {
    /// The account shown when no backend is connected.
    pub fn sample() -> Self {
        Self {
            customer_name: "Budi Santoso".to_owned(),
            usage: UsageSnapshot::new(75.0, 100.0),
            active_package: "Ultimate 100GB".to_owned(),
            expires_on: date!(2024-12-20),
            balance: 150_000,
        }
    }
}
