//! The data packages and payment methods offered to customers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

/// The catalog key of a data package, e.g. "standard".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageId(String);

impl PackageId {
    /// Wrap a package ID string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The ID as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The catalog key of a payment method, e.g. "ewallet".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentMethodId(String);

impl PaymentMethodId {
    /// Wrap a payment method ID string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The ID as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaymentMethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A data quota that can be bought for a number of days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPackage {
    /// The catalog key.
    pub id: PackageId,
    /// The display name, e.g. "Standard".
    pub name: String,
    /// The quota in gigabytes.
    pub data_gb: u32,
    /// How many days the quota lasts.
    pub duration_days: u32,
    /// The price in rupiah.
    pub price: u64,
    /// Whether the package is highlighted as recommended.
    pub recommended: bool,
}

impl DataPackage {
    fn new(id: &str, name: &str, data_gb: u32, duration_days: u32, price: u64) -> Self {
        Self {
            id: PackageId::new(id),
            name: name.to_owned(),
            data_gb,
            duration_days,
            price,
            recommended: false,
        }
    }

    fn recommended(mut self) -> Self {
        self.recommended = true;
        self
    }

    /// The quota as shown to customers, e.g. "15GB".
    pub fn data_label(&self) -> String {
        format!("{}GB", self.data_gb)
    }

    /// The validity period as shown to customers, e.g. "30 days".
    pub fn duration_label(&self) -> String {
        match self.duration_days {
            1 => "1 day".to_owned(),
            days => format!("{days} days"),
        }
    }
}

/// A way of paying for a data package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentMethod {
    /// The catalog key.
    pub id: PaymentMethodId,
    /// The display name, e.g. "E-Wallet".
    pub name: String,
}

impl PaymentMethod {
    fn new(id: &str, name: &str) -> Self {
        Self {
            id: PaymentMethodId::new(id),
            name: name.to_owned(),
        }
    }
}

/// The packages and payment methods available for purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    packages: Vec<DataPackage>,
    payment_methods: Vec<PaymentMethod>,
}

impl Catalog {
    /// The package selected when the purchase page opens.
    pub const DEFAULT_PACKAGE: &str = "standard";
    /// The payment method selected when the purchase page opens.
    pub const DEFAULT_PAYMENT_METHOD: &str = "ewallet";

    /// The packages sold through the portal.
    pub fn builtin() -> Self {
        Self {
            packages: vec![
                DataPackage::new("basic", "Basic", 5, 7, 50_000),
                DataPackage::new("standard", "Standard", 15, 30, 100_000).recommended(),
                DataPackage::new("premium", "Premium", 30, 30, 150_000),
                DataPackage::new("power-user", "Power User", 200, 30, 250_000),
                DataPackage::new("ultimate-pro", "Ultimate Pro", 500, 30, 500_000),
            ],
            payment_methods: vec![
                PaymentMethod::new("ewallet", "E-Wallet"),
                PaymentMethod::new("creditcard", "Credit Card"),
                PaymentMethod::new("banktransfer", "Bank Transfer"),
            ],
        }
    }

    /// All packages in display order.
    pub fn packages(&self) -> &[DataPackage] {
        &self.packages
    }

    /// All payment methods in display order.
    pub fn payment_methods(&self) -> &[PaymentMethod] {
        &self.payment_methods
    }

    /// Look up a package by its ID.
    ///
    /// # Errors
    /// Returns [ValidationError::UnknownPackage] if no package has the ID.
    pub fn find_package(&self, id: &str) -> Result<&DataPackage, ValidationError> {
        self.packages
            .iter()
            .find(|package| package.id.as_str() == id)
            .ok_or_else(|| ValidationError::UnknownPackage(id.to_owned()))
    }

    /// Look up a payment method by its ID.
    ///
    /// # Errors
    /// Returns [ValidationError::UnknownPaymentMethod] if no method has the ID.
    pub fn find_payment_method(&self, id: &str) -> Result<&PaymentMethod, ValidationError> {
        self.payment_methods
            .iter()
            .find(|method| method.id.as_str() == id)
            .ok_or_else(|| ValidationError::UnknownPaymentMethod(id.to_owned()))
    }

    /// The package to preselect for `requested`, falling back to the
    /// default when the ID is missing or unknown.
    pub fn package_or_default(&self, requested: Option<&str>) -> Option<&DataPackage> {
        requested
            .and_then(|id| self.find_package(id).ok())
            .or_else(|| self.find_package(Self::DEFAULT_PACKAGE).ok())
            .or_else(|| self.packages.first())
    }

    /// The payment method to preselect for `requested`, falling back to the
    /// default when the ID is missing or unknown.
    pub fn payment_method_or_default(&self, requested: Option<&str>) -> Option<&PaymentMethod> {
        requested
            .and_then(|id| self.find_payment_method(id).ok())
            .or_else(|| self.find_payment_method(Self::DEFAULT_PAYMENT_METHOD).ok())
            .or_else(|| self.payment_methods.first())
    }

    /// The `limit` most expensive packages, most expensive first.
    pub fn upgrades(&self, limit: usize) -> Vec<&DataPackage> {
        let mut packages: Vec<&DataPackage> = self.packages.iter().collect();
        packages.sort_by(|a, b| b.price.cmp(&a.price));
        packages.truncate(limit);
        packages
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
