//! The data package catalog and the purchase page.

mod catalog;
mod page;
mod purchase;

pub use catalog::{Catalog, DataPackage, PackageId, PaymentMethod, PaymentMethodId};
pub use page::{get_data_packages_page, get_package_summary};
pub use purchase::purchase_endpoint;
